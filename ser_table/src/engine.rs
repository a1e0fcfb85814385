use std::{
	any::{self, Any, TypeId},
	collections::{HashMap, VecDeque},
	fmt,
	io::{Read, Write},
};

use crate::{
	codecs, Bindings, BuildError, CallFlags, Codec, Error, Limits, ReadRoutine, Serialize, Shape,
	Slot, WriteRoutine,
};

/// Table entry for one type: its routines and their calling conventions.
///
/// Created once while an [`Engine`] is built, and immutable afterwards.
pub struct TypeDescriptor {
	id: TypeId,
	name: &'static str,
	codec: &'static str,
	writer_flags: CallFlags,
	reader_flags: CallFlags,
	writer: Box<dyn Any + Send + Sync>,
	reader: Box<dyn Any + Send + Sync>,
}

impl TypeDescriptor {
	#[inline]
	pub fn id(&self) -> TypeId {
		self.id
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Name of codec which generated the routines.
	#[inline]
	pub fn codec(&self) -> &'static str {
		self.codec
	}

	#[inline]
	pub fn writer_flags(&self) -> CallFlags {
		self.writer_flags
	}

	#[inline]
	pub fn reader_flags(&self) -> CallFlags {
		self.reader_flags
	}

	/// Returns `true` if both routines are self-contained.
	#[inline]
	pub fn is_direct(&self) -> bool {
		self.writer_flags.is_direct() && self.reader_flags.is_direct()
	}

	#[inline]
	fn writer<T: 'static>(&self) -> Option<&WriteRoutine<T>> {
		self.writer.downcast_ref()
	}

	#[inline]
	fn reader<T: 'static>(&self) -> Option<&ReadRoutine<T>> {
		self.reader.downcast_ref()
	}
}

impl fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDescriptor")
			.field("name", &self.name)
			.field("codec", &self.codec)
			.field("writer_flags", &self.writer_flags)
			.field("reader_flags", &self.reader_flags)
			.finish()
	}
}

/// Builder for an [`Engine`].
///
/// Collects codecs and root types. [`build`](EngineBuilder::build) discovers
/// every type reachable from the roots and generates routines for each.
pub struct EngineBuilder {
	codecs: Vec<Box<dyn Codec>>,
	roots: Vec<Shape>,
}

/// A type found during discovery, and the codec which claimed it.
struct Discovered<'c> {
	shape: Shape,
	codec: &'c dyn Codec,
}

impl EngineBuilder {
	/// Create builder with the built-in codecs.
	pub fn new() -> Self {
		Self {
			codecs: codecs::builtin(),
			roots: Vec::new(),
		}
	}

	/// Create builder with no codecs.
	pub fn empty() -> Self {
		Self {
			codecs: Vec::new(),
			roots: Vec::new(),
		}
	}

	/// Add a codec.
	pub fn codec<C: Codec>(mut self, codec: C) -> Self {
		self.codecs.push(Box::new(codec));
		self
	}

	/// Add a root type.
	pub fn root<T: Serialize>(self) -> Self {
		self.root_shape(T::shape())
	}

	/// Add a root type by its shape.
	pub fn root_shape(mut self, shape: Shape) -> Self {
		self.roots.push(shape);
		self
	}

	/// Build the [`Engine`].
	///
	/// Fails if any reachable type is claimed by no codec or by more than one,
	/// or if a codec rejects a type's shape.
	pub fn build(self) -> Result<Engine, BuildError> {
		self.try_build().map_err(|err| {
			tracing::warn!(error = %err, "Failed to build serialization engine");
			err
		})
	}

	fn try_build(&self) -> Result<Engine, BuildError> {
		let (discovered, index) = self.discover()?;
		let engine = Engine::generate(&discovered, index)?;
		tracing::debug!(
			types = engine.len(),
			roots = self.roots.len(),
			"Built serialization engine"
		);
		Ok(engine)
	}

	/// Find all types reachable from roots.
	///
	/// Each type is recorded before its dependencies are queued, so every type
	/// is visited once, and cycles terminate.
	fn discover(&self) -> Result<(Vec<Discovered<'_>>, HashMap<TypeId, usize>), BuildError> {
		let mut discovered = Vec::new();
		let mut index = HashMap::new();
		let mut worklist = self.roots.iter().cloned().collect::<VecDeque<_>>();

		while let Some(shape) = worklist.pop_front() {
			if index.contains_key(&shape.id()) {
				continue;
			}

			let codec = self.find_codec(&shape)?;
			index.insert(shape.id(), discovered.len());
			worklist.extend(codec.dependent_types(&shape));

			tracing::debug!(
				type_name = shape.name(),
				codec = codec.name(),
				"Discovered type"
			);
			discovered.push(Discovered { shape, codec });
		}

		Ok((discovered, index))
	}

	/// Find the one codec which handles a type.
	fn find_codec(&self, shape: &Shape) -> Result<&dyn Codec, BuildError> {
		let mut matched: Vec<&dyn Codec> = Vec::new();
		for codec in &self.codecs {
			if codec.handles(shape)? {
				matched.push(codec.as_ref());
			}
		}

		match matched.as_slice() {
			[codec] => Ok(*codec),
			[] => Err(BuildError::NoCodec {
				type_name: shape.name(),
			}),
			_ => Err(BuildError::Ambiguous {
				type_name: shape.name(),
				codecs: matched.iter().map(|codec| codec.name()).collect(),
			}),
		}
	}
}

impl Default for EngineBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Serialization engine.
///
/// Holds a table of write and read routines for every type reachable from a
/// set of root types. The table is built once, and is read-only afterwards.
/// `Engine` is `Send + Sync`, so one engine can serve any number of threads.
///
/// # Example
///
/// ```
/// use ser_table::{Engine, Limits};
///
/// let engine = Engine::builder().root::<Vec<u32>>().build().unwrap();
///
/// let bytes = engine.to_vec(&vec![1u32, 2, 3]).unwrap();
/// assert_eq!(bytes[..4], [4, 0, 0, 0]);
/// assert_eq!(engine.from_slice::<Vec<u32>>(&bytes).unwrap(), [1, 2, 3]);
///
/// let limits = Limits::default().with_collection_limits(2, 2);
/// assert!(engine.to_vec_with(&vec![1u32, 2, 3], &limits).unwrap_err().is_size());
/// ```
pub struct Engine {
	table: Vec<TypeDescriptor>,
	index: HashMap<TypeId, usize>,
}

impl Engine {
	/// Create an [`EngineBuilder`] with the built-in codecs.
	pub fn builder() -> EngineBuilder {
		EngineBuilder::new()
	}

	/// Build an engine with built-in codecs and a single root type.
	pub fn for_root<T: Serialize>() -> Result<Engine, BuildError> {
		Self::builder().root::<T>().build()
	}

	/// Generate routines for all discovered types.
	///
	/// Slots for all types exist before any routine is generated, so routines
	/// can bind to types whose own routines come later.
	fn generate(
		discovered: &[Discovered<'_>],
		index: HashMap<TypeId, usize>,
	) -> Result<Engine, BuildError> {
		let bindings = Bindings::new(&index);

		let mut table = Vec::with_capacity(discovered.len());
		for Discovered { shape, codec } in discovered {
			let writer = codec.generate_writer(shape, &bindings)?;
			let reader = codec.generate_reader(shape, &bindings)?;
			if writer.type_id() != shape.id() || reader.type_id() != shape.id() {
				return Err(BuildError::RoutineMismatch {
					codec: codec.name(),
					type_name: shape.name(),
				});
			}

			table.push(TypeDescriptor {
				id: shape.id(),
				name: shape.name(),
				codec: codec.name(),
				writer_flags: writer.flags(),
				reader_flags: reader.flags(),
				writer: writer.into_routine(),
				reader: reader.into_routine(),
			});
		}

		Ok(Engine { table, index })
	}

	/// Number of types in table.
	#[inline]
	pub fn len(&self) -> usize {
		self.table.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Returns `true` if `T` is in table.
	#[inline]
	pub fn contains<T: 'static>(&self) -> bool {
		self.index.contains_key(&TypeId::of::<T>())
	}

	/// Get descriptor for `T`.
	pub fn descriptor<T: 'static>(&self) -> Option<&TypeDescriptor> {
		self
			.index
			.get(&TypeId::of::<T>())
			.map(|&index| &self.table[index])
	}

	/// All descriptors, in discovery order.
	pub fn descriptors(&self) -> &[TypeDescriptor] {
		&self.table
	}

	/// Get slot for `T`.
	pub fn slot<T: 'static>(&self) -> Result<Slot<T>, Error> {
		self
			.index
			.get(&TypeId::of::<T>())
			.map(|&index| Slot::new(index))
			.ok_or(Error::Unregistered {
				type_name: any::type_name::<T>(),
			})
	}

	/// Get write routine in `slot`.
	#[inline]
	pub fn write_routine<T: 'static>(&self, slot: Slot<T>) -> Result<&WriteRoutine<T>, Error> {
		self
			.table
			.get(slot.index())
			.and_then(|descriptor| descriptor.writer::<T>())
			.ok_or(Error::Unregistered {
				type_name: any::type_name::<T>(),
			})
	}

	/// Get read routine in `slot`.
	#[inline]
	pub fn read_routine<T: 'static>(&self, slot: Slot<T>) -> Result<&ReadRoutine<T>, Error> {
		self
			.table
			.get(slot.index())
			.and_then(|descriptor| descriptor.reader::<T>())
			.ok_or(Error::Unregistered {
				type_name: any::type_name::<T>(),
			})
	}

	/// Write a value with the routine in `slot`.
	///
	/// For use by routines calling back into the table.
	#[inline]
	pub fn write_at<T: 'static>(
		&self,
		slot: Slot<T>,
		value: &T,
		writer: &mut dyn Write,
		limits: &Limits,
	) -> Result<(), Error> {
		self.write_routine(slot)?.call(value, writer, self, limits)
	}

	/// Read a value with the routine in `slot`.
	///
	/// For use by routines calling back into the table.
	#[inline]
	pub fn read_at<T: 'static>(
		&self,
		slot: Slot<T>,
		reader: &mut dyn Read,
		limits: &Limits,
	) -> Result<T, Error> {
		self.read_routine(slot)?.call(reader, self, limits)
	}

	/// Serialize a value, with no size limits.
	pub fn serialize<T: Serialize, W: Write>(&self, writer: &mut W, value: &T) -> Result<(), Error> {
		self.serialize_with(writer, value, Limits::unbounded())
	}

	/// Serialize a value, subject to `limits`.
	pub fn serialize_with<T: Serialize, W: Write>(
		&self,
		writer: &mut W,
		value: &T,
		limits: &Limits,
	) -> Result<(), Error> {
		let slot = self.slot::<T>()?;
		self.write_at(slot, value, writer, limits)
	}

	/// Deserialize a value, with no size limits.
	pub fn deserialize<T: Serialize, R: Read>(&self, reader: &mut R) -> Result<T, Error> {
		self.deserialize_with(reader, Limits::unbounded())
	}

	/// Deserialize a value, subject to `limits`.
	pub fn deserialize_with<T: Serialize, R: Read>(
		&self,
		reader: &mut R,
		limits: &Limits,
	) -> Result<T, Error> {
		let slot = self.slot::<T>()?;
		self.read_at(slot, reader, limits)
	}

	/// Serialize a value to a `Vec<u8>`, with no size limits.
	pub fn to_vec<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, Error> {
		self.to_vec_with(value, Limits::unbounded())
	}

	/// Serialize a value to a `Vec<u8>`, subject to `limits`.
	pub fn to_vec_with<T: Serialize>(&self, value: &T, limits: &Limits) -> Result<Vec<u8>, Error> {
		let mut out = Vec::new();
		self.serialize_with(&mut out, value, limits)?;
		Ok(out)
	}

	/// Deserialize a value from bytes, with no size limits.
	///
	/// Any bytes after the value are ignored.
	pub fn from_slice<T: Serialize>(&self, mut bytes: &[u8]) -> Result<T, Error> {
		self.deserialize(&mut bytes)
	}

	/// Deserialize a value from bytes, subject to `limits`.
	///
	/// Any bytes after the value are ignored.
	pub fn from_slice_with<T: Serialize>(&self, mut bytes: &[u8], limits: &Limits) -> Result<T, Error> {
		self.deserialize_with(&mut bytes, limits)
	}
}

impl fmt::Debug for Engine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Engine").field("table", &self.table).finish()
	}
}
