use std::{
	any::{self, TypeId},
	collections::HashMap,
};

use crate::{BuildError, GeneratedRead, GeneratedWrite, Shape, Slot};

/// Trait for pluggable codecs.
///
/// An [`Engine`] holds a set of codecs. While building, it asks each codec
/// whether it [`handles`](Codec::handles) each discovered type. Exactly one
/// codec must claim every type. The claiming codec then declares the types its
/// routines depend on, and generates the routines themselves.
///
/// The built-in codecs cover primitives, sequences, strings, byte arrays,
/// `Option`, `Box`, tuples, and derived structs and enums. Implement `Codec`
/// to support types with an [opaque](Shape::opaque) shape.
///
/// # Example
///
/// ```
/// use std::io::{Read, Write};
/// use ser_table::{
/// 	Bindings, BuildError, Codec, Engine, Error, GeneratedRead, GeneratedWrite, Primitive,
/// 	ReadRoutine, Serialize, Shape, WriteRoutine,
/// };
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f32);
///
/// impl Serialize for Celsius {
/// 	fn shape() -> Shape {
/// 		Shape::opaque::<Self>()
/// 	}
/// }
///
/// /// Stores temperatures as tenths of a degree.
/// struct CelsiusCodec;
///
/// fn write_celsius(value: &Celsius, writer: &mut dyn Write) -> Result<(), Error> {
/// 	((value.0 * 10.0).round() as i16).write_direct(writer)
/// }
///
/// fn read_celsius(reader: &mut dyn Read) -> Result<Celsius, Error> {
/// 	Ok(Celsius(i16::read_direct(reader)? as f32 / 10.0))
/// }
///
/// impl Codec for CelsiusCodec {
/// 	fn name(&self) -> &'static str {
/// 		"celsius"
/// 	}
///
/// 	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
/// 		Ok(shape.is::<Celsius>())
/// 	}
///
/// 	fn dependent_types(&self, _shape: &Shape) -> Vec<Shape> {
/// 		vec![]
/// 	}
///
/// 	fn generate_writer(&self, _: &Shape, _: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
/// 		Ok(WriteRoutine::<Celsius>::Direct(write_celsius).into())
/// 	}
///
/// 	fn generate_reader(&self, _: &Shape, _: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
/// 		Ok(ReadRoutine::<Celsius>::Direct(read_celsius).into())
/// 	}
/// }
///
/// let engine = Engine::builder()
/// 	.codec(CelsiusCodec)
/// 	.root::<Vec<Celsius>>()
/// 	.build()
/// 	.unwrap();
///
/// let temps = vec![Celsius(21.5), Celsius(-3.0)];
/// let bytes = engine.to_vec(&temps).unwrap();
/// assert_eq!(engine.from_slice::<Vec<Celsius>>(&bytes).unwrap(), temps);
/// ```
///
/// [`Engine`]: crate::Engine
pub trait Codec: Send + Sync + 'static {
	/// Name of codec, for diagnostics.
	fn name(&self) -> &'static str;

	/// Whether this codec handles the type.
	///
	/// Must return an error, not `false`, for a shape this codec recognises but
	/// cannot support.
	fn handles(&self, shape: &Shape) -> Result<bool, BuildError>;

	/// Types which this type's routines depend on.
	///
	/// Only called for shapes this codec handles.
	fn dependent_types(&self, shape: &Shape) -> Vec<Shape>;

	/// Generate routine writing the type.
	///
	/// Only called for shapes this codec handles. Routines of dependent types
	/// may not have been generated yet, but their [`Slot`]s are available from
	/// `bindings`.
	fn generate_writer(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedWrite, BuildError>;

	/// Generate routine reading the type.
	///
	/// Same conditions as [`generate_writer`](Codec::generate_writer).
	fn generate_reader(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedRead, BuildError>;
}

/// Slots of all discovered types, available while routines are generated.
pub struct Bindings<'a> {
	slots: &'a HashMap<TypeId, usize>,
}

impl<'a> Bindings<'a> {
	pub(crate) fn new(slots: &'a HashMap<TypeId, usize>) -> Self {
		Self { slots }
	}

	/// Get slot of type `T`.
	///
	/// Fails if `T` was not discovered, which means a codec did not declare
	/// `T` as a dependent type.
	pub fn slot<T: 'static>(&self) -> Result<Slot<T>, BuildError> {
		self
			.slots
			.get(&TypeId::of::<T>())
			.map(|&index| Slot::new(index))
			.ok_or(BuildError::Unbound {
				type_name: any::type_name::<T>(),
			})
	}

	/// Returns `true` if type has been discovered.
	pub fn contains(&self, shape: &Shape) -> bool {
		self.slots.contains_key(&shape.id())
	}
}

/// Error for a codec asked to generate routines for a shape it doesn't handle.
pub(crate) fn unhandled(shape: &Shape) -> BuildError {
	BuildError::NoCodec {
		type_name: shape.name(),
	}
}
