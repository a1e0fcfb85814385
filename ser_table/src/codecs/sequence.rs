use std::fmt;

use super::length::{decode_length, encode_length, reserve};
use crate::{
	codec::unhandled, Bindings, BuildError, Codec, GeneratedRead, GeneratedWrite, LimitKind,
	ReadRoutine, Serialize, Shape, ShapeKind, WriteRoutine,
};

/// Trait for variable-length homogeneous collections.
///
/// Encoded as a `u32` length prefix followed by each element in order.
/// Prefix `0` means the sequence is absent, prefix `n + 1` means it has `n`
/// elements.
///
/// Implemented for `Vec<T>` and `Option<Vec<T>>`. An absent sequence read into
/// a `Vec<T>` is empty.
pub trait Sequence: Serialize {
	type Element: Serialize;

	/// Number of dimensions. Only one-dimensional sequences can be serialized.
	const RANK: usize = 1;

	/// Elements, or `None` if sequence is absent.
	fn elements(&self) -> Option<&[Self::Element]>;

	/// Create from elements, or `None` if sequence is absent.
	fn from_elements(elements: Option<Vec<Self::Element>>) -> Self;
}

impl<T: Serialize> Sequence for Vec<T> {
	type Element = T;

	#[inline]
	fn elements(&self) -> Option<&[T]> {
		Some(self.as_slice())
	}

	#[inline]
	fn from_elements(elements: Option<Vec<T>>) -> Self {
		elements.unwrap_or_default()
	}
}

impl<T: Serialize> Sequence for Option<Vec<T>> {
	type Element = T;

	#[inline]
	fn elements(&self) -> Option<&[T]> {
		self.as_deref()
	}

	#[inline]
	fn from_elements(elements: Option<Vec<T>>) -> Self {
		elements
	}
}

impl<T: Serialize> Serialize for Vec<T> {
	#[inline]
	fn shape() -> Shape {
		Shape::sequence::<Self>()
	}

	#[inline]
	fn nullable_shape() -> Shape {
		Shape::sequence::<Option<Self>>()
	}
}

/// Shape of a [`Sequence`].
#[derive(Clone)]
pub struct SequenceShape {
	rank: usize,
	element: fn() -> Shape,
	writer: fn(&Bindings<'_>) -> Result<GeneratedWrite, BuildError>,
	reader: fn(&Bindings<'_>) -> Result<GeneratedRead, BuildError>,
}

impl SequenceShape {
	#[inline]
	pub fn rank(&self) -> usize {
		self.rank
	}

	/// Shape of elements.
	#[inline]
	pub fn element(&self) -> Shape {
		(self.element)()
	}
}

impl fmt::Debug for SequenceShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SequenceShape")
			.field("rank", &self.rank)
			.field("element", &self.element().name())
			.finish()
	}
}

impl Shape {
	/// Create shape of a sequence.
	pub fn sequence<S: Sequence>() -> Shape {
		Shape::new::<S>(ShapeKind::Sequence(SequenceShape {
			rank: S::RANK,
			element: S::Element::shape,
			writer: writer::<S>,
			reader: reader::<S>,
		}))
	}
}

/// Codec for [`Sequence`]s.
///
/// Depends on `u32` for the length prefix, and on the element type.
///
/// Length is checked against the collection ceilings of the active
/// [`Limits`](crate::Limits). When writing, a sequence over the ceiling writes
/// nothing at all. When reading, a declared length over the ceiling fails
/// before any storage is allocated, and before any element is read.
#[derive(Copy, Clone, Debug, Default)]
pub struct SequenceCodec;

impl Codec for SequenceCodec {
	fn name(&self) -> &'static str {
		"sequence"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		match shape.kind() {
			ShapeKind::Sequence(seq) if seq.rank != 1 => Err(BuildError::MultiDimensional {
				type_name: shape.name(),
				rank: seq.rank,
			}),
			ShapeKind::Sequence(_) => Ok(true),
			_ => Ok(false),
		}
	}

	fn dependent_types(&self, shape: &Shape) -> Vec<Shape> {
		match shape.kind() {
			ShapeKind::Sequence(seq) => vec![Shape::of::<u32>(), seq.element()],
			_ => vec![],
		}
	}

	fn generate_writer(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::Sequence(seq) => (seq.writer)(bindings),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::Sequence(seq) => (seq.reader)(bindings),
			_ => Err(unhandled(shape)),
		}
	}
}

fn writer<S: Sequence>(bindings: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
	let prefix_slot = bindings.slot::<u32>()?;
	let element_slot = bindings.slot::<S::Element>()?;
	let type_name = std::any::type_name::<S>();

	Ok(
		WriteRoutine::<S>::dispatched(move |value, writer, engine, limits| {
			// Resolve everything which can fail before writing anything
			let element = engine.write_routine(element_slot)?;
			let elements = value.elements();
			let prefix = encode_length(
				elements.map(<[S::Element]>::len),
				LimitKind::Collection,
				limits,
				type_name,
			)?;

			engine.write_at(prefix_slot, &prefix, writer, limits)?;
			match elements {
				Some(elements) => element.write_all(elements, writer, engine, limits),
				None => Ok(()),
			}
		})
		.into(),
	)
}

fn reader<S: Sequence>(bindings: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
	let prefix_slot = bindings.slot::<u32>()?;
	let element_slot = bindings.slot::<S::Element>()?;
	let type_name = std::any::type_name::<S>();

	Ok(
		ReadRoutine::<S>::dispatched(move |reader, engine, limits| {
			let element = engine.read_routine(element_slot)?;
			let prefix = engine.read_at(prefix_slot, reader, limits)?;
			let len = match decode_length(prefix, LimitKind::Collection, limits, type_name)? {
				Some(len) => len,
				None => return Ok(S::from_elements(None)),
			};

			let mut elements = reserve(len, type_name)?;
			element.read_into(&mut elements, len, reader, engine, limits)?;
			Ok(S::from_elements(Some(elements)))
		})
		.into(),
	)
}
