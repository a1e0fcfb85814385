use std::{
	fmt,
	io::{Read, Write},
};

use crate::{
	codec::unhandled, composite, Bindings, BuildError, Codec, Composite, Engine, Error, Field,
	GeneratedRead, GeneratedWrite, Limits, Serialize, Shape, ShapeKind, Slot,
};

/// Shape of a struct or tuple.
#[derive(Clone)]
pub struct RecordShape {
	fields: Vec<Field>,
	writer: fn(&Bindings<'_>) -> Result<GeneratedWrite, BuildError>,
	reader: fn(&Bindings<'_>) -> Result<GeneratedRead, BuildError>,
}

impl RecordShape {
	#[inline]
	pub fn fields(&self) -> &[Field] {
		&self.fields
	}
}

impl fmt::Debug for RecordShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RecordShape").field(&self.fields).finish()
	}
}

impl Shape {
	/// Create shape of a struct or tuple with `fields`.
	pub fn record<T: Composite>(fields: Vec<Field>) -> Shape {
		Shape::new::<T>(ShapeKind::Record(RecordShape {
			fields,
			writer: composite::writer::<T>,
			reader: composite::reader::<T>,
		}))
	}
}

/// Codec for structs and tuples.
///
/// Fields are written in order with no framing. Each field goes through the
/// engine's table, so records may contain themselves (via a sequence, option
/// or box).
#[derive(Copy, Clone, Debug, Default)]
pub struct RecordCodec;

impl Codec for RecordCodec {
	fn name(&self) -> &'static str {
		"record"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(matches!(shape.kind(), ShapeKind::Record(_)))
	}

	fn dependent_types(&self, shape: &Shape) -> Vec<Shape> {
		match shape.kind() {
			ShapeKind::Record(record) => record.fields.iter().map(Field::shape).collect(),
			_ => vec![],
		}
	}

	fn generate_writer(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::Record(record) => (record.writer)(bindings),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::Record(record) => (record.reader)(bindings),
			_ => Err(unhandled(shape)),
		}
	}
}

macro_rules! impl_tuples {
	($(($($ty:ident $index:tt),+)),+ $(,)?) => {
		$(
			impl<$($ty: Serialize),+> Serialize for ($($ty,)+) {
				fn shape() -> Shape {
					Shape::record::<Self>(vec![$(Field::new::<$ty>(stringify!($index))),+])
				}
			}

			impl<$($ty: Serialize),+> Composite for ($($ty,)+) {
				type Slots = ($(Slot<$ty>,)+);

				fn bind(bindings: &Bindings<'_>) -> Result<Self::Slots, BuildError> {
					Ok(($(bindings.slot::<$ty>()?,)+))
				}

				fn write_fields(
					&self,
					slots: &Self::Slots,
					writer: &mut dyn Write,
					engine: &Engine,
					limits: &Limits,
				) -> Result<(), Error> {
					$(engine.write_at(slots.$index, &self.$index, writer, limits)?;)+
					Ok(())
				}

				fn read_fields(
					slots: &Self::Slots,
					reader: &mut dyn Read,
					engine: &Engine,
					limits: &Limits,
				) -> Result<Self, Error> {
					Ok(($(engine.read_at(slots.$index, reader, limits)?,)+))
				}
			}
		)+
	};
}

impl_tuples!(
	(A 0, B 1),
	(A 0, B 1, C 2),
	(A 0, B 1, C 2, D 3),
);
