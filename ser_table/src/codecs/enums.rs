use std::fmt;

use crate::{
	codec::unhandled, composite, Bindings, BuildError, Codec, Composite, Field, GeneratedRead,
	GeneratedWrite, Shape, ShapeKind, Variant,
};

/// Shape of an enum.
#[derive(Clone)]
pub struct EnumShape {
	variants: Vec<Variant>,
	writer: fn(&Bindings<'_>) -> Result<GeneratedWrite, BuildError>,
	reader: fn(&Bindings<'_>) -> Result<GeneratedRead, BuildError>,
}

impl EnumShape {
	#[inline]
	pub fn variants(&self) -> &[Variant] {
		&self.variants
	}
}

impl fmt::Debug for EnumShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("EnumShape").field(&self.variants).finish()
	}
}

impl Shape {
	/// Create shape of an enum with `variants`.
	pub fn enumeration<T: Composite>(variants: Vec<Variant>) -> Shape {
		Shape::new::<T>(ShapeKind::Enum(EnumShape {
			variants,
			writer: composite::writer::<T>,
			reader: composite::reader::<T>,
		}))
	}
}

/// Codec for enums.
///
/// Encoded as `u32` variant index, followed by the variant's fields in order.
#[derive(Copy, Clone, Debug, Default)]
pub struct EnumCodec;

impl Codec for EnumCodec {
	fn name(&self) -> &'static str {
		"enum"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(matches!(shape.kind(), ShapeKind::Enum(_)))
	}

	fn dependent_types(&self, shape: &Shape) -> Vec<Shape> {
		match shape.kind() {
			ShapeKind::Enum(enumeration) => enumeration
				.variants
				.iter()
				.flat_map(Variant::fields)
				.map(Field::shape)
				.collect(),
			_ => vec![],
		}
	}

	fn generate_writer(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::Enum(enumeration) => (enumeration.writer)(bindings),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::Enum(enumeration) => (enumeration.reader)(bindings),
			_ => Err(unhandled(shape)),
		}
	}
}
