use std::{any, fmt};

use crate::{
	codec::unhandled, Bindings, BuildError, Codec, Error, GeneratedRead, GeneratedWrite, Primitive,
	ReadRoutine, Serialize, Shape, ShapeKind, WriteRoutine,
};

/// `Option<T>` takes whatever shape `T` provides for it.
///
/// Length-prefixed types (`Vec`, `String`, `Bytes`) encode `None` as the
/// absent length prefix. All other types use [`NullableCodec`].
impl<T: Serialize> Serialize for Option<T> {
	#[inline]
	fn shape() -> Shape {
		T::nullable_shape()
	}
}

/// Shape of an `Option<T>` encoded with a presence tag.
#[derive(Clone)]
pub struct NullableShape {
	inner: fn() -> Shape,
	writer: fn(&Bindings<'_>) -> Result<GeneratedWrite, BuildError>,
	reader: fn(&Bindings<'_>) -> Result<GeneratedRead, BuildError>,
}

impl NullableShape {
	/// Shape of `T`.
	#[inline]
	pub fn inner(&self) -> Shape {
		(self.inner)()
	}
}

impl fmt::Debug for NullableShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("NullableShape").field(&self.inner().name()).finish()
	}
}

impl Shape {
	/// Create shape of `Option<T>`, encoded with a presence tag.
	pub fn nullable<T: Serialize>() -> Shape {
		Shape::new::<Option<T>>(ShapeKind::Nullable(NullableShape {
			inner: T::shape,
			writer: writer::<T>,
			reader: reader::<T>,
		}))
	}
}

/// Codec for `Option<T>`.
///
/// Encoded as a `u8` tag, `0` for `None` or `1` for `Some`, followed by the
/// value if present.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullableCodec;

impl Codec for NullableCodec {
	fn name(&self) -> &'static str {
		"nullable"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(matches!(shape.kind(), ShapeKind::Nullable(_)))
	}

	fn dependent_types(&self, shape: &Shape) -> Vec<Shape> {
		match shape.kind() {
			ShapeKind::Nullable(nullable) => vec![nullable.inner()],
			_ => vec![],
		}
	}

	fn generate_writer(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::Nullable(nullable) => (nullable.writer)(bindings),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::Nullable(nullable) => (nullable.reader)(bindings),
			_ => Err(unhandled(shape)),
		}
	}
}

fn writer<T: Serialize>(bindings: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
	let inner = bindings.slot::<T>()?;
	Ok(
		WriteRoutine::<Option<T>>::dispatched(move |value, writer, engine, limits| match value {
			None => 0u8.write_direct(writer),
			Some(value) => {
				1u8.write_direct(writer)?;
				engine.write_at(inner, value, writer, limits)
			}
		})
		.into(),
	)
}

fn reader<T: Serialize>(bindings: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
	let inner = bindings.slot::<T>()?;
	Ok(
		ReadRoutine::<Option<T>>::dispatched(move |reader, engine, limits| {
			match u8::read_direct(reader)? {
				0 => Ok(None),
				1 => engine.read_at(inner, reader, limits).map(Some),
				tag => Err(Error::invalid_data(
					any::type_name::<Option<T>>(),
					format!("invalid presence tag {}", tag),
				)),
			}
		})
		.into(),
	)
}
