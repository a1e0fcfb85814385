use std::fmt;

use crate::{
	codec::unhandled, Bindings, BuildError, Codec, GeneratedRead, GeneratedWrite, ReadRoutine,
	Serialize, Shape, ShapeKind, WriteRoutine,
};

impl<T: Serialize> Serialize for Box<T> {
	#[inline]
	fn shape() -> Shape {
		Shape::boxed::<T>()
	}
}

/// Shape of a `Box<T>`.
#[derive(Clone)]
pub struct BoxedShape {
	inner: fn() -> Shape,
	writer: fn(&Bindings<'_>) -> Result<GeneratedWrite, BuildError>,
	reader: fn(&Bindings<'_>) -> Result<GeneratedRead, BuildError>,
}

impl BoxedShape {
	/// Shape of `T`.
	#[inline]
	pub fn inner(&self) -> Shape {
		(self.inner)()
	}
}

impl fmt::Debug for BoxedShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("BoxedShape").field(&self.inner().name()).finish()
	}
}

impl Shape {
	/// Create shape of `Box<T>`.
	pub fn boxed<T: Serialize>() -> Shape {
		Shape::new::<Box<T>>(ShapeKind::Boxed(BoxedShape {
			inner: T::shape,
			writer: writer::<T>,
			reader: reader::<T>,
		}))
	}
}

/// Codec for `Box<T>`. Encoded exactly as `T`.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoxCodec;

impl Codec for BoxCodec {
	fn name(&self) -> &'static str {
		"box"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(matches!(shape.kind(), ShapeKind::Boxed(_)))
	}

	fn dependent_types(&self, shape: &Shape) -> Vec<Shape> {
		match shape.kind() {
			ShapeKind::Boxed(boxed) => vec![boxed.inner()],
			_ => vec![],
		}
	}

	fn generate_writer(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::Boxed(boxed) => (boxed.writer)(bindings),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(
		&self,
		shape: &Shape,
		bindings: &Bindings<'_>,
	) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::Boxed(boxed) => (boxed.reader)(bindings),
			_ => Err(unhandled(shape)),
		}
	}
}

fn writer<T: Serialize>(bindings: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
	let inner = bindings.slot::<T>()?;
	Ok(
		WriteRoutine::<Box<T>>::dispatched(move |value, writer, engine, limits| {
			engine.write_at(inner, &**value, writer, limits)
		})
		.into(),
	)
}

fn reader<T: Serialize>(bindings: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
	let inner = bindings.slot::<T>()?;
	Ok(
		ReadRoutine::<Box<T>>::dispatched(move |reader, engine, limits| {
			engine.read_at(inner, reader, limits).map(Box::new)
		})
		.into(),
	)
}
