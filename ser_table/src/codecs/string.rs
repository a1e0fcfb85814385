use std::{any, fmt};

use super::length::{read_blob, write_blob};
use crate::{
	codec::unhandled, Bindings, BuildError, Codec, Error, GeneratedRead, GeneratedWrite, LimitKind,
	ReadRoutine, Serialize, Shape, ShapeKind, WriteRoutine,
};

/// Trait for UTF-8 strings.
///
/// Encoded like a sequence of bytes: `u32` length prefix (`0` for absent),
/// then the UTF-8 bytes. Length is checked against the string ceilings of the
/// active [`Limits`](crate::Limits).
///
/// Implemented for `String` and `Option<String>`.
pub trait Text: Serialize {
	/// String, or `None` if absent.
	fn text(&self) -> Option<&str>;

	/// Create from string, or `None` if absent.
	fn from_text(text: Option<String>) -> Self;
}

impl Text for String {
	#[inline]
	fn text(&self) -> Option<&str> {
		Some(self.as_str())
	}

	#[inline]
	fn from_text(text: Option<String>) -> Self {
		text.unwrap_or_default()
	}
}

impl Text for Option<String> {
	#[inline]
	fn text(&self) -> Option<&str> {
		self.as_deref()
	}

	#[inline]
	fn from_text(text: Option<String>) -> Self {
		text
	}
}

impl Serialize for String {
	#[inline]
	fn shape() -> Shape {
		Shape::string::<Self>()
	}

	#[inline]
	fn nullable_shape() -> Shape {
		Shape::string::<Option<Self>>()
	}
}

/// Shape of a [`Text`].
#[derive(Clone)]
pub struct StringShape {
	writer: fn() -> GeneratedWrite,
	reader: fn() -> GeneratedRead,
}

impl fmt::Debug for StringShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("StringShape")
	}
}

impl Shape {
	/// Create shape of a string.
	pub fn string<S: Text>() -> Shape {
		Shape::new::<S>(ShapeKind::String(StringShape {
			writer: writer::<S>,
			reader: reader::<S>,
		}))
	}
}

fn writer<S: Text>() -> GeneratedWrite {
	WriteRoutine::<S>::bounded(|value, writer, limits| {
		let bytes = value.text().map(str::as_bytes);
		write_blob(writer, bytes, LimitKind::String, limits, any::type_name::<S>())
	})
	.into()
}

fn reader<S: Text>() -> GeneratedRead {
	ReadRoutine::<S>::bounded(|reader, limits| {
		let type_name = any::type_name::<S>();
		let text = match read_blob(reader, LimitKind::String, limits, type_name)? {
			Some(bytes) => Some(
				String::from_utf8(bytes).map_err(|err| Error::invalid_data(type_name, err.to_string()))?,
			),
			None => None,
		};
		Ok(S::from_text(text))
	})
	.into()
}

/// Codec for [`Text`]s. Generates bounded routines.
#[derive(Copy, Clone, Debug, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
	fn name(&self) -> &'static str {
		"string"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(matches!(shape.kind(), ShapeKind::String(_)))
	}

	fn dependent_types(&self, _shape: &Shape) -> Vec<Shape> {
		vec![]
	}

	fn generate_writer(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::String(string) => Ok((string.writer)()),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::String(string) => Ok((string.reader)()),
			_ => Err(unhandled(shape)),
		}
	}
}
