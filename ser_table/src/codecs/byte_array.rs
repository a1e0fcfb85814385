use std::{any, fmt};

use bytes::Bytes;

use super::length::{read_blob, write_blob};
use crate::{
	codec::unhandled, Bindings, BuildError, Codec, GeneratedRead, GeneratedWrite, LimitKind,
	ReadRoutine, Serialize, Shape, ShapeKind, WriteRoutine,
};

/// Trait for raw byte arrays.
///
/// Encoded as `u32` length prefix (`0` for absent), then the bytes verbatim.
/// Length is checked against the bytes ceilings of the active
/// [`Limits`](crate::Limits), not the collection ceilings.
///
/// Implemented for [`Bytes`] and `Option<Bytes>`. `Vec<u8>` is a
/// [`Sequence`](super::Sequence) like any other `Vec`.
pub trait ByteArray: Serialize {
	/// Bytes, or `None` if absent.
	fn bytes(&self) -> Option<&[u8]>;

	/// Create from bytes, or `None` if absent.
	fn from_bytes(bytes: Option<Vec<u8>>) -> Self;
}

impl ByteArray for Bytes {
	#[inline]
	fn bytes(&self) -> Option<&[u8]> {
		Some(&self[..])
	}

	#[inline]
	fn from_bytes(bytes: Option<Vec<u8>>) -> Self {
		bytes.map(Bytes::from).unwrap_or_default()
	}
}

impl ByteArray for Option<Bytes> {
	#[inline]
	fn bytes(&self) -> Option<&[u8]> {
		self.as_deref()
	}

	#[inline]
	fn from_bytes(bytes: Option<Vec<u8>>) -> Self {
		bytes.map(Bytes::from)
	}
}

impl Serialize for Bytes {
	#[inline]
	fn shape() -> Shape {
		Shape::bytes::<Self>()
	}

	#[inline]
	fn nullable_shape() -> Shape {
		Shape::bytes::<Option<Self>>()
	}
}

/// Shape of a [`ByteArray`].
#[derive(Clone)]
pub struct BytesShape {
	writer: fn() -> GeneratedWrite,
	reader: fn() -> GeneratedRead,
}

impl fmt::Debug for BytesShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("BytesShape")
	}
}

impl Shape {
	/// Create shape of a byte array.
	pub fn bytes<B: ByteArray>() -> Shape {
		Shape::new::<B>(ShapeKind::Bytes(BytesShape {
			writer: writer::<B>,
			reader: reader::<B>,
		}))
	}
}

fn writer<B: ByteArray>() -> GeneratedWrite {
	WriteRoutine::<B>::bounded(|value, writer, limits| {
		write_blob(writer, value.bytes(), LimitKind::Bytes, limits, any::type_name::<B>())
	})
	.into()
}

fn reader<B: ByteArray>() -> GeneratedRead {
	ReadRoutine::<B>::bounded(|reader, limits| {
		let bytes = read_blob(reader, LimitKind::Bytes, limits, any::type_name::<B>())?;
		Ok(B::from_bytes(bytes))
	})
	.into()
}

/// Codec for [`ByteArray`]s. Generates bounded routines.
#[derive(Copy, Clone, Debug, Default)]
pub struct BytesCodec;

impl Codec for BytesCodec {
	fn name(&self) -> &'static str {
		"bytes"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(matches!(shape.kind(), ShapeKind::Bytes(_)))
	}

	fn dependent_types(&self, _shape: &Shape) -> Vec<Shape> {
		vec![]
	}

	fn generate_writer(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::Bytes(bytes) => Ok((bytes.writer)()),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::Bytes(bytes) => Ok((bytes.reader)()),
			_ => Err(unhandled(shape)),
		}
	}
}
