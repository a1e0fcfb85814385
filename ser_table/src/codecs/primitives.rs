use std::{
	fmt,
	io::{Read, Write},
	mem,
};

use crate::{
	codec::unhandled, Bindings, BuildError, Codec, Error, GeneratedRead, GeneratedWrite,
	ReadRoutine, Serialize, Shape, ShapeKind, WriteRoutine,
};

/// Fixed-width types with direct routines.
///
/// Direct routines need neither the engine nor limits, so other codecs can
/// call them inline (e.g. for length prefixes) rather than through the table.
///
/// All numbers are little-endian.
pub trait Primitive: Copy + Send + Sync + 'static {
	const KIND: PrimitiveKind;

	fn write_direct(&self, writer: &mut dyn Write) -> Result<(), Error>;

	fn read_direct(reader: &mut dyn Read) -> Result<Self, Error>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
	U8,
	U16,
	U32,
	U64,
	U128,
	I8,
	I16,
	I32,
	I64,
	I128,
	F32,
	F64,
	Bool,
	Char,
	Unit,
}

impl PrimitiveKind {
	/// Encoded size in bytes.
	pub const fn width(self) -> usize {
		match self {
			PrimitiveKind::Unit => 0,
			PrimitiveKind::U8 | PrimitiveKind::I8 | PrimitiveKind::Bool => 1,
			PrimitiveKind::U16 | PrimitiveKind::I16 => 2,
			PrimitiveKind::U32 | PrimitiveKind::I32 | PrimitiveKind::F32 | PrimitiveKind::Char => 4,
			PrimitiveKind::U64 | PrimitiveKind::I64 | PrimitiveKind::F64 => 8,
			PrimitiveKind::U128 | PrimitiveKind::I128 => 16,
		}
	}
}

/// Shape of a [`Primitive`].
#[derive(Clone)]
pub struct PrimitiveShape {
	kind: PrimitiveKind,
	writer: fn() -> GeneratedWrite,
	reader: fn() -> GeneratedRead,
}

impl PrimitiveShape {
	#[inline]
	pub fn kind(&self) -> PrimitiveKind {
		self.kind
	}
}

impl fmt::Debug for PrimitiveShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("PrimitiveShape").field(&self.kind).finish()
	}
}

fn writer<P: Primitive>() -> GeneratedWrite {
	WriteRoutine::<P>::Direct(P::write_direct).into()
}

fn reader<P: Primitive>() -> GeneratedRead {
	ReadRoutine::<P>::Direct(P::read_direct).into()
}

impl Shape {
	/// Create shape of a primitive.
	pub fn primitive<P: Primitive>() -> Shape {
		Shape::new::<P>(ShapeKind::Primitive(PrimitiveShape {
			kind: P::KIND,
			writer: writer::<P>,
			reader: reader::<P>,
		}))
	}
}

/// Codec for [`Primitive`]s. Generates direct routines.
#[derive(Copy, Clone, Debug, Default)]
pub struct PrimitiveCodec;

impl Codec for PrimitiveCodec {
	fn name(&self) -> &'static str {
		"primitive"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(matches!(shape.kind(), ShapeKind::Primitive(_)))
	}

	fn dependent_types(&self, _shape: &Shape) -> Vec<Shape> {
		vec![]
	}

	fn generate_writer(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
		match shape.kind() {
			ShapeKind::Primitive(prim) => Ok((prim.writer)()),
			_ => Err(unhandled(shape)),
		}
	}

	fn generate_reader(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
		match shape.kind() {
			ShapeKind::Primitive(prim) => Ok((prim.reader)()),
			_ => Err(unhandled(shape)),
		}
	}
}

macro_rules! impl_numbers {
	($($ty:ident => $kind:ident),* $(,)?) => {
		$(
			impl Primitive for $ty {
				const KIND: PrimitiveKind = PrimitiveKind::$kind;

				#[inline]
				fn write_direct(&self, writer: &mut dyn Write) -> Result<(), Error> {
					writer.write_all(&self.to_le_bytes())?;
					Ok(())
				}

				#[inline]
				fn read_direct(reader: &mut dyn Read) -> Result<Self, Error> {
					let mut bytes = [0; mem::size_of::<$ty>()];
					reader.read_exact(&mut bytes)?;
					Ok($ty::from_le_bytes(bytes))
				}
			}

			impl Serialize for $ty {
				#[inline]
				fn shape() -> Shape {
					Shape::primitive::<$ty>()
				}
			}
		)*
	};
}

impl_numbers!(
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	u128 => U128,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	i128 => I128,
	f32 => F32,
	f64 => F64,
);

impl Primitive for bool {
	const KIND: PrimitiveKind = PrimitiveKind::Bool;

	#[inline]
	fn write_direct(&self, writer: &mut dyn Write) -> Result<(), Error> {
		(*self as u8).write_direct(writer)
	}

	#[inline]
	fn read_direct(reader: &mut dyn Read) -> Result<Self, Error> {
		match u8::read_direct(reader)? {
			0 => Ok(false),
			1 => Ok(true),
			byte => Err(Error::invalid_data("bool", format!("invalid byte {:#04x}", byte))),
		}
	}
}

impl Primitive for char {
	const KIND: PrimitiveKind = PrimitiveKind::Char;

	#[inline]
	fn write_direct(&self, writer: &mut dyn Write) -> Result<(), Error> {
		(*self as u32).write_direct(writer)
	}

	#[inline]
	fn read_direct(reader: &mut dyn Read) -> Result<Self, Error> {
		let code = u32::read_direct(reader)?;
		char::from_u32(code)
			.ok_or_else(|| Error::invalid_data("char", format!("invalid scalar value {:#x}", code)))
	}
}

impl Primitive for () {
	const KIND: PrimitiveKind = PrimitiveKind::Unit;

	#[inline]
	fn write_direct(&self, _writer: &mut dyn Write) -> Result<(), Error> {
		Ok(())
	}

	#[inline]
	fn read_direct(_reader: &mut dyn Read) -> Result<Self, Error> {
		Ok(())
	}
}

impl Serialize for bool {
	#[inline]
	fn shape() -> Shape {
		Shape::primitive::<bool>()
	}
}

impl Serialize for char {
	#[inline]
	fn shape() -> Shape {
		Shape::primitive::<char>()
	}
}

impl Serialize for () {
	#[inline]
	fn shape() -> Shape {
		Shape::primitive::<()>()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn encode<P: Primitive>(value: P) -> Vec<u8> {
		let mut out = vec![];
		value.write_direct(&mut out).unwrap();
		out
	}

	fn decode<P: Primitive>(mut bytes: &[u8]) -> Result<P, Error> {
		P::read_direct(&mut bytes)
	}

	#[test]
	fn little_endian() {
		assert_eq!(encode(0x04050607u32), [7, 6, 5, 4]);
		assert_eq!(encode(-2i16), [0xfe, 0xff]);
		assert_eq!(encode(1.0f32), 1.0f32.to_le_bytes());
		assert_eq!(decode::<u64>(&[1, 0, 0, 0, 0, 0, 0, 0]).unwrap(), 1);
	}

	#[test]
	fn widths_match_encoding() {
		assert_eq!(encode(0u8).len(), u8::KIND.width());
		assert_eq!(encode(0u128).len(), u128::KIND.width());
		assert_eq!(encode(0f64).len(), f64::KIND.width());
		assert_eq!(encode(true).len(), bool::KIND.width());
		assert_eq!(encode('x').len(), char::KIND.width());
		assert_eq!(encode(()).len(), <()>::KIND.width());
	}

	#[test]
	fn bool_rejects_other_bytes() {
		assert!(!decode::<bool>(&[0]).unwrap());
		assert!(decode::<bool>(&[1]).unwrap());
		assert!(matches!(decode::<bool>(&[2]), Err(Error::InvalidData { .. })));
	}

	#[test]
	fn char_rejects_surrogates() {
		assert_eq!(decode::<char>(&encode('é')).unwrap(), 'é');
		assert!(matches!(
			decode::<char>(&0xd800u32.to_le_bytes()),
			Err(Error::InvalidData { .. })
		));
	}

	#[test]
	fn truncated_input() {
		assert!(matches!(decode::<u32>(&[1, 2]), Err(Error::Io(_))));
	}
}
