use std::{
	any,
	io::{Read, Write},
};

use num_bigint::{BigInt, BigUint, Sign};

use super::length::{read_blob, write_blob};
use crate::{
	codec::unhandled, Bindings, BuildError, Codec, Direction, Error, GeneratedRead, GeneratedWrite,
	LimitKind, Limits, Primitive, ReadRoutine, Serialize, Shape, WriteRoutine,
};

// Big integers have no structure the other codecs understand.
// `BigIntCodec` claims them by type.

impl Serialize for BigUint {
	#[inline]
	fn shape() -> Shape {
		Shape::opaque::<Self>()
	}
}

impl Serialize for BigInt {
	#[inline]
	fn shape() -> Shape {
		Shape::opaque::<Self>()
	}
}

/// Codec for `num-bigint`'s [`BigUint`] and [`BigInt`].
///
/// `BigUint` is encoded as a byte array of its little-endian magnitude.
/// `BigInt` is encoded as a sign byte (`0` zero, `1` positive, `2` negative)
/// followed by its magnitude, encoded as a `BigUint`.
///
/// Magnitudes are subject to the bytes ceilings of the active [`Limits`].
#[derive(Copy, Clone, Debug, Default)]
pub struct BigIntCodec;

impl Codec for BigIntCodec {
	fn name(&self) -> &'static str {
		"bigint"
	}

	fn handles(&self, shape: &Shape) -> Result<bool, BuildError> {
		Ok(shape.is::<BigUint>() || shape.is::<BigInt>())
	}

	fn dependent_types(&self, _shape: &Shape) -> Vec<Shape> {
		vec![]
	}

	fn generate_writer(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
		if shape.is::<BigUint>() {
			Ok(WriteRoutine::<BigUint>::bounded(write_biguint).into())
		} else if shape.is::<BigInt>() {
			Ok(WriteRoutine::<BigInt>::bounded(write_bigint).into())
		} else {
			Err(unhandled(shape))
		}
	}

	fn generate_reader(&self, shape: &Shape, _: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
		if shape.is::<BigUint>() {
			Ok(ReadRoutine::<BigUint>::bounded(read_biguint).into())
		} else if shape.is::<BigInt>() {
			Ok(ReadRoutine::<BigInt>::bounded(read_bigint).into())
		} else {
			Err(unhandled(shape))
		}
	}
}

fn write_biguint(value: &BigUint, writer: &mut dyn Write, limits: &Limits) -> Result<(), Error> {
	// Zero is the empty magnitude
	let bytes = if value.bits() == 0 {
		vec![]
	} else {
		value.to_bytes_le()
	};
	write_blob(
		writer,
		Some(bytes.as_slice()),
		LimitKind::Bytes,
		limits,
		any::type_name::<BigUint>(),
	)
}

fn read_biguint(reader: &mut dyn Read, limits: &Limits) -> Result<BigUint, Error> {
	let bytes = read_blob(reader, LimitKind::Bytes, limits, any::type_name::<BigUint>())?;
	Ok(bytes.map_or_else(BigUint::default, |bytes| BigUint::from_bytes_le(&bytes)))
}

fn write_bigint(value: &BigInt, writer: &mut dyn Write, limits: &Limits) -> Result<(), Error> {
	let sign: u8 = match value.sign() {
		Sign::NoSign => 0,
		Sign::Plus => 1,
		Sign::Minus => 2,
	};
	// Check magnitude fits limits before writing sign
	let magnitude = value.magnitude();
	if magnitude.bits() > 0 {
		let len = ((magnitude.bits() + 7) / 8) as usize;
		limits.check(LimitKind::Bytes, Direction::Serialize, len, any::type_name::<BigInt>())?;
	}

	sign.write_direct(writer)?;
	write_biguint(magnitude, writer, limits)
}

fn read_bigint(reader: &mut dyn Read, limits: &Limits) -> Result<BigInt, Error> {
	let sign = match u8::read_direct(reader)? {
		0 => Sign::NoSign,
		1 => Sign::Plus,
		2 => Sign::Minus,
		byte => {
			return Err(Error::invalid_data(
				any::type_name::<BigInt>(),
				format!("invalid sign {}", byte),
			))
		}
	};
	let magnitude = read_biguint(reader, limits)?;
	Ok(BigInt::from_biguint(sign, magnitude))
}
