//! Length prefix shared by sequences, strings and byte arrays.
//!
//! Prefix is a `u32`. `0` means the value is absent. Otherwise the value is
//! present and its length is `prefix - 1`, so an empty value has prefix `1`.

use std::io::{self, Read, Write};

use crate::{limits::check_len, Direction, Error, LimitKind, Limits, Primitive};

/// Largest length the prefix can represent.
pub const MAX_LENGTH: usize = u32::MAX as usize - 1;

/// Encode length as a prefix, or absent prefix for `None`.
///
/// Fails if length exceeds the serialize ceiling for `kind`, or cannot be
/// represented.
#[inline]
pub(crate) fn encode_length(
	len: Option<usize>,
	kind: LimitKind,
	limits: &Limits,
	type_name: &'static str,
) -> Result<u32, Error> {
	match len {
		None => Ok(0),
		Some(len) => {
			let limit = limits.ceiling(kind, Direction::Serialize).min(MAX_LENGTH);
			check_len(len, limit, kind, Direction::Serialize, type_name)?;
			Ok(len as u32 + 1)
		}
	}
}

/// Decode a prefix. Returns `None` for absent prefix.
///
/// Length is checked against the deserialize ceiling for `kind` before
/// returning, so callers can allocate for it.
#[inline]
pub(crate) fn decode_length(
	prefix: u32,
	kind: LimitKind,
	limits: &Limits,
	type_name: &'static str,
) -> Result<Option<usize>, Error> {
	if prefix == 0 {
		return Ok(None);
	}

	let len = (prefix - 1) as usize;
	limits.check(kind, Direction::Deserialize, len, type_name)?;
	Ok(Some(len))
}

/// Write length prefix, or absent prefix for `None`.
///
/// Length is checked before anything is written.
#[inline]
pub(crate) fn write_length(
	writer: &mut dyn Write,
	len: Option<usize>,
	kind: LimitKind,
	limits: &Limits,
	type_name: &'static str,
) -> Result<(), Error> {
	encode_length(len, kind, limits, type_name)?.write_direct(writer)
}

/// Read length prefix. Returns `None` for absent prefix.
#[inline]
pub(crate) fn read_length(
	reader: &mut dyn Read,
	kind: LimitKind,
	limits: &Limits,
	type_name: &'static str,
) -> Result<Option<usize>, Error> {
	decode_length(u32::read_direct(reader)?, kind, limits, type_name)
}

/// Reserve space for exactly `len` elements.
pub(crate) fn reserve<T>(len: usize, type_name: &'static str) -> Result<Vec<T>, Error> {
	let mut out = Vec::new();
	out
		.try_reserve_exact(len)
		.map_err(|_| Error::Allocation { type_name, len })?;
	Ok(out)
}

/// Write a length-prefixed run of bytes, or absent prefix for `None`.
pub(crate) fn write_blob(
	writer: &mut dyn Write,
	bytes: Option<&[u8]>,
	kind: LimitKind,
	limits: &Limits,
	type_name: &'static str,
) -> Result<(), Error> {
	write_length(writer, bytes.map(<[u8]>::len), kind, limits, type_name)?;
	if let Some(bytes) = bytes {
		writer.write_all(bytes)?;
	}
	Ok(())
}

/// Read a length-prefixed run of bytes. Returns `None` for absent prefix.
pub(crate) fn read_blob(
	reader: &mut dyn Read,
	kind: LimitKind,
	limits: &Limits,
	type_name: &'static str,
) -> Result<Option<Vec<u8>>, Error> {
	let len = match read_length(reader, kind, limits, type_name)? {
		Some(len) => len,
		None => return Ok(None),
	};

	// Grow as bytes arrive, so a truncated stream never commits `len` bytes
	let mut bytes = Vec::new();
	(&mut *reader).take(len as u64).read_to_end(&mut bytes)?;
	if bytes.len() != len {
		return Err(io::Error::new(
			io::ErrorKind::UnexpectedEof,
			format!("expected {} bytes, got {}", len, bytes.len()),
		)
		.into());
	}
	Ok(Some(bytes))
}
