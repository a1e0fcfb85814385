//! Size ceilings for variable-length values.

use std::fmt;

use crate::SizeError;

/// Category of variable-length value a ceiling applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LimitKind {
	/// Element count of a sequence.
	Collection,
	/// Length of a byte array.
	Bytes,
	/// Length of a string in UTF-8 bytes.
	String,
}

impl fmt::Display for LimitKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LimitKind::Collection => f.write_str("collection length"),
			LimitKind::Bytes => f.write_str("byte length"),
			LimitKind::String => f.write_str("string length"),
		}
	}
}

/// Whether a ceiling guards writing or reading.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	Serialize,
	Deserialize,
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Direction::Serialize => f.write_str("serialize"),
			Direction::Deserialize => f.write_str("deserialize"),
		}
	}
}

/// Per-call size ceilings.
///
/// Every codec which encodes a variable-length value checks the length against
/// the matching ceiling before writing it, and checks a decoded length before
/// allocating storage for it.
///
/// Each of the six ceilings is independent. All default to `usize::MAX`, so
/// [`Limits::default()`] (or the shared [`Limits::unbounded()`] instance)
/// never rejects a value. Callers handling untrusted input should construct
/// their own `Limits` with tighter bounds.
///
/// Ceilings bound the length of each value, not how deeply values nest.
/// Reading a self-referential type (e.g. a struct containing `Vec<Self>`)
/// recurses once per level of nesting in the input, so untrusted input for
/// such types can exhaust the stack whatever the ceilings. Read those types
/// on a thread with a stack sized for the deepest input you accept, or bound
/// the input's total size before decoding it.
///
/// ```
/// use ser_table::Limits;
///
/// let limits = Limits::default()
/// 	.with_collection_limits(1_000, 1_000)
/// 	.with_string_limits(usize::MAX, 64 * 1024);
/// assert_eq!(limits.max_collection_deserialize, 1_000);
/// assert_eq!(limits.max_bytes_deserialize, usize::MAX);
/// ```
///
/// With the `serde` feature, `Limits` can be loaded from configuration.
/// Omitted fields are unbounded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
	/// Maximum element count of a sequence being written.
	pub max_collection_serialize: usize,
	/// Maximum element count of a sequence being read.
	pub max_collection_deserialize: usize,
	/// Maximum length of a byte array being written.
	pub max_bytes_serialize: usize,
	/// Maximum length of a byte array being read.
	pub max_bytes_deserialize: usize,
	/// Maximum UTF-8 length of a string being written.
	pub max_string_serialize: usize,
	/// Maximum UTF-8 length of a string being read.
	pub max_string_deserialize: usize,
}

static UNBOUNDED: Limits = Limits::UNBOUNDED;

impl Limits {
	/// `Limits` which reject nothing.
	pub const UNBOUNDED: Limits = Limits::with_all(usize::MAX);

	/// Shared unbounded instance, used when no `Limits` are supplied.
	#[inline]
	pub fn unbounded() -> &'static Limits {
		&UNBOUNDED
	}

	/// Create `Limits` with every ceiling set to `max`.
	pub const fn with_all(max: usize) -> Self {
		Self {
			max_collection_serialize: max,
			max_collection_deserialize: max,
			max_bytes_serialize: max,
			max_bytes_deserialize: max,
			max_string_serialize: max,
			max_string_deserialize: max,
		}
	}

	/// Set the sequence element count ceilings.
	pub const fn with_collection_limits(mut self, serialize: usize, deserialize: usize) -> Self {
		self.max_collection_serialize = serialize;
		self.max_collection_deserialize = deserialize;
		self
	}

	/// Set the byte array length ceilings.
	pub const fn with_bytes_limits(mut self, serialize: usize, deserialize: usize) -> Self {
		self.max_bytes_serialize = serialize;
		self.max_bytes_deserialize = deserialize;
		self
	}

	/// Set the string length ceilings.
	pub const fn with_string_limits(mut self, serialize: usize, deserialize: usize) -> Self {
		self.max_string_serialize = serialize;
		self.max_string_deserialize = deserialize;
		self
	}

	/// Get the ceiling for a category and direction.
	pub const fn ceiling(&self, kind: LimitKind, direction: Direction) -> usize {
		match (kind, direction) {
			(LimitKind::Collection, Direction::Serialize) => self.max_collection_serialize,
			(LimitKind::Collection, Direction::Deserialize) => self.max_collection_deserialize,
			(LimitKind::Bytes, Direction::Serialize) => self.max_bytes_serialize,
			(LimitKind::Bytes, Direction::Deserialize) => self.max_bytes_deserialize,
			(LimitKind::String, Direction::Serialize) => self.max_string_serialize,
			(LimitKind::String, Direction::Deserialize) => self.max_string_deserialize,
		}
	}

	/// Check `len` against the ceiling for `kind` and `direction`.
	///
	/// A length equal to the ceiling is permitted.
	#[inline]
	pub fn check(
		&self,
		kind: LimitKind,
		direction: Direction,
		len: usize,
		type_name: &'static str,
	) -> Result<(), SizeError> {
		check_len(len, self.ceiling(kind, direction), kind, direction, type_name)
	}
}

impl Default for Limits {
	#[inline]
	fn default() -> Self {
		Self::UNBOUNDED
	}
}

/// Check `len` against an explicit ceiling.
#[inline]
pub(crate) fn check_len(
	len: usize,
	limit: usize,
	kind: LimitKind,
	direction: Direction,
	type_name: &'static str,
) -> Result<(), SizeError> {
	if len <= limit {
		return Ok(());
	}

	tracing::debug!(
		size = len,
		limit,
		kind = %kind,
		direction = %direction,
		type_name,
		"Rejected value exceeding size limit"
	);
	Err(SizeError {
		size: len,
		limit,
		kind,
		direction,
		type_name,
	})
}
