//! Error types.
//!
//! Two layers of error:
//!
//! * [`BuildError`] - configuration errors, raised once while building an
//!   [`Engine`](crate::Engine). No partial engine is ever returned.
//! * [`Error`] - per-message errors, raised while serializing or
//!   deserializing a value. The engine's table is never affected by them.

use std::io;

use thiserror::Error;

use crate::{Direction, LimitKind};

/// A length exceeded the matching ceiling of the active [`Limits`].
///
/// When writing, nothing for the offending value has been written.
/// When reading, no storage for the declared length has been allocated.
///
/// [`Limits`]: crate::Limits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} of {size} exceeds {direction} limit of {limit} for `{type_name}`")]
pub struct SizeError {
	/// Observed or declared length
	pub size: usize,
	/// Ceiling which was exceeded
	pub limit: usize,
	/// Category of ceiling
	pub kind: LimitKind,
	/// Whether value was being written or read
	pub direction: Direction,
	/// Type being serialized
	pub type_name: &'static str,
}

/// Configuration errors, discovered while building an [`Engine`].
///
/// [`Engine`]: crate::Engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
	/// No registered codec claims the type
	#[error("no codec handles type `{type_name}`")]
	NoCodec { type_name: &'static str },

	/// More than one registered codec claims the type
	#[error("type `{type_name}` is claimed by more than one codec: {}", .codecs.join(", "))]
	Ambiguous {
		type_name: &'static str,
		codecs: Vec<&'static str>,
	},

	/// Sequence shape with rank other than 1
	#[error("`{type_name}` has rank {rank}, only one-dimensional sequences are supported")]
	MultiDimensional { type_name: &'static str, rank: usize },

	/// A routine asked for a type which discovery never reached
	#[error("type `{type_name}` was not discovered, but a routine depends on it")]
	Unbound { type_name: &'static str },

	/// A codec produced a routine for a different type than it was asked for
	#[error("codec `{codec}` generated a routine of the wrong type for `{type_name}`")]
	RoutineMismatch {
		codec: &'static str,
		type_name: &'static str,
	},
}

/// Errors raised while serializing or deserializing a value.
#[derive(Error, Debug)]
pub enum Error {
	/// Length exceeded a size ceiling
	#[error(transparent)]
	Size(#[from] SizeError),

	/// Underlying stream failed (including truncated input)
	#[error("i/o error: {0}")]
	Io(#[from] io::Error),

	/// Type is not in the engine's table
	#[error("type `{type_name}` is not registered with this engine")]
	Unregistered { type_name: &'static str },

	/// Input is malformed in a way unrelated to length
	#[error("invalid data for `{type_name}`: {reason}")]
	InvalidData {
		type_name: &'static str,
		reason: String,
	},

	/// Storage for a permitted length could not be reserved
	#[error("failed to allocate storage for {len} elements of `{type_name}`")]
	Allocation { type_name: &'static str, len: usize },
}

impl Error {
	/// Create an [`Error::InvalidData`].
	pub fn invalid_data(type_name: &'static str, reason: impl Into<String>) -> Self {
		Error::InvalidData {
			type_name,
			reason: reason.into(),
		}
	}

	/// Get the [`SizeError`], if this is a size error.
	pub fn as_size(&self) -> Option<&SizeError> {
		match self {
			Error::Size(err) => Some(err),
			_ => None,
		}
	}

	/// Returns `true` if this is a size error.
	pub fn is_size(&self) -> bool {
		self.as_size().is_some()
	}
}
