//! Binary serializer driven by a per-type dispatch table.
//!
//! An [`Engine`] is built once from a set of root types. Building discovers
//! every type reachable from the roots, asks the registered [`Codec`]s to
//! generate a write and read routine for each, and stores them in a table
//! indexed by type. Serializing a value is then a table lookup and a call.
//!
//! Variable-length values (sequences, strings, byte arrays) are length-prefixed
//! and checked against caller-supplied [`Limits`] in both directions.
//!
//! ```
//! use ser_table::{Engine, Limits, Serialize};
//!
//! #[derive(Serialize, Debug, PartialEq)]
//! struct Chunk {
//! 	x: i32,
//! 	z: i32,
//! 	blocks: Vec<u16>,
//! 	name: Option<String>,
//! }
//!
//! let engine = Engine::for_root::<Chunk>().unwrap();
//!
//! let chunk = Chunk { x: 1, z: -1, blocks: vec![0, 7, 7], name: None };
//! let bytes = engine.to_vec(&chunk).unwrap();
//! assert_eq!(engine.from_slice::<Chunk>(&bytes).unwrap(), chunk);
//!
//! // Reject oversized input before allocating for it
//! let limits = Limits::default().with_collection_limits(1024, 2);
//! assert!(engine.from_slice_with::<Chunk>(&bytes, &limits).unwrap_err().is_size());
//! ```

#[cfg(feature = "derive")]
pub use ser_table_derive::Serialize;

mod limits;
pub use limits::{Direction, LimitKind, Limits};

mod error;
pub use error::{BuildError, Error, SizeError};

mod shape;
pub use shape::{Serialize, Shape, ShapeKind};

mod routine;
pub use routine::{
	CallFlags, DirectRead, DirectWrite, GeneratedRead, GeneratedWrite, ReadRoutine, Slot,
	WriteRoutine,
};

mod codec;
pub use codec::{Bindings, Codec};

mod composite;
pub use composite::{unknown_variant, Composite, Field, Variant};

mod engine;
pub use engine::{Engine, EngineBuilder, TypeDescriptor};

pub mod codecs;
pub use codecs::{ByteArray, Primitive, PrimitiveKind, Sequence, Text, MAX_LENGTH};

pub use bytes;
