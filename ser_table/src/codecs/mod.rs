//! Built-in codecs.

use crate::Codec;

mod length;
pub use length::MAX_LENGTH;

mod primitives;
pub use primitives::{Primitive, PrimitiveCodec, PrimitiveKind, PrimitiveShape};

mod sequence;
pub use sequence::{Sequence, SequenceCodec, SequenceShape};

mod string;
pub use string::{StringCodec, StringShape, Text};

mod byte_array;
pub use byte_array::{ByteArray, BytesCodec, BytesShape};

mod nullable;
pub use nullable::{NullableCodec, NullableShape};

mod boxed;
pub use boxed::{BoxCodec, BoxedShape};

mod record;
pub use record::{RecordCodec, RecordShape};

mod enums;
pub use enums::{EnumCodec, EnumShape};

#[cfg(feature = "num_bigint")]
mod bigint;
#[cfg(feature = "num_bigint")]
pub use bigint::BigIntCodec;

/// Codecs every [`EngineBuilder::new`] starts with.
///
/// [`EngineBuilder::new`]: crate::EngineBuilder::new
pub(crate) fn builtin() -> Vec<Box<dyn Codec>> {
	vec![
		Box::new(PrimitiveCodec),
		Box::new(SequenceCodec),
		Box::new(StringCodec),
		Box::new(BytesCodec),
		Box::new(NullableCodec),
		Box::new(BoxCodec),
		Box::new(RecordCodec),
		Box::new(EnumCodec),
		#[cfg(feature = "num_bigint")]
		Box::new(BigIntCodec),
	]
}
