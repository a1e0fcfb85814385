use std::{
	any::{self, TypeId},
	fmt,
};

use crate::codecs::{
	BoxedShape, BytesShape, EnumShape, NullableShape, PrimitiveShape, RecordShape, SequenceShape,
	StringShape,
};

/// Trait for types which can be serialized.
///
/// A type describes its own structure with a [`Shape`]. An [`Engine`] uses
/// shapes to discover every type reachable from its root types, and asks its
/// [`Codec`]s to produce routines for each.
///
/// Implemented for primitives, `String`, `Bytes`, `Vec<T>`, `Box<T>`,
/// `Option<T>` and tuples. Use `#[derive(Serialize)]` for structs and enums.
///
/// [`Engine`]: crate::Engine
/// [`Codec`]: crate::Codec
pub trait Serialize: Sized + Send + Sync + 'static {
	/// Describe this type.
	fn shape() -> Shape;

	/// Describe `Option<Self>`.
	///
	/// Length-prefixed types override this so `None` is encoded as the absent
	/// length prefix, rather than with a separate tag.
	#[doc(hidden)]
	#[inline]
	fn nullable_shape() -> Shape {
		Shape::nullable::<Self>()
	}
}

/// Structural description of a concrete type.
///
/// Shapes of child types are referenced lazily (`fn() -> Shape`), so shapes of
/// self-referential types are finite.
#[derive(Clone)]
pub struct Shape {
	id: TypeId,
	name: &'static str,
	kind: ShapeKind,
}

/// Kind of a [`Shape`].
///
/// Each kind is claimed by one of the built-in codecs, except
/// [`ShapeKind::Opaque`], which is only handled by custom codecs.
#[derive(Clone, Debug)]
pub enum ShapeKind {
	Primitive(PrimitiveShape),
	Sequence(SequenceShape),
	String(StringShape),
	Bytes(BytesShape),
	Nullable(NullableShape),
	Boxed(BoxedShape),
	Record(RecordShape),
	Enum(EnumShape),
	Opaque,
}

impl Shape {
	/// Create a `Shape` for type `T`.
	pub fn new<T: 'static>(kind: ShapeKind) -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: any::type_name::<T>(),
			kind,
		}
	}

	/// Get `Shape` of a [`Serialize`] type.
	#[inline]
	pub fn of<T: Serialize>() -> Self {
		T::shape()
	}

	/// Create a `Shape` with no structure a built-in codec understands.
	///
	/// Types with opaque shapes must be handled by a custom codec.
	pub fn opaque<T: 'static>() -> Self {
		Self::new::<T>(ShapeKind::Opaque)
	}

	#[inline]
	pub fn id(&self) -> TypeId {
		self.id
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn kind(&self) -> &ShapeKind {
		&self.kind
	}

	/// Returns `true` if this is the shape of `T`.
	#[inline]
	pub fn is<T: 'static>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}
}

impl fmt::Debug for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Shape")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.finish()
	}
}
