use std::{
	any, fmt,
	io::{Read, Write},
};

use crate::{
	Bindings, BuildError, Engine, Error, GeneratedRead, GeneratedWrite, Limits, ReadRoutine,
	Serialize, Shape, WriteRoutine,
};

/// Trait for types made up of fields: structs, enums and tuples.
///
/// Usually implemented with `#[derive(Serialize)]`, which implements both
/// [`Serialize`] and `Composite`.
///
/// Fields are written in declaration order, each through the engine's table.
/// Enums write a `u32` variant index first.
pub trait Composite: Serialize {
	/// Slots of all field types.
	type Slots: Send + Sync + 'static;

	/// Resolve slots of all field types.
	fn bind(bindings: &Bindings<'_>) -> Result<Self::Slots, BuildError>;

	/// Write all fields.
	fn write_fields(
		&self,
		slots: &Self::Slots,
		writer: &mut dyn Write,
		engine: &Engine,
		limits: &Limits,
	) -> Result<(), Error>;

	/// Read all fields.
	fn read_fields(
		slots: &Self::Slots,
		reader: &mut dyn Read,
		engine: &Engine,
		limits: &Limits,
	) -> Result<Self, Error>;
}

/// A field of a struct, tuple, or enum variant.
#[derive(Clone)]
pub struct Field {
	name: &'static str,
	shape: fn() -> Shape,
}

impl Field {
	/// Create a field of type `T`.
	pub fn new<T: Serialize>(name: &'static str) -> Self {
		Self {
			name,
			shape: T::shape,
		}
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn shape(&self) -> Shape {
		(self.shape)()
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Only name of field's type, to avoid recursing into self-referential types
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("type", &self.shape().name())
			.finish()
	}
}

/// A variant of an enum.
#[derive(Clone, Debug)]
pub struct Variant {
	name: &'static str,
	fields: Vec<Field>,
}

impl Variant {
	pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
		Self { name, fields }
	}

	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn fields(&self) -> &[Field] {
		&self.fields
	}
}

pub(crate) fn writer<T: Composite>(bindings: &Bindings<'_>) -> Result<GeneratedWrite, BuildError> {
	let slots = T::bind(bindings)?;
	Ok(
		WriteRoutine::<T>::dispatched(move |value, writer, engine, limits| {
			value.write_fields(&slots, writer, engine, limits)
		})
		.into(),
	)
}

pub(crate) fn reader<T: Composite>(bindings: &Bindings<'_>) -> Result<GeneratedRead, BuildError> {
	let slots = T::bind(bindings)?;
	Ok(
		ReadRoutine::<T>::dispatched(move |reader, engine, limits| {
			T::read_fields(&slots, reader, engine, limits)
		})
		.into(),
	)
}

/// Error for an enum variant index with no matching variant.
pub fn unknown_variant<T>(index: u32) -> Error {
	Error::invalid_data(
		any::type_name::<T>(),
		format!("unknown variant index {}", index),
	)
}
