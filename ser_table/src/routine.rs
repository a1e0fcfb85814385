//! Write and read routines, the values stored in an [`Engine`]'s table.
//!
//! Routines come in three calling conventions:
//!
//! * `Direct` - a plain function of the value and the stream. Used for
//!   fixed-width primitives. Needs neither the engine nor [`Limits`].
//! * `Bounded` - also needs [`Limits`]. Used for length-prefixed leaf types
//!   (strings, byte arrays).
//! * `Dispatched` - also needs the [`Engine`], to call routines of other types
//!   through the table. Used for every compound type.
//!
//! [`CallFlags`] records which convention a routine uses, so callers supply
//! only what is needed.

use std::{
	any::{self, Any, TypeId},
	fmt,
	io::{Read, Write},
	marker::PhantomData,
};

use crate::{Engine, Error, Limits};

/// Routine writing a value with no engine or limits.
pub type DirectWrite<T> = fn(&T, &mut dyn Write) -> Result<(), Error>;

/// Routine reading a value with no engine or limits.
pub type DirectRead<T> = fn(&mut dyn Read) -> Result<T, Error>;

type BoundedWrite<T> = Box<dyn Fn(&T, &mut dyn Write, &Limits) -> Result<(), Error> + Send + Sync>;
type BoundedRead<T> = Box<dyn Fn(&mut dyn Read, &Limits) -> Result<T, Error> + Send + Sync>;
type DispatchedWrite<T> =
	Box<dyn Fn(&T, &mut dyn Write, &Engine, &Limits) -> Result<(), Error> + Send + Sync>;
type DispatchedRead<T> =
	Box<dyn Fn(&mut dyn Read, &Engine, &Limits) -> Result<T, Error> + Send + Sync>;

/// Calling convention of a routine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CallFlags {
	/// Routine calls back into the engine's table
	pub needs_engine: bool,
	/// Routine consults [`Limits`]
	pub needs_context: bool,
}

impl CallFlags {
	pub const DIRECT: CallFlags = CallFlags {
		needs_engine: false,
		needs_context: false,
	};
	pub const BOUNDED: CallFlags = CallFlags {
		needs_engine: false,
		needs_context: true,
	};
	pub const DISPATCHED: CallFlags = CallFlags {
		needs_engine: true,
		needs_context: true,
	};

	/// Returns `true` if routine is self-contained.
	#[inline]
	pub const fn is_direct(&self) -> bool {
		!self.needs_engine && !self.needs_context
	}
}

/// Routine writing a `T` to a stream.
pub enum WriteRoutine<T> {
	Direct(DirectWrite<T>),
	Bounded(BoundedWrite<T>),
	Dispatched(DispatchedWrite<T>),
}

impl<T: 'static> WriteRoutine<T> {
	/// Create a routine which needs [`Limits`].
	pub fn bounded<F>(f: F) -> Self
	where F: Fn(&T, &mut dyn Write, &Limits) -> Result<(), Error> + Send + Sync + 'static {
		WriteRoutine::Bounded(Box::new(f))
	}

	/// Create a routine which calls back into the [`Engine`].
	pub fn dispatched<F>(f: F) -> Self
	where F: Fn(&T, &mut dyn Write, &Engine, &Limits) -> Result<(), Error> + Send + Sync + 'static {
		WriteRoutine::Dispatched(Box::new(f))
	}

	pub fn flags(&self) -> CallFlags {
		match self {
			WriteRoutine::Direct(_) => CallFlags::DIRECT,
			WriteRoutine::Bounded(_) => CallFlags::BOUNDED,
			WriteRoutine::Dispatched(_) => CallFlags::DISPATCHED,
		}
	}

	/// Write a value.
	#[inline]
	pub fn call(
		&self,
		value: &T,
		writer: &mut dyn Write,
		engine: &Engine,
		limits: &Limits,
	) -> Result<(), Error> {
		match self {
			WriteRoutine::Direct(f) => f(value, writer),
			WriteRoutine::Bounded(f) => f(value, writer, limits),
			WriteRoutine::Dispatched(f) => f(value, writer, engine, limits),
		}
	}

	/// Write a slice of values, in order.
	///
	/// Calling convention is resolved once for the whole slice.
	pub fn write_all(
		&self,
		values: &[T],
		writer: &mut dyn Write,
		engine: &Engine,
		limits: &Limits,
	) -> Result<(), Error> {
		match self {
			WriteRoutine::Direct(f) => {
				for value in values {
					f(value, writer)?;
				}
			}
			WriteRoutine::Bounded(f) => {
				for value in values {
					f(value, writer, limits)?;
				}
			}
			WriteRoutine::Dispatched(f) => {
				for value in values {
					f(value, writer, engine, limits)?;
				}
			}
		}
		Ok(())
	}
}

impl<T> fmt::Debug for WriteRoutine<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let convention = match self {
			WriteRoutine::Direct(_) => "Direct",
			WriteRoutine::Bounded(_) => "Bounded",
			WriteRoutine::Dispatched(_) => "Dispatched",
		};
		write!(f, "WriteRoutine::{}<{}>", convention, any::type_name::<T>())
	}
}

/// Routine reading a `T` from a stream.
pub enum ReadRoutine<T> {
	Direct(DirectRead<T>),
	Bounded(BoundedRead<T>),
	Dispatched(DispatchedRead<T>),
}

impl<T: 'static> ReadRoutine<T> {
	/// Create a routine which needs [`Limits`].
	pub fn bounded<F>(f: F) -> Self
	where F: Fn(&mut dyn Read, &Limits) -> Result<T, Error> + Send + Sync + 'static {
		ReadRoutine::Bounded(Box::new(f))
	}

	/// Create a routine which calls back into the [`Engine`].
	pub fn dispatched<F>(f: F) -> Self
	where F: Fn(&mut dyn Read, &Engine, &Limits) -> Result<T, Error> + Send + Sync + 'static {
		ReadRoutine::Dispatched(Box::new(f))
	}

	pub fn flags(&self) -> CallFlags {
		match self {
			ReadRoutine::Direct(_) => CallFlags::DIRECT,
			ReadRoutine::Bounded(_) => CallFlags::BOUNDED,
			ReadRoutine::Dispatched(_) => CallFlags::DISPATCHED,
		}
	}

	/// Read a value.
	#[inline]
	pub fn call(&self, reader: &mut dyn Read, engine: &Engine, limits: &Limits) -> Result<T, Error> {
		match self {
			ReadRoutine::Direct(f) => f(reader),
			ReadRoutine::Bounded(f) => f(reader, limits),
			ReadRoutine::Dispatched(f) => f(reader, engine, limits),
		}
	}

	/// Read `count` values, in order, appending them to `out`.
	///
	/// Calling convention is resolved once for all values.
	pub fn read_into(
		&self,
		out: &mut Vec<T>,
		count: usize,
		reader: &mut dyn Read,
		engine: &Engine,
		limits: &Limits,
	) -> Result<(), Error> {
		match self {
			ReadRoutine::Direct(f) => {
				for _ in 0..count {
					out.push(f(reader)?);
				}
			}
			ReadRoutine::Bounded(f) => {
				for _ in 0..count {
					out.push(f(reader, limits)?);
				}
			}
			ReadRoutine::Dispatched(f) => {
				for _ in 0..count {
					out.push(f(reader, engine, limits)?);
				}
			}
		}
		Ok(())
	}
}

impl<T> fmt::Debug for ReadRoutine<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let convention = match self {
			ReadRoutine::Direct(_) => "Direct",
			ReadRoutine::Bounded(_) => "Bounded",
			ReadRoutine::Dispatched(_) => "Dispatched",
		};
		write!(f, "ReadRoutine::{}<{}>", convention, any::type_name::<T>())
	}
}

/// Type-erased [`WriteRoutine`], as produced by a [`Codec`].
///
/// [`Codec`]: crate::Codec
pub struct GeneratedWrite {
	type_id: TypeId,
	flags: CallFlags,
	routine: Box<dyn Any + Send + Sync>,
}

impl GeneratedWrite {
	/// Type the routine writes.
	#[inline]
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	#[inline]
	pub fn flags(&self) -> CallFlags {
		self.flags
	}

	pub(crate) fn into_routine(self) -> Box<dyn Any + Send + Sync> {
		self.routine
	}
}

impl<T: 'static> From<WriteRoutine<T>> for GeneratedWrite {
	fn from(routine: WriteRoutine<T>) -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			flags: routine.flags(),
			routine: Box::new(routine),
		}
	}
}

/// Type-erased [`ReadRoutine`], as produced by a [`Codec`].
///
/// [`Codec`]: crate::Codec
pub struct GeneratedRead {
	type_id: TypeId,
	flags: CallFlags,
	routine: Box<dyn Any + Send + Sync>,
}

impl GeneratedRead {
	/// Type the routine reads.
	#[inline]
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	#[inline]
	pub fn flags(&self) -> CallFlags {
		self.flags
	}

	pub(crate) fn into_routine(self) -> Box<dyn Any + Send + Sync> {
		self.routine
	}
}

impl<T: 'static> From<ReadRoutine<T>> for GeneratedRead {
	fn from(routine: ReadRoutine<T>) -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			flags: routine.flags(),
			routine: Box::new(routine),
		}
	}
}

/// Position of type `T`'s routines in an [`Engine`]'s table.
///
/// Obtained from [`Bindings`] while the table is being built. A slot is valid
/// as soon as the type has been discovered, before its routines exist, which
/// allows routines of mutually recursive types to refer to each other.
///
/// [`Bindings`]: crate::Bindings
pub struct Slot<T> {
	index: usize,
	_marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
	#[inline]
	pub(crate) fn new(index: usize) -> Self {
		Self {
			index,
			_marker: PhantomData,
		}
	}

	#[inline]
	pub fn index(&self) -> usize {
		self.index
	}
}

impl<T> Clone for Slot<T> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Slot<{}>({})", any::type_name::<T>(), self.index)
	}
}
