//! The object-safe view of a serializable value.
//!
//! Every serializable type implements [`Serial`], which exposes the value as
//! one of the closed set of categories in [`SerialRef`] / [`SerialMut`]. The
//! traversal engines never see concrete types; they match on these enums.
//!
//! | Category | Read-only view | Mutable view |
//! |---|---|---|
//! | Arithmetic | [`Arith`] | [`ArithMut`] |
//! | Enum | [`EnumValue`] | [`EnumValue`] |
//! | PointerLike | `Option<&dyn DynamicObject>` | [`PointerSlot`] |
//! | String | `&str` | `&mut String` |
//! | Iterable | [`Iterable`] | [`IterableMut`] |
//! | Pair | two `&dyn Serial` | two `&mut dyn Serial` |
//! | Aggregate | [`Aggregate`] | [`Aggregate`] |

// -----------------------------------------------------------------------------
// Modules

mod arith;
mod kinds;

// -----------------------------------------------------------------------------
// Exports

pub use arith::{Arith, ArithMut};
pub use kinds::{Aggregate, EnumValue, Iterable, IterableMut, PointerSlot};

use alloc::string::String;

use crate::dynamics::DynamicObject;
use crate::info::Category;

// -----------------------------------------------------------------------------
// Serial

/// A value that can be encoded and decoded.
///
/// Implemented for primitives, `String`, the standard containers, 2-tuples,
/// fixed arrays and pointer-like handles, and by `#[derive(Serializable)]`
/// for user types.
///
/// # Examples
///
/// ```
/// use vc_serial::value::{Arith, Serial, SerialRef};
///
/// match 7_u16.serial_ref() {
///     SerialRef::Arithmetic(Arith::U16(value)) => assert_eq!(value, 7),
///     _ => unreachable!(),
/// }
/// ```
pub trait Serial {
    /// Views the value for encoding.
    fn serial_ref(&self) -> SerialRef<'_>;

    /// Views the value for decoding in place.
    fn serial_mut(&mut self) -> SerialMut<'_>;
}

/// Read-only category view of a value.
pub enum SerialRef<'a> {
    Arithmetic(Arith),
    Enum(&'a dyn EnumValue),
    PointerLike(Option<&'a dyn DynamicObject>),
    String(&'a str),
    Iterable(&'a dyn Iterable),
    Pair(&'a dyn Serial, &'a dyn Serial),
    Aggregate(&'a dyn Aggregate),
}

/// Mutable category view of a value.
pub enum SerialMut<'a> {
    Arithmetic(ArithMut<'a>),
    Enum(&'a mut dyn EnumValue),
    PointerLike(&'a mut dyn PointerSlot),
    String(&'a mut String),
    Iterable(&'a mut dyn IterableMut),
    Pair(&'a mut dyn Serial, &'a mut dyn Serial),
    Aggregate(&'a mut dyn Aggregate),
}

impl SerialRef<'_> {
    /// The category of the viewed value.
    pub const fn category(&self) -> Category {
        match self {
            Self::Arithmetic(_) => Category::Arithmetic,
            Self::Enum(_) => Category::Enum,
            Self::PointerLike(_) => Category::PointerLike,
            Self::String(_) => Category::String,
            Self::Iterable(_) => Category::Iterable,
            Self::Pair(..) => Category::Pair,
            Self::Aggregate(_) => Category::Aggregate,
        }
    }
}

impl SerialMut<'_> {
    /// The category of the viewed value.
    pub const fn category(&self) -> Category {
        match self {
            Self::Arithmetic(_) => Category::Arithmetic,
            Self::Enum(_) => Category::Enum,
            Self::PointerLike(_) => Category::PointerLike,
            Self::String(_) => Category::String,
            Self::Iterable(_) => Category::Iterable,
            Self::Pair(..) => Category::Pair,
            Self::Aggregate(_) => Category::Aggregate,
        }
    }
}
