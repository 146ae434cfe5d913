use alloc::boxed::Box;

use super::{SerialMut, SerialRef};
use crate::Result;
use crate::checksum::Checksum;
use crate::dynamics::{DynamicObject, FactoryRegistry};
use crate::info::{MemberInfo, Shape};

// -----------------------------------------------------------------------------
// Enum

/// A fieldless enum stored as its `i32` discriminant.
pub trait EnumValue {
    fn enum_type_name(&self) -> &'static str;

    fn discriminant(&self) -> i32;

    /// Switches to the variant with discriminant `value`.
    ///
    /// Returns `false`, leaving `self` untouched, if no variant has it.
    fn set_discriminant(&mut self, value: i32) -> bool;
}

// -----------------------------------------------------------------------------
// Iterable

/// Read side of a sequence, set or map.
///
/// Maps yield each entry as a [`SerialRef::Pair`] of key and value.
pub trait Iterable {
    fn len(&self) -> usize;

    /// Calls `f` on every element in iteration order.
    fn visit(&self, f: &mut dyn FnMut(SerialRef<'_>) -> Result<()>) -> Result<()>;
}

/// Write side of a sequence, set or map.
pub trait IterableMut {
    /// The number of elements a fixed-size container must receive.
    #[inline]
    fn fixed_len(&self) -> Option<usize> {
        None
    }

    /// Removes all elements. Fixed-size containers keep theirs.
    fn clear(&mut self);

    /// Reads `count` elements.
    ///
    /// Growable containers construct a default element, let `f` decode into
    /// it and then append or insert it. Fixed-size containers let `f`
    /// decode into their existing elements.
    fn read_elements(
        &mut self,
        count: usize,
        f: &mut dyn FnMut(SerialMut<'_>) -> Result<()>,
    ) -> Result<()>;
}

// -----------------------------------------------------------------------------
// Aggregate

/// A type with named serializable members.
///
/// Implemented by `#[derive(Serializable)]`.
pub trait Aggregate {
    /// Ordered member list of the concrete type.
    fn aggregate_shape(&self) -> &'static Shape;

    /// Structural checksum of the concrete type.
    #[inline]
    fn checksum(&self) -> Checksum {
        self.aggregate_shape().checksum()
    }

    /// Calls `f` with every member in shape order.
    ///
    /// Accessor members are passed as a temporary holding the getter's value.
    fn visit_members(
        &self,
        f: &mut dyn FnMut(&MemberInfo, SerialRef<'_>) -> Result<()>,
    ) -> Result<()>;

    /// Calls `f` to decode every member in shape order.
    ///
    /// Accessor members are decoded into a default temporary which is then
    /// passed to the setter.
    fn read_members(
        &mut self,
        f: &mut dyn FnMut(&MemberInfo, SerialMut<'_>) -> Result<()>,
    ) -> Result<()>;
}

// -----------------------------------------------------------------------------
// PointerSlot

/// A pointer-like slot that may hold a polymorphic object.
pub trait PointerSlot {
    /// The held object, if any.
    fn get(&self) -> Option<&dyn DynamicObject>;

    /// Empties the slot.
    fn clear(&mut self);

    /// Whether `object` can be viewed as the slot's pointee type.
    fn accepts(&self, object: &dyn DynamicObject, registry: &FactoryRegistry) -> bool;

    /// Stores `object`, converting it to the slot's pointee type.
    fn assign(&mut self, object: Box<dyn DynamicObject>, registry: &FactoryRegistry)
    -> Result<()>;
}
