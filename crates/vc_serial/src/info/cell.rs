//! Static storage for lazily built type descriptions.
//!
//! A `static` inside a generic function is shared by every instantiation, so
//! generic types key their entries by [`TypeId`]. Entries are leaked and live
//! for the rest of the process.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use super::Shape;
use crate::hash::{FixedHashState, TypeIdMap};

// -----------------------------------------------------------------------------
// NonGenericShapeCell

/// Storage of the [`Shape`] of a non-generic aggregate.
///
/// ```
/// use vc_serial::info::{NonGenericShapeCell, Shape};
///
/// static CELL: NonGenericShapeCell = NonGenericShapeCell::new();
/// let shape = CELL.get_or_init(|| Shape::opaque("Empty"));
/// assert_eq!(shape.type_name(), "Empty");
/// ```
pub struct NonGenericShapeCell(OnceLock<Shape>);

impl NonGenericShapeCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> Shape) -> &Shape {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// Generic cells

/// Per-type storage shared by all instantiations of a generic item.
pub struct GenericCell<T: ?Sized + 'static>(RwLock<TypeIdMap<&'static T>>);

/// Storage of the [`Shape`] of a generic aggregate, keyed by the concrete type.
pub type GenericShapeCell = GenericCell<Shape>;

impl<T: ?Sized + 'static> GenericCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::with_hasher(FixedHashState)))
    }

    #[inline(never)]
    fn get(&self, type_id: TypeId) -> Option<&'static T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }
}

impl<T: 'static> GenericCell<T> {
    /// Returns the entry of `G`, building it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &'static T {
        let type_id = TypeId::of::<G>();
        if let Some(value) = self.get(type_id) {
            return value;
        }
        self.insert(type_id, f())
    }

    #[inline(never)]
    fn insert(&self, type_id: TypeId, value: T) -> &'static T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(value)))
    }
}

// -----------------------------------------------------------------------------
// GenericNameCell

/// Storage of the display name of a generic type.
///
/// ```
/// use vc_serial::impls::concat;
/// use vc_serial::info::{GenericNameCell, Signature};
///
/// fn name_of<T: Signature>() -> &'static str {
///     static CELL: GenericNameCell = GenericNameCell::new();
///     CELL.get_or_insert::<T>(|| concat(&["Wrapper<", T::type_name(), ">"]))
/// }
///
/// assert_eq!(name_of::<u8>(), "Wrapper<u8>");
/// assert_eq!(name_of::<String>(), "Wrapper<String>");
/// ```
pub struct GenericNameCell(GenericCell<str>);

impl GenericNameCell {
    #[inline]
    pub const fn new() -> Self {
        Self(GenericCell::new())
    }

    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> String) -> &'static str {
        let type_id = TypeId::of::<G>();
        if let Some(name) = self.0.get(type_id) {
            return name;
        }

        // Built before locking: `f` usually asks nested instantiations of the
        // same generic item for their names, and those share this cell.
        let name = f();
        *self
            .0
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(name.into_boxed_str()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::checksum::Checksum;
    use crate::info::Signature;

    #[test]
    fn nested_instantiations() {
        assert_eq!(<Vec<Vec<u8>>>::type_name(), "Vec<Vec<u8>>");
        assert_eq!(<Vec<Vec<Vec<f32>>>>::type_name(), "Vec<Vec<Vec<f32>>>");
        assert_eq!(<BTreeSet<BTreeSet<i8>>>::type_name(), "BTreeSet<BTreeSet<i8>>");
        assert_eq!(
            <BTreeMap<String, BTreeMap<u8, Vec<Vec<u8>>>>>::type_name(),
            "BTreeMap<String, BTreeMap<u8, Vec<Vec<u8>>>>"
        );
        assert_eq!(<((u8, u8), u8)>::type_name(), "((u8, u8), u8)");
        assert_eq!(
            <Vec<Vec<u8>>>::NAME_CHECKSUM,
            Checksum::of(<Vec<Vec<u8>>>::type_name())
        );
    }
}
