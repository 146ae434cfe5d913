use alloc::collections::BTreeSet;
use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use super::concat;
use crate::Result;
use crate::checksum::Checksum;
use crate::info::{Category, GenericNameCell, Signature};
use crate::value::{Iterable, IterableMut, Serial, SerialMut, SerialRef};

// -----------------------------------------------------------------------------
// BTreeSet

impl<T: Signature> Signature for BTreeSet<T> {
    const CATEGORY: Category = Category::Iterable;
    const NAME_CHECKSUM: Checksum = Checksum::of("BTreeSet<")
        .combine(T::NAME_CHECKSUM)
        .combine(Checksum::of(">"));

    fn type_name() -> &'static str {
        static CELL: GenericNameCell = GenericNameCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["BTreeSet<", T::type_name(), ">"]))
    }
}

impl<T: Serial> Iterable for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn visit(&self, f: &mut dyn FnMut(SerialRef<'_>) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(|element| f(element.serial_ref()))
    }
}

impl<T: Serial + Default + Ord> IterableMut for BTreeSet<T> {
    #[inline]
    fn clear(&mut self) {
        BTreeSet::clear(self);
    }

    fn read_elements(
        &mut self,
        count: usize,
        f: &mut dyn FnMut(SerialMut<'_>) -> Result<()>,
    ) -> Result<()> {
        for _ in 0..count {
            let mut element = T::default();
            f(element.serial_mut())?;
            self.insert(element);
        }
        Ok(())
    }
}

impl<T: Serial + Default + Ord> Serial for BTreeSet<T> {
    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::Iterable(self)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::Iterable(self)
    }
}

// -----------------------------------------------------------------------------
// HashSet

impl<T: Signature, S: 'static> Signature for HashSet<T, S> {
    const CATEGORY: Category = Category::Iterable;
    const NAME_CHECKSUM: Checksum = Checksum::of("HashSet<")
        .combine(T::NAME_CHECKSUM)
        .combine(Checksum::of(">"));

    fn type_name() -> &'static str {
        static CELL: GenericNameCell = GenericNameCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["HashSet<", T::type_name(), ">"]))
    }
}

impl<T: Serial, S> Iterable for HashSet<T, S> {
    #[inline]
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn visit(&self, f: &mut dyn FnMut(SerialRef<'_>) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(|element| f(element.serial_ref()))
    }
}

impl<T, S> IterableMut for HashSet<T, S>
where
    T: Serial + Default + Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn clear(&mut self) {
        HashSet::clear(self);
    }

    fn read_elements(
        &mut self,
        count: usize,
        f: &mut dyn FnMut(SerialMut<'_>) -> Result<()>,
    ) -> Result<()> {
        for _ in 0..count {
            let mut element = T::default();
            f(element.serial_mut())?;
            self.insert(element);
        }
        Ok(())
    }
}

impl<T, S> Serial for HashSet<T, S>
where
    T: Serial + Default + Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::Iterable(self)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::Iterable(self)
    }
}
