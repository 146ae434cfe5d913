use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use super::concat;
use crate::Result;
use crate::checksum::Checksum;
use crate::info::{Category, GenericNameCell, Signature};
use crate::value::{Iterable, IterableMut, Serial, SerialMut, SerialRef};

// Entries travel as pairs. Decoding fills a fresh key and value and inserts
// them once both are complete.

macro_rules! impl_map {
    ($ty:ident, $name:literal, [$($hasher:ident)?], [$($key_bound:tt)+]) => {
        impl<K: Signature, V: Signature $(, $hasher: 'static)?> Signature for $ty<K, V $(, $hasher)?> {
            const CATEGORY: Category = Category::Iterable;
            const NAME_CHECKSUM: Checksum = Checksum::of(concat!($name, "<"))
                .combine(K::NAME_CHECKSUM)
                .combine(Checksum::of(", "))
                .combine(V::NAME_CHECKSUM)
                .combine(Checksum::of(">"));

            fn type_name() -> &'static str {
                static CELL: GenericNameCell = GenericNameCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$name, "<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }
        }

        impl<K: Serial, V: Serial $(, $hasher)?> Iterable for $ty<K, V $(, $hasher)?> {
            #[inline]
            fn len(&self) -> usize {
                <$ty<K, V $(, $hasher)?>>::len(self)
            }

            fn visit(&self, f: &mut dyn FnMut(SerialRef<'_>) -> Result<()>) -> Result<()> {
                self.iter()
                    .try_for_each(|(key, value)| f(SerialRef::Pair(key, value)))
            }
        }

        impl<K, V $(, $hasher)?> IterableMut for $ty<K, V $(, $hasher)?>
        where
            K: Serial + Default + $($key_bound)+,
            V: Serial + Default,
            $($hasher: BuildHasher,)?
        {
            #[inline]
            fn clear(&mut self) {
                <$ty<K, V $(, $hasher)?>>::clear(self);
            }

            fn read_elements(
                &mut self,
                count: usize,
                f: &mut dyn FnMut(SerialMut<'_>) -> Result<()>,
            ) -> Result<()> {
                for _ in 0..count {
                    let mut key = K::default();
                    let mut value = V::default();
                    f(SerialMut::Pair(&mut key, &mut value))?;
                    self.insert(key, value);
                }
                Ok(())
            }
        }

        impl<K, V $(, $hasher)?> Serial for $ty<K, V $(, $hasher)?>
        where
            K: Serial + Default + $($key_bound)+,
            V: Serial + Default,
            $($hasher: BuildHasher,)?
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
    };
}

impl_map!(BTreeMap, "BTreeMap", [], [Ord]);
impl_map!(HashMap, "HashMap", [S], [Eq + Hash]);
