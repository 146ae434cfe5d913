use alloc::collections::{LinkedList, VecDeque};
use alloc::vec::Vec;

use super::{PREALLOCATE_LIMIT, concat};
use crate::Result;
use crate::checksum::Checksum;
use crate::info::{Category, GenericNameCell, Signature};
use crate::value::{Iterable, IterableMut, Serial, SerialMut, SerialRef};

macro_rules! impl_sequence {
    ($ty:ident, $name:literal, $push:ident $(, $reserve:ident)?) => {
        impl<T: Signature> Signature for $ty<T> {
            const CATEGORY: Category = Category::Iterable;
            const NAME_CHECKSUM: Checksum = Checksum::of(concat!($name, "<"))
                .combine(T::NAME_CHECKSUM)
                .combine(Checksum::of(">"));

            fn type_name() -> &'static str {
                static CELL: GenericNameCell = GenericNameCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$name, "<", T::type_name(), ">"]))
            }
        }

        impl<T: Serial> Iterable for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            fn visit(&self, f: &mut dyn FnMut(SerialRef<'_>) -> Result<()>) -> Result<()> {
                self.iter().try_for_each(|element| f(element.serial_ref()))
            }
        }

        impl<T: Serial + Default> IterableMut for $ty<T> {
            #[inline]
            fn clear(&mut self) {
                <$ty<T>>::clear(self);
            }

            fn read_elements(
                &mut self,
                count: usize,
                f: &mut dyn FnMut(SerialMut<'_>) -> Result<()>,
            ) -> Result<()> {
                $( self.$reserve(count.min(PREALLOCATE_LIMIT)); )?
                for _ in 0..count {
                    let mut element = T::default();
                    f(element.serial_mut())?;
                    self.$push(element);
                }
                Ok(())
            }
        }

        impl<T: Serial + Default> Serial for $ty<T> {
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

impl_sequence!(Vec, "Vec", push, reserve);
impl_sequence!(VecDeque, "VecDeque", push_back, reserve);
impl_sequence!(LinkedList, "LinkedList", push_back);
