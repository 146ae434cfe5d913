use crate::Result;
use crate::checksum::Checksum;
use crate::info::{Category, GenericNameCell, Signature};
use crate::value::{Iterable, IterableMut, Serial, SerialMut, SerialRef};

// Fixed arrays are length-prefixed like any other iterable. Decoding insists
// on exactly `N` elements and fills the existing ones in place.

impl<T: Signature, const N: usize> Signature for [T; N] {
    const CATEGORY: Category = Category::Iterable;
    const NAME_CHECKSUM: Checksum = Checksum::of("[")
        .combine(T::NAME_CHECKSUM)
        .combine(Checksum::of("; "))
        .combine(Checksum::of_decimal(N))
        .combine(Checksum::of("]"));

    fn type_name() -> &'static str {
        static CELL: GenericNameCell = GenericNameCell::new();
        CELL.get_or_insert::<Self>(|| alloc::format!("[{}; {N}]", T::type_name()))
    }
}

impl<T: Serial, const N: usize> Iterable for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn visit(&self, f: &mut dyn FnMut(SerialRef<'_>) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(|element| f(element.serial_ref()))
    }
}

impl<T: Serial, const N: usize> IterableMut for [T; N] {
    #[inline]
    fn fixed_len(&self) -> Option<usize> {
        Some(N)
    }

    #[inline]
    fn clear(&mut self) {}

    fn read_elements(
        &mut self,
        count: usize,
        f: &mut dyn FnMut(SerialMut<'_>) -> Result<()>,
    ) -> Result<()> {
        debug_assert_eq!(count, N, "caller checks `fixed_len`");
        self.iter_mut()
            .try_for_each(|element| f(element.serial_mut()))
    }
}

impl<T: Serial, const N: usize> Serial for [T; N] {
    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::Iterable(self)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::Iterable(self)
    }
}
