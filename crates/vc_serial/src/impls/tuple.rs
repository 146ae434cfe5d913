use super::concat;
use crate::checksum::Checksum;
use crate::info::{Category, GenericNameCell, Signature};
use crate::value::{Serial, SerialMut, SerialRef};

impl<A: Signature, B: Signature> Signature for (A, B) {
    const CATEGORY: Category = Category::Pair;
    const NAME_CHECKSUM: Checksum = Checksum::of("(")
        .combine(A::NAME_CHECKSUM)
        .combine(Checksum::of(", "))
        .combine(B::NAME_CHECKSUM)
        .combine(Checksum::of(")"));

    fn type_name() -> &'static str {
        static CELL: GenericNameCell = GenericNameCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["(", A::type_name(), ", ", B::type_name(), ")"]))
    }
}

impl<A: Serial, B: Serial> Serial for (A, B) {
    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::Pair(&self.0, &self.1)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::Pair(&mut self.0, &mut self.1)
    }
}
