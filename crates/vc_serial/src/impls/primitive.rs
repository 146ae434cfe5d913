use alloc::string::String;

use crate::checksum::Checksum;
use crate::info::{Category, Signature};
use crate::value::{Arith, ArithMut, Serial, SerialMut, SerialRef};

macro_rules! impl_arithmetic {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl Signature for $ty {
                const CATEGORY: Category = Category::Arithmetic;
                const NAME_CHECKSUM: Checksum = Checksum::of(stringify!($ty));

                #[inline]
                fn type_name() -> &'static str {
                    stringify!($ty)
                }
            }

            impl Serial for $ty {
                #[inline]
                fn serial_ref(&self) -> SerialRef<'_> {
                    SerialRef::Arithmetic(Arith::$variant(*self))
                }

                #[inline]
                fn serial_mut(&mut self) -> SerialMut<'_> {
                    SerialMut::Arithmetic(ArithMut::$variant(self))
                }
            }
        )*
    };
}

impl_arithmetic! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
}

impl Signature for String {
    const CATEGORY: Category = Category::String;
    const NAME_CHECKSUM: Checksum = Checksum::of("String");

    #[inline]
    fn type_name() -> &'static str {
        "String"
    }
}

impl Serial for String {
    #[inline]
    fn serial_ref(&self) -> SerialRef<'_> {
        SerialRef::String(self)
    }

    #[inline]
    fn serial_mut(&mut self) -> SerialMut<'_> {
        SerialMut::String(self)
    }
}
