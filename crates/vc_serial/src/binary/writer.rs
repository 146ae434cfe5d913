use crate::Result;
use crate::endian::EndianSwap;
use crate::stream::Stream;
use crate::value::{Aggregate, Arith, Serial, SerialRef};

/// Encodes values into a [`Stream`].
pub struct BinaryWriter<'a> {
    stream: &'a mut dyn Stream,
}

impl<'a> BinaryWriter<'a> {
    #[inline]
    pub fn new(stream: &'a mut dyn Stream) -> Self {
        Self { stream }
    }

    /// Encodes `value`.
    #[inline]
    pub fn write(&mut self, value: &dyn Serial) -> Result<()> {
        self.write_value(value.serial_ref())
    }

    fn write_value(&mut self, value: SerialRef<'_>) -> Result<()> {
        match value {
            SerialRef::Arithmetic(arith) => self.write_arith(arith),
            SerialRef::Enum(value) => self.write_num(value.discriminant()),
            SerialRef::String(text) => self.write_str(text),
            SerialRef::PointerLike(None) => self.write_str(""),
            SerialRef::PointerLike(Some(object)) => {
                self.write_str(object.class_name())?;
                self.write_num(object.class_checksum().value())?;
                self.write_members(object)
            }
            SerialRef::Iterable(iterable) => {
                self.write_num(iterable.len() as u64)?;
                iterable.visit(&mut |element| self.write_value(element))
            }
            SerialRef::Pair(first, second) => {
                self.write_value(first.serial_ref())?;
                self.write_value(second.serial_ref())
            }
            SerialRef::Aggregate(aggregate) => {
                self.write_num(aggregate.checksum().value())?;
                self.write_members(aggregate)
            }
        }
    }

    fn write_members(&mut self, aggregate: &dyn Aggregate) -> Result<()> {
        log::trace!("write members of `{}`", aggregate.aggregate_shape().type_name());
        aggregate.visit_members(&mut |_, member| self.write_value(member))
    }

    fn write_arith(&mut self, arith: Arith) -> Result<()> {
        match arith {
            Arith::Bool(value) => self.write_num(value as u8),
            Arith::I8(value) => self.write_num(value),
            Arith::I16(value) => self.write_num(value),
            Arith::I32(value) => self.write_num(value),
            Arith::I64(value) => self.write_num(value),
            Arith::I128(value) => self.write_num(value),
            Arith::Isize(value) => self.write_num(value as i64),
            Arith::U8(value) => self.write_num(value),
            Arith::U16(value) => self.write_num(value),
            Arith::U32(value) => self.write_num(value),
            Arith::U64(value) => self.write_num(value),
            Arith::U128(value) => self.write_num(value),
            Arith::Usize(value) => self.write_num(value as u64),
            Arith::F32(value) => self.write_num(value),
            Arith::F64(value) => self.write_num(value),
            Arith::Char(value) => self.write_num(value as u32),
        }
    }

    #[inline]
    fn write_num<T: WireNum>(&mut self, value: T) -> Result<()> {
        value.normalize().write_to(self.stream)
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.write_num(text.len() as u64 + 1)?;
        self.stream.write(text.as_bytes())?;
        self.stream.write(&[0])
    }
}

// -----------------------------------------------------------------------------
// WireNum

/// A number with a fixed-size wire representation.
pub(super) trait WireNum: EndianSwap {
    fn write_to(self, stream: &mut dyn Stream) -> Result<()>;

    fn read_from(stream: &mut dyn Stream) -> Result<Self>;
}

macro_rules! impl_wire_num {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireNum for $ty {
                #[inline]
                fn write_to(self, stream: &mut dyn Stream) -> Result<()> {
                    stream.write(&self.to_ne_bytes())
                }

                #[inline]
                fn read_from(stream: &mut dyn Stream) -> Result<Self> {
                    let mut bytes = [0u8; size_of::<$ty>()];
                    stream.read(&mut bytes)?;
                    Ok(<$ty>::from_ne_bytes(bytes))
                }
            }
        )*
    };
}

impl_wire_num!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);
