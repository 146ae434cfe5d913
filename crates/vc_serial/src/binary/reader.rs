use alloc::string::String;
use alloc::vec::Vec;

use super::writer::WireNum;
use crate::checksum::Checksum;
use crate::dynamics::FactoryRegistry;
use crate::endian::EndianSwap;
use crate::stream::Stream;
use crate::value::{Aggregate, ArithMut, PointerSlot, Serial, SerialMut};
use crate::{Result, SerialConfig, SerialError};

/// Decodes values from a [`Stream`].
///
/// Polymorphic slots are rebuilt through the given [`FactoryRegistry`].
pub struct BinaryReader<'a> {
    stream: &'a mut dyn Stream,
    registry: &'a FactoryRegistry,
    config: SerialConfig,
    depth: usize,
}

impl<'a> BinaryReader<'a> {
    #[inline]
    pub fn new(stream: &'a mut dyn Stream, registry: &'a FactoryRegistry) -> Self {
        Self::with_config(stream, registry, SerialConfig::new())
    }

    #[inline]
    pub fn with_config(
        stream: &'a mut dyn Stream,
        registry: &'a FactoryRegistry,
        config: SerialConfig,
    ) -> Self {
        Self {
            stream,
            registry,
            config,
            depth: 0,
        }
    }

    /// Decodes into `value`.
    ///
    /// On error, `value` is left in an unspecified but valid state.
    #[inline]
    pub fn read(&mut self, value: &mut dyn Serial) -> Result<()> {
        self.read_value(value.serial_mut())
    }

    fn read_value(&mut self, value: SerialMut<'_>) -> Result<()> {
        match value {
            SerialMut::Arithmetic(arith) => self.read_arith(arith),
            SerialMut::Enum(value) => {
                let position = self.stream.position();
                let discriminant = self.read_num::<i32>()?;
                if value.set_discriminant(discriminant) {
                    Ok(())
                } else {
                    Err(SerialError::malformed(
                        position,
                        alloc::format!(
                            "`{discriminant}` is not a variant of `{}`",
                            value.enum_type_name()
                        ),
                    ))
                }
            }
            SerialMut::String(text) => {
                *text = self.read_string()?;
                Ok(())
            }
            SerialMut::PointerLike(slot) => self.nested(|this| this.read_pointer(slot)),
            SerialMut::Iterable(iterable) => self.nested(|this| {
                let position = this.stream.position();
                let count = this.read_len()?;
                if let Some(expected) = iterable.fixed_len()
                    && expected != count
                {
                    return Err(SerialError::malformed(
                        position,
                        alloc::format!("expected {expected} elements, found {count}"),
                    ));
                }
                iterable.clear();
                iterable.read_elements(count, &mut |element| this.read_value(element))
            }),
            SerialMut::Pair(first, second) => self.nested(|this| {
                this.read_value(first.serial_mut())?;
                this.read_value(second.serial_mut())
            }),
            SerialMut::Aggregate(aggregate) => self.nested(|this| {
                let found = Checksum::from_raw(this.read_num::<u32>()?);
                let shape = aggregate.aggregate_shape();
                if found != aggregate.checksum() {
                    log::debug!(
                        "aggregate checksum mismatch: `{}` expects {}, found {found}",
                        shape.type_name(),
                        aggregate.checksum(),
                    );
                    return Err(SerialError::ChecksumMismatch {
                        type_name: shape.type_name().into(),
                        expected: aggregate.checksum(),
                        found,
                    });
                }
                this.read_members(aggregate)
            }),
        }
    }

    fn read_members(&mut self, aggregate: &mut dyn Aggregate) -> Result<()> {
        log::trace!("read members of `{}`", aggregate.aggregate_shape().type_name());
        aggregate.read_members(&mut |_, member| self.read_value(member))
    }

    fn read_pointer(&mut self, slot: &mut dyn PointerSlot) -> Result<()> {
        let class_name = self.read_string()?;
        if class_name.is_empty() {
            slot.clear();
            return Ok(());
        }

        let mut object = self.registry.create(&class_name)?;
        if !slot.accepts(object.as_ref(), self.registry) {
            log::debug!("class `{class_name}` does not fit the slot");
            return Err(SerialError::instantiation(
                class_name,
                "class cannot be stored in this slot",
            ));
        }

        let found = Checksum::from_raw(self.read_num::<u32>()?);
        let expected = object.class_checksum();
        if found != expected {
            log::debug!("class checksum mismatch: `{class_name}` expects {expected}, found {found}");
            return Err(SerialError::ChecksumMismatch {
                type_name: class_name.into(),
                expected,
                found,
            });
        }

        self.read_members(object.as_mut())?;
        slot.assign(object, self.registry)
    }

    fn read_arith(&mut self, arith: ArithMut<'_>) -> Result<()> {
        let position = self.stream.position();
        match arith {
            ArithMut::Bool(value) => {
                *value = match self.read_num::<u8>()? {
                    0 => false,
                    1 => true,
                    byte => {
                        return Err(SerialError::malformed(
                            position,
                            alloc::format!("`{byte}` is not a boolean"),
                        ));
                    }
                }
            }
            ArithMut::I8(value) => *value = self.read_num()?,
            ArithMut::I16(value) => *value = self.read_num()?,
            ArithMut::I32(value) => *value = self.read_num()?,
            ArithMut::I64(value) => *value = self.read_num()?,
            ArithMut::I128(value) => *value = self.read_num()?,
            ArithMut::Isize(value) => {
                let wide = self.read_num::<i64>()?;
                *value = isize::try_from(wide).map_err(|_| {
                    SerialError::malformed(position, "integer does not fit `isize`")
                })?;
            }
            ArithMut::U8(value) => *value = self.read_num()?,
            ArithMut::U16(value) => *value = self.read_num()?,
            ArithMut::U32(value) => *value = self.read_num()?,
            ArithMut::U64(value) => *value = self.read_num()?,
            ArithMut::U128(value) => *value = self.read_num()?,
            ArithMut::Usize(value) => {
                let wide = self.read_num::<u64>()?;
                *value = usize::try_from(wide).map_err(|_| {
                    SerialError::malformed(position, "integer does not fit `usize`")
                })?;
            }
            ArithMut::F32(value) => *value = self.read_num()?,
            ArithMut::F64(value) => *value = self.read_num()?,
            ArithMut::Char(value) => {
                let scalar = self.read_num::<u32>()?;
                *value = char::from_u32(scalar).ok_or_else(|| {
                    SerialError::malformed(
                        position,
                        alloc::format!("`{scalar:#X}` is not a unicode scalar value"),
                    )
                })?;
            }
        }
        Ok(())
    }

    #[inline]
    fn read_num<T: WireNum>(&mut self) -> Result<T> {
        T::read_from(self.stream).map(EndianSwap::normalize)
    }

    fn read_len(&mut self) -> Result<usize> {
        let position = self.stream.position();
        let len = self.read_num::<u64>()?;
        usize::try_from(len)
            .map_err(|_| SerialError::malformed(position, "length does not fit `usize`"))
    }

    /// Reads a length-prefixed, zero-terminated string through a bounded
    /// buffer, so a corrupt length cannot force a large allocation up front.
    fn read_string(&mut self) -> Result<String> {
        let mut remaining = self.read_len()?;
        let start = self.stream.position();

        let chunk_size = self.config.string_chunk_size();
        let mut chunk = alloc::vec![0u8; remaining.min(chunk_size)];
        let mut bytes = Vec::with_capacity(remaining.min(chunk_size));

        while remaining > 0 {
            let len = remaining.min(chunk_size);
            self.stream.read(&mut chunk[..len])?;
            bytes.extend_from_slice(&chunk[..len]);
            remaining -= len;
        }

        // A stored length of zero has no terminator to drop.
        bytes.pop();

        String::from_utf8(bytes)
            .map_err(|err| SerialError::malformed(start, alloc::format!("invalid UTF-8: {err}")))
    }

    fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        if let Some(max_depth) = self.config.max_depth()
            && self.depth >= max_depth
        {
            return Err(SerialError::malformed(
                self.stream.position(),
                alloc::format!("nesting exceeds the limit of {max_depth}"),
            ));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
