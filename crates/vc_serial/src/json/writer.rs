use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde_json::{Map, Number, Value};

use super::{CHECKSUM_KEY, CLASS_KEY};
use crate::value::{Aggregate, Arith, Serial, SerialRef};
use crate::{Result, SerialError};

/// Converts values into JSON trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter {
    _private: (),
}

impl JsonWriter {
    #[inline]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Converts `value` into a JSON tree.
    #[inline]
    pub fn write(&self, value: &dyn Serial) -> Result<Value> {
        self.write_value(value.serial_ref())
    }

    fn write_value(&self, value: SerialRef<'_>) -> Result<Value> {
        match value {
            SerialRef::Arithmetic(arith) => write_arith(arith),
            SerialRef::Enum(value) => Ok(Value::from(value.discriminant())),
            SerialRef::String(text) => Ok(Value::String(text.into())),
            SerialRef::PointerLike(None) => Ok(Value::Null),
            SerialRef::PointerLike(Some(object)) => {
                let mut map = Map::new();
                map.insert(CLASS_KEY.into(), Value::from(object.class_name()));
                map.insert(
                    CHECKSUM_KEY.into(),
                    Value::from(object.class_checksum().value()),
                );
                self.write_members(object, &mut map)?;
                Ok(Value::Object(map))
            }
            SerialRef::Iterable(iterable) => {
                let mut array = Vec::with_capacity(iterable.len());
                iterable.visit(&mut |element| {
                    array.push(self.write_value(element)?);
                    Ok(())
                })?;
                Ok(Value::Array(array))
            }
            SerialRef::Pair(first, second) => Ok(Value::Array(alloc::vec![
                self.write_value(first.serial_ref())?,
                self.write_value(second.serial_ref())?,
            ])),
            SerialRef::Aggregate(aggregate) => {
                let mut map = Map::new();
                map.insert(
                    CHECKSUM_KEY.into(),
                    Value::from(aggregate.checksum().value()),
                );
                self.write_members(aggregate, &mut map)?;
                Ok(Value::Object(map))
            }
        }
    }

    fn write_members(
        &self,
        aggregate: &dyn Aggregate,
        map: &mut Map<String, Value>,
    ) -> Result<()> {
        log::trace!("write members of `{}`", aggregate.aggregate_shape().type_name());
        aggregate.visit_members(&mut |member, value| {
            map.insert(member.name().into(), self.write_value(value)?);
            Ok(())
        })
    }
}

fn write_arith(arith: Arith) -> Result<Value> {
    let value = match arith {
        Arith::Bool(value) => Value::Bool(value),
        Arith::I8(value) => Value::from(value),
        Arith::I16(value) => Value::from(value),
        Arith::I32(value) => Value::from(value),
        Arith::I64(value) => Value::from(value),
        Arith::Isize(value) => Value::from(value),
        Arith::U8(value) => Value::from(value),
        Arith::U16(value) => Value::from(value),
        Arith::U32(value) => Value::from(value),
        Arith::U64(value) => Value::from(value),
        Arith::Usize(value) => Value::from(value),
        Arith::F32(value) => finite(f64::from(value), arith)?,
        Arith::F64(value) => finite(value, arith)?,
        Arith::Char(value) => Value::String(value.to_string()),
        Arith::I128(_) | Arith::U128(_) => return Err(unsupported(arith)),
    };
    Ok(value)
}

#[inline]
fn finite(value: f64, arith: Arith) -> Result<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| unsupported(arith))
}

#[inline]
fn unsupported(arith: Arith) -> SerialError {
    SerialError::UnsupportedType {
        type_name: arith.type_name().into(),
    }
}
