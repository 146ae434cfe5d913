use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use serde_json::{Map, Value};

use super::{CHECKSUM_KEY, CLASS_KEY};
use crate::checksum::Checksum;
use crate::dynamics::FactoryRegistry;
use crate::value::{Aggregate, ArithMut, PointerSlot, Serial, SerialMut};
use crate::{Result, SerialConfig, SerialError};

/// One step from the document root to the node being decoded.
#[derive(Debug, Clone, Copy)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

/// Decodes values from JSON trees.
///
/// Errors name the offending node with a path such as `$.points[2].x`.
pub struct JsonReader<'a> {
    registry: &'a FactoryRegistry,
    config: SerialConfig,
    path: Vec<Segment>,
}

impl<'a> JsonReader<'a> {
    #[inline]
    pub fn new(registry: &'a FactoryRegistry) -> Self {
        Self::with_config(registry, SerialConfig::new())
    }

    #[inline]
    pub fn with_config(registry: &'a FactoryRegistry, config: SerialConfig) -> Self {
        Self {
            registry,
            config,
            path: Vec::new(),
        }
    }

    /// Decodes `json` into `value`.
    ///
    /// On error, `value` is left in an unspecified but valid state.
    pub fn read(&mut self, json: &Value, value: &mut dyn Serial) -> Result<()> {
        self.path.clear();
        self.read_value(json, value.serial_mut())
    }

    fn read_value(&mut self, json: &Value, value: SerialMut<'_>) -> Result<()> {
        match value {
            SerialMut::Arithmetic(arith) => self.read_arith(json, arith),
            SerialMut::Enum(value) => {
                let discriminant = json
                    .as_i64()
                    .and_then(|raw| i32::try_from(raw).ok())
                    .ok_or_else(|| self.mismatch("an enum discriminant", json))?;
                if value.set_discriminant(discriminant) {
                    Ok(())
                } else {
                    Err(self.malformed(format!(
                        "`{discriminant}` is not a variant of `{}`",
                        value.enum_type_name()
                    )))
                }
            }
            SerialMut::String(text) => {
                let source = json
                    .as_str()
                    .ok_or_else(|| self.mismatch("a string", json))?;
                text.clear();
                text.push_str(source);
                Ok(())
            }
            SerialMut::PointerLike(slot) => self.read_pointer(json, slot),
            SerialMut::Iterable(iterable) => {
                let array = json
                    .as_array()
                    .ok_or_else(|| self.mismatch("an array", json))?;
                if let Some(expected) = iterable.fixed_len()
                    && expected != array.len()
                {
                    return Err(self.malformed(format!(
                        "expected {expected} elements, found {}",
                        array.len()
                    )));
                }

                self.check_depth()?;
                iterable.clear();
                let mut index = 0;
                iterable.read_elements(array.len(), &mut |element| {
                    let node = &array[index];
                    let result = self.scoped(Segment::Index(index), |this| {
                        this.read_value(node, element)
                    });
                    index += 1;
                    result
                })
            }
            SerialMut::Pair(first, second) => {
                let [first_node, second_node] = json
                    .as_array()
                    .map(Vec::as_slice)
                    .and_then(|array| <&[Value; 2]>::try_from(array).ok())
                    .ok_or_else(|| self.mismatch("a two-element array", json))?;

                self.check_depth()?;
                self.scoped(Segment::Index(0), |this| {
                    this.read_value(first_node, first.serial_mut())
                })?;
                self.scoped(Segment::Index(1), |this| {
                    this.read_value(second_node, second.serial_mut())
                })
            }
            SerialMut::Aggregate(aggregate) => {
                let object = json
                    .as_object()
                    .ok_or_else(|| self.mismatch("an object", json))?;

                let found = self.read_checksum(object)?;
                let expected = aggregate.checksum();
                if found != expected {
                    let type_name = aggregate.aggregate_shape().type_name();
                    log::debug!(
                        "aggregate checksum mismatch at {}: `{type_name}` expects {expected}, found {found}",
                        self.path(),
                    );
                    return Err(SerialError::ChecksumMismatch {
                        type_name: type_name.into(),
                        expected,
                        found,
                    });
                }

                self.check_depth()?;
                self.read_members(object, aggregate)
            }
        }
    }

    fn read_members(
        &mut self,
        object: &Map<String, Value>,
        aggregate: &mut dyn Aggregate,
    ) -> Result<()> {
        log::trace!("read members of `{}`", aggregate.aggregate_shape().type_name());
        aggregate.read_members(&mut |member, value| {
            let name = member.name();
            let node = object
                .get(name)
                .ok_or_else(|| self.malformed(format!("missing member `{name}`")))?;
            self.scoped(Segment::Key(name), |this| this.read_value(node, value))
        })
    }

    fn read_pointer(&mut self, json: &Value, slot: &mut dyn PointerSlot) -> Result<()> {
        let object = match json {
            Value::Null => {
                slot.clear();
                return Ok(());
            }
            Value::Object(object) => object,
            other => return Err(self.mismatch("an object or null", other)),
        };

        let class_name = object
            .get(CLASS_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| self.malformed(format!("missing string `{CLASS_KEY}`")))?;

        let mut instance = self.registry.create(class_name)?;
        if !slot.accepts(instance.as_ref(), self.registry) {
            log::debug!("class `{class_name}` does not fit the slot at {}", self.path());
            return Err(SerialError::instantiation(
                String::from(class_name),
                "class cannot be stored in this slot",
            ));
        }

        let found = self.read_checksum(object)?;
        let expected = instance.class_checksum();
        if found != expected {
            log::debug!(
                "class checksum mismatch at {}: `{class_name}` expects {expected}, found {found}",
                self.path(),
            );
            return Err(SerialError::ChecksumMismatch {
                type_name: String::from(class_name).into(),
                expected,
                found,
            });
        }

        self.check_depth()?;
        self.read_members(object, instance.as_mut())?;
        slot.assign(instance, self.registry)
    }

    fn read_checksum(&self, object: &Map<String, Value>) -> Result<Checksum> {
        object
            .get(CHECKSUM_KEY)
            .and_then(Value::as_u64)
            .and_then(|raw| u32::try_from(raw).ok())
            .map(Checksum::from_raw)
            .ok_or_else(|| self.malformed(format!("missing or invalid `{CHECKSUM_KEY}`")))
    }

    fn read_arith(&self, json: &Value, arith: ArithMut<'_>) -> Result<()> {
        let name = arith.type_name();
        match arith {
            ArithMut::Bool(value) => {
                *value = json
                    .as_bool()
                    .ok_or_else(|| self.mismatch("a boolean", json))?;
            }
            ArithMut::I8(value) => *value = self.integer(json, json.as_i64(), name)?,
            ArithMut::I16(value) => *value = self.integer(json, json.as_i64(), name)?,
            ArithMut::I32(value) => *value = self.integer(json, json.as_i64(), name)?,
            ArithMut::I64(value) => *value = self.integer(json, json.as_i64(), name)?,
            ArithMut::Isize(value) => *value = self.integer(json, json.as_i64(), name)?,
            ArithMut::U8(value) => *value = self.integer(json, json.as_u64(), name)?,
            ArithMut::U16(value) => *value = self.integer(json, json.as_u64(), name)?,
            ArithMut::U32(value) => *value = self.integer(json, json.as_u64(), name)?,
            ArithMut::U64(value) => *value = self.integer(json, json.as_u64(), name)?,
            ArithMut::Usize(value) => *value = self.integer(json, json.as_u64(), name)?,
            ArithMut::F32(value) => {
                *value = json.as_f64().ok_or_else(|| self.mismatch(name, json))? as f32;
            }
            ArithMut::F64(value) => {
                *value = json.as_f64().ok_or_else(|| self.mismatch(name, json))?;
            }
            ArithMut::Char(value) => {
                let mut chars = json.as_str().unwrap_or_default().chars();
                *value = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(self.mismatch("a one-character string", json)),
                };
            }
            ArithMut::I128(_) | ArithMut::U128(_) => {
                return Err(SerialError::UnsupportedType {
                    type_name: name.into(),
                });
            }
        }
        Ok(())
    }

    /// Narrows a JSON integer to the target width.
    fn integer<T: TryFrom<W>, W>(&self, json: &Value, wide: Option<W>, name: &str) -> Result<T> {
        wide.and_then(|wide| T::try_from(wide).ok())
            .ok_or_else(|| self.mismatch(name, json))
    }

    fn scoped<R>(
        &mut self,
        segment: Segment,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    fn check_depth(&self) -> Result<()> {
        match self.config.max_depth() {
            Some(max_depth) if self.path.len() >= max_depth => Err(self.malformed(format!(
                "nesting exceeds the limit of {max_depth}"
            ))),
            _ => Ok(()),
        }
    }

    fn mismatch(&self, expected: &str, found: &Value) -> SerialError {
        let found = match found {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        self.malformed(format!("expected {expected}, found {found}"))
    }

    fn malformed(&self, reason: impl Into<Cow<'static, str>>) -> SerialError {
        SerialError::MalformedData {
            position: None,
            reason: format!("{} at {}", reason.into(), self.path()).into(),
        }
    }

    #[inline]
    fn path(&self) -> JsonPath<'_> {
        JsonPath(&self.path)
    }
}

/// Displays a path as `$.member[index]`.
struct JsonPath<'a>(&'a [Segment]);

impl fmt::Display for JsonPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('$')?;
        for segment in self.0 {
            match segment {
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use serde_json::json;

    use super::JsonReader;
    use crate::dynamics::FactoryRegistry;
    use crate::{SerialConfig, SerialError, from_json, to_json};

    fn reason(err: SerialError) -> String {
        match err {
            SerialError::MalformedData {
                position: None,
                reason,
            } => reason.into_owned(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn round_trips() {
        let registry = FactoryRegistry::new();

        let list = vec![-1_i64, 0, 1];
        let json = to_json(&list).unwrap();
        assert_eq!(from_json::<Vec<i64>>(&json, &registry).unwrap(), list);

        let set: BTreeSet<char> = ['a', 'z'].into();
        let json = to_json(&set).unwrap();
        assert_eq!(json, json!(["a", "z"]));
        assert_eq!(from_json::<BTreeSet<char>>(&json, &registry).unwrap(), set);

        let map: BTreeMap<String, [u8; 2]> = [("k".into(), [1, 2])].into();
        let json = to_json(&map).unwrap();
        assert_eq!(json, json!([["k", [1, 2]]]));
        assert_eq!(from_json::<BTreeMap<String, [u8; 2]>>(&json, &registry).unwrap(), map);
    }

    #[test]
    fn type_mismatch_names_path() {
        let registry = FactoryRegistry::new();
        let json = json!([[1, 2], [3, "four"]]);

        let err = from_json::<Vec<Vec<u8>>>(&json, &registry).unwrap_err();
        assert_eq!(reason(err), "expected u8, found a string at $[1][1]");
    }

    #[test]
    fn out_of_range() {
        let registry = FactoryRegistry::new();
        assert!(from_json::<u8>(&json!(256), &registry).is_err());
        assert!(from_json::<u32>(&json!(-1), &registry).is_err());
        assert!(from_json::<char>(&json!("ab"), &registry).is_err());
        assert!(matches!(
            from_json::<i128>(&json!(1), &registry),
            Err(SerialError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn fixed_array_length() {
        let registry = FactoryRegistry::new();
        let err = from_json::<[u8; 3]>(&json!([1, 2]), &registry).unwrap_err();
        assert_eq!(reason(err), "expected 3 elements, found 2 at $");
    }

    #[test]
    fn depth_limit() {
        let registry = FactoryRegistry::new();
        let config = SerialConfig::new().with_max_depth(Some(1));
        let mut value: Vec<Vec<u8>> = Vec::new();

        let err = JsonReader::with_config(&registry, config)
            .read(&json!([[1]]), &mut value)
            .unwrap_err();
        assert!(reason(err).starts_with("nesting exceeds the limit of 1"));
    }
}
