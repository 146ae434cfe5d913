#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate as `vc_serial`, which has to resolve inside
// the crate itself as well as in doctests and dependents.
extern crate self as vc_serial;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod error;
mod hash;

pub mod binary;
pub mod checksum;
pub mod dynamics;
pub mod endian;
pub mod impls;
pub mod info;
pub mod stream;
pub mod value;

#[cfg(feature = "json")]
pub mod json;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use config::SerialConfig;
pub use error::{Result, SerialError};
pub use vc_serial_derive as derive;

use alloc::vec::Vec;

use crate::binary::{BinaryReader, BinaryWriter};
use crate::dynamics::FactoryRegistry;
use crate::stream::MemoryStream;
use crate::value::Serial;

/// Encodes `value` into the binary wire format.
///
/// # Examples
///
/// ```
/// let bytes = vc_serial::to_bytes(&vec![1_i32, 2, 3]).unwrap();
///
/// // 8-byte count followed by three 4-byte integers.
/// assert_eq!(bytes.len(), 8 + 3 * 4);
/// ```
pub fn to_bytes(value: &dyn Serial) -> Result<Vec<u8>> {
    let mut stream = MemoryStream::new();
    BinaryWriter::new(&mut stream).write(value)?;
    Ok(stream.into_inner())
}

/// Decodes a `T` from the binary wire format.
///
/// Polymorphic slots inside `T` are rebuilt through `registry`.
///
/// # Examples
///
/// ```
/// use vc_serial::dynamics::FactoryRegistry;
///
/// let registry = FactoryRegistry::new();
/// let bytes = vc_serial::to_bytes(&String::from("hello")).unwrap();
/// let text: String = vc_serial::from_bytes(&bytes, &registry).unwrap();
///
/// assert_eq!(text, "hello");
/// ```
pub fn from_bytes<T: Serial + Default>(bytes: &[u8], registry: &FactoryRegistry) -> Result<T> {
    let mut value = T::default();
    let mut stream = MemoryStream::from(bytes.to_vec());
    BinaryReader::new(&mut stream, registry).read(&mut value)?;
    Ok(value)
}

/// Encodes `value` as a JSON document.
///
/// # Examples
///
/// ```
/// let json = vc_serial::to_json(&vec![1_u8, 2]).unwrap();
/// assert_eq!(json.to_string(), "[1,2]");
/// ```
#[cfg(feature = "json")]
pub fn to_json(value: &dyn Serial) -> Result<serde_json::Value> {
    json::JsonWriter::new().write(value)
}

/// Decodes a `T` from a JSON document.
///
/// # Examples
///
/// ```
/// use vc_serial::dynamics::FactoryRegistry;
///
/// let registry = FactoryRegistry::new();
/// let json = serde_json::json!([[1, "one"], [2, "two"]]);
/// let map: std::collections::BTreeMap<u8, String> =
///     vc_serial::from_json(&json, &registry).unwrap();
///
/// assert_eq!(map[&2], "two");
/// ```
#[cfg(feature = "json")]
pub fn from_json<T: Serial + Default>(
    json: &serde_json::Value,
    registry: &FactoryRegistry,
) -> Result<T> {
    let mut value = T::default();
    json::JsonReader::new(registry).read(json, &mut value)?;
    Ok(value)
}
