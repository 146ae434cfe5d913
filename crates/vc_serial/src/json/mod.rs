//! The JSON traversal engine.
//!
//! Values are converted to and from [`serde_json::Value`] trees.
//!
//! | Category | JSON |
//! |---|---|
//! | Arithmetic | number, `bool` is a boolean, `char` is a one-character string |
//! | Enum | the `i32` discriminant as a number |
//! | String | string |
//! | Iterable | array |
//! | Pair | two-element array |
//! | Aggregate | object with a [`CHECKSUM_KEY`] entry and one entry per member |
//! | PointerLike | `null`, or the aggregate object with an extra [`CLASS_KEY`] entry |
//!
//! 128-bit integers and non-finite floats have no JSON form and fail with
//! [`UnsupportedType`](crate::SerialError::UnsupportedType).
//!
//! ```
//! use vc_serial::dynamics::FactoryRegistry;
//! use vc_serial::json::{JsonReader, JsonWriter};
//!
//! let json = JsonWriter::new().write(&(3_u8, String::from("three"))).unwrap();
//! assert_eq!(json, serde_json::json!([3, "three"]));
//!
//! let registry = FactoryRegistry::new();
//! let mut pair = (0_u8, String::new());
//! JsonReader::new(&registry).read(&json, &mut pair).unwrap();
//! assert_eq!(pair, (3, String::from("three")));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::JsonReader;
pub use writer::JsonWriter;

use alloc::format;
use serde_json::Value;

use crate::stream::Stream;
use crate::{Result, SerialError};

/// Object key holding the structural checksum of an aggregate.
pub const CHECKSUM_KEY: &str = "_checksum";

/// Object key holding the class name of a polymorphic object.
pub const CLASS_KEY: &str = "_class";

/// Writes `json` as compact text to `stream`.
pub fn dump_json(stream: &mut dyn Stream, json: &Value) -> Result<()> {
    let text = serde_json::to_vec(json).map_err(|err| SerialError::Io {
        position: stream.position(),
        source: err.into(),
    })?;
    stream.write(&text)
}

/// Drains `stream` and parses its content as one JSON document.
///
/// ```
/// use vc_serial::json::{dump_json, parse_json};
/// use vc_serial::stream::MemoryStream;
///
/// let mut stream = MemoryStream::new();
/// dump_json(&mut stream, &serde_json::json!({ "a": [1, 2] })).unwrap();
///
/// assert_eq!(stream.as_bytes(), br#"{"a":[1,2]}"#);
/// assert_eq!(parse_json(&mut stream).unwrap()["a"][1], 2);
/// ```
pub fn parse_json(stream: &mut dyn Stream) -> Result<Value> {
    let start = stream.position();
    let text = stream.read_all()?;
    serde_json::from_slice(&text)
        .map_err(|err| SerialError::malformed(start, format!("invalid JSON: {err}")))
}
