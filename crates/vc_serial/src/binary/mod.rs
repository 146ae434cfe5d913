//! The binary traversal engine.
//!
//! # Wire format
//!
//! All multi-byte numbers are little-endian.
//!
//! | Category | Encoding |
//! |---|---|
//! | Arithmetic | raw bytes of the value; `bool` is one byte, `usize`/`isize` are 8 bytes, `char` is its `u32` scalar |
//! | Enum | `i32` discriminant |
//! | String | `u64` length `L` = byte count + 1, then the bytes and a zero terminator |
//! | Iterable | `u64` element count, then every element |
//! | Pair | `first`, then `second` |
//! | Aggregate | `u32` checksum, then every member in shape order |
//! | PointerLike | class name string, `u32` class checksum, then the members (no second checksum); a null slot is the empty string alone |
//!
//! ```
//! use vc_serial::binary::{BinaryReader, BinaryWriter};
//! use vc_serial::dynamics::FactoryRegistry;
//! use vc_serial::stream::MemoryStream;
//!
//! let mut stream = MemoryStream::new();
//! BinaryWriter::new(&mut stream).write(&String::from("hi")).unwrap();
//!
//! assert_eq!(stream.as_bytes(), &[3, 0, 0, 0, 0, 0, 0, 0, b'h', b'i', 0]);
//!
//! let registry = FactoryRegistry::new();
//! let mut text = String::new();
//! BinaryReader::new(&mut stream, &registry).read(&mut text).unwrap();
//! assert_eq!(text, "hi");
//! ```

// -----------------------------------------------------------------------------
// Modules

mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::BinaryReader;
pub use writer::BinaryWriter;
