//! Byte sources and sinks driven by the traversal engines.
//!
//! The engines only ever call the operations of [`Stream`]; they never seek
//! and never look at the medium behind it.
//!
//! - [`MemoryStream`]: an in-memory buffer that can be written and read back.
//! - [`InputStream`]: read side over any [`std::io::Read`].
//! - [`OutputStream`]: write side over any [`std::io::Write`].

// -----------------------------------------------------------------------------
// Modules

mod io;
mod memory;

// -----------------------------------------------------------------------------
// Exports

pub use io::{InputStream, OutputStream};
pub use memory::MemoryStream;

use alloc::vec::Vec;

use crate::Result;

/// Byte-level access to an underlying medium.
pub trait Stream {
    /// Fills `buf` completely.
    ///
    /// A short read is a [`MalformedData`] error carrying the position at
    /// which the stream ran dry.
    ///
    /// [`MalformedData`]: crate::SerialError::MalformedData
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Writes all of `buf`.
    fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// `false` once an operation on this stream has failed.
    fn is_healthy(&self) -> bool;

    /// Drains everything that is left to read.
    fn read_all(&mut self) -> Result<Vec<u8>>;

    /// Number of bytes consumed (for readers) or produced (for writers) so far.
    fn position(&self) -> u64;
}
