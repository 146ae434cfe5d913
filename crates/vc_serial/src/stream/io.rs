use alloc::vec::Vec;
use std::io::{self, Read, Write};

use super::Stream;
use crate::{Result, SerialError};

// -----------------------------------------------------------------------------
// InputStream

/// The read side of a stream over any [`Read`] source, such as a file or a
/// socket.
///
/// Writing to an `InputStream` is an [`Io`](SerialError::Io) error.
///
/// # Examples
///
/// ```
/// use vc_serial::stream::{InputStream, Stream};
///
/// let mut stream = InputStream::new(&b"\x01\x02"[..]);
/// let mut buf = [0u8; 2];
/// stream.read(&mut buf).unwrap();
///
/// assert_eq!(buf, [1, 2]);
/// assert_eq!(stream.position(), 2);
/// ```
pub struct InputStream<R: Read> {
    reader: R,
    position: u64,
    healthy: bool,
}

impl<R: Read> InputStream<R> {
    #[inline]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            healthy: true,
        }
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fail(&mut self, source: io::Error) -> SerialError {
        self.healthy = false;
        if source.kind() == io::ErrorKind::UnexpectedEof {
            SerialError::malformed(self.position, "unexpected end of stream")
        } else {
            SerialError::Io {
                position: self.position,
                source,
            }
        }
    }
}

impl<R: Read> Stream for InputStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.reader.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn write(&mut self, _: &[u8]) -> Result<()> {
        self.healthy = false;
        Err(SerialError::Io {
            position: self.position,
            source: io::Error::new(io::ErrorKind::Unsupported, "input stream is read-only"),
        })
    }

    #[inline]
    fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut rest = Vec::new();
        match self.reader.read_to_end(&mut rest) {
            Ok(len) => {
                self.position += len as u64;
                Ok(rest)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }
}

// -----------------------------------------------------------------------------
// OutputStream

/// The write side of a stream over any [`Write`] sink.
///
/// Reading from an `OutputStream` is an [`Io`](SerialError::Io) error.
/// The sink is flushed when the stream is dropped; call
/// [`finish`](OutputStream::finish) to observe flush errors.
pub struct OutputStream<W: Write> {
    writer: W,
    position: u64,
    healthy: bool,
}

impl<W: Write> OutputStream<W> {
    #[inline]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            healthy: true,
        }
    }

    /// Flushes the sink.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| {
            self.healthy = false;
            SerialError::Io {
                position: self.position,
                source,
            }
        })
    }

    fn unsupported(&mut self) -> SerialError {
        self.healthy = false;
        SerialError::Io {
            position: self.position,
            source: io::Error::new(io::ErrorKind::Unsupported, "output stream is write-only"),
        }
    }
}

impl<W: Write> Stream for OutputStream<W> {
    fn read(&mut self, _: &mut [u8]) -> Result<()> {
        Err(self.unsupported())
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        match self.writer.write_all(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(source) => {
                self.healthy = false;
                Err(SerialError::Io {
                    position: self.position,
                    source,
                })
            }
        }
    }

    #[inline]
    fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        Err(self.unsupported())
    }

    #[inline]
    fn position(&self) -> u64 {
        self.position
    }
}

impl<W: Write> Drop for OutputStream<W> {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            log::warn!("flushing output stream on drop failed at byte {}: {err}", self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InputStream, OutputStream};
    use crate::SerialError;
    use crate::stream::Stream;
    use alloc::vec::Vec;

    #[test]
    fn eof_is_malformed() {
        let mut stream = InputStream::new(&[1u8, 2, 3][..]);
        let mut buf = [0u8; 4];
        let err = stream.read(&mut buf).unwrap_err();

        assert!(matches!(
            err,
            SerialError::MalformedData {
                position: Some(0),
                ..
            }
        ));
        assert!(!stream.is_healthy());
    }

    #[test]
    fn output_counts_bytes() {
        let mut sink = Vec::new();
        {
            let mut stream = OutputStream::new(&mut sink);
            stream.write(b"abcd").unwrap();
            stream.write(b"ef").unwrap();
            assert_eq!(stream.position(), 6);
            assert!(stream.read_all().is_err());
        }
        assert_eq!(sink, b"abcdef");
    }
}
