use alloc::vec::Vec;

use super::Stream;
use crate::{Result, SerialError};

/// An in-memory byte buffer with an independent read cursor.
///
/// Writes always append; reads start at the beginning of the buffer.
/// [`position`](Stream::position) is the read cursor.
///
/// # Examples
///
/// ```
/// use vc_serial::stream::{MemoryStream, Stream};
///
/// let mut stream = MemoryStream::new();
/// stream.write(b"abc").unwrap();
///
/// let mut buf = [0u8; 2];
/// stream.read(&mut buf).unwrap();
/// assert_eq!(&buf, b"ab");
/// assert_eq!(stream.position(), 2);
///
/// assert!(stream.read(&mut buf).is_err());
/// assert!(!stream.is_healthy());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStream {
    data: Vec<u8>,
    cursor: usize,
    healthy: bool,
}

impl MemoryStream {
    /// Creates an empty stream.
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            cursor: 0,
            healthy: true,
        }
    }

    /// The whole buffer, including bytes that were already read.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Bytes that have not been read yet.
    #[inline]
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    /// Consumes the stream and returns the buffer.
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl Default for MemoryStream {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for MemoryStream {
    #[inline]
    fn from(data: Vec<u8>) -> Self {
        Self {
            data,
            cursor: 0,
            healthy: true,
        }
    }
}

impl Stream for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self.cursor + buf.len();
        match self.data.get(self.cursor..end) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.cursor = end;
                Ok(())
            }
            None => {
                self.healthy = false;
                Err(SerialError::malformed(
                    self.cursor as u64,
                    alloc::format!(
                        "needed {} bytes, only {} left",
                        buf.len(),
                        self.data.len() - self.cursor
                    ),
                ))
            }
        }
    }

    #[inline]
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.data.extend_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn is_healthy(&self) -> bool {
        self.healthy
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        let rest = self.data[self.cursor..].to_vec();
        self.cursor = self.data.len();
        Ok(rest)
    }

    #[inline]
    fn position(&self) -> u64 {
        self.cursor as u64
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStream;
    use crate::stream::Stream;
    use alloc::vec;

    #[test]
    fn short_read_reports_position() {
        let mut stream = MemoryStream::from(vec![1, 2, 3]);
        let mut buf = [0u8; 2];
        stream.read(&mut buf).unwrap();

        match stream.read(&mut buf) {
            Err(crate::SerialError::MalformedData { position, .. }) => {
                assert_eq!(position, Some(2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        // The cursor stays where the failed read started.
        assert_eq!(stream.remaining(), &[3]);
    }

    #[test]
    fn read_all_drains() {
        let mut stream = MemoryStream::from(vec![1, 2, 3, 4]);
        let mut buf = [0u8; 1];
        stream.read(&mut buf).unwrap();

        assert_eq!(stream.read_all().unwrap(), vec![2, 3, 4]);
        assert!(stream.read_all().unwrap().is_empty());
        assert!(stream.is_healthy());
    }

    #[test]
    fn fresh_streams_are_healthy() {
        let mut stream = MemoryStream::default();
        assert!(stream.is_healthy());
        assert!(MemoryStream::new().is_healthy());
        assert!(MemoryStream::from(vec![0]).is_healthy());

        stream.write(&[7]).unwrap();
        let mut buf = [0u8; 1];
        stream.read(&mut buf).unwrap();
        assert_eq!(buf, [7]);
        assert!(stream.is_healthy());
    }
}
