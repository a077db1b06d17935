//! Read buffer
//!
//! Per-connection byte source the decoder works on. Bytes are appended as
//! they arrive and only leave the buffer when a whole frame is consumed, so
//! peeking at a partial frame never moves the read position.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};

/// Append-only, order-preserving buffer of unconsumed bytes
#[derive(Debug, Default)]
pub struct ReadBuffer {
    buf: BytesMut,

    /// Landing area for transport reads, reused across calls
    scratch: Vec<u8>,
}

impl ReadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            scratch: Vec::new(),
        }
    }

    /// Bytes currently available
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the unconsumed bytes without consuming them
    pub fn peek(&self) -> &[u8] {
        &self.buf
    }

    /// Make room for at least `additional` more bytes
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    /// Append newly arrived bytes
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Take the first `n` bytes out of the buffer
    ///
    /// The returned bytes stay valid after the buffer is refilled.
    ///
    /// # Panics
    /// If fewer than `n` bytes are available.
    pub fn consume(&mut self, n: usize) -> Bytes {
        self.buf.split_to(n).freeze()
    }

    /// Read at most `max` bytes from `reader` onto the end of the buffer
    ///
    /// Returns the number of bytes appended (0 at end of stream).
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R, max: usize) -> io::Result<usize> {
        if self.scratch.len() < max {
            self.scratch.resize(max, 0);
        }

        let n = reader.read(&mut self.scratch[..max])?;
        self.buf.extend_from_slice(&self.scratch[..n]);
        Ok(n)
    }
}

impl From<&[u8]> for ReadBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(bytes),
            scratch: Vec::new(),
        }
    }
}
