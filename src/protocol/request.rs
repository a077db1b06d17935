//! Request encoding
//!
//! Builds request frames in the format the decoder reads. Used by clients,
//! capture tooling and tests.

use std::io::Write;

use bytes::{BufMut, BytesMut};

use crate::error::{MemframeError, Result};
use super::{FrameHeader, Opcode, HEADER_SIZE, REQUEST_MAGIC};

/// A request frame before encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub opcode: Opcode,
    pub extras: Vec<u8>,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub opaque: u32,
    pub cas: u64,
}

impl Request {
    /// Empty request for `opcode`
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            extras: Vec::new(),
            key: Vec::new(),
            value: Vec::new(),
            opaque: 0,
            cas: 0,
        }
    }

    // =========================================================================
    // Retrieval
    // =========================================================================

    pub fn get(key: impl Into<Vec<u8>>) -> Self {
        Self::new(Opcode::Get).with_key(key)
    }

    /// GET that echoes the key in its reply
    pub fn get_key(key: impl Into<Vec<u8>>) -> Self {
        Self::new(Opcode::GetK).with_key(key)
    }

    // =========================================================================
    // Storage
    // =========================================================================

    pub fn set(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, flags: u32, expiration: u32) -> Self {
        Self::storage(Opcode::Set, key, value, flags, expiration)
    }

    pub fn add(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, flags: u32, expiration: u32) -> Self {
        Self::storage(Opcode::Add, key, value, flags, expiration)
    }

    pub fn replace(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, flags: u32, expiration: u32) -> Self {
        Self::storage(Opcode::Replace, key, value, flags, expiration)
    }

    pub fn append(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(Opcode::Append).with_key(key).with_value(value)
    }

    pub fn prepend(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(Opcode::Prepend).with_key(key).with_value(value)
    }

    fn storage(
        opcode: Opcode,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
        flags: u32,
        expiration: u32,
    ) -> Self {
        let mut extras: Vec<u8> = Vec::with_capacity(8);
        extras.put_u32(flags);
        extras.put_u32(expiration);
        Self::new(opcode)
            .with_extras(extras)
            .with_key(key)
            .with_value(value)
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        Self::new(Opcode::Delete).with_key(key)
    }

    // =========================================================================
    // Arithmetic and Expiration
    // =========================================================================

    pub fn incr(key: impl Into<Vec<u8>>, amount: u64, initial: u64, expiration: u32) -> Self {
        Self::arithmetic(Opcode::Increment, key, amount, initial, expiration)
    }

    pub fn decr(key: impl Into<Vec<u8>>, amount: u64, initial: u64, expiration: u32) -> Self {
        Self::arithmetic(Opcode::Decrement, key, amount, initial, expiration)
    }

    fn arithmetic(opcode: Opcode, key: impl Into<Vec<u8>>, amount: u64, initial: u64, expiration: u32) -> Self {
        let mut extras: Vec<u8> = Vec::with_capacity(20);
        extras.put_u64(amount);
        extras.put_u64(initial);
        extras.put_u32(expiration);
        Self::new(opcode).with_extras(extras).with_key(key)
    }

    pub fn touch(key: impl Into<Vec<u8>>, expiration: u32) -> Self {
        Self::new(Opcode::Touch)
            .with_extras(expiration.to_be_bytes().to_vec())
            .with_key(key)
    }

    /// Get-and-touch
    pub fn gat(key: impl Into<Vec<u8>>, expiration: u32) -> Self {
        Self::new(Opcode::Gat)
            .with_extras(expiration.to_be_bytes().to_vec())
            .with_key(key)
    }

    // =========================================================================
    // Administrative
    // =========================================================================

    pub fn noop() -> Self {
        Self::new(Opcode::Noop)
    }

    pub fn version() -> Self {
        Self::new(Opcode::Version)
    }

    pub fn quit() -> Self {
        Self::new(Opcode::Quit)
    }

    pub fn flush() -> Self {
        Self::new(Opcode::Flush)
    }

    /// STAT, optionally for a named group
    pub fn stat(group: Option<&str>) -> Self {
        let request = Self::new(Opcode::Stat);
        match group {
            Some(group) => request.with_key(group),
            None => request,
        }
    }

    pub fn verbosity(level: u32) -> Self {
        Self::new(Opcode::Verbosity).with_extras(level.to_be_bytes().to_vec())
    }

    // =========================================================================
    // Builder Setters
    // =========================================================================

    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = value.into();
        self
    }

    /// Replace the extras verbatim
    pub fn with_extras(mut self, extras: Vec<u8>) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_opaque(mut self, opaque: u32) -> Self {
        self.opaque = opaque;
        self
    }

    pub fn with_cas(mut self, cas: u64) -> Self {
        self.cas = cas;
        self
    }

    /// Switch to the no-reply opcode; opcodes without one are left unchanged
    pub fn quiet(mut self) -> Self {
        if let Some(quiet) = self.opcode.quiet_variant() {
            self.opcode = quiet;
        }
        self
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Header describing this request
    ///
    /// Fails when a region does not fit its length field.
    pub fn header(&self) -> Result<FrameHeader> {
        let key_length = u16::try_from(self.key.len()).map_err(|_| {
            MemframeError::Protocol(format!("key of {} bytes exceeds 65535", self.key.len()))
        })?;
        let extra_length = u8::try_from(self.extras.len()).map_err(|_| {
            MemframeError::Protocol(format!("extras of {} bytes exceed 255", self.extras.len()))
        })?;
        let total_body_length = u32::try_from(self.body_length()).map_err(|_| {
            MemframeError::Protocol(format!("body of {} bytes exceeds 4 GiB", self.body_length()))
        })?;

        Ok(FrameHeader {
            magic: REQUEST_MAGIC,
            opcode: self.opcode.code(),
            key_length,
            extra_length,
            data_type: 0,
            reserved: 0,
            total_body_length,
            opaque: self.opaque,
            cas: self.cas,
        })
    }

    fn body_length(&self) -> usize {
        self.extras.len() + self.key.len() + self.value.len()
    }

    /// Append the encoded frame to `dst`
    pub fn encode_into(&self, dst: &mut BytesMut) -> Result<()> {
        let header = self.header()?;
        dst.reserve(header.frame_length());
        header.write_to(dst);
        dst.put_slice(&self.extras);
        dst.put_slice(&self.key);
        dst.put_slice(&self.value);
        Ok(())
    }

    /// Encode to a standalone frame
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut dst = BytesMut::with_capacity(HEADER_SIZE + self.body_length());
        self.encode_into(&mut dst)?;
        Ok(dst.to_vec())
    }

    /// Write the encoded frame to a stream
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.encode()?)?;
        writer.flush()?;
        Ok(())
    }
}
