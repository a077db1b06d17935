//! Frame header
//!
//! The fixed 24-byte header opening every request.

use bytes::{Buf, BufMut};

use crate::error::DecodeError;
use super::{HEADER_SIZE, REQUEST_MAGIC};

/// Parsed request header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub magic: u8,
    pub opcode: u8,
    pub key_length: u16,
    pub extra_length: u8,
    /// Unused by the protocol, carried for completeness
    pub data_type: u8,
    pub reserved: u16,
    /// Extras + key + value
    pub total_body_length: u32,
    /// Client correlation token, echoed back unchanged
    pub opaque: u32,
    /// Compare-and-swap token, 0 = no check
    pub cas: u64,
}

impl FrameHeader {
    /// Parse a header from the first `HEADER_SIZE` bytes of `bytes`
    ///
    /// The magic byte is validated before any other field is read.
    ///
    /// # Panics
    /// If `bytes` is shorter than `HEADER_SIZE`; callers check first.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        debug_assert!(bytes.len() >= HEADER_SIZE);
        let mut buf = &bytes[..HEADER_SIZE];

        let magic = buf.get_u8();
        if magic != REQUEST_MAGIC {
            return Err(DecodeError::MalformedHeader { magic });
        }

        Ok(Self {
            magic,
            opcode: buf.get_u8(),
            key_length: buf.get_u16(),
            extra_length: buf.get_u8(),
            data_type: buf.get_u8(),
            reserved: buf.get_u16(),
            total_body_length: buf.get_u32(),
            opaque: buf.get_u32(),
            cas: buf.get_u64(),
        })
    }

    /// Header plus body, in bytes
    pub fn frame_length(&self) -> usize {
        HEADER_SIZE + self.total_body_length as usize
    }

    /// Length of the value region
    ///
    /// Fails when extras and key alone overrun the declared body.
    pub fn value_length(&self) -> Result<usize, DecodeError> {
        let prefix = u32::from(self.extra_length) + u32::from(self.key_length);
        self.total_body_length
            .checked_sub(prefix)
            .map(|length| length as usize)
            .ok_or(DecodeError::InvalidBodyLength {
                total: self.total_body_length,
                extras: self.extra_length,
                key: self.key_length,
                opaque: self.opaque,
            })
    }

    /// Serialize in wire order
    pub fn write_to<B: BufMut>(&self, dst: &mut B) {
        dst.put_u8(self.magic);
        dst.put_u8(self.opcode);
        dst.put_u16(self.key_length);
        dst.put_u8(self.extra_length);
        dst.put_u8(self.data_type);
        dst.put_u16(self.reserved);
        dst.put_u32(self.total_body_length);
        dst.put_u32(self.opaque);
        dst.put_u64(self.cas);
    }
}
