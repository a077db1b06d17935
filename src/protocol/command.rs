//! Command definitions
//!
//! The decoder's output, handed to the execution engine.

use std::fmt;

use bytes::Bytes;

use super::{FrameHeader, OpcodeEntry, Operation};

/// Item carried by storage commands (SET/ADD/REPLACE/APPEND/PREPEND)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheElement {
    pub key: Bytes,

    /// Opaque client metadata
    pub flags: u32,

    /// Absolute Unix time in seconds, 0 = never expires
    pub expiry: u64,

    pub cas: u64,

    pub data: Bytes,
}

/// One decoded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMessage {
    pub operation: Operation,

    /// Suppress the success reply (errors are still reported)
    pub noreply: bool,

    /// Include the key in the reply
    pub add_key_to_response: bool,

    pub opaque: u32,

    /// CAS token supplied by the client, 0 = unconditional
    pub cas_key: u64,

    /// At most one key per binary frame
    pub keys: Vec<Bytes>,

    /// Present only for storage operations
    pub element: Option<CacheElement>,

    // INCR/DECR/TOUCH/GAT/GATQ arguments
    pub incr_amount: u64,
    pub incr_initial: u64,
    pub incr_expiry: u64,
}

impl CommandMessage {
    /// Start a message from the opcode row and the frame header
    pub fn new(entry: &OpcodeEntry, header: &FrameHeader) -> Self {
        Self {
            operation: entry.operation,
            noreply: entry.quiet,
            add_key_to_response: entry.echo_key,
            opaque: header.opaque,
            cas_key: header.cas,
            keys: Vec::new(),
            element: None,
            incr_amount: 0,
            incr_initial: 0,
            incr_expiry: 0,
        }
    }

    /// The frame's key, if it had one
    pub fn key(&self) -> Option<&Bytes> {
        self.keys.first()
    }
}

impl fmt::Display for CommandMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} opaque={}", self.operation, self.opaque)?;
        if self.noreply {
            f.write_str(" noreply")?;
        }
        if self.add_key_to_response {
            f.write_str(" with-key")?;
        }
        if self.cas_key != 0 {
            write!(f, " cas={}", self.cas_key)?;
        }
        if let Some(key) = self.key() {
            write!(f, " key=\"{}\"", key.escape_ascii())?;
        }
        if let Some(element) = &self.element {
            write!(
                f,
                " flags={} expiry={} bytes={}",
                element.flags,
                element.expiry,
                element.data.len()
            )?;
        }
        if self.operation.is_arithmetic() {
            write!(f, " amount={} initial={}", self.incr_amount, self.incr_initial)?;
        }
        if self.operation.is_arithmetic() || self.operation.is_touch() {
            write!(f, " expiry={}", self.incr_expiry)?;
        }
        Ok(())
    }
}
