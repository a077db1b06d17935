//! Error types for memframe
//!
//! Two layers:
//! - [`DecodeError`]: a single frame could not be turned into a command.
//! - [`MemframeError`]: unified error for everything else (I/O, config,
//!   handlers), wrapping `DecodeError` when a connection has to stop.
//!
//! "Not enough bytes yet" is never an error; see
//! [`DecodeOutcome::NeedMoreData`](crate::protocol::DecodeOutcome).

use thiserror::Error;

use crate::protocol::Operation;

/// Result type alias using MemframeError
pub type Result<T> = std::result::Result<T, MemframeError>;

/// Unified error type for memframe operations
#[derive(Debug, Error)]
pub enum MemframeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Execution Engine Errors
    // -------------------------------------------------------------------------
    #[error("Command handler error: {0}")]
    Handler(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure to decode one frame
///
/// Fatal variants mean the byte alignment of the stream is lost (or the frame
/// is refused before being buffered) and the connection must be torn down.
/// The other variants are reported after the frame's bytes were consumed, so
/// decoding can continue with the next frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("binary request payload is invalid, magic byte incorrect (0x{magic:02x})")]
    MalformedHeader { magic: u8 },

    #[error("frame body of {length} bytes exceeds the limit of {limit} bytes")]
    FrameTooLarge { length: u32, limit: u32 },

    #[error("unsupported opcode 0x{opcode:02x}")]
    UnsupportedOpcode { opcode: u8, opaque: u32 },

    #[error("{operation:?} requires {expected} bytes of extras, got {actual}")]
    TruncatedExtras {
        operation: Operation,
        expected: usize,
        actual: usize,
        opaque: u32,
    },

    #[error("total body length {total} is shorter than extras ({extras}) plus key ({key})")]
    InvalidBodyLength {
        total: u32,
        extras: u8,
        key: u16,
        opaque: u32,
    },
}

impl DecodeError {
    /// Whether the connection can no longer be trusted to be frame-aligned
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DecodeError::MalformedHeader { .. } | DecodeError::FrameTooLarge { .. }
        )
    }

    /// Opaque token of the offending frame, when the header got that far
    pub fn opaque(&self) -> Option<u32> {
        match self {
            DecodeError::MalformedHeader { .. } | DecodeError::FrameTooLarge { .. } => None,
            DecodeError::UnsupportedOpcode { opaque, .. }
            | DecodeError::TruncatedExtras { opaque, .. }
            | DecodeError::InvalidBodyLength { opaque, .. } => Some(*opaque),
        }
    }
}
