//! Frame assembler
//!
//! Turns the bytes buffered for one connection into at most one command per
//! call.
//!
//! ## States
//! ```text
//!   AwaitingHeader ──(24 bytes)──▶ AwaitingBody ──(24 + body bytes)──▶ Complete
//!         ▲                                                               │
//!         └──────────────────────── frame consumed ───────────────────────┘
//! ```
//!
//! The state is recomputed from the buffer on every call: the header is
//! re-parsed from a peek while the body is still arriving, and nothing is
//! consumed until the whole frame is present. The decoder itself holds no
//! per-connection state and can be shared between connections.

use bytes::Bytes;

use crate::config::Config;
use crate::error::DecodeError;
use super::{
    lookup, parse_body, reserved_name, Clock, CommandMessage, FrameBody, FrameHeader, ReadBuffer,
    SystemClock, HEADER_SIZE,
};

/// Result of one decode attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The buffer does not hold a whole frame yet; nothing was consumed
    NeedMoreData,

    /// One frame was consumed and decoded
    Message(CommandMessage),

    /// The frame could not be decoded; see [`DecodeError::is_fatal`]
    Error(DecodeError),
}

/// Where the buffered bytes stand relative to the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    AwaitingHeader { buffered: usize },
    AwaitingBody { header: FrameHeader, buffered: usize },
    Complete { header: FrameHeader },
}

/// Binary protocol decoder
#[derive(Debug, Clone)]
pub struct BinaryDecoder<C = SystemClock> {
    clock: C,
    max_body_length: u32,
}

impl BinaryDecoder<SystemClock> {
    /// Decoder with default limits and the wall clock
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self::with_clock(SystemClock, config)
    }
}

impl Default for BinaryDecoder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> BinaryDecoder<C> {
    /// Decoder resolving relative expirations against `clock`
    pub fn with_clock(clock: C, config: &Config) -> Self {
        Self {
            clock,
            max_body_length: config.max_body_length,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Inspect buffered bytes without consuming anything
    pub fn frame_state(&self, bytes: &[u8]) -> Result<FrameState, DecodeError> {
        if bytes.len() < HEADER_SIZE {
            return Ok(FrameState::AwaitingHeader {
                buffered: bytes.len(),
            });
        }

        let header = FrameHeader::parse(bytes)?;
        if header.total_body_length > self.max_body_length {
            return Err(DecodeError::FrameTooLarge {
                length: header.total_body_length,
                limit: self.max_body_length,
            });
        }

        if bytes.len() < header.frame_length() {
            return Ok(FrameState::AwaitingBody {
                header,
                buffered: bytes.len(),
            });
        }

        Ok(FrameState::Complete { header })
    }

    /// Decode the next frame from `buffer`
    ///
    /// - `NeedMoreData`: the buffer is left exactly as it was.
    /// - fatal `Error`: nothing is consumed; the stream cannot be realigned.
    /// - `Message` or non-fatal `Error`: exactly one frame is consumed.
    pub fn decode(&self, buffer: &mut ReadBuffer) -> DecodeOutcome {
        let header = match self.frame_state(buffer.peek()) {
            Ok(FrameState::Complete { header }) => header,
            Ok(FrameState::AwaitingHeader { buffered }) => {
                tracing::trace!("Awaiting header: {} of {} bytes buffered", buffered, HEADER_SIZE);
                return DecodeOutcome::NeedMoreData;
            }
            Ok(FrameState::AwaitingBody { header, buffered }) => {
                tracing::trace!(
                    "Awaiting body: {} of {} bytes buffered",
                    buffered,
                    header.frame_length()
                );
                return DecodeOutcome::NeedMoreData;
            }
            Err(e) => {
                tracing::debug!("Rejecting stream: {}", e);
                return DecodeOutcome::Error(e);
            }
        };

        let body = buffer.consume(header.frame_length()).slice(HEADER_SIZE..);

        match self.decode_frame(&header, body) {
            Ok(message) => {
                tracing::trace!("Decoded frame: {}", message);
                DecodeOutcome::Message(message)
            }
            Err(e) => {
                tracing::debug!("Skipping frame with opaque {}: {}", header.opaque, e);
                DecodeOutcome::Error(e)
            }
        }
    }

    fn decode_frame(
        &self,
        header: &FrameHeader,
        body: Bytes,
    ) -> Result<CommandMessage, DecodeError> {
        let entry = lookup(header.opcode).ok_or_else(|| {
            if let Some(name) = reserved_name(header.opcode) {
                tracing::debug!("Opcode 0x{:02x} ({}) is not implemented", header.opcode, name);
            }
            DecodeError::UnsupportedOpcode {
                opcode: header.opcode,
                opaque: header.opaque,
            }
        })?;

        let body = FrameBody::split(header, body)?;
        parse_body(&entry, header, body, &self.clock)
    }
}
