//! Protocol Module
//!
//! Decoder for the memcached binary request protocol.
//!
//! ## Frame Format
//!
//! ```text
//! ┌─────────┬──────────┬──────────┬──────────┬──────────┬──────────┐
//! │Magic (1)│Opcode (1)│KeyLen (2)│ExtLen (1)│ DType (1)│ Rsvd (2) │
//! ├─────────┴──────────┴──────────┴──────────┴──────────┴──────────┤
//! │                   Total body length (4)                        │
//! ├────────────────────────────────────────────────────────────────┤
//! │                        Opaque (4)                              │
//! ├────────────────────────────────────────────────────────────────┤
//! │                          CAS (8)                               │
//! ├────────────────────────────────────────────────────────────────┤
//! │   Extras (ExtLen)   │    Key (KeyLen)    │  Value (remainder)  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are big-endian. The value length is never sent: it is
//! `total body length - extras length - key length`.
//!
//! ### Extras by Operation
//! - SET/ADD/REPLACE:    flags (4) + expiration (4)
//! - APPEND/PREPEND:     none
//! - INCR/DECR:          amount (8) + initial (8) + expiration (4)
//! - TOUCH/GAT/GATQ:     expiration (4)
//! - everything else:    not interpreted

mod body;
mod buffer;
mod command;
mod decoder;
mod expiry;
mod header;
mod opcode;
mod request;

pub use body::{parse_body, FrameBody};
pub use buffer::ReadBuffer;
pub use command::{CacheElement, CommandMessage};
pub use decoder::{BinaryDecoder, DecodeOutcome, FrameState};
pub use expiry::{normalize, Clock, FixedClock, SystemClock, THIRTY_DAYS};
pub use header::FrameHeader;
pub use opcode::{for_command, lookup, reserved_name, Opcode, OpcodeEntry, Operation};
pub use request::Request;

/// Size of the fixed request header
pub const HEADER_SIZE: usize = 24;

/// Magic byte opening every request frame
pub const REQUEST_MAGIC: u8 = 0x80;
