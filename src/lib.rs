//! # memframe
//!
//! The binary wire-protocol front end of a memcached-compatible cache server:
//! - Incremental framing over an arbitrarily chunked byte stream
//! - Fixed 24-byte header validation
//! - Per-opcode extras layouts and key/value slicing
//! - Relative/absolute expiration normalization
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Transport (Read stream)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ append bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │            ReadBuffer (one per connection)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ peek / consume
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │        BinaryDecoder (shared, stateless)                    │
//! │   header ─▶ opcode table ─▶ extras/body ─▶ expiry           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ CommandMessage
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │           CommandHandler (execution engine)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DecodeError, MemframeError, Result};
pub use config::Config;
pub use protocol::{BinaryDecoder, CommandMessage, DecodeOutcome, ReadBuffer};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memframe
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
