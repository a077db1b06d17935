//! Network Module
//!
//! Glue between a client byte stream and the decoder.
//!
//! ## Architecture
//! - One `BinaryDecoder` shared (via `Arc`) by every connection
//! - One `Connection` (and its `ReadBuffer`) per client
//! - Decoded commands handed to a `CommandHandler` in arrival order

mod connection;
mod handler;

pub use connection::{configure_tcp_stream, Connection};
pub use handler::CommandHandler;
