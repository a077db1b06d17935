//! Connection Handler
//!
//! Drives one client byte stream through the shared decoder.

use std::io::{ErrorKind, Read};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{BinaryDecoder, Clock, DecodeOutcome, ReadBuffer, SystemClock};
use super::CommandHandler;

/// Handles a single client connection
pub struct Connection<R, H, C = SystemClock> {
    /// Byte stream from the client
    stream: R,

    /// Unconsumed bytes of this connection
    buffer: ReadBuffer,

    /// Decoder shared by all connections
    decoder: Arc<BinaryDecoder<C>>,

    /// Execution engine side
    handler: H,

    /// Bytes requested per read
    read_chunk_size: usize,

    /// Peer address for logging
    peer_addr: String,

    frames_decoded: u64,
    frames_rejected: u64,
}

impl<R: Read, H: CommandHandler, C: Clock> Connection<R, H, C> {
    /// Create a new connection handler
    pub fn new(stream: R, decoder: Arc<BinaryDecoder<C>>, handler: H, config: &Config) -> Self {
        Self {
            stream,
            buffer: ReadBuffer::with_capacity(config.initial_buffer_capacity),
            decoder,
            handler,
            read_chunk_size: config.read_chunk_size.max(1),
            peer_addr: "unknown".to_string(),
            frames_decoded: 0,
            frames_rejected: 0,
        }
    }

    /// Set the peer address used in log lines
    pub fn with_peer_addr(mut self, peer_addr: impl Into<String>) -> Self {
        self.peer_addr = peer_addr.into();
        self
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Returns `Ok` when the client goes away and `Err` on a fatal framing
    /// error, a transport failure, or a handler failure.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        loop {
            match self.buffer.read_from(&mut self.stream, self.read_chunk_size) {
                Ok(0) => {
                    if self.buffer.is_empty() {
                        tracing::debug!("Client {} disconnected", self.peer_addr);
                    } else {
                        tracing::debug!(
                            "Client {} disconnected with {} bytes of a partial frame",
                            self.peer_addr,
                            self.buffer.len()
                        );
                    }
                    return Ok(());
                }
                Ok(_) => {}
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(ref e)
                    if matches!(e.kind(), ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted) =>
                {
                    tracing::debug!("Connection closed by client {}: {}", self.peer_addr, e);
                    return Ok(());
                }
                Err(ref e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    // Windows reports TimedOut where Unix reports WouldBlock
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e.into());
                }
            }

            self.drain()?;
        }
    }

    /// Decode every complete frame currently buffered
    fn drain(&mut self) -> Result<()> {
        loop {
            match self.decoder.decode(&mut self.buffer) {
                DecodeOutcome::NeedMoreData => return Ok(()),
                DecodeOutcome::Message(command) => {
                    tracing::trace!("Received command from {}: {}", self.peer_addr, command);
                    self.frames_decoded += 1;
                    self.handler.handle(command)?;
                }
                DecodeOutcome::Error(e) if e.is_fatal() => {
                    tracing::warn!("Closing {} after framing error: {}", self.peer_addr, e);
                    return Err(e.into());
                }
                DecodeOutcome::Error(e) => {
                    self.frames_rejected += 1;
                    self.handler.reject(&e)?;
                }
            }
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Commands handed to the handler so far
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Frames skipped with a non-fatal error so far
    pub fn frames_rejected(&self) -> u64 {
        self.frames_rejected
    }

    /// Bytes received but not yet part of a complete frame
    pub fn pending_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Give the handler back, e.g. to inspect what it collected
    pub fn into_handler(self) -> H {
        self.handler
    }
}

/// Prepare a TCP stream for [`Connection`]
///
/// Disables Nagle's algorithm, applies the configured timeouts, and returns
/// the peer address for logging.
pub fn configure_tcp_stream(stream: &TcpStream, config: &Config) -> Result<String> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    stream.set_nodelay(true)?;

    if config.read_timeout_ms > 0 {
        stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
    }
    if config.write_timeout_ms > 0 {
        stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
    }

    Ok(peer_addr)
}
