//! Configuration for memframe
//!
//! Centralized configuration with sensible defaults.

use crate::error::{MemframeError, Result};
use crate::protocol::HEADER_SIZE;

/// Main configuration for a decoder and its connections
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Decoder Configuration
    // -------------------------------------------------------------------------
    /// Largest accepted `total body length` of a single frame (in bytes).
    /// Larger frames are refused before their body is buffered.
    pub max_body_length: u32,

    // -------------------------------------------------------------------------
    // Connection Configuration
    // -------------------------------------------------------------------------
    /// Bytes requested from the transport per read
    pub read_chunk_size: usize,

    /// Initial capacity of each connection's read buffer
    pub initial_buffer_capacity: usize,

    /// Connection read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_body_length: 1024 * 1024 + 512, // 1 MB item plus key/extras headroom
            read_chunk_size: 16 * 1024,
            initial_buffer_capacity: 16 * 1024,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check values that would make a connection unusable
    pub fn validate(&self) -> Result<()> {
        if self.read_chunk_size == 0 {
            return Err(MemframeError::Config(
                "read_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.initial_buffer_capacity < HEADER_SIZE {
            return Err(MemframeError::Config(format!(
                "initial_buffer_capacity must hold at least one header ({} bytes), got {}",
                HEADER_SIZE, self.initial_buffer_capacity
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the largest accepted frame body (in bytes)
    pub fn max_body_length(mut self, length: u32) -> Self {
        self.config.max_body_length = length;
        self
    }

    /// Set how many bytes are requested from the transport per read
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.config.read_chunk_size = size;
        self
    }

    /// Set the initial read buffer capacity (in bytes)
    pub fn initial_buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_buffer_capacity = capacity;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
