//! Command Handler
//!
//! The seam between the decoder and the execution engine.

use crossbeam::channel::Sender;

use crate::error::{DecodeError, MemframeError, Result};
use crate::protocol::CommandMessage;

/// Receives decoded commands in the order their frames arrived
pub trait CommandHandler {
    /// Execute (or queue) one command
    fn handle(&mut self, command: CommandMessage) -> Result<()>;

    /// A frame was skipped but the stream is still aligned
    ///
    /// Engines reply "unknown command" / "invalid arguments" here, using the
    /// error's opaque token. The default only logs.
    fn reject(&mut self, error: &DecodeError) -> Result<()> {
        tracing::debug!("Frame rejected: {}", error);
        Ok(())
    }
}

/// Forward commands to an engine thread
impl CommandHandler for Sender<CommandMessage> {
    fn handle(&mut self, command: CommandMessage) -> Result<()> {
        self.send(command)
            .map_err(|_| MemframeError::Handler("command receiver disconnected".to_string()))
    }
}
