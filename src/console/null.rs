//! No-op console for front ends that are not wired up yet.

use super::Console;
use crate::GameError;
use crossterm::event::KeyEvent;
use tracing::{instrument, trace};

/// Console that discards output and has no input.
///
/// Every read reports [`GameError::InputClosed`], so a session driven by it
/// ends immediately without recording anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConsole;

#[async_trait::async_trait]
impl Console for NullConsole {
    #[instrument(skip(self, line))]
    async fn send(&mut self, line: &str) -> Result<(), GameError> {
        trace!(len = line.len(), "Discarding output");
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String, GameError> {
        Err(GameError::InputClosed)
    }

    async fn read_key(&mut self) -> Result<KeyEvent, GameError> {
        Err(GameError::InputClosed)
    }
}
