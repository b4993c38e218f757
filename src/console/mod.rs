//! Console trait and implementations.
//!
//! The game loop only talks to the player through [`Console`], so the
//! terminal can be swapped for another front end or a scripted test double.

mod null;
mod terminal;

pub use null::NullConsole;
pub use terminal::TerminalConsole;

use crate::GameError;
use crossterm::event::KeyEvent;

/// Line output, line input and single-key input.
#[async_trait::async_trait]
pub trait Console: Send {
    /// Writes one line of text.
    async fn send(&mut self, line: &str) -> Result<(), GameError>;

    /// Reads one line of text, without the trailing newline.
    async fn read_line(&mut self) -> Result<String, GameError>;

    /// Reads one raw key press.
    async fn read_key(&mut self) -> Result<KeyEvent, GameError>;

    /// Writes several lines in order.
    async fn send_all(&mut self, lines: &[String]) -> Result<(), GameError> {
        for line in lines {
            self.send(line).await?;
        }
        Ok(())
    }
}
