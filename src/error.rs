//! Error types shared by the game, the prompts and the result store.

use crate::db::DbError;

/// Errors surfaced while setting up or playing a session.
///
/// A full board is not an error: it is reported as
/// [`MoveOutcome::GameOver`](crate::MoveOutcome::GameOver).
#[derive(Debug, derive_more::Display)]
pub enum GameError {
    /// Player name or board size failed validation. Re-prompt.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// A line prompt did not receive input in time. Re-prompt.
    #[display("Input timed out after {} seconds", seconds)]
    InputTimeout {
        /// Configured prompt timeout.
        seconds: u64,
    },

    /// The input source is exhausted (EOF or a stub console).
    #[display("Input closed")]
    InputClosed,

    /// The operator interrupted the process (Ctrl+C / SIGINT).
    #[display("Interrupted")]
    Interrupted,

    /// Writing to or reading from the result store failed.
    #[display("Persistence failure: {}", _0)]
    Persistence(DbError),

    /// Terminal I/O failed.
    #[display("Terminal I/O failure: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl GameError {
    /// Returns true when the caller should re-prompt instead of giving up.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::InputTimeout { .. })
    }
}

impl From<DbError> for GameError {
    fn from(err: DbError) -> Self {
        Self::Persistence(err)
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_kinds() {
        assert!(GameError::InvalidConfig("size".into()).is_recoverable());
        assert!(GameError::InputTimeout { seconds: 5 }.is_recoverable());
        assert!(!GameError::InputClosed.is_recoverable());
        assert!(!GameError::Persistence(DbError::new("boom")).is_recoverable());
    }

    #[test]
    fn persistence_exposes_source() {
        use std::error::Error;
        let err = GameError::from(DbError::new("disk full"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk full"));
    }
}
