//! Move directions and the key-to-action mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::instrument;

/// Cardinal direction the tiles slide towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Direction {
    /// Slide towards the top row.
    Up,
    /// Slide towards the bottom row.
    Down,
    /// Slide towards the first column.
    Left,
    /// Slide towards the last column.
    Right,
}

impl Direction {
    /// Number of 90° clockwise rotations that turn this direction into `Left`.
    ///
    /// Undo with `(4 - turns) % 4` further clockwise rotations.
    pub fn clockwise_turns(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Up => 1,
            Self::Right => 2,
            Self::Down => 3,
        }
    }
}

/// What a single key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Slide the board.
    Move(Direction),
    /// Abandon the current game (not saved) and start a new one.
    Restart,
    /// Leave the program.
    Quit,
    /// Unrecognised key. Never counts as a move.
    Ignore,
}

impl KeyAction {
    /// Maps a terminal key event to an action.
    ///
    /// Arrows and `w a s d` move, `Esc` restarts, `q`, `Ctrl+C` and `Ctrl+D`
    /// quit. Key releases and repeats are ignored.
    #[instrument]
    pub fn from_key(key: KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return Self::Ignore;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'd') => Self::Quit,
                _ => Self::Ignore,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') => Self::Move(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => Self::Move(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => Self::Move(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => Self::Move(Direction::Right),
            KeyCode::Esc => Self::Restart,
            KeyCode::Char('q') => Self::Quit,
            _ => Self::Ignore,
        }
    }

    /// Returns the direction for a move action, `None` otherwise.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Move(direction) => Some(direction),
            _ => None,
        }
    }
}
