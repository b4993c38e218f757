//! twenty48 - terminal 2048 with a persisted leaderboard.
//!
//! # Architecture
//!
//! - **Games**: the 2048 board rules and a typestate engine
//!   (`GameSetup` → `GameInProgress` → `GameFinished`)
//! - **Console**: line and key I/O behind the [`Console`] trait
//! - **Db**: SQLite result store via diesel, ranked per board size
//! - **Runner**: prompts, the key loop and game-over reporting
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use twenty48::{BoardSize, Direction, GameSetup, MoveOutcome, PlayerName};
//!
//! # fn main() -> Result<(), twenty48::GameError> {
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let game = GameSetup::new(BoardSize::new(4)?, PlayerName::new("ann")?).start(&mut rng);
//! match game.apply_move(Some(Direction::Left), &mut rng) {
//!     MoveOutcome::Continue(game) => assert!(game.score() >= 2),
//!     MoveOutcome::GameOver(_) => unreachable!("a fresh board cannot be full"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod db;
mod error;
mod games;
mod leaderboard;
mod runner;
mod shutdown;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Console
pub use console::{Console, NullConsole, TerminalConsole};

// Crate-level exports - Persistence
pub use db::{DbError, DbErrorKind, NewResultRecord, ResultRecord, ResultRepository};
pub use leaderboard::{ResultStore, leaderboard_lines};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Game types (2048)
pub use games::twenty48::{
    Board, BoardSize, Direction, GameFinished, GameInProgress, GameSetup, Invariant, InvariantSet,
    InvariantViolation, KeyAction, MoveOutcome, PlayerName, ScoreIsMaxTileInvariant,
    SquareGridInvariant, TileValuesInvariant, Twenty48Invariants, collapse_left,
    rotate_clockwise, rotate_times, shift,
};

// Crate-level exports - Session orchestration
pub use runner::{SessionEnd, SessionRunner};
pub use shutdown::{Shutdown, ShutdownTrigger, channel as shutdown_channel, listen_for_interrupt};
