//! 2048 on a square board: grid rules, direction mapping and the
//! typestate game engine.

mod direction;
mod invariants;
mod rules;
mod typestate;
mod types;

pub use direction::{Direction, KeyAction};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, ScoreIsMaxTileInvariant, SquareGridInvariant,
    TileValuesInvariant, Twenty48Invariants,
};
pub use rules::{collapse_left, rotate_clockwise, rotate_times, shift};
pub use typestate::{GameFinished, GameInProgress, GameSetup, MoveOutcome};
pub use types::{Board, BoardSize, PlayerName};
