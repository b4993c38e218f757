//! First-class invariants for a game in progress.
//!
//! Checked after every move in debug builds and testable on their own.

use super::types::is_tile_value;
use super::GameInProgress;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together. Implemented for tuples.
pub trait InvariantSet<S> {
    /// Returns every violated invariant, or `Ok(())` if all hold.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: every cell is 0 or a power of two greater than 1.
pub struct TileValuesInvariant;

impl Invariant<GameInProgress> for TileValuesInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.board().rows().iter().flatten().all(|&v| is_tile_value(v))
    }

    fn description() -> &'static str {
        "Every cell is empty or a power of two"
    }
}

/// Invariant: the grid is N×N with N equal to the board size.
pub struct SquareGridInvariant;

impl Invariant<GameInProgress> for SquareGridInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let n = game.board().size().get();
        game.board().rows().len() == n && game.board().rows().iter().all(|row| row.len() == n)
    }

    fn description() -> &'static str {
        "Grid is square and matches the board size"
    }
}

/// Invariant: the score is the largest tile currently on the board.
pub struct ScoreIsMaxTileInvariant;

impl Invariant<GameInProgress> for ScoreIsMaxTileInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.score() == game.board().max_value()
    }

    fn description() -> &'static str {
        "Score equals the maximum tile on the board"
    }
}

/// All invariants of a game in progress.
pub type Twenty48Invariants = (TileValuesInvariant, SquareGridInvariant, ScoreIsMaxTileInvariant);

/// Panics in debug builds if any invariant is violated.
pub fn assert_invariants(game: &GameInProgress) {
    if cfg!(debug_assertions)
        && let Err(violations) = Twenty48Invariants::check_all(game)
    {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Invariant violation: {}", descriptions);
    }
}
