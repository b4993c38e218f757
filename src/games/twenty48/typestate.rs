//! Phase-specific typestate structs for one 2048 playthrough.
//!
//! `GameSetup` (idle) → `GameInProgress` (playing) → `GameFinished`
//! (game over). There is no way back from `GameFinished`; a new game starts
//! from a fresh `GameSetup`.

use super::invariants::assert_invariants;
use super::{Board, BoardSize, Direction, PlayerName};
use crate::db::NewResultRecord;
use rand::Rng;
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Validated session parameters, ready to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    size: BoardSize,
    player: PlayerName,
}

impl GameSetup {
    /// Creates a setup from already validated parameters.
    #[instrument]
    pub fn new(size: BoardSize, player: PlayerName) -> Self {
        Self { size, player }
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the player name.
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    /// Creates the board, places the initial tile and starts playing.
    #[instrument(skip(self, rng), fields(size = %self.size, player = %self.player))]
    pub fn start<R: Rng + ?Sized>(self, rng: &mut R) -> GameInProgress {
        let mut board = Board::new(self.size);
        board.spawn_tile(rng);

        info!("Game started");
        GameInProgress::from_board(board, self.player)
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress: owns the board, the move count and the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInProgress {
    pub(super) board: Board,
    pub(super) player: PlayerName,
    pub(super) moves: u32,
    pub(super) score: u32,
}

impl GameInProgress {
    /// Resumes play on an existing board with zero moves.
    ///
    /// The score is taken from the board's largest tile.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, player: PlayerName) -> Self {
        let score = board.max_value();
        Self {
            board,
            player,
            moves: 0,
            score,
        }
    }

    /// Applies one direction, then tries to spawn a tile.
    ///
    /// `None` leaves the game untouched. The move count only grows when the
    /// direction changed the grid. The game is over when the spawn finds no
    /// empty cell.
    #[instrument(skip(self, rng), fields(moves = self.moves, score = self.score))]
    pub fn apply_move<R: Rng + ?Sized>(
        self,
        direction: Option<Direction>,
        rng: &mut R,
    ) -> MoveOutcome {
        if direction.is_none() {
            return MoveOutcome::Continue(self);
        }

        let mut game = self;
        if game.board.apply_direction(direction) {
            game.moves += 1;
        }
        game.score = game.board.max_value();

        if !game.board.spawn_tile(rng) {
            info!(moves = game.moves, score = game.score, "Board full, game over");
            return MoveOutcome::GameOver(GameFinished {
                board: game.board,
                player: game.player,
                moves: game.moves,
                score: game.score,
            });
        }
        game.score = game.board.max_value();

        assert_invariants(&game);
        debug!(moves = game.moves, score = game.score, "Move applied");
        MoveOutcome::Continue(game)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player name.
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    /// Number of moves that changed the grid.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Largest tile on the board.
    pub fn score(&self) -> u32 {
        self.score
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game over: the final board, score and move count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFinished {
    board: Board,
    player: PlayerName,
    moves: u32,
    score: u32,
}

impl GameFinished {
    /// Returns the final board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player name.
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    /// Final move count.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Final score (largest tile).
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lines shown to the player once the game is over.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            String::new(),
            "GAME OVER...".to_string(),
            format!("Score (max tile): {}", self.score),
            format!("Moves: {}", self.moves),
        ]
    }

    /// Packages the result with the current timestamp for the result store.
    #[instrument(skip(self), fields(player = %self.player))]
    pub fn finalize(&self) -> NewResultRecord {
        NewResultRecord::new(
            chrono::Utc::now().timestamp(),
            self.board.size(),
            self.score,
            self.moves,
            &self.player,
        )
    }

    /// Starts over with the same size and player.
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new(self.board.size(), self.player)
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of applying a move.
#[derive(Debug)]
pub enum MoveOutcome {
    /// Game continues.
    Continue(GameInProgress),
    /// Game over.
    GameOver(GameFinished),
}
