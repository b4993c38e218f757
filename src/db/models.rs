//! Database models for finished games.

use derive_getters::Getters;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::schema;
use crate::{BoardSize, PlayerName};

/// A stored game result. Rows are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::game_results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ResultRecord {
    id: i32,
    created_at: i64,
    size: i32,
    score: i64,
    moves: i64,
    player_name: String,
}

impl ResultRecord {
    /// One leaderboard line: `1. \tNAME:\tSCORE[MOVES]`.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn leaderboard_line(&self, rank: usize) -> String {
        format!("{}. \t{}:\t{}[{}]", rank, self.player_name, self.score, self.moves)
    }
}

/// Insertable result produced when a game ends.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, Getters)]
#[diesel(table_name = schema::game_results)]
pub struct NewResultRecord {
    created_at: i64,
    size: i32,
    score: i64,
    moves: i64,
    player_name: String,
}

impl NewResultRecord {
    /// Creates a result from domain values. `created_at` is in epoch seconds.
    #[instrument(skip(player), fields(player = %player))]
    pub fn new(
        created_at: i64,
        size: BoardSize,
        score: u32,
        moves: u32,
        player: &PlayerName,
    ) -> Self {
        Self {
            created_at,
            // BoardSize::MAX is single digit, so the cast cannot truncate.
            size: size.get() as i32,
            score: i64::from(score),
            moves: i64::from(moves),
            player_name: player.as_str().to_string(),
        }
    }
}
