//! Result store seam and leaderboard rendering.

use tracing::{debug, instrument};

use crate::{BoardSize, DbError, NewResultRecord, ResultRecord, ResultRepository};

/// Where finished games are persisted and ranked.
///
/// Only finished games reach the store; abandoned or interrupted sessions
/// are never recorded.
pub trait ResultStore {
    /// Appends one finished game.
    fn record(&self, result: &NewResultRecord) -> Result<ResultRecord, DbError>;

    /// Up to three best results for `size`: score descending, then moves
    /// ascending, then earliest first.
    fn top_three(&self, size: BoardSize) -> Result<Vec<ResultRecord>, DbError>;

    /// Records a result and reads the ranking for its board size.
    fn record_and_rank(
        &self,
        result: &NewResultRecord,
        size: BoardSize,
    ) -> Result<(ResultRecord, Vec<ResultRecord>), DbError> {
        let stored = self.record(result)?;
        let top = self.top_three(size)?;
        Ok((stored, top))
    }
}

impl ResultStore for ResultRepository {
    fn record(&self, result: &NewResultRecord) -> Result<ResultRecord, DbError> {
        ResultRepository::record(self, result)
    }

    fn top_three(&self, size: BoardSize) -> Result<Vec<ResultRecord>, DbError> {
        ResultRepository::top_three(self, size)
    }

    fn record_and_rank(
        &self,
        result: &NewResultRecord,
        size: BoardSize,
    ) -> Result<(ResultRecord, Vec<ResultRecord>), DbError> {
        ResultRepository::record_and_rank(self, result, size)
    }
}

/// Lines shown after a game: a heading, then one line per ranked result.
#[instrument(skip(results), fields(count = results.len()))]
pub fn leaderboard_lines(size: BoardSize, results: &[ResultRecord]) -> Vec<String> {
    debug!("Rendering leaderboard");
    std::iter::once(String::new())
        .chain(std::iter::once(format!("Top 3 Results for '{}' game:", size)))
        .chain(
            results
                .iter()
                .enumerate()
                .map(|(i, result)| result.leaderboard_line(i + 1)),
        )
        .collect()
}
