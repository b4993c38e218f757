//! Database repository for finished game results.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::BoardSize;
use crate::db::{DbError, DbErrorKind, NewResultRecord, ResultRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Number of results in a leaderboard view.
const LEADERBOARD_LEN: i64 = 3;

/// SQLite repository for game results.
#[derive(Debug, Clone)]
pub struct ResultRepository {
    db_path: String,
}

impl ResultRepository {
    /// Opens the database at the given path, creating the schema if absent.
    ///
    /// Schema creation is idempotent, so opening an existing database is safe.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or the schema cannot
    /// be created.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening ResultRepository");
        let repository = Self { db_path };

        let mut conn = repository.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            DbError::with_kind(DbErrorKind::Migrate, format!("Schema setup failed: {}", e))
        })?;
        debug!(applied = applied.len(), "Schema ready");

        Ok(repository)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::with_kind(
                DbErrorKind::Connect,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })
    }

    /// Appends a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, result), fields(size = result.size(), score = result.score(), moves = result.moves()))]
    pub fn record(&self, result: &NewResultRecord) -> Result<ResultRecord, DbError> {
        let mut conn = self.connection()?;
        let stored = insert(&mut conn, result)?;
        info!(result_id = stored.id(), "Game result recorded");
        Ok(stored)
    }

    /// Best three results for a board size.
    ///
    /// Ordered by score descending, then fewer moves, then earlier
    /// `created_at`, then insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(size = size.get()))]
    pub fn top_three(&self, size: BoardSize) -> Result<Vec<ResultRecord>, DbError> {
        let mut conn = self.connection()?;
        let results = ranked(&mut conn, size)?;
        info!(count = results.len(), "Leaderboard loaded");
        Ok(results)
    }

    /// Appends a result and reads the leaderboard for its size in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; nothing is written in
    /// that case.
    #[instrument(skip(self, result), fields(size = size.get()))]
    pub fn record_and_rank(
        &self,
        result: &NewResultRecord,
        size: BoardSize,
    ) -> Result<(ResultRecord, Vec<ResultRecord>), DbError> {
        let mut conn = self.connection()?;
        let (stored, top) = conn.transaction::<_, DbError, _>(|conn| {
            let stored = insert(conn, result)?;
            let top = ranked(conn, size)?;
            Ok((stored, top))
        })?;

        info!(result_id = stored.id(), count = top.len(), "Result recorded and ranked");
        Ok((stored, top))
    }
}

fn insert(conn: &mut SqliteConnection, result: &NewResultRecord) -> Result<ResultRecord, DbError> {
    let stored = diesel::insert_into(schema::game_results::table)
        .values(result)
        .returning(ResultRecord::as_returning())
        .get_result(conn)?;
    Ok(stored)
}

fn ranked(conn: &mut SqliteConnection, size: BoardSize) -> Result<Vec<ResultRecord>, DbError> {
    use schema::game_results::dsl;

    // BoardSize::MAX is single digit, so the cast cannot truncate.
    let size = size.get() as i32;
    let results = dsl::game_results
        .filter(dsl::size.eq(size))
        .order((
            dsl::score.desc(),
            dsl::moves.asc(),
            dsl::created_at.asc(),
            dsl::id.asc(),
        ))
        .limit(LEADERBOARD_LEN)
        .select(ResultRecord::as_select())
        .load(conn)?;
    Ok(results)
}
