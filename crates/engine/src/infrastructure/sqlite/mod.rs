//! SQLite database implementations.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::{ClockPort, RepoError};

mod helpers;

mod character_repo;
mod record_repo;
mod schema;
mod skill_repo;


pub use character_repo::SqliteCharacterRepo;
pub use record_repo::SqliteRecordRepo;
pub use schema::ensure_schema;
pub use skill_repo::SqliteSkillRepo;

/// Open a pool for `database_url`, creating the file if needed.
///
/// Foreign keys are enforced (deleting a character removes its weapon and
/// skill links) and WAL lets the leaderboard read while a fight is recorded.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create all SQLite repositories from a pool.
pub struct SqliteRepositories {
    pub character: Arc<SqliteCharacterRepo>,
    pub skill: Arc<SqliteSkillRepo>,
    pub record: Arc<SqliteRecordRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            character: Arc::new(SqliteCharacterRepo::new(pool.clone(), clock)),
            skill: Arc::new(SqliteSkillRepo::new(pool.clone())),
            record: Arc::new(SqliteRecordRepo::new(pool)),
        }
    }

    /// Connect, ensure the schema and build the repositories.
    pub async fn open(database_url: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = connect(database_url).await?;
        ensure_schema(&pool).await?;
        Ok(Self::new(pool, clock))
    }
}
