//! Row conversion helpers shared by the SQLite repositories.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::infrastructure::ports::RepoError;

/// Map a write error, keeping constraint failures distinguishable.
pub(super) fn write_error(operation: &'static str, e: sqlx::Error) -> RepoError {
    match &e {
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation() || db.is_unique_violation() =>
        {
            RepoError::constraint(format!("{}: {}", operation, db.message()))
        }
        _ => RepoError::database(operation, e),
    }
}

/// Read a column, mapping a missing or mistyped column to a database error.
pub(super) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::database("decode", e))
}

/// Parse a TEXT column into any `FromStr` value (ids, classes).
pub(super) fn parse_column<T>(row: &SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|e| RepoError::serialization(format!("invalid {}: {} ({})", name, raw, e)))
}

/// SQLite has no unsigned integers; counters and stats are stored as i64.
pub(super) fn u32_column(row: &SqliteRow, name: &str) -> Result<u32, RepoError> {
    let raw: i64 = column(row, name)?;
    u32::try_from(raw)
        .map_err(|_| RepoError::serialization(format!("{} out of range: {}", name, raw)))
}

pub(super) fn timestamp_column(row: &SqliteRow, name: &str) -> Result<DateTime<Utc>, RepoError> {
    let raw: String = column(row, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("invalid {}: {} ({})", name, raw, e)))
}
