//! SQLite fight records and leaderboard.

use arena_domain::{rank_highscores, CharacterId, CombatRecord, FightResult, HighscoreEntry};
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::helpers::{column, parse_column, u32_column};
use crate::infrastructure::ports::{RecordRepo, RepoError};

pub struct SqliteRecordRepo {
    pool: SqlitePool,
}

impl SqliteRecordRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepo for SqliteRecordRepo {
    async fn apply_outcome(&self, result: &FightResult) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("apply_outcome", e))?;

        for id in result.participants() {
            let (victories, defeats) = if id == result.winner { (1_i64, 0_i64) } else { (0, 1) };
            let updated = sqlx::query(
                r#"
                UPDATE characters
                SET fights = fights + 1,
                    victories = victories + ?,
                    defeats = defeats + ?
                WHERE id = ?
                "#,
            )
            .bind(victories)
            .bind(defeats)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("apply_outcome", e))?;

            // Dropping `tx` rolls back the counters already bumped.
            if updated.rows_affected() == 0 {
                return Err(RepoError::not_found("Character", id));
            }
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("apply_outcome", e))?;

        tracing::debug!(
            winner = %result.winner,
            losers = result.losers.len(),
            "Fight outcome recorded"
        );
        Ok(())
    }

    async fn list_highscores(&self) -> Result<Vec<HighscoreEntry>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, fights, victories, defeats
            FROM characters
            WHERE fights > 0
            ORDER BY victories DESC, defeats ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_highscores", e))?;

        let records = rows
            .iter()
            .map(|row| {
                let id: CharacterId = parse_column(row, "id")?;
                let name: String = column(row, "name")?;
                let record = CombatRecord {
                    fights: u32_column(row, "fights")?,
                    victories: u32_column(row, "victories")?,
                    defeats: u32_column(row, "defeats")?,
                };
                Ok((id, name, record))
            })
            .collect::<Result<Vec<_>, RepoError>>()?;

        Ok(rank_highscores(records))
    }
}
