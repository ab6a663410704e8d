//! SQLite skill catalog.

use arena_domain::{ItemName, RpgClass, Skill, SkillId};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::helpers::{column, parse_column, u32_column};
use crate::infrastructure::ports::{RepoError, SkillRepo};

pub struct SqliteSkillRepo {
    pool: SqlitePool,
}

impl SqliteSkillRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Convert a `skills` row (id, name, damage, required_class) to a Skill.
pub(super) fn row_to_skill(row: &SqliteRow) -> Result<Skill, RepoError> {
    let id: SkillId = parse_column(row, "id")?;
    let name: String = column(row, "name")?;
    let name = ItemName::new(name).map_err(RepoError::serialization)?;
    let damage = u32_column(row, "damage")?;
    let required_class: Option<String> = column(row, "required_class")?;

    let skill = Skill::new(name, damage).with_id(id);
    match required_class {
        Some(raw) => {
            let class: RpgClass = raw.parse().map_err(RepoError::serialization)?;
            Ok(skill.with_required_class(class))
        }
        None => Ok(skill),
    }
}

#[async_trait]
impl SkillRepo for SqliteSkillRepo {
    async fn get(&self, id: SkillId) -> Result<Option<Skill>, RepoError> {
        let row = sqlx::query("SELECT id, name, damage, required_class FROM skills WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_skill", e))?;

        row.as_ref().map(row_to_skill).transpose()
    }

    async fn list(&self) -> Result<Vec<Skill>, RepoError> {
        let rows =
            sqlx::query("SELECT id, name, damage, required_class FROM skills ORDER BY name, id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::database("list_skills", e))?;

        rows.iter().map(row_to_skill).collect()
    }
}
