//! SQLite character repository.
//!
//! A character spans three tables: `characters` (stats, class, record),
//! `weapons` (at most one row per character) and `character_skills`
//! (links into the shared `skills` catalog). Writes touch only the columns
//! they own: hit points change through `apply_damage` as a relative update,
//! and nothing here writes the record counters.

use std::sync::Arc;

use arena_domain::{
    Character, CharacterId, CharacterName, CombatRecord, CombatStats, Combatant, ItemName, RpgClass,
    Skill, SkillId, UserId, Weapon, WeaponId,
};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{SqliteConnection, SqlitePool};

use super::helpers::{column, parse_column, timestamp_column, u32_column, write_error};
use super::skill_repo::row_to_skill;
use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

const CHARACTER_COLUMNS: &str = "id, owner_id, name, hit_points, strength, defence, intelligence, \
                                 class, fights, victories, defeats, created_at, updated_at";

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Self {
        Self { pool, clock }
    }

    /// Build the aggregate from its `characters` row plus weapon and skills.
    async fn hydrate(&self, row: &SqliteRow) -> Result<Character, RepoError> {
        let id: CharacterId = parse_column(row, "id")?;
        let owner_id: UserId = parse_column(row, "owner_id")?;
        let name: String = column(row, "name")?;
        let name = CharacterName::new(name).map_err(RepoError::serialization)?;
        let class: RpgClass = parse_column(row, "class")?;
        let stats = CombatStats::new(
            u32_column(row, "hit_points")?,
            u32_column(row, "strength")?,
            u32_column(row, "defence")?,
            u32_column(row, "intelligence")?,
        );
        let record = CombatRecord {
            fights: u32_column(row, "fights")?,
            victories: u32_column(row, "victories")?,
            defeats: u32_column(row, "defeats")?,
        };
        let created_at = timestamp_column(row, "created_at")?;
        let updated_at = timestamp_column(row, "updated_at")?;

        let weapon = self.load_weapon(id).await?;
        let skills = self.load_skills(id).await?;

        Ok(Character::new(owner_id, name, created_at)
            .with_id(id)
            .with_stats(stats)
            .with_class(class)
            .with_weapon(weapon)
            .with_skills(skills)
            .with_record(record)
            .with_timestamps(created_at, updated_at))
    }

    async fn load_weapon(&self, id: CharacterId) -> Result<Option<Weapon>, RepoError> {
        let row = sqlx::query("SELECT id, name, damage FROM weapons WHERE character_id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("load_weapon", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let weapon_id: WeaponId = parse_column(&row, "id")?;
        let name: String = column(&row, "name")?;
        let name = ItemName::new(name).map_err(RepoError::serialization)?;
        let damage = u32_column(&row, "damage")?;

        Ok(Some(Weapon::new(name, damage).with_id(weapon_id)))
    }

    async fn load_skills(&self, id: CharacterId) -> Result<Vec<Skill>, RepoError> {
        // Learned order is insertion order of the link rows.
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.damage, s.required_class
            FROM character_skills cs
            JOIN skills s ON s.id = cs.skill_id
            WHERE cs.character_id = ?
            ORDER BY cs.rowid
            "#,
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("load_skills", e))?;

        rows.iter().map(row_to_skill).collect()
    }
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM characters WHERE id = ?",
            CHARACTER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_character", e))?;

        match row {
            Some(row) => self.hydrate(&row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM characters WHERE owner_id = ? ORDER BY created_at, id",
            CHARACTER_COLUMNS
        ))
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_characters", e))?;

        let mut characters = Vec::with_capacity(rows.len());
        for row in &rows {
            characters.push(self.hydrate(row).await?);
        }
        Ok(characters)
    }

    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let id = character.id().to_string();
        let stats = character.stats();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("create_character", e))?;

        sqlx::query(
            r#"
            INSERT INTO characters
                (id, owner_id, name, hit_points, strength, defence, intelligence, class,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(character.owner_id().to_string())
        .bind(character.name().as_str())
        .bind(i64::from(stats.hit_points()))
        .bind(i64::from(stats.strength()))
        .bind(i64::from(stats.defence()))
        .bind(i64::from(stats.intelligence()))
        .bind(character.class().as_str())
        .bind(character.created_at().to_rfc3339())
        .bind(character.updated_at().to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error("create_character", e))?;

        if let Some(weapon) = character.weapon() {
            insert_weapon(&mut tx, &id, weapon).await?;
        }
        for skill in character.skills() {
            insert_skill_link(&mut tx, &id, &skill.id.to_string()).await?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("create_character", e))?;
        Ok(())
    }

    async fn update(
        &self,
        character: &Character,
        overwrite_hit_points: bool,
    ) -> Result<(), RepoError> {
        let stats = character.stats();
        let hit_points = overwrite_hit_points.then(|| i64::from(stats.hit_points()));

        let result = sqlx::query(
            r#"
            UPDATE characters
            SET name = ?,
                hit_points = COALESCE(?, hit_points),
                strength = ?,
                defence = ?,
                intelligence = ?,
                class = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(character.name().as_str())
        .bind(hit_points)
        .bind(i64::from(stats.strength()))
        .bind(i64::from(stats.defence()))
        .bind(i64::from(stats.intelligence()))
        .bind(character.class().as_str())
        .bind(character.updated_at().to_rfc3339())
        .bind(character.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("update_character", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", character.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", id));
        }
        Ok(())
    }

    async fn equip_weapon(&self, id: CharacterId, weapon: &Weapon) -> Result<(), RepoError> {
        let id = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("equip_weapon", e))?;

        touch(&mut tx, &id, self.clock.now().to_rfc3339(), "equip_weapon").await?;
        sqlx::query("DELETE FROM weapons WHERE character_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("equip_weapon", e))?;
        insert_weapon(&mut tx, &id, weapon).await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("equip_weapon", e))?;
        Ok(())
    }

    async fn learn_skill(&self, id: CharacterId, skill_id: SkillId) -> Result<(), RepoError> {
        let id = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("learn_skill", e))?;

        touch(&mut tx, &id, self.clock.now().to_rfc3339(), "learn_skill").await?;
        insert_skill_link(&mut tx, &id, &skill_id.to_string()).await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("learn_skill", e))?;
        Ok(())
    }

    async fn load_combatant(&self, id: CharacterId) -> Result<Option<Combatant>, RepoError> {
        Ok(self.get(id).await?.map(|character| character.to_combatant()))
    }

    async fn apply_damage(&self, id: CharacterId, damage: u32) -> Result<u32, RepoError> {
        // One statement, so concurrent blows on the same row serialize.
        let row = sqlx::query(
            r#"
            UPDATE characters
            SET hit_points = MAX(hit_points - ?, 0),
                updated_at = ?
            WHERE id = ?
            RETURNING hit_points
            "#,
        )
        .bind(i64::from(damage))
        .bind(self.clock.now().to_rfc3339())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("apply_damage", e))?;

        match row {
            Some(row) => u32_column(&row, "hit_points"),
            None => Err(RepoError::not_found("Character", id)),
        }
    }
}

/// Bump `updated_at`, failing with `NotFound` when the character is gone.
async fn touch(
    conn: &mut SqliteConnection,
    id: &str,
    now: String,
    operation: &'static str,
) -> Result<(), RepoError> {
    let result = sqlx::query("UPDATE characters SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| RepoError::database(operation, e))?;

    if result.rows_affected() == 0 {
        return Err(RepoError::not_found("Character", id));
    }
    Ok(())
}

async fn insert_weapon(
    conn: &mut SqliteConnection,
    character_id: &str,
    weapon: &Weapon,
) -> Result<(), RepoError> {
    sqlx::query("INSERT INTO weapons (id, character_id, name, damage) VALUES (?, ?, ?, ?)")
        .bind(weapon.id.to_string())
        .bind(character_id)
        .bind(weapon.name.as_str())
        .bind(i64::from(weapon.damage))
        .execute(&mut *conn)
        .await
        .map_err(|e| write_error("save_weapon", e))?;
    Ok(())
}

async fn insert_skill_link(
    conn: &mut SqliteConnection,
    character_id: &str,
    skill_id: &str,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO character_skills (character_id, skill_id) VALUES (?, ?)
        ON CONFLICT (character_id, skill_id) DO NOTHING
        "#,
    )
    .bind(character_id)
    .bind(skill_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| write_error("save_skills", e))?;
    Ok(())
}
