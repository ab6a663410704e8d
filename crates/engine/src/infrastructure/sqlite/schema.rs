//! SQLite schema initialization and catalog seeding.

use arena_domain::default_skills;
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id TEXT PRIMARY KEY NOT NULL,
        owner_id TEXT NOT NULL,
        name TEXT NOT NULL,
        hit_points INTEGER NOT NULL,
        strength INTEGER NOT NULL,
        defence INTEGER NOT NULL,
        intelligence INTEGER NOT NULL,
        class TEXT NOT NULL,
        fights INTEGER NOT NULL DEFAULT 0,
        victories INTEGER NOT NULL DEFAULT 0,
        defeats INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_characters_owner ON characters (owner_id)",
    r#"
    CREATE TABLE IF NOT EXISTS weapons (
        id TEXT PRIMARY KEY NOT NULL,
        character_id TEXT NOT NULL UNIQUE REFERENCES characters (id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        damage INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS skills (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        damage INTEGER NOT NULL,
        required_class TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS character_skills (
        character_id TEXT NOT NULL REFERENCES characters (id) ON DELETE CASCADE,
        skill_id TEXT NOT NULL REFERENCES skills (id),
        PRIMARY KEY (character_id, skill_id)
    )
    "#,
];

/// Create tables if missing and make sure the default skill catalog exists.
///
/// Idempotent; safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("schema", e))?;
    }

    for skill in default_skills() {
        sqlx::query(
            "INSERT OR IGNORE INTO skills (id, name, damage, required_class) VALUES (?, ?, ?, ?)",
        )
        .bind(skill.id.to_string())
        .bind(skill.name.as_str())
        .bind(i64::from(skill.damage))
        .bind(skill.required_class.map(|c| c.as_str()))
        .execute(pool)
        .await
        .map_err(|e| RepoError::database("seed_skills", e))?;
    }

    tracing::info!("SQLite schema initialized (tables ensured, skill catalog seeded)");
    Ok(())
}
