//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (characters, the skill catalog, fight records)
//! - Clock/Random (for testing)

use arena_domain::{
    Character, CharacterId, Combatant, FightResult, HighscoreEntry, Skill, SkillId, UserId, Weapon,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// =============================================================================
// Error Types
// =============================================================================

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Stored data could not be turned back into domain values.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A write referenced missing rows or broke a uniqueness rule.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// =============================================================================
// Database Ports
// =============================================================================

/// Characters with their weapon and learned skills.
///
/// No method here touches the fight record counters; those belong to
/// [`RecordRepo`]. Every write to an existing character fails with
/// `NotFound` instead of recreating a deleted row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Character>, RepoError>;
    /// Insert a new character with its weapon and skills.
    async fn create(&self, character: &Character) -> Result<(), RepoError>;
    /// Write name, attributes and class. Hit points are only written when
    /// `overwrite_hit_points` is set, so damage taken since the read survives.
    async fn update(
        &self,
        character: &Character,
        overwrite_hit_points: bool,
    ) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;

    // Equipment
    /// Replace the equipped weapon.
    async fn equip_weapon(&self, id: CharacterId, weapon: &Weapon) -> Result<(), RepoError>;
    /// Link a catalog skill. Learning a known skill again is a no-op.
    async fn learn_skill(&self, id: CharacterId, skill_id: SkillId) -> Result<(), RepoError>;

    // Combat
    /// Fresh point-in-time snapshot, `None` if the id is unknown.
    async fn load_combatant(&self, id: CharacterId) -> Result<Option<Combatant>, RepoError>;
    /// Subtract `damage` from the stored hit points, floored at 0, and
    /// return what is left. Concurrent blows all land.
    async fn apply_damage(&self, id: CharacterId, damage: u32) -> Result<u32, RepoError>;
}

/// The shared skill catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepo: Send + Sync {
    async fn get(&self, id: SkillId) -> Result<Option<Skill>, RepoError>;
    async fn list(&self) -> Result<Vec<Skill>, RepoError>;
}

/// Victory/defeat counters and the leaderboard.
///
/// The only writer of fight records. Applying the same result twice counts
/// it twice; callers apply each result exactly once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepo: Send + Sync {
    /// Winner +1 victory, every loser +1 defeat, everyone +1 fight, atomically.
    async fn apply_outcome(&self, result: &FightResult) -> Result<(), RepoError>;
    /// Ranked leaderboard of characters that have fought at least once.
    async fn list_highscores(&self) -> Result<Vec<HighscoreEntry>, RepoError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform value in `min..=max`.
    fn gen_range(&self, min: u32, max: u32) -> u32;
}
