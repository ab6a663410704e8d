//! Character management errors.

use arena_domain::{CharacterId, DomainError, SkillId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while managing characters.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    /// Missing, or owned by someone else.
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
    #[error("Skill not found: {0}")]
    SkillNotFound(SkillId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
