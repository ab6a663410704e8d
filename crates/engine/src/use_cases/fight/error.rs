//! Fight operation errors.

use arena_domain::{CombatError, SkillId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while resolving attacks and fights.
#[derive(Debug, thiserror::Error)]
pub enum FightError {
    #[error(transparent)]
    Combat(#[from] CombatError),
    #[error("Skill not found: {0}")]
    SkillNotFound(SkillId),
    #[error("Persistence failure: {0}")]
    Persistence(#[from] RepoError),
}

impl FightError {
    /// The request named something that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Combat(CombatError::CombatantNotFound(_)) | Self::SkillNotFound(_) => true,
            Self::Persistence(e) => e.is_not_found(),
            Self::Combat(_) => false,
        }
    }
}
