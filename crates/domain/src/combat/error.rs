//! Combat rule violations.

use thiserror::Error;

use crate::ids::{CharacterId, SkillId};

/// Why a combat action or fight could not be resolved.
///
/// Any of these aborts the whole resolution; no partial result is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("Character not found: {0}")]
    CombatantNotFound(CharacterId),

    #[error("{attacker} has not learned skill {skill_id}")]
    SkillNotLearned {
        attacker: CharacterId,
        skill_id: SkillId,
    },

    #[error("{attacker} cannot use skill {skill_id} with its class")]
    SkillClassMismatch {
        attacker: CharacterId,
        skill_id: SkillId,
    },

    #[error("A fight needs at least 2 living participants, got {living}")]
    InsufficientParticipants { living: usize },

    #[error("{0} has been defeated and cannot act")]
    CombatantDefeated(CharacterId),

    #[error("{0} cannot attack itself")]
    SelfTarget(CharacterId),
}
