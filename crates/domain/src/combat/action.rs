//! Attack actions - what a combatant does on its turn.

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, SkillId};

/// Which attack a combatant performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AttackKind {
    /// Swing the equipped weapon (bare hands without one).
    Weapon,
    /// Cast a learned skill.
    Skill { skill_id: SkillId },
}

/// One attack of one combatant against another.
///
/// Only lives for the duration of a single resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackAction {
    pub attacker: CharacterId,
    pub defender: CharacterId,
    pub kind: AttackKind,
}

impl AttackAction {
    pub fn weapon(attacker: CharacterId, defender: CharacterId) -> Self {
        Self {
            attacker,
            defender,
            kind: AttackKind::Weapon,
        }
    }

    pub fn skill(attacker: CharacterId, defender: CharacterId, skill_id: SkillId) -> Self {
        Self {
            attacker,
            defender,
            kind: AttackKind::Skill { skill_id },
        }
    }
}
