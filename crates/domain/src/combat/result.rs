//! Results produced by the fight resolver.

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, SkillId};

/// What the attacker used for a blow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionUsed {
    /// `name` is `None` for an unarmed attack.
    Weapon { name: Option<String> },
    Skill { skill_id: SkillId, name: String },
}

impl ActionUsed {
    /// Human-readable name of what was used.
    pub fn label(&self) -> &str {
        match self {
            Self::Weapon { name: Some(name) } => name,
            Self::Weapon { name: None } => "bare hands",
            Self::Skill { name, .. } => name,
        }
    }
}

/// Outcome of a single blow. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResult {
    pub attacker_id: CharacterId,
    pub attacker_name: String,
    pub defender_id: CharacterId,
    pub defender_name: String,
    pub action: ActionUsed,
    pub damage: u32,
    pub attacker_hit_points: u32,
    pub defender_hit_points: u32,
}

impl AttackResult {
    /// True iff the defender has no hit points left.
    pub fn attacker_victorious(&self) -> bool {
        self.defender_hit_points == 0
    }
}

/// Where a participant ended up when the fight concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub character_id: CharacterId,
    pub name: String,
    pub hit_points: u32,
}

/// Outcome of a full fight. Produced once, persisted once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightResult {
    /// Every blow in chronological order.
    pub log: Vec<AttackResult>,
    /// Number of rounds that were started.
    pub rounds: u32,
    pub winner: CharacterId,
    pub losers: Vec<CharacterId>,
    /// Final hit points of every participant in turn order.
    pub standings: Vec<Standing>,
    /// The round bound ended the fight before a single survivor remained.
    pub round_limit_reached: bool,
}

impl FightResult {
    /// Winner first, then losers in turn order.
    pub fn participants(&self) -> impl Iterator<Item = CharacterId> + '_ {
        std::iter::once(self.winner).chain(self.losers.iter().copied())
    }

    pub fn standing(&self, id: CharacterId) -> Option<&Standing> {
        self.standings.iter().find(|s| s.character_id == id)
    }
}
