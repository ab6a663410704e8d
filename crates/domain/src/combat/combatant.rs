//! Combatant - a point-in-time snapshot of a character for one resolution.

use serde::{Deserialize, Serialize};

use crate::entities::{Skill, Weapon};
use crate::ids::{CharacterId, SkillId, UserId};
use crate::value_objects::{CombatStats, RpgClass};

/// Immutable snapshot of everything combat needs to know about a character.
///
/// Built fresh from persisted state for every request. Only the fight
/// resolver changes `hit_points`, and only on its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    id: CharacterId,
    owner_id: UserId,
    name: String,
    hit_points: u32,
    stats: CombatStats,
    class: RpgClass,
    weapon: Option<Weapon>,
    skills: Vec<Skill>,
}

impl Combatant {
    /// Starting hit points are taken from `stats`.
    pub fn new(
        id: CharacterId,
        owner_id: UserId,
        name: impl Into<String>,
        stats: CombatStats,
        class: RpgClass,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            hit_points: stats.hit_points(),
            stats,
            class,
            weapon: None,
            skills: Vec::new(),
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    #[inline]
    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    #[inline]
    pub fn class(&self) -> RpgClass {
        self.class
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// A learned skill by id.
    pub fn learned_skill(&self, skill_id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    /// Learned skills this combatant's class can cast, in learning order.
    pub fn usable_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.usable_by(self.class))
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Subtracts `amount`, never going below zero. Returns the remaining hit points.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.hit_points = self.hit_points.saturating_sub(amount);
        self.hit_points
    }
}
