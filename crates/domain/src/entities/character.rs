//! Character aggregate - a user's fighter as it is persisted
//!
//! The aggregate owns its weapon and its list of learned skills. Its combat
//! record is read-only here: counters only move through the record
//! aggregator, which writes them straight to storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combat::{CombatRecord, Combatant};
use crate::entities::{Skill, Weapon};
use crate::error::DomainError;
use crate::ids::{CharacterId, SkillId, UserId};
use crate::value_objects::{CharacterName, CombatStats, RpgClass};

/// A character owned by a user.
///
/// # Invariants
///
/// - `name` is always non-empty and <= 200 characters (enforced by `CharacterName`)
/// - at most one weapon is equipped
/// - a skill appears at most once in `skills`
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use arena_domain::{Character, CharacterName, UserId};
///
/// let character = Character::new(UserId::new(), CharacterName::new("Frodo").unwrap(), Utc::now());
///
/// assert_eq!(character.name().as_str(), "Frodo");
/// assert_eq!(character.stats().hit_points(), 100);
/// assert!(character.weapon().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    id: CharacterId,
    owner_id: UserId,
    name: CharacterName,
    stats: CombatStats,
    class: RpgClass,
    weapon: Option<Weapon>,
    skills: Vec<Skill>,
    record: CombatRecord,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a new character with default stats and the default class.
    pub fn new(owner_id: UserId, name: CharacterName, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            owner_id,
            name,
            stats: CombatStats::default(),
            class: RpgClass::default(),
            weapon: None,
            skills: Vec::new(),
            record: CombatRecord::default(),
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
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

    #[inline]
    pub fn record(&self) -> &CombatRecord {
        &self.record
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn knows_skill(&self, skill_id: SkillId) -> bool {
        self.skills.iter().any(|s| s.id == skill_id)
    }

    // =========================================================================
    // Builders (storage hydration)
    // =========================================================================

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_class(mut self, class: RpgClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_weapon(mut self, weapon: Option<Weapon>) -> Self {
        self.weapon = weapon;
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_record(mut self, record: CombatRecord) -> Self {
        self.record = record;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn rename(&mut self, name: CharacterName, now: DateTime<Utc>) {
        self.name = name;
        self.updated_at = now;
    }

    pub fn set_stats(&mut self, stats: CombatStats, now: DateTime<Utc>) {
        self.stats = stats;
        self.updated_at = now;
    }

    pub fn set_class(&mut self, class: RpgClass, now: DateTime<Utc>) {
        self.class = class;
        self.updated_at = now;
    }

    /// Equip `weapon`, returning the one it replaces.
    pub fn equip(&mut self, weapon: Weapon, now: DateTime<Utc>) -> Option<Weapon> {
        self.updated_at = now;
        self.weapon.replace(weapon)
    }

    /// Add `skill` to the learned set.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the skill is already learned.
    pub fn learn(&mut self, skill: Skill, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.knows_skill(skill.id) {
            return Err(DomainError::validation(format!(
                "{} already knows {}",
                self.name, skill.name
            )));
        }
        self.skills.push(skill);
        self.updated_at = now;
        Ok(())
    }

    /// Point-in-time combat snapshot of this character.
    pub fn to_combatant(&self) -> Combatant {
        let combatant = Combatant::new(
            self.id,
            self.owner_id,
            self.name.as_str(),
            self.stats,
            self.class,
        )
        .with_skills(self.skills.clone());

        match &self.weapon {
            Some(weapon) => combatant.with_weapon(weapon.clone()),
            None => combatant,
        }
    }
}
