//! Skill entity - abilities from the shared catalog that characters learn.
//!
//! Learning a skill is referential: the catalog keeps owning the skill and any
//! number of characters may learn it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::SkillId;
use crate::value_objects::{ItemName, RpgClass};

/// A castable skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: ItemName,
    /// Base damage before the intelligence bonus and the defender's defence.
    pub damage: u32,
    /// When set, only characters of this class can cast the skill.
    pub required_class: Option<RpgClass>,
}

impl Skill {
    pub fn new(name: ItemName, damage: u32) -> Self {
        Self {
            id: SkillId::new(),
            name,
            damage,
            required_class: None,
        }
    }

    pub fn with_id(mut self, id: SkillId) -> Self {
        self.id = id;
        self
    }

    pub fn with_required_class(mut self, class: RpgClass) -> Self {
        self.required_class = Some(class);
        self
    }

    /// Whether a character of `class` may cast this skill.
    pub fn usable_by(&self, class: RpgClass) -> bool {
        self.required_class.map_or(true, |required| required == class)
    }
}

/// The skill catalog every new database starts with.
///
/// Ids are fixed so seeding is idempotent.
pub fn default_skills() -> Vec<Skill> {
    let seeded = |n: u128, name: &str, damage: u32| -> Option<Skill> {
        ItemName::new(name)
            .ok()
            .map(|name| Skill::new(name, damage).with_id(SkillId::from_uuid(Uuid::from_u128(n))))
    };

    [
        seeded(1, "Fireball", 30),
        seeded(2, "Frenzy", 20),
        seeded(3, "Blizzard", 50),
    ]
    .into_iter()
    .flatten()
    .collect()
}
