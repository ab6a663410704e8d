//! Weapon entity - the one piece of equipment a character can swing.

use serde::{Deserialize, Serialize};

use crate::ids::WeaponId;
use crate::value_objects::ItemName;

/// A weapon equipped by a character.
///
/// A character holds at most one weapon; equipping a new one replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: WeaponId,
    pub name: ItemName,
    /// Base damage before the strength bonus and the defender's defence.
    pub damage: u32,
}

impl Weapon {
    pub fn new(name: ItemName, damage: u32) -> Self {
        Self {
            id: WeaponId::new(),
            name,
            damage,
        }
    }

    pub fn with_id(mut self, id: WeaponId) -> Self {
        self.id = id;
        self
    }
}
