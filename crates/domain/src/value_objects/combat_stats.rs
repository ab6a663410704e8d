//! CombatStats - the numbers a character brings into a fight.

use serde::{Deserialize, Serialize};

/// Hit points a freshly created character starts with.
pub const DEFAULT_HIT_POINTS: u32 = 100;

/// Strength, defence and intelligence of a freshly created character.
pub const DEFAULT_ATTRIBUTE: u32 = 10;

/// Combat-relevant attributes of a character.
///
/// This is an immutable value object. Use builder-style methods to create
/// modified copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    hit_points: u32,
    strength: u32,
    defence: u32,
    intelligence: u32,
}

impl CombatStats {
    pub fn new(hit_points: u32, strength: u32, defence: u32, intelligence: u32) -> Self {
        Self {
            hit_points,
            strength,
            defence,
            intelligence,
        }
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Read accessors
    // ──────────────────────────────────────────────────────────────────────────

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    /// Scales the random bonus on weapon attacks.
    pub fn strength(&self) -> u32 {
        self.strength
    }

    /// Flat reduction applied to every incoming hit.
    pub fn defence(&self) -> u32 {
        self.defence
    }

    /// Scales the random bonus on skill attacks.
    pub fn intelligence(&self) -> u32 {
        self.intelligence
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Builders
    // ──────────────────────────────────────────────────────────────────────────

    pub fn with_hit_points(mut self, hit_points: u32) -> Self {
        self.hit_points = hit_points;
        self
    }

    pub fn with_strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_defence(mut self, defence: u32) -> Self {
        self.defence = defence;
        self
    }

    pub fn with_intelligence(mut self, intelligence: u32) -> Self {
        self.intelligence = intelligence;
        self
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new(
            DEFAULT_HIT_POINTS,
            DEFAULT_ATTRIBUTE,
            DEFAULT_ATTRIBUTE,
            DEFAULT_ATTRIBUTE,
        )
    }
}
