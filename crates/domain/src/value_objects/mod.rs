//! Value objects - immutable, validated-by-construction building blocks.

mod combat_stats;
mod names;
mod rpg_class;

pub use combat_stats::{CombatStats, DEFAULT_ATTRIBUTE, DEFAULT_HIT_POINTS};
pub use names::{CharacterName, ItemName};
pub use rpg_class::RpgClass;
