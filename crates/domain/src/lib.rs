//! Arena domain.
//!
//! Entities, value objects and the combat resolution engine. Nothing in this
//! crate performs I/O or draws random numbers on its own.

pub mod combat;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use combat::{
    compute_damage, rank_highscores, resolve_exchange, ActionPolicy, ActionUsed, AttackAction,
    AttackKind, AttackResult, CombatError, CombatRecord, Combatant, Fight, FightConfig,
    FightResult, FightState, HighscoreEntry, Standing, TargetPolicy, DEFAULT_MAX_ROUNDS,
};
pub use entities::{default_skills, Character, Skill, Weapon};
pub use error::DomainError;
pub use ids::{CharacterId, SkillId, UserId, WeaponId};
pub use value_objects::{CharacterName, CombatStats, ItemName, RpgClass};
