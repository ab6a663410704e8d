//! The combat resolution engine.
//!
//! Everything here is pure: combatants are snapshots, randomness comes in
//! through a roller closure `FnMut(min, max) -> u32` returning a value in
//! `min..=max`, and results are plain values for the caller to persist.

mod action;
mod combatant;
mod damage;
mod error;
mod fight;
mod highscore;
mod result;

pub use action::{AttackAction, AttackKind};
pub use combatant::Combatant;
pub use damage::{compute_damage, MIN_DAMAGE};
pub use error::CombatError;
pub use fight::{
    resolve_exchange, ActionPolicy, Fight, FightConfig, FightState, TargetPolicy,
    DEFAULT_MAX_ROUNDS,
};
pub use highscore::{compare_records, rank_highscores, CombatRecord, HighscoreEntry};
pub use result::{ActionUsed, AttackResult, FightResult, Standing};
