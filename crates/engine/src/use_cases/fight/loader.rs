//! Combatant snapshot loading.

use std::collections::HashSet;
use std::sync::Arc;

use arena_domain::{CharacterId, CombatError, Combatant};

use crate::infrastructure::ports::CharacterRepo;

use super::error::FightError;

/// Builds fresh combat snapshots from persisted characters.
pub struct CombatantLoader {
    characters: Arc<dyn CharacterRepo>,
}

impl CombatantLoader {
    pub fn new(characters: Arc<dyn CharacterRepo>) -> Self {
        Self { characters }
    }

    /// # Errors
    ///
    /// `CombatantNotFound` if the id does not resolve.
    pub async fn load(&self, id: CharacterId) -> Result<Combatant, FightError> {
        self.characters
            .load_combatant(id)
            .await?
            .ok_or(FightError::Combat(CombatError::CombatantNotFound(id)))
    }

    /// Load every id in order, each at most once.
    ///
    /// Fails on the first id that does not resolve; nothing is written.
    pub async fn load_all(&self, ids: &[CharacterId]) -> Result<Vec<Combatant>, FightError> {
        let mut seen = HashSet::new();
        let mut combatants = Vec::with_capacity(ids.len());
        for &id in ids {
            if seen.insert(id) {
                combatants.push(self.load(id).await?);
            }
        }
        Ok(combatants)
    }
}
