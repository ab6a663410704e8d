//! Run fight use case.
//!
//! Loads fresh snapshots, plays the fight to its end and records the outcome.
//! Hit points changed during the fight are thrown away with the snapshots.

use std::sync::Arc;

use arena_domain::{CharacterId, Fight, FightConfig, FightResult};

use crate::infrastructure::ports::{RandomPort, RecordRepo};

use super::error::FightError;
use super::loader::CombatantLoader;

pub struct RunFight {
    loader: Arc<CombatantLoader>,
    records: Arc<dyn RecordRepo>,
    random: Arc<dyn RandomPort>,
    config: FightConfig,
}

impl RunFight {
    pub fn new(
        loader: Arc<CombatantLoader>,
        records: Arc<dyn RecordRepo>,
        random: Arc<dyn RandomPort>,
        config: FightConfig,
    ) -> Self {
        Self {
            loader,
            records,
            random,
            config,
        }
    }

    /// Execute the fight among `participants`, in that turn order.
    ///
    /// Every id is resolved before anything happens; the outcome is applied
    /// to the fight records exactly once.
    pub async fn execute(&self, participants: &[CharacterId]) -> Result<FightResult, FightError> {
        let combatants = self.loader.load_all(participants).await?;
        let fight = Fight::new(combatants, self.config)?;

        let mut roll = |min: u32, max: u32| self.random.gen_range(min, max);
        let result = fight.run(&mut roll)?;

        self.records.apply_outcome(&result).await?;

        tracing::info!(
            winner = %result.winner,
            losers = result.losers.len(),
            rounds = result.rounds,
            blows = result.log.len(),
            round_limit_reached = result.round_limit_reached,
            "Fight concluded"
        );

        Ok(result)
    }
}
