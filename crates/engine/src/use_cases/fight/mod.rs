//! Fight use cases.
//!
//! Single attacks, full fights and the leaderboard.

use std::sync::Arc;

use arena_domain::HighscoreEntry;

use crate::infrastructure::ports::{RecordRepo, RepoError};

mod error;
mod loader;
mod resolve_attack;
mod run_fight;

pub use error::FightError;
pub use loader::CombatantLoader;
pub use resolve_attack::ResolveAttack;
pub use run_fight::RunFight;

/// Container for fight use cases.
pub struct FightUseCases {
    pub resolve_attack: Arc<ResolveAttack>,
    pub run_fight: Arc<RunFight>,
    pub highscores: Arc<GetHighscores>,
}

impl FightUseCases {
    pub fn new(
        resolve_attack: Arc<ResolveAttack>,
        run_fight: Arc<RunFight>,
        highscores: Arc<GetHighscores>,
    ) -> Self {
        Self {
            resolve_attack,
            run_fight,
            highscores,
        }
    }
}

/// Ranked leaderboard of everyone who has fought.
pub struct GetHighscores {
    records: Arc<dyn RecordRepo>,
}

impl GetHighscores {
    pub fn new(records: Arc<dyn RecordRepo>) -> Self {
        Self { records }
    }

    pub async fn execute(&self) -> Result<Vec<HighscoreEntry>, RepoError> {
        self.records.list_highscores().await
    }
}
