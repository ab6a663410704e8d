//! Application state and composition.

use std::sync::Arc;

use arena_domain::FightConfig;

use crate::infrastructure::{
    clock::SystemRandom,
    ports::{CharacterRepo, ClockPort, RandomPort, RecordRepo, SkillRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases::{
    self,
    fight::{CombatantLoader, GetHighscores, ResolveAttack, RunFight},
};

/// Main application state.
///
/// Holds the use cases, wired to their ports.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// The repository ports the use cases are built on.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub skill: Arc<dyn SkillRepo>,
    pub record: Arc<dyn RecordRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub fight: use_cases::FightUseCases,
    pub characters: Arc<use_cases::CharacterOps>,
}

impl App {
    /// Production wiring: SQLite, the caller's clock and thread-local RNG.
    pub fn new(
        repos: SqliteRepositories,
        clock: Arc<dyn ClockPort>,
        fight_config: FightConfig,
    ) -> Self {
        Self::with_ports(
            Repositories {
                character: repos.character,
                skill: repos.skill,
                record: repos.record,
            },
            clock,
            Arc::new(SystemRandom::new()),
            fight_config,
        )
    }

    pub fn with_ports(
        repositories: Repositories,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        fight_config: FightConfig,
    ) -> Self {
        let loader = Arc::new(CombatantLoader::new(repositories.character.clone()));

        let fight = use_cases::FightUseCases::new(
            Arc::new(ResolveAttack::new(
                loader.clone(),
                repositories.character.clone(),
                repositories.skill.clone(),
                random.clone(),
            )),
            Arc::new(RunFight::new(
                loader,
                repositories.record.clone(),
                random,
                fight_config,
            )),
            Arc::new(GetHighscores::new(repositories.record.clone())),
        );

        let characters = Arc::new(use_cases::CharacterOps::new(
            repositories.character,
            repositories.skill,
            clock,
        ));

        Self {
            use_cases: UseCases { fight, characters },
        }
    }
}
