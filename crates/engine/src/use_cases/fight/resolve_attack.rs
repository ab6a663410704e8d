//! Resolve attack use case.
//!
//! A single blow between two characters, outside of any fight. The damage is
//! subtracted from the defender's stored hit points; no fight record is
//! produced.

use std::sync::Arc;

use arena_domain::{resolve_exchange, AttackAction, AttackKind, AttackResult, CombatError};

use crate::infrastructure::ports::{CharacterRepo, RandomPort, SkillRepo};

use super::error::FightError;
use super::loader::CombatantLoader;

pub struct ResolveAttack {
    loader: Arc<CombatantLoader>,
    characters: Arc<dyn CharacterRepo>,
    skills: Arc<dyn SkillRepo>,
    random: Arc<dyn RandomPort>,
}

impl ResolveAttack {
    pub fn new(
        loader: Arc<CombatantLoader>,
        characters: Arc<dyn CharacterRepo>,
        skills: Arc<dyn SkillRepo>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            loader,
            characters,
            skills,
            random,
        }
    }

    /// Execute the attack.
    ///
    /// # Returns
    /// * `Ok(AttackResult)` - Blow landed, damage persisted. The reported
    ///   hit points are the stored value after this blow, which also
    ///   reflects any blow that landed concurrently.
    /// * `Err(FightError)` - Nothing was written
    pub async fn execute(&self, action: AttackAction) -> Result<AttackResult, FightError> {
        if action.attacker == action.defender {
            return Err(CombatError::SelfTarget(action.attacker).into());
        }

        let attacker = self.loader.load(action.attacker).await?;
        let mut defender = self.loader.load(action.defender).await?;

        // Tell an unknown skill apart from one the attacker never learned.
        if let AttackKind::Skill { skill_id } = action.kind {
            if attacker.learned_skill(skill_id).is_none()
                && self.skills.get(skill_id).await?.is_none()
            {
                return Err(FightError::SkillNotFound(skill_id));
            }
        }

        let mut roll = |min: u32, max: u32| self.random.gen_range(min, max);
        let mut result = resolve_exchange(&attacker, &mut defender, action.kind, &mut roll)?;

        // The snapshot may be stale by now; subtract instead of overwriting.
        result.defender_hit_points = self
            .characters
            .apply_damage(result.defender_id, result.damage)
            .await?;

        tracing::info!(
            attacker = %result.attacker_id,
            defender = %result.defender_id,
            action = result.action.label(),
            damage = result.damage,
            defender_hit_points = result.defender_hit_points,
            "Attack resolved"
        );

        Ok(result)
    }
}
