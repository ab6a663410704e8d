//! Character management use cases.
//!
//! Every operation is scoped to the requesting user. A character owned by
//! someone else behaves exactly like a missing one.

use std::sync::Arc;

use arena_domain::{
    Character, CharacterId, CharacterName, CombatStats, ItemName, RpgClass, Skill, SkillId, UserId,
    Weapon,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError, SkillRepo};

mod error;

pub use error::CharacterError;

/// Input for creating a character. Unset fields take the defaults.
#[derive(Debug, Clone, Default)]
pub struct CreateCharacterInput {
    pub name: String,
    pub stats: Option<CombatStats>,
    pub class: Option<RpgClass>,
}

/// Partial update; only the fields that are set change.
#[derive(Debug, Clone, Default)]
pub struct UpdateCharacterInput {
    pub name: Option<String>,
    pub hit_points: Option<u32>,
    pub strength: Option<u32>,
    pub defence: Option<u32>,
    pub intelligence: Option<u32>,
    pub class: Option<RpgClass>,
}

/// Character CRUD, equipment and skill learning.
pub struct CharacterOps {
    characters: Arc<dyn CharacterRepo>,
    skills: Arc<dyn SkillRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CharacterOps {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        skills: Arc<dyn SkillRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            skills,
            clock,
        }
    }

    pub async fn list(&self, owner: UserId) -> Result<Vec<Character>, CharacterError> {
        Ok(self.characters.list_for_owner(owner).await?)
    }

    pub async fn get(&self, owner: UserId, id: CharacterId) -> Result<Character, CharacterError> {
        self.characters
            .get(id)
            .await?
            .filter(|c| c.owner_id() == owner)
            .ok_or(CharacterError::NotFound(id))
    }

    pub async fn create(
        &self,
        owner: UserId,
        input: CreateCharacterInput,
    ) -> Result<Character, CharacterError> {
        let name = CharacterName::new(input.name)?;
        let mut character = Character::new(owner, name, self.clock.now());
        if let Some(stats) = input.stats {
            character = character.with_stats(stats);
        }
        if let Some(class) = input.class {
            character = character.with_class(class);
        }

        self.characters.create(&character).await?;
        tracing::info!(character_id = %character.id(), owner = %owner, "Character created");
        Ok(character)
    }

    pub async fn update(
        &self,
        owner: UserId,
        id: CharacterId,
        input: UpdateCharacterInput,
    ) -> Result<Character, CharacterError> {
        let mut character = self.get(owner, id).await?;
        let now = self.clock.now();

        if let Some(name) = input.name {
            character.rename(CharacterName::new(name)?, now);
        }

        let current = *character.stats();
        let stats = CombatStats::new(
            input.hit_points.unwrap_or(current.hit_points()),
            input.strength.unwrap_or(current.strength()),
            input.defence.unwrap_or(current.defence()),
            input.intelligence.unwrap_or(current.intelligence()),
        );
        if stats != current {
            character.set_stats(stats, now);
        }
        if let Some(class) = input.class {
            character.set_class(class, now);
        }

        // Hit points are left alone unless the caller sets them, so blows
        // landed since the read are kept.
        self.characters
            .update(&character, input.hit_points.is_some())
            .await
            .map_err(|e| not_found_as(id, e))?;
        Ok(character)
    }

    pub async fn delete(&self, owner: UserId, id: CharacterId) -> Result<(), CharacterError> {
        self.get(owner, id).await?;
        self.characters
            .delete(id)
            .await
            .map_err(|e| not_found_as(id, e))?;
        tracing::info!(character_id = %id, "Character deleted");
        Ok(())
    }

    /// Give the character a new weapon, replacing any equipped one.
    pub async fn equip_weapon(
        &self,
        owner: UserId,
        id: CharacterId,
        name: String,
        damage: u32,
    ) -> Result<Character, CharacterError> {
        let mut character = self.get(owner, id).await?;
        let weapon = Weapon::new(ItemName::new(name)?, damage);

        self.characters
            .equip_weapon(id, &weapon)
            .await
            .map_err(|e| not_found_as(id, e))?;
        if let Some(replaced) = character.equip(weapon, self.clock.now()) {
            tracing::debug!(character_id = %id, replaced = %replaced.name, "Weapon replaced");
        }
        Ok(character)
    }

    /// Learn a skill from the catalog.
    pub async fn learn_skill(
        &self,
        owner: UserId,
        id: CharacterId,
        skill_id: SkillId,
    ) -> Result<Character, CharacterError> {
        let mut character = self.get(owner, id).await?;
        let skill = self
            .skills
            .get(skill_id)
            .await?
            .ok_or(CharacterError::SkillNotFound(skill_id))?;

        character.learn(skill, self.clock.now())?;
        self.characters
            .learn_skill(id, skill_id)
            .await
            .map_err(|e| not_found_as(id, e))?;
        Ok(character)
    }

    /// The shared skill catalog.
    pub async fn list_skills(&self) -> Result<Vec<Skill>, CharacterError> {
        Ok(self.skills.list().await?)
    }
}

/// The character can vanish between the read and the write.
fn not_found_as(id: CharacterId, e: RepoError) -> CharacterError {
    match e {
        RepoError::NotFound { .. } => CharacterError::NotFound(id),
        other => CharacterError::Repo(other),
    }
}
