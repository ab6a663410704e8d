//! Request and response shapes for the HTTP API.
//!
//! Responses are built from domain results here and nowhere else; this is
//! where fight results are rendered into the human readable log.

use arena_domain::{
    AttackResult, Character, CharacterId, CombatStats, FightResult, HighscoreEntry, RpgClass,
    Skill, SkillId, Standing,
};
use serde::{Deserialize, Serialize};

use crate::use_cases::character::{CreateCharacterInput, UpdateCharacterInput};

// =============================================================================
// Fight requests
// =============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponAttackRequest {
    pub attacker_id: CharacterId,
    pub opponent_id: CharacterId,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAttackRequest {
    pub attacker_id: CharacterId,
    pub opponent_id: CharacterId,
    pub skill_id: SkillId,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FightRequest {
    pub character_ids: Vec<CharacterId>,
}

// =============================================================================
// Fight responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResultDto {
    pub attacker_id: CharacterId,
    pub attacker: String,
    pub opponent_id: CharacterId,
    pub opponent: String,
    /// Weapon or skill name, `bare hands` when unarmed.
    pub action: String,
    pub damage: u32,
    #[serde(rename = "attackerHP")]
    pub attacker_hp: u32,
    #[serde(rename = "opponentHP")]
    pub opponent_hp: u32,
    pub attacker_victorious: bool,
}

impl From<&AttackResult> for AttackResultDto {
    fn from(r: &AttackResult) -> Self {
        Self {
            attacker_id: r.attacker_id,
            attacker: r.attacker_name.clone(),
            opponent_id: r.defender_id,
            opponent: r.defender_name.clone(),
            action: r.action.label().to_string(),
            damage: r.damage,
            attacker_hp: r.attacker_hit_points,
            opponent_hp: r.defender_hit_points,
            attacker_victorious: r.attacker_victorious(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightResultDto {
    /// One line per blow, a line per knockout and a closing line.
    pub log: Vec<String>,
    pub attacks: Vec<AttackResultDto>,
    pub winner_id: CharacterId,
    pub winner: String,
    pub loser_ids: Vec<CharacterId>,
    pub rounds: u32,
    pub round_limit_reached: bool,
    pub standings: Vec<Standing>,
}

impl From<&FightResult> for FightResultDto {
    fn from(result: &FightResult) -> Self {
        let winner = result.standing(result.winner);
        let winner_name = winner.map(|s| s.name.clone()).unwrap_or_default();

        let mut log = Vec::with_capacity(result.log.len() + 1);
        for blow in &result.log {
            log.push(describe_blow(blow));
            if blow.attacker_victorious() {
                log.push(format!("{} has been defeated!", blow.defender_name));
            }
        }
        let closing = format!(
            "{} wins with {} HP left!",
            winner_name,
            winner.map_or(0, |s| s.hit_points)
        );
        if result.round_limit_reached {
            log.push(format!(
                "Round limit reached after {} rounds. {}",
                result.rounds, closing
            ));
        } else {
            log.push(closing);
        }

        Self {
            log,
            attacks: result.log.iter().map(AttackResultDto::from).collect(),
            winner_id: result.winner,
            winner: winner_name,
            loser_ids: result.losers.clone(),
            rounds: result.rounds,
            round_limit_reached: result.round_limit_reached,
            standings: result.standings.clone(),
        }
    }
}

/// `"Frodo attacks Sam with Sting for 7 damage (3 HP left)"`
pub fn describe_blow(blow: &AttackResult) -> String {
    format!(
        "{} attacks {} with {} for {} damage ({} HP left)",
        blow.attacker_name,
        blow.defender_name,
        blow.action.label(),
        blow.damage,
        blow.defender_hit_points
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighscoreDto {
    pub id: CharacterId,
    pub name: String,
    pub fights: u32,
    pub victories: u32,
    pub defeats: u32,
    pub rank: u32,
}

impl From<HighscoreEntry> for HighscoreDto {
    fn from(entry: HighscoreEntry) -> Self {
        Self {
            id: entry.character_id,
            name: entry.name,
            fights: entry.record.fights,
            victories: entry.record.victories,
            defeats: entry.record.defeats,
            rank: entry.rank,
        }
    }
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCharacterRequest {
    pub name: String,
    pub hit_points: Option<u32>,
    pub strength: Option<u32>,
    pub defence: Option<u32>,
    pub intelligence: Option<u32>,
    pub class: Option<RpgClass>,
}

impl From<AddCharacterRequest> for CreateCharacterInput {
    fn from(req: AddCharacterRequest) -> Self {
        let any_stat = req.hit_points.is_some()
            || req.strength.is_some()
            || req.defence.is_some()
            || req.intelligence.is_some();
        let stats = any_stat.then(|| {
            let defaults = CombatStats::default();
            CombatStats::new(
                req.hit_points.unwrap_or(defaults.hit_points()),
                req.strength.unwrap_or(defaults.strength()),
                req.defence.unwrap_or(defaults.defence()),
                req.intelligence.unwrap_or(defaults.intelligence()),
            )
        });

        Self {
            name: req.name,
            stats,
            class: req.class,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacterRequest {
    pub name: Option<String>,
    pub hit_points: Option<u32>,
    pub strength: Option<u32>,
    pub defence: Option<u32>,
    pub intelligence: Option<u32>,
    pub class: Option<RpgClass>,
}

impl From<UpdateCharacterRequest> for UpdateCharacterInput {
    fn from(req: UpdateCharacterRequest) -> Self {
        Self {
            name: req.name,
            hit_points: req.hit_points,
            strength: req.strength,
            defence: req.defence,
            intelligence: req.intelligence,
            class: req.class,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWeaponRequest {
    pub name: String,
    pub damage: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnSkillRequest {
    pub skill_id: SkillId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDto {
    pub name: String,
    pub damage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDto {
    pub id: SkillId,
    pub name: String,
    pub damage: u32,
    pub required_class: Option<RpgClass>,
}

impl From<&Skill> for SkillDto {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name.to_string(),
            damage: skill.damage,
            required_class: skill.required_class,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDto {
    pub id: CharacterId,
    pub name: String,
    pub hit_points: u32,
    pub strength: u32,
    pub defence: u32,
    pub intelligence: u32,
    pub class: RpgClass,
    pub weapon: Option<WeaponDto>,
    pub skills: Vec<SkillDto>,
    pub fights: u32,
    pub victories: u32,
    pub defeats: u32,
}

impl From<&Character> for CharacterDto {
    fn from(c: &Character) -> Self {
        let stats = c.stats();
        let record = c.record();
        Self {
            id: c.id(),
            name: c.name().to_string(),
            hit_points: stats.hit_points(),
            strength: stats.strength(),
            defence: stats.defence(),
            intelligence: stats.intelligence(),
            class: c.class(),
            weapon: c.weapon().map(|w| WeaponDto {
                name: w.name.to_string(),
                damage: w.damage,
            }),
            skills: c.skills().iter().map(SkillDto::from).collect(),
            fights: record.fights,
            victories: record.victories,
            defeats: record.defeats,
        }
    }
}
