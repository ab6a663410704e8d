//! Fight resolution.
//!
//! Two shapes are supported:
//! - [`resolve_exchange`]: a single blow, usable on its own.
//! - [`Fight`]: an elimination fight among two or more combatants, driven
//!   round by round until one survivor remains.
//!
//! # State machine
//!
//! ```text
//! Pending ──play_round──> InProgress ──(one survivor | round bound)──> Concluded
//! ```
//!
//! `Concluded` is the only terminal state. An error aborts the resolution;
//! the fight value is dropped and nothing is reported.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::action::AttackKind;
use super::combatant::Combatant;
use super::damage::compute_damage;
use super::error::CombatError;
use super::result::{ActionUsed, AttackResult, FightResult, Standing};
use crate::error::DomainError;
use crate::ids::SkillId;

/// Safety bound on rounds. Minimum damage guarantees termination long before
/// this for any realistic hit points.
pub const DEFAULT_MAX_ROUNDS: u32 = 1000;

// =============================================================================
// Policies
// =============================================================================

/// How an acting combatant picks its opponent in a full fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Cycle through the still-living opponents in turn order, starting with
    /// the one right after the attacker.
    #[default]
    RoundRobin,
    /// Pick a living opponent uniformly at random.
    Random,
}

/// What an acting combatant does in a full fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPolicy {
    /// Always swing the equipped weapon.
    #[default]
    Weapon,
    /// Weapon, then each usable learned skill in turn, then weapon again.
    Alternate,
    /// Coin flip between the weapon and a random usable learned skill.
    Random,
}

impl fmt::Display for TargetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin => f.write_str("round_robin"),
            Self::Random => f.write_str("random"),
        }
    }
}

impl FromStr for TargetPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "random" => Ok(Self::Random),
            other => Err(DomainError::parse(format!("Unknown target policy: {}", other))),
        }
    }
}

impl fmt::Display for ActionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => f.write_str("weapon"),
            Self::Alternate => f.write_str("alternate"),
            Self::Random => f.write_str("random"),
        }
    }
}

impl FromStr for ActionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => Ok(Self::Weapon),
            "alternate" => Ok(Self::Alternate),
            "random" => Ok(Self::Random),
            other => Err(DomainError::parse(format!("Unknown action policy: {}", other))),
        }
    }
}

/// Tunables for full fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightConfig {
    pub max_rounds: u32,
    pub target_policy: TargetPolicy,
    pub action_policy: ActionPolicy,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            target_policy: TargetPolicy::default(),
            action_policy: ActionPolicy::default(),
        }
    }
}

// =============================================================================
// Single exchange
// =============================================================================

/// Resolve one blow of `attacker` against `defender`.
///
/// The defender's hit points are reduced (never below zero). Nothing else is
/// touched.
///
/// # Errors
///
/// - `SelfTarget` if both are the same character
/// - `CombatantDefeated` if the attacker has no hit points left
/// - any error from [`compute_damage`]
pub fn resolve_exchange<R>(
    attacker: &Combatant,
    defender: &mut Combatant,
    kind: AttackKind,
    roll: &mut R,
) -> Result<AttackResult, CombatError>
where
    R: FnMut(u32, u32) -> u32,
{
    if attacker.id() == defender.id() {
        return Err(CombatError::SelfTarget(attacker.id()));
    }
    if !attacker.is_alive() {
        return Err(CombatError::CombatantDefeated(attacker.id()));
    }

    let damage = compute_damage(attacker, &kind, defender, roll)?;
    let remaining = defender.take_damage(damage);

    Ok(AttackResult {
        attacker_id: attacker.id(),
        attacker_name: attacker.name().to_string(),
        defender_id: defender.id(),
        defender_name: defender.name().to_string(),
        action: action_used(attacker, kind),
        damage,
        attacker_hit_points: attacker.hit_points(),
        defender_hit_points: remaining,
    })
}

fn action_used(attacker: &Combatant, kind: AttackKind) -> ActionUsed {
    match kind {
        AttackKind::Weapon => ActionUsed::Weapon {
            name: attacker.weapon().map(|w| w.name.to_string()),
        },
        AttackKind::Skill { skill_id } => ActionUsed::Skill {
            skill_id,
            name: attacker
                .learned_skill(skill_id)
                .map(|s| s.name.to_string())
                .unwrap_or_default(),
        },
    }
}

// =============================================================================
// Full fight
// =============================================================================

/// Lifecycle of a [`Fight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightState {
    /// Participants loaded, no blow struck yet.
    Pending,
    /// At least one blow struck, two or more combatants still standing.
    InProgress,
    /// One survivor left, or the round bound was reached.
    Concluded,
}

/// An elimination fight among two or more combatants.
///
/// Turn order is the participant order given to [`Fight::new`] and never
/// changes. Every living combatant acts exactly once per round.
#[derive(Debug, Clone)]
pub struct Fight {
    combatants: Vec<Combatant>,
    config: FightConfig,
    state: FightState,
    rounds: u32,
    log: Vec<AttackResult>,
    /// Index of the last opponent each combatant attacked.
    target_cursors: Vec<usize>,
    /// Number of actions each combatant has chosen, for `ActionPolicy::Alternate`.
    action_cursors: Vec<usize>,
}

impl Fight {
    /// Set up a fight in the `Pending` state.
    ///
    /// Repeated ids keep their first position. Participants that are already
    /// defeated do not take part.
    ///
    /// # Errors
    ///
    /// `InsufficientParticipants` if fewer than two living combatants remain.
    pub fn new(participants: Vec<Combatant>, config: FightConfig) -> Result<Self, CombatError> {
        let mut seen = HashSet::new();
        let combatants: Vec<Combatant> = participants
            .into_iter()
            .filter(|c| seen.insert(c.id()))
            .filter(Combatant::is_alive)
            .collect();

        if combatants.len() < 2 {
            return Err(CombatError::InsufficientParticipants {
                living: combatants.len(),
            });
        }

        let count = combatants.len();
        Ok(Self {
            combatants,
            config,
            state: FightState::Pending,
            rounds: 0,
            log: Vec::new(),
            target_cursors: (0..count).collect(),
            action_cursors: vec![0; count],
        })
    }

    pub fn state(&self) -> FightState {
        self.state
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn log(&self) -> &[AttackResult] {
        &self.log
    }

    /// Participants in turn order with their current hit points.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// Play one round and return the state afterwards.
    ///
    /// The round stops early as soon as a single survivor remains. Calling
    /// this on a concluded fight does nothing.
    pub fn play_round<R>(&mut self, roll: &mut R) -> Result<FightState, CombatError>
    where
        R: FnMut(u32, u32) -> u32,
    {
        if self.state == FightState::Concluded {
            return Ok(self.state);
        }

        self.rounds += 1;
        self.state = FightState::InProgress;

        for attacker in 0..self.combatants.len() {
            if !self.combatants[attacker].is_alive() {
                continue;
            }
            let Some(target) = self.pick_target(attacker, roll) else {
                break;
            };
            let kind = self.pick_action(attacker, roll);

            let (attacking, defending) = pair_mut(&mut self.combatants, attacker, target);
            let result = resolve_exchange(attacking, defending, kind, roll)?;
            self.log.push(result);

            if self.living_count() <= 1 {
                self.state = FightState::Concluded;
                return Ok(self.state);
            }
        }

        if self.rounds >= self.config.max_rounds.max(1) {
            self.state = FightState::Concluded;
        }
        Ok(self.state)
    }

    /// Play rounds until the fight concludes.
    pub fn run<R>(mut self, roll: &mut R) -> Result<FightResult, CombatError>
    where
        R: FnMut(u32, u32) -> u32,
    {
        while self.play_round(roll)? != FightState::Concluded {}
        Ok(self.into_result())
    }

    /// Summarize a fight. The winner is the sole survivor, or when the round
    /// bound ended the fight, the combatant with the most hit points left
    /// (earlier in turn order on a tie).
    pub fn into_result(self) -> FightResult {
        let winner = self.leader();
        let round_limit_reached = self.living_count() > 1;

        let standings = self
            .combatants
            .iter()
            .map(|c| Standing {
                character_id: c.id(),
                name: c.name().to_string(),
                hit_points: c.hit_points(),
            })
            .collect();
        let losers = self
            .combatants
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != winner)
            .map(|(_, c)| c.id())
            .collect();

        FightResult {
            log: self.log,
            rounds: self.rounds,
            winner: self.combatants[winner].id(),
            losers,
            standings,
            round_limit_reached,
        }
    }

    fn living_count(&self) -> usize {
        self.combatants.iter().filter(|c| c.is_alive()).count()
    }

    fn leader(&self) -> usize {
        let mut best = 0;
        for (i, c) in self.combatants.iter().enumerate().skip(1) {
            if c.hit_points() > self.combatants[best].hit_points() {
                best = i;
            }
        }
        best
    }

    fn pick_target<R>(&mut self, attacker: usize, roll: &mut R) -> Option<usize>
    where
        R: FnMut(u32, u32) -> u32,
    {
        let count = self.combatants.len();
        let opponents = |j: &usize| *j != attacker && self.combatants[*j].is_alive();

        match self.config.target_policy {
            TargetPolicy::RoundRobin => {
                let last = self.target_cursors[attacker];
                let target = (1..=count).map(|step| (last + step) % count).find(opponents)?;
                self.target_cursors[attacker] = target;
                Some(target)
            }
            TargetPolicy::Random => {
                let living: Vec<usize> = (0..count).filter(opponents).collect();
                pick(&living, roll)
            }
        }
    }

    fn pick_action<R>(&mut self, attacker: usize, roll: &mut R) -> AttackKind
    where
        R: FnMut(u32, u32) -> u32,
    {
        let usable: Vec<SkillId> = self.combatants[attacker]
            .usable_skills()
            .map(|s| s.id)
            .collect();

        let skill = match self.config.action_policy {
            ActionPolicy::Weapon => None,
            ActionPolicy::Alternate => {
                let slot = self.action_cursors[attacker] % (usable.len() + 1);
                self.action_cursors[attacker] += 1;
                slot.checked_sub(1).and_then(|i| usable.get(i).copied())
            }
            ActionPolicy::Random => {
                if usable.is_empty() || roll(0, 1) == 0 {
                    None
                } else {
                    pick(&usable, roll)
                }
            }
        };

        skill.map_or(AttackKind::Weapon, |skill_id| AttackKind::Skill { skill_id })
    }
}

/// Uniform choice from `items` using the roller.
fn pick<T: Copy, R>(items: &[T], roll: &mut R) -> Option<T>
where
    R: FnMut(u32, u32) -> u32,
{
    let last = u32::try_from(items.len().checked_sub(1)?).unwrap_or(u32::MAX);
    let index = roll(0, last).min(last) as usize;
    items.get(index).copied()
}

/// Shared access to one element and exclusive access to another.
fn pair_mut<T>(items: &mut [T], shared: usize, exclusive: usize) -> (&T, &mut T) {
    debug_assert_ne!(shared, exclusive);
    if shared < exclusive {
        let (left, right) = items.split_at_mut(exclusive);
        (&left[shared], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(shared);
        (&right[0], &mut left[exclusive])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Skill, Weapon};
    use crate::ids::{CharacterId, UserId};
    use crate::value_objects::{CombatStats, ItemName, RpgClass};
    use uuid::Uuid;

    fn combatant(n: u128, name: &str, stats: CombatStats) -> Combatant {
        Combatant::new(
            CharacterId::from_uuid(Uuid::from_u128(n)),
            UserId::new(),
            name,
            stats,
            RpgClass::Knight,
        )
    }

    fn weapon(damage: u32) -> Weapon {
        Weapon::new(ItemName::new("Axe").unwrap(), damage)
    }

    fn skill(name: &str, damage: u32) -> Skill {
        Skill::new(ItemName::new(name).unwrap(), damage)
    }

    fn lowest(min: u32, _max: u32) -> u32 {
        min
    }

    /// Every hit deals exactly one damage.
    fn pillow(n: u128, name: &str, hp: u32) -> Combatant {
        combatant(n, name, CombatStats::new(hp, 0, 0, 0))
    }

    mod exchange {
        use super::*;

        #[test]
        fn example_weapon_blow_stays_within_bounds() {
            let a = combatant(1, "A", CombatStats::new(10, 10, 0, 0)).with_weapon(weapon(5));
            let mut roll = |min: u32, max: u32| (min + max) / 2;
            let mut b = combatant(2, "B", CombatStats::new(10, 0, 3, 0));

            let result = resolve_exchange(&a, &mut b, AttackKind::Weapon, &mut roll).unwrap();

            assert!((3..=12).contains(&result.damage));
            assert_eq!(result.defender_hit_points, 10u32.saturating_sub(result.damage));
            assert_eq!(result.attacker_victorious(), result.damage >= 10);
            assert_eq!(b.hit_points(), result.defender_hit_points);
            assert_eq!(result.action.label(), "Axe");
        }

        #[test]
        fn hit_points_never_go_negative() {
            let a = combatant(1, "A", CombatStats::new(10, 10, 0, 0)).with_weapon(weapon(500));
            let mut b = pillow(2, "B", 4);

            let result = resolve_exchange(&a, &mut b, AttackKind::Weapon, &mut lowest).unwrap();

            assert_eq!(result.defender_hit_points, 0);
            assert!(result.attacker_victorious());
        }

        #[test]
        fn defeated_attacker_cannot_act() {
            let a = pillow(1, "A", 0);
            let mut b = pillow(2, "B", 4);
            assert_eq!(
                resolve_exchange(&a, &mut b, AttackKind::Weapon, &mut lowest),
                Err(CombatError::CombatantDefeated(a.id()))
            );
            assert_eq!(b.hit_points(), 4);
        }

        #[test]
        fn attacking_yourself_is_rejected() {
            let a = pillow(1, "A", 4);
            let mut same = a.clone();
            assert!(matches!(
                resolve_exchange(&a, &mut same, AttackKind::Weapon, &mut lowest),
                Err(CombatError::SelfTarget(_))
            ));
        }

        #[test]
        fn unlearned_skill_leaves_defender_untouched() {
            let a = pillow(1, "A", 4);
            let mut b = pillow(2, "B", 4);
            let kind = AttackKind::Skill {
                skill_id: SkillId::new(),
            };
            assert!(matches!(
                resolve_exchange(&a, &mut b, kind, &mut lowest),
                Err(CombatError::SkillNotLearned { .. })
            ));
            assert_eq!(b.hit_points(), 4);
        }

        #[test]
        fn skill_blow_records_skill_name() {
            let fireball = skill("Fireball", 30);
            let a = pillow(1, "A", 4).with_skills(vec![fireball.clone()]);
            let mut b = pillow(2, "B", 100);
            let kind = AttackKind::Skill {
                skill_id: fireball.id,
            };

            let result = resolve_exchange(&a, &mut b, kind, &mut lowest).unwrap();

            assert_eq!(result.damage, 30);
            assert_eq!(
                result.action,
                ActionUsed::Skill {
                    skill_id: fireball.id,
                    name: "Fireball".into()
                }
            );
        }
    }

    mod setup {
        use super::*;

        #[test]
        fn one_participant_is_not_enough() {
            let err = Fight::new(vec![pillow(1, "A", 5)], FightConfig::default()).unwrap_err();
            assert_eq!(err, CombatError::InsufficientParticipants { living: 1 });
        }

        #[test]
        fn defeated_participants_do_not_count() {
            let err = Fight::new(
                vec![pillow(1, "A", 5), pillow(2, "B", 0)],
                FightConfig::default(),
            )
            .unwrap_err();
            assert_eq!(err, CombatError::InsufficientParticipants { living: 1 });
        }

        #[test]
        fn repeated_ids_collapse_to_first_position() {
            let a = pillow(1, "A", 5);
            let b = pillow(2, "B", 5);
            let fight = Fight::new(vec![a.clone(), b, a], FightConfig::default()).unwrap();
            assert_eq!(fight.combatants().len(), 2);
            assert_eq!(fight.combatants()[0].name(), "A");
        }

        #[test]
        fn same_character_twice_is_insufficient() {
            let a = pillow(1, "A", 5);
            assert!(matches!(
                Fight::new(vec![a.clone(), a], FightConfig::default()),
                Err(CombatError::InsufficientParticipants { living: 1 })
            ));
        }
    }

    mod full_fight {
        use super::*;

        #[test]
        fn state_moves_from_pending_through_in_progress_to_concluded() {
            let mut fight = Fight::new(
                vec![pillow(1, "A", 3), pillow(2, "B", 2)],
                FightConfig::default(),
            )
            .unwrap();
            assert_eq!(fight.state(), FightState::Pending);

            assert_eq!(fight.play_round(&mut lowest).unwrap(), FightState::InProgress);
            assert_eq!(fight.play_round(&mut lowest).unwrap(), FightState::Concluded);
            assert_eq!(fight.play_round(&mut lowest).unwrap(), FightState::Concluded);
            assert_eq!(fight.rounds(), 2);
        }

        #[test]
        fn overwhelming_attacker_wins_in_one_blow() {
            let a = combatant(1, "A", CombatStats::new(10, 1, 0, 0)).with_weapon(weapon(50));
            let b = pillow(2, "B", 10);
            let result = Fight::new(vec![a.clone(), b.clone()], FightConfig::default())
                .unwrap()
                .run(&mut lowest)
                .unwrap();

            assert_eq!(result.winner, a.id());
            assert_eq!(result.losers, vec![b.id()]);
            assert_eq!(result.log.len(), 1);
            assert_eq!(result.rounds, 1);
            assert!(!result.round_limit_reached);
            assert!(result.log[0].attacker_victorious());
        }

        #[test]
        fn log_follows_turn_order_and_is_chronological() {
            let result = Fight::new(
                vec![pillow(1, "A", 3), pillow(2, "B", 3)],
                FightConfig::default(),
            )
            .unwrap()
            .run(&mut lowest)
            .unwrap();

            let attackers: Vec<&str> =
                result.log.iter().map(|r| r.attacker_name.as_str()).collect();
            assert_eq!(attackers, vec!["A", "B", "A", "B", "A"]);
            let b_hp: Vec<u32> = result
                .log
                .iter()
                .filter(|r| r.defender_name == "B")
                .map(|r| r.defender_hit_points)
                .collect();
            assert_eq!(b_hp, vec![2, 1, 0]);
            assert_eq!(result.standing(result.winner).unwrap().hit_points, 1);
        }

        #[test]
        fn round_robin_cycles_through_living_opponents() {
            let result = Fight::new(
                vec![pillow(1, "A", 100), pillow(2, "B", 100), pillow(3, "C", 100)],
                FightConfig {
                    max_rounds: 2,
                    ..FightConfig::default()
                },
            )
            .unwrap()
            .run(&mut lowest)
            .unwrap();

            let pairs: Vec<(&str, &str)> = result
                .log
                .iter()
                .map(|r| (r.attacker_name.as_str(), r.defender_name.as_str()))
                .collect();
            assert_eq!(
                pairs,
                vec![
                    ("A", "B"),
                    ("B", "C"),
                    ("C", "A"),
                    ("A", "C"),
                    ("B", "A"),
                    ("C", "B"),
                ]
            );
        }

        #[test]
        fn round_robin_skips_eliminated_opponents() {
            let result = Fight::new(
                vec![pillow(1, "A", 10), pillow(2, "B", 1), pillow(3, "C", 10)],
                FightConfig {
                    max_rounds: 2,
                    ..FightConfig::default()
                },
            )
            .unwrap()
            .run(&mut lowest)
            .unwrap();

            // A knocks out B first, so B never acts and A turns to C next.
            let pairs: Vec<(&str, &str)> = result
                .log
                .iter()
                .map(|r| (r.attacker_name.as_str(), r.defender_name.as_str()))
                .collect();
            assert_eq!(pairs, vec![("A", "B"), ("C", "A"), ("A", "C"), ("C", "A")]);
        }

        #[test]
        fn multi_party_fight_has_one_winner_and_n_minus_one_losers() {
            let participants: Vec<Combatant> = (1..=5)
                .map(|n| {
                    combatant(n, &format!("P{n}"), CombatStats::new(20 + n as u32, 5, 2, 5))
                        .with_weapon(weapon(3))
                })
                .collect();
            let mut state = 7u32;
            let mut roll = |min: u32, max: u32| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                min + state % (max - min + 1)
            };

            let result = Fight::new(participants.clone(), FightConfig::default())
                .unwrap()
                .run(&mut roll)
                .unwrap();

            assert_eq!(result.losers.len(), 4);
            let mut everyone: Vec<_> = result.participants().collect();
            everyone.sort();
            let mut expected: Vec<_> = participants.iter().map(|c| c.id()).collect();
            expected.sort();
            assert_eq!(everyone, expected);
            assert!(!result.round_limit_reached);
            let survivors = result.standings.iter().filter(|s| s.hit_points > 0).count();
            assert_eq!(survivors, 1);
            assert!(result.standing(result.winner).unwrap().hit_points > 0);
        }

        #[test]
        fn round_bound_picks_healthiest_survivor() {
            let result = Fight::new(
                vec![pillow(1, "A", 1_000), pillow(2, "B", 2_000)],
                FightConfig {
                    max_rounds: 3,
                    ..FightConfig::default()
                },
            )
            .unwrap()
            .run(&mut lowest)
            .unwrap();

            assert!(result.round_limit_reached);
            assert_eq!(result.rounds, 3);
            assert_eq!(result.log.len(), 6);
            assert_eq!(result.standing(result.winner).unwrap().name, "B");
        }

        #[test]
        fn round_bound_tie_goes_to_earlier_turn() {
            let result = Fight::new(
                vec![pillow(1, "A", 50), pillow(2, "B", 50)],
                FightConfig {
                    max_rounds: 1,
                    ..FightConfig::default()
                },
            )
            .unwrap()
            .run(&mut lowest)
            .unwrap();

            assert_eq!(result.standing(result.winner).unwrap().name, "A");
        }

        #[test]
        fn impenetrable_defence_still_terminates() {
            let tank = |n: u128, name: &str| combatant(n, name, CombatStats::new(30, 1, u32::MAX, 1));
            let result = Fight::new(vec![tank(1, "A"), tank(2, "B")], FightConfig::default())
                .unwrap()
                .run(&mut lowest)
                .unwrap();

            assert!(!result.round_limit_reached);
            assert_eq!(result.log.len(), 59);
            assert_eq!(result.standing(result.winner).unwrap().name, "A");
        }
    }

    mod policies {
        use super::*;

        #[test]
        fn alternate_cycles_weapon_then_usable_skills() {
            let frenzy = skill("Frenzy", 0);
            let fireball = skill("Fireball", 0).with_required_class(RpgClass::Mage);
            let a = pillow(1, "A", 100).with_skills(vec![frenzy.clone(), fireball]);
            let b = pillow(2, "B", 100);

            let result = Fight::new(
                vec![a, b],
                FightConfig {
                    max_rounds: 3,
                    action_policy: ActionPolicy::Alternate,
                    ..FightConfig::default()
                },
            )
            .unwrap()
            .run(&mut lowest)
            .unwrap();

            let used: Vec<&str> = result
                .log
                .iter()
                .filter(|r| r.attacker_name == "A")
                .map(|r| r.action.label())
                .collect();
            assert_eq!(used, vec!["bare hands", "Frenzy", "bare hands"]);
        }

        #[test]
        fn random_target_uses_roller_index() {
            let mut highest = |_: u32, max: u32| max;
            let result = Fight::new(
                vec![pillow(1, "A", 100), pillow(2, "B", 100), pillow(3, "C", 100)],
                FightConfig {
                    max_rounds: 1,
                    target_policy: TargetPolicy::Random,
                    ..FightConfig::default()
                },
            )
            .unwrap()
            .run(&mut highest)
            .unwrap();

            let pairs: Vec<(&str, &str)> = result
                .log
                .iter()
                .map(|r| (r.attacker_name.as_str(), r.defender_name.as_str()))
                .collect();
            assert_eq!(pairs, vec![("A", "C"), ("B", "C"), ("C", "B")]);
        }

        #[test]
        fn random_action_falls_back_to_weapon_without_skills() {
            let mut highest = |_: u32, max: u32| max;
            let result = Fight::new(
                vec![pillow(1, "A", 1), pillow(2, "B", 1)],
                FightConfig {
                    action_policy: ActionPolicy::Random,
                    ..FightConfig::default()
                },
            )
            .unwrap()
            .run(&mut highest)
            .unwrap();

            assert_eq!(result.log[0].action, ActionUsed::Weapon { name: None });
        }

        #[test]
        fn policies_parse_from_config_strings() {
            assert_eq!("round-robin".parse::<TargetPolicy>().unwrap(), TargetPolicy::RoundRobin);
            assert_eq!("RANDOM".parse::<TargetPolicy>().unwrap(), TargetPolicy::Random);
            assert_eq!("alternate".parse::<ActionPolicy>().unwrap(), ActionPolicy::Alternate);
            assert!("berserk".parse::<ActionPolicy>().is_err());
            for policy in [ActionPolicy::Weapon, ActionPolicy::Alternate, ActionPolicy::Random] {
                assert_eq!(policy.to_string().parse::<ActionPolicy>().unwrap(), policy);
            }
        }
    }
}
