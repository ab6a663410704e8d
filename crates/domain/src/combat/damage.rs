//! Damage calculation.
//!
//! Pure functions: neither combatant is mutated and the only source of
//! variance is the injected roller, so a scripted roller gives exact results.
//!
//! ```text
//! weapon: weapon.damage + roll(1..=strength)     - defender.defence, at least 1
//! skill:  skill.damage  + roll(1..=intelligence) - defender.defence, at least 1
//! ```

use super::action::AttackKind;
use super::combatant::Combatant;
use super::error::CombatError;

/// Every hit lands for at least this much, so fights always make progress.
pub const MIN_DAMAGE: u32 = 1;

/// Damage `attacker` deals to `defender` with `kind`.
///
/// `roll(min, max)` must return a uniformly drawn value in `min..=max`;
/// out-of-range values are clamped into the range.
///
/// # Errors
///
/// - `SkillNotLearned` if the skill is not in the attacker's learned set
/// - `SkillClassMismatch` if the attacker's class cannot cast the skill
pub fn compute_damage<R>(
    attacker: &Combatant,
    kind: &AttackKind,
    defender: &Combatant,
    roll: &mut R,
) -> Result<u32, CombatError>
where
    R: FnMut(u32, u32) -> u32,
{
    let (base, scaling) = match kind {
        AttackKind::Weapon => (
            attacker.weapon().map_or(0, |w| w.damage),
            attacker.stats().strength(),
        ),
        AttackKind::Skill { skill_id } => {
            let skill = attacker
                .learned_skill(*skill_id)
                .ok_or(CombatError::SkillNotLearned {
                    attacker: attacker.id(),
                    skill_id: *skill_id,
                })?;
            if !skill.usable_by(attacker.class()) {
                return Err(CombatError::SkillClassMismatch {
                    attacker: attacker.id(),
                    skill_id: *skill_id,
                });
            }
            (skill.damage, attacker.stats().intelligence())
        }
    };

    let raw = base.saturating_add(bonus(scaling, roll));
    Ok(raw
        .saturating_sub(defender.stats().defence())
        .max(MIN_DAMAGE))
}

/// Random bonus in `1..=scaling`, or nothing when the attribute is zero.
fn bonus<R>(scaling: u32, roll: &mut R) -> u32
where
    R: FnMut(u32, u32) -> u32,
{
    if scaling == 0 {
        return 0;
    }
    roll(1, scaling).clamp(1, scaling)
}
