//! Attack, heal, and status resolution.
//!
//! Pure functions: they take stat snapshots and pre-drawn rolls, and return
//! results without touching battle state. The engine owns applying the
//! outcome. Rolled results are final; they are never re-rolled.

use arrayvec::ArrayVec;

use crate::ability::{Ability, EffectKind};
use crate::config::BattleConfig;
use crate::state::StatusKey;

use super::damage::{ability_damage, basic_attack_damage};
use super::hit::{HitProfile, crit_chance, miss_chance};
use super::stats::EffectiveStats;

/// Outcome of a strike attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Strike missed; zero damage.
    Miss,
    Hit,
    Critical,
}

/// Result of strike resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// Damage dealt (`None` on a miss).
    pub damage: Option<u32>,
}

/// Pre-drawn rolls for one strike. Miss and crit rolls are in 1..=1000,
/// variance in -1..=1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackRolls {
    pub miss: u32,
    pub variance: i32,
    pub crit: u32,
}

/// One status entry produced by a buff or debuff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDelta {
    pub key: StatusKey,
    pub turns: u8,
    pub delta: i32,
}

/// Resolves a basic attack: miss check, then damage with variance and crit.
pub fn resolve_basic_attack(
    attacker: &EffectiveStats,
    target: &EffectiveStats,
    profile: &HitProfile,
    rolls: AttackRolls,
) -> AttackResult {
    let miss = miss_chance(profile, attacker.speed, target.speed);
    if rolls.miss <= miss {
        return AttackResult {
            outcome: AttackOutcome::Miss,
            damage: None,
        };
    }

    let critical = rolls.crit <= crit_chance(profile, attacker.speed);
    let damage = basic_attack_damage(attacker, target, rolls.variance, critical);

    AttackResult {
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
        damage: Some(damage),
    }
}

/// Resolves an attack or magic-attack ability.
///
/// Abilities that declare explicit miss/crit chances use them; otherwise the
/// basic-attack formula applies. The stat bonus is magic for magic attacks,
/// attack for physical ones.
pub fn resolve_ability_strike(
    ability: &Ability,
    attacker: &EffectiveStats,
    target: &EffectiveStats,
    profile: &HitProfile,
    rolls: AttackRolls,
) -> AttackResult {
    debug_assert!(matches!(
        ability.effect,
        EffectKind::Attack | EffectKind::MagicAttack
    ));

    let miss = ability
        .miss_permille
        .unwrap_or_else(|| miss_chance(profile, attacker.speed, target.speed));
    if rolls.miss <= miss {
        return AttackResult {
            outcome: AttackOutcome::Miss,
            damage: None,
        };
    }

    let crit = ability
        .crit_permille
        .unwrap_or_else(|| crit_chance(profile, attacker.speed));
    let critical = rolls.crit <= crit;

    let stat_bonus = match ability.effect {
        EffectKind::MagicAttack => attacker.magic,
        _ => attacker.attack,
    };
    let damage = ability_damage(ability.power, stat_bonus, target.defense, critical);

    AttackResult {
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
        damage: Some(damage),
    }
}

/// New health after a heal: `min(max_health, health + power)`.
pub fn resolve_heal(ability: &Ability, health: u32, max_health: u32) -> u32 {
    (health + ability.power).min(max_health)
}

/// Status entries an ability writes onto its recipient: one per declared
/// stat, keyed by `(ability, stat)`, value negated for debuffs.
pub fn status_deltas(
    ability: &Ability,
    is_debuff: bool,
) -> ArrayVec<StatusDelta, { BattleConfig::MAX_MODIFIER_STATS }> {
    let mut deltas = ArrayVec::new();
    let Some(modifier) = &ability.modifier else {
        return deltas;
    };

    let value = if is_debuff {
        -modifier.magnitude
    } else {
        modifier.magnitude
    };

    for &stat in &modifier.stats {
        deltas.push(StatusDelta {
            key: StatusKey {
                ability: ability.id,
                stat,
            },
            turns: modifier.duration_turns,
            delta: value,
        });
    }
    deltas
}
