//! Immutable ability definitions.
//!
//! Abilities are static data attached to a combatant's equipped parts. They
//! never live inside battle state; only cooldown *instances* do. The engine
//! resolves an [`AbilityId`] through the [`crate::env::AbilityOracle`].

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Unique identifier for an ability definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u16);

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability:{}", self.0)
    }
}

/// What an ability does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Physical strike scaled by the attacker's attack stat.
    Attack,
    /// Magical strike scaled by the attacker's magic stat.
    MagicAttack,
    /// Restores the caster's health.
    Heal,
    /// Timed positive stat modifiers on the caster.
    Buff,
    /// Timed negative stat modifiers on an enemy.
    Debuff,
}

impl EffectKind {
    /// Effects that cannot resolve without an enemy target id.
    pub const fn requires_target(self) -> bool {
        matches!(
            self,
            EffectKind::Attack | EffectKind::MagicAttack | EffectKind::Debuff
        )
    }

    /// Effects whose recipient is the acting combatant itself.
    pub const fn targets_self(self) -> bool {
        matches!(self, EffectKind::Heal | EffectKind::Buff)
    }
}

/// Stats a status effect can modify. Health is deliberately absent: statuses
/// never touch health directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    Magic,
}

/// Timed stat modification declared by a buff or debuff ability.
///
/// The magnitude is always declared positive; the resolver negates it when
/// the ability is a debuff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatModifier {
    /// Which stats the modifier touches (one status entry is written per stat).
    pub stats: ArrayVec<StatKind, { BattleConfig::MAX_MODIFIER_STATS }>,
    /// Declared magnitude of the change.
    pub magnitude: i32,
    /// How many upkeep ticks the entries last.
    pub duration_turns: u8,
}

/// Immutable ability definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ability {
    pub id: AbilityId,
    pub name: &'static str,
    pub effect: EffectKind,
    /// Base damage for strikes, heal amount for heals, unused for pure
    /// buffs/debuffs.
    pub power: u32,
    /// Stat modifier payload for buffs/debuffs (and hybrid strikes).
    pub modifier: Option<StatModifier>,
    /// Turns the ability stays on cooldown after use.
    pub cooldown_turns: u8,
    pub mana_cost: u32,
    /// Override miss chance in per-mille; `None` falls back to the basic
    /// attack formula.
    pub miss_permille: Option<u32>,
    /// Override crit chance in per-mille; `None` falls back to the basic
    /// attack formula.
    pub crit_permille: Option<u32>,
}

impl Ability {
    /// Minimal definition: free, no cooldown, no modifier payload. Builders
    /// below layer on costs and chances.
    pub fn new(id: AbilityId, name: &'static str, effect: EffectKind, power: u32) -> Self {
        Self {
            id,
            name,
            effect,
            power,
            modifier: None,
            cooldown_turns: 0,
            mana_cost: 0,
            miss_permille: None,
            crit_permille: None,
        }
    }

    pub fn with_cost(mut self, mana_cost: u32, cooldown_turns: u8) -> Self {
        self.mana_cost = mana_cost;
        self.cooldown_turns = cooldown_turns;
        self
    }

    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn with_chances(mut self, miss_permille: u32, crit_permille: u32) -> Self {
        self.miss_permille = Some(miss_permille);
        self.crit_permille = Some(crit_permille);
        self
    }
}
