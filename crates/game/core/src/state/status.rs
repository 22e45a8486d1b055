//! Timed status effects on combatants.
//!
//! Each entry is keyed by the ability that applied it plus the stat it
//! modifies, so a buff that touches two stats writes two entries and
//! re-casting the same buff refreshes its own entries instead of stacking.

use arrayvec::ArrayVec;

use crate::ability::{AbilityId, StatKind};
use crate::config::BattleConfig;

/// Key identifying one status entry: source ability and affected stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusKey {
    pub ability: AbilityId,
    pub stat: StatKind,
}

/// A single timed stat modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub key: StatusKey,
    /// Upkeep ticks left before the entry is dropped.
    pub turns_remaining: u8,
    /// Signed stat delta (negative for debuffs).
    pub delta: i32,
}

/// Active status effects on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Writes a status entry. An existing entry with the same key is
    /// replaced (re-applying a buff refreshes duration and value).
    pub fn apply(&mut self, key: StatusKey, turns_remaining: u8, delta: i32) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.key == key) {
            existing.turns_remaining = turns_remaining;
            existing.delta = delta;
            return;
        }

        if !self.effects.is_full() {
            self.effects.push(StatusEffect {
                key,
                turns_remaining,
                delta,
            });
        }
    }

    /// Sum of all active deltas for one stat.
    pub fn delta_for(&self, stat: StatKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.key.stat == stat)
            .map(|e| e.delta)
            .sum()
    }

    /// Decrements every entry by one turn and drops entries reaching zero.
    pub fn tick(&mut self) {
        for effect in self.effects.iter_mut() {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
        }
        self.effects.retain(|e| e.turns_remaining > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
