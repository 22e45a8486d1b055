//! Combatant state: identity, stats, resources, cooldowns, statuses.

use std::fmt;

use arrayvec::ArrayVec;

use crate::ability::AbilityId;
use crate::config::BattleConfig;

use super::status::StatusEffects;

/// Unique identifier for a combatant within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which party a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn opposing(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Board position within a side. Front-line slots shield the back line from
/// being targeted while any front-line combatant survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardSlot {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl BoardSlot {
    /// Slot assignment order used when fielding a roster.
    pub const FIELDING_ORDER: [BoardSlot; 4] = [
        BoardSlot::FrontLeft,
        BoardSlot::FrontRight,
        BoardSlot::BackLeft,
        BoardSlot::BackRight,
    ];

    pub const fn is_front_line(self) -> bool {
        matches!(self, BoardSlot::FrontLeft | BoardSlot::FrontRight)
    }
}

/// Base stat block before status-effect deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub magic: i32,
    pub max_health: u32,
}

/// Active cooldown instance for one ability.
///
/// A combatant never holds two entries for the same ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownEntry {
    pub ability: AbilityId,
    pub turns_remaining: u8,
}

/// One creature instance participating in a battle.
///
/// Invariants: `0 <= health <= stats.max_health`, `0 <= mana <= MANA_CAP`,
/// `defeated` iff `health == 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub level: u32,
    pub stats: StatBlock,
    pub health: u32,
    pub mana: u32,
    pub slot: BoardSlot,
    pub abilities: ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES }>,
    cooldowns: ArrayVec<CooldownEntry, { BattleConfig::MAX_COOLDOWNS }>,
    pub statuses: StatusEffects,
    pub defeated: bool,
}

impl Combatant {
    /// Creates a combatant at full health with the given starting mana.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        level: u32,
        stats: StatBlock,
        slot: BoardSlot,
        mana: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            stats,
            health: stats.max_health,
            mana: mana.min(BattleConfig::MANA_CAP),
            slot,
            abilities: ArrayVec::new(),
            cooldowns: ArrayVec::new(),
            statuses: StatusEffects::empty(),
            defeated: false,
        }
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.stats.max_health);
        self.defeated = self.health == 0;
        self
    }

    pub fn with_abilities(mut self, abilities: &[AbilityId]) -> Self {
        self.abilities.clear();
        for id in abilities.iter().take(BattleConfig::MAX_ABILITIES) {
            self.abilities.push(*id);
        }
        self
    }

    /// Turns left on an ability's cooldown (zero if ready).
    pub fn cooldown_remaining(&self, ability: AbilityId) -> u8 {
        self.cooldowns
            .iter()
            .find(|c| c.ability == ability)
            .map(|c| c.turns_remaining)
            .unwrap_or(0)
    }

    /// Starts (or restarts) a cooldown, keeping the one-entry-per-ability
    /// invariant.
    pub fn set_cooldown(&mut self, ability: AbilityId, turns: u8) {
        if turns == 0 {
            return;
        }
        if let Some(existing) = self.cooldowns.iter_mut().find(|c| c.ability == ability) {
            existing.turns_remaining = turns;
            return;
        }
        if !self.cooldowns.is_full() {
            self.cooldowns.push(CooldownEntry {
                ability,
                turns_remaining: turns,
            });
        }
    }

    /// Decrements every cooldown by one turn, dropping entries reaching zero.
    pub fn tick_cooldowns(&mut self) {
        for entry in self.cooldowns.iter_mut() {
            entry.turns_remaining = entry.turns_remaining.saturating_sub(1);
        }
        self.cooldowns.retain(|c| c.turns_remaining > 0);
    }

    pub fn cooldowns(&self) -> impl Iterator<Item = &CooldownEntry> {
        self.cooldowns.iter()
    }

    /// Applies damage, clamping at zero and flipping `defeated` the instant
    /// health reaches zero. Returns the new health value.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.defeated = true;
        }
        self.health
    }

    /// Restores health up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.stats.max_health);
        self.health - before
    }

    /// Deducts mana. Callers must have validated the cost first.
    pub fn spend_mana(&mut self, cost: u32) {
        debug_assert!(self.mana >= cost);
        self.mana = self.mana.saturating_sub(cost);
    }

    /// Regenerates mana, capped at [`BattleConfig::MANA_CAP`].
    pub fn regen_mana(&mut self, amount: u32) {
        self.mana = (self.mana + amount).min(BattleConfig::MANA_CAP);
    }
}
