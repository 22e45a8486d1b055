//! Balance tables oracle.

use crate::combat::HitProfile;
use crate::state::Side;

use super::items::{ConsumableDefinition, LootDefinition};

/// Reward tuning parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardParams {
    /// Gold for defeating a level-1 opponent.
    pub gold_base: u32,
    /// Additional gold per opponent level above 1.
    pub gold_per_level: u32,
    /// Experience pool per opponent level, split across participants.
    pub xp_per_opponent_level: u64,
    /// Base percent chance of a bonus consumable drop.
    pub consumable_base_chance: u32,
    /// Additional percent chance per opponent level.
    pub consumable_chance_per_level: u32,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            gold_base: 10,
            gold_per_level: 5,
            xp_per_opponent_level: 50,
            consumable_base_chance: 80,
            consumable_chance_per_level: 5,
        }
    }
}

/// Read-only balance data: hit tuning, reward parameters, and reward
/// catalogs. Implemented by the content crate; the engine and progression
/// code only ever see this trait.
pub trait TablesOracle: Send + Sync {
    /// Miss/crit tuning for attackers controlled by the given side.
    fn hit_profile(&self, side: Side) -> HitProfile {
        HitProfile::for_side(side)
    }

    fn rewards(&self) -> RewardParams {
        RewardParams::default()
    }

    /// Fixed catalog loot is drawn from, weighted by rarity.
    fn loot_catalog(&self) -> &[LootDefinition];

    /// Fixed catalog bonus consumables are drawn from.
    fn consumable_catalog(&self) -> &[ConsumableDefinition];
}
