/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Mana restored to every combatant of a side during end-of-turn upkeep.
    pub mana_regen_per_turn: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum combatants fielded per side (one per board slot).
    pub const MAX_SIDE_COMBATANTS: usize = 4;
    /// Maximum combatants in a battle (both sides).
    pub const MAX_COMBATANTS: usize = Self::MAX_SIDE_COMBATANTS * 2;
    /// Maximum simultaneous cooldown entries per combatant.
    pub const MAX_COOLDOWNS: usize = 8;
    /// Maximum simultaneous status-effect entries per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Maximum abilities a combatant brings into battle.
    pub const MAX_ABILITIES: usize = 8;
    /// Maximum stats a single ability modifier can touch.
    pub const MAX_MODIFIER_STATS: usize = 4;

    /// Hard cap on every combatant's mana pool.
    pub const MANA_CAP: u32 = 50;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MANA_REGEN: u32 = 2;

    pub fn new() -> Self {
        Self {
            mana_regen_per_turn: Self::DEFAULT_MANA_REGEN,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
