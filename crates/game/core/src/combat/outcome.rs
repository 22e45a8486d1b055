//! Battle termination detection and end-of-turn upkeep.

use crate::state::{BattleResult, Combatant};

/// Whether the battle has been decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Continue,
    PlayerWin,
    OpponentWin,
}

impl BattleOutcome {
    /// Terminal result, if the outcome is decided.
    pub fn into_result(self) -> Option<BattleResult> {
        match self {
            BattleOutcome::Continue => None,
            BattleOutcome::PlayerWin => Some(BattleResult::PlayerWin),
            BattleOutcome::OpponentWin => Some(BattleResult::OpponentWin),
        }
    }
}

/// `OpponentWin` if no player combatant survives, `PlayerWin` if no opponent
/// combatant survives, else `Continue`.
pub fn battle_outcome(player_side: &[Combatant], opponent_side: &[Combatant]) -> BattleOutcome {
    if player_side.iter().all(|c| c.defeated) {
        BattleOutcome::OpponentWin
    } else if opponent_side.iter().all(|c| c.defeated) {
        BattleOutcome::PlayerWin
    } else {
        BattleOutcome::Continue
    }
}

/// End-of-turn upkeep for every combatant of a side: cooldowns and status
/// durations tick down (entries reaching zero are dropped) and mana
/// regenerates, capped at [`crate::config::BattleConfig::MANA_CAP`].
pub fn end_of_turn_upkeep(side: &mut [Combatant], mana_regen: u32) {
    for combatant in side.iter_mut() {
        combatant.tick_cooldowns();
        combatant.statuses.tick();
        combatant.regen_mana(mana_regen);
    }
}
