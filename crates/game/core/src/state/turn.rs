//! Turn bookkeeping: order, index, round counter, battle phase.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

use super::combatant::CombatantId;

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    PlayerWin,
    OpponentWin,
    /// The player fled; rewards are never computed.
    Fled,
}

/// Lifecycle phase of the battle state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    /// Waiting for the current combatant's action.
    AwaitingAction,
    /// Terminal; no further actions are accepted.
    BattleOver(BattleResult),
}

/// Turn bookkeeping. The acting combatant is derived from `order[index]`
/// rather than stored, so reads can never disagree with the order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Speed-sorted sequence of non-defeated combatants, recomputed when a
    /// round completes.
    pub order: ArrayVec<CombatantId, { BattleConfig::MAX_COMBATANTS }>,
    /// Index of the acting combatant within `order`.
    pub index: usize,
    /// Current round, starting at 1.
    pub round: u32,
    pub phase: BattlePhase,
}

impl TurnState {
    pub fn new(order: ArrayVec<CombatantId, { BattleConfig::MAX_COMBATANTS }>) -> Self {
        Self {
            order,
            index: 0,
            round: 1,
            phase: BattlePhase::AwaitingAction,
        }
    }

    /// The combatant whose turn it is, if the battle is still running.
    pub fn current_actor(&self) -> Option<CombatantId> {
        match self.phase {
            BattlePhase::AwaitingAction => self.order.get(self.index).copied(),
            BattlePhase::BattleOver(_) => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, BattlePhase::BattleOver(_))
    }
}
