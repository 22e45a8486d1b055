//! Turn order computation and advancement.

use arrayvec::ArrayVec;

use crate::combat::effective_stats;
use crate::config::BattleConfig;
use crate::state::{Combatant, CombatantId, Side};

use super::errors::ExecuteError;
use super::events::BattleEvent;
use super::BattleEngine;

/// Computes the turn order: all non-defeated combatants from both sides,
/// sorted by effective speed descending.
///
/// The sort is stable, so equal speeds keep the input order (player side in
/// fielding order, then opponent side). That tie-break is documented,
/// arbitrary behavior — not a rule to refine.
pub fn compute_turn_order(
    player_side: &[Combatant],
    opponent_side: &[Combatant],
) -> ArrayVec<CombatantId, { BattleConfig::MAX_COMBATANTS }> {
    let mut alive: ArrayVec<(CombatantId, i32), { BattleConfig::MAX_COMBATANTS }> = player_side
        .iter()
        .chain(opponent_side.iter())
        .filter(|c| !c.defeated)
        .map(|c| (c.id, effective_stats(c).speed))
        .collect();

    alive.sort_by(|a, b| b.1.cmp(&a.1));
    alive.iter().map(|(id, _)| *id).collect()
}

/// Turn scheduling methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// The combatant whose turn it is (None once the battle is over).
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.state.turn.current_actor()
    }

    pub fn is_player_turn(&self) -> bool {
        self.current_actor()
            .and_then(|id| self.state.side_of(id))
            == Some(Side::Player)
    }

    /// Advances to the next turn: increments the index, rolls the round and
    /// recomputes the order when the index runs past the end, and skips
    /// combatants defeated since the order was computed.
    ///
    /// Callers must have ended the battle before the order can empty out;
    /// reaching an empty recomputed order is an invariant violation.
    pub(super) fn advance(&mut self, events: &mut Vec<BattleEvent>) -> Result<(), ExecuteError> {
        debug_assert!(!self.state.turn.is_over());
        self.state.turn.index += 1;

        loop {
            if self.state.turn.index >= self.state.turn.order.len() {
                self.state.turn.round += 1;
                self.state.turn.order =
                    compute_turn_order(&self.state.player_side, &self.state.opponent_side);
                self.state.turn.index = 0;

                if self.state.turn.order.is_empty() {
                    debug_assert!(
                        false,
                        "turn order empty while battle outcome is undecided"
                    );
                    return Err(ExecuteError::EmptyTurnOrder);
                }

                events.push(BattleEvent::RoundStarted {
                    round: self.state.turn.round,
                });
            }

            let id = self.state.turn.order[self.state.turn.index];
            let alive = self
                .state
                .combatant(id)
                .map(|c| !c.defeated)
                .unwrap_or(false);
            if alive {
                events.push(BattleEvent::TurnStarted { combatant: id });
                return Ok(());
            }

            self.state.turn.index += 1;
        }
    }
}
