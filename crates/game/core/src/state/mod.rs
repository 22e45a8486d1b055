//! Authoritative battle state representation.
//!
//! This module owns the data structures describing combatants, status
//! effects, and turn bookkeeping. Runtime layers clone or query this state
//! but mutate it exclusively through the engine.
mod combatant;
mod status;
mod turn;

pub use combatant::{BoardSlot, Combatant, CombatantId, CooldownEntry, Side, StatBlock};
pub use status::{StatusEffect, StatusEffects, StatusKey};
pub use turn::{BattlePhase, BattleResult, TurnState};

use arrayvec::ArrayVec;

use crate::ability::AbilityId;
use crate::config::BattleConfig;
use crate::engine::scheduler::compute_turn_order;

/// Errors raised while assembling a battle from roster input.
///
/// Setup failures are fatal for the battle attempt only; no state is
/// constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("cannot start a battle with zero eligible player combatants")]
    EmptyPlayerSide,
    #[error("cannot start a battle with zero opponent combatants")]
    EmptyOpponentSide,
    #[error("a side may field at most {max} combatants (got {got})")]
    SideTooLarge { max: usize, got: usize },
}

/// Roster-supplied description of one combatant entering a battle.
///
/// Part bonuses are already folded into `stats` by the roster boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatantSpec {
    pub name: String,
    pub level: u32,
    pub stats: StatBlock,
    /// Carried-over health (lead combatant persists between battles);
    /// `None` starts at full health.
    pub health: Option<u32>,
    pub mana: u32,
    pub abilities: Vec<AbilityId>,
}

/// Canonical snapshot of one running battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed for deterministic rolls. Set once at setup, never modified.
    /// Combined with `nonce` to derive unique seeds per random event.
    pub battle_seed: u64,

    /// Action sequence number, incremented after each successful execution.
    pub nonce: u64,

    pub player_side: ArrayVec<Combatant, { BattleConfig::MAX_SIDE_COMBATANTS }>,
    pub opponent_side: ArrayVec<Combatant, { BattleConfig::MAX_SIDE_COMBATANTS }>,

    pub turn: TurnState,
}

impl BattleState {
    /// Assembles a battle from roster specs, assigning ids and board slots in
    /// owner-defined order and computing the opening turn order.
    ///
    /// Player-side combatants take ids `0..n`; opponents follow. Slots are
    /// filled front-left, front-right, back-left, back-right.
    pub fn setup(
        battle_seed: u64,
        player: &[CombatantSpec],
        opponent: &[CombatantSpec],
    ) -> Result<Self, SetupError> {
        if player.is_empty() {
            return Err(SetupError::EmptyPlayerSide);
        }
        if opponent.is_empty() {
            return Err(SetupError::EmptyOpponentSide);
        }
        for side in [player, opponent] {
            if side.len() > BattleConfig::MAX_SIDE_COMBATANTS {
                return Err(SetupError::SideTooLarge {
                    max: BattleConfig::MAX_SIDE_COMBATANTS,
                    got: side.len(),
                });
            }
        }

        let mut next_id = 0u32;
        let mut field = |specs: &[CombatantSpec]| {
            let mut side: ArrayVec<Combatant, { BattleConfig::MAX_SIDE_COMBATANTS }> =
                ArrayVec::new();
            for (spec, slot) in specs.iter().zip(BoardSlot::FIELDING_ORDER) {
                let mut combatant = Combatant::new(
                    CombatantId(next_id),
                    spec.name.clone(),
                    spec.level,
                    spec.stats,
                    slot,
                    spec.mana,
                )
                .with_abilities(&spec.abilities);
                if let Some(health) = spec.health {
                    combatant = combatant.with_health(health);
                }
                side.push(combatant);
                next_id += 1;
            }
            side
        };

        let player_side = field(player);
        let opponent_side = field(opponent);
        let order = compute_turn_order(&player_side, &opponent_side);

        Ok(Self {
            battle_seed,
            nonce: 0,
            player_side,
            opponent_side,
            turn: TurnState::new(order),
        })
    }

    pub fn side(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Player => &self.player_side,
            Side::Opponent => &self.opponent_side,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut [Combatant] {
        match side {
            Side::Player => &mut self.player_side,
            Side::Opponent => &mut self.opponent_side,
        }
    }

    /// Which side a combatant fights for, if it exists.
    pub fn side_of(&self, id: CombatantId) -> Option<Side> {
        if self.player_side.iter().any(|c| c.id == id) {
            Some(Side::Player)
        } else if self.opponent_side.iter().any(|c| c.id == id) {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.player_side
            .iter()
            .chain(self.opponent_side.iter())
            .find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.player_side
            .iter_mut()
            .chain(self.opponent_side.iter_mut())
            .find(|c| c.id == id)
    }

    /// The lead combatant: first in the player's roster order. Its health and
    /// mana persist back to the roster after the battle.
    pub fn lead(&self) -> &Combatant {
        &self.player_side[0]
    }
}
