//! Error types for the action execution pipeline.

use crate::ability::{AbilityId, EffectKind};
use crate::env::OracleError;
use crate::state::CombatantId;

/// Why a well-formed action was rejected during validation.
///
/// Rejections mutate nothing and never consume the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    #[error("insufficient mana: need {needed}, have {available}")]
    InsufficientMana { needed: u32, available: u32 },

    #[error("{ability} is on cooldown for {turns_remaining} more turn(s)")]
    OnCooldown {
        ability: AbilityId,
        turns_remaining: u8,
    },

    #[error("{effect} requires a target")]
    MissingTarget { effect: EffectKind },
}

/// Errors surfaced while executing an action through the battle engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("battle is already over")]
    BattleOver,

    #[error("actor {actor} is not the current turn actor {current}")]
    NotCurrentActor {
        actor: CombatantId,
        current: CombatantId,
    },

    #[error("unknown ability {0}")]
    UnknownAbility(AbilityId),

    #[error("action rejected: {0}")]
    Rejected(#[from] RejectReason),

    /// The target id no longer resolves to a live combatant. Callers treat
    /// this as a no-op; the turn is not consumed.
    #[error("stale target {0}: combatant missing or already defeated")]
    StaleTarget(CombatantId),

    #[error("target {target} is not on the opposing side")]
    InvalidTarget { target: CombatantId },

    /// Invariant violation: outcome checks after every action make an empty
    /// order unreachable. Reaching it is a programming defect.
    #[error("turn order is empty while the battle outcome is undecided")]
    EmptyTurnOrder,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
