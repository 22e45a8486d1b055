//! Discrete events emitted by the engine.
//!
//! Events are the only channel the presentation layer consumes; it maps
//! combatant identities to its own visual anchors and is never queried by
//! the core.

use crate::ability::{AbilityId, EffectKind, StatKind};
use crate::combat::AttackOutcome;
use crate::state::{BattleResult, CombatantId};

/// One resolved step of a battle, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// A full pass through the turn order completed and a new one began.
    RoundStarted { round: u32 },

    /// The given combatant became the acting combatant.
    TurnStarted { combatant: CombatantId },

    /// A basic attack resolved. `damage` is zero on a miss.
    AttackResolved {
        attacker: CombatantId,
        target: CombatantId,
        outcome: AttackOutcome,
        damage: u32,
    },

    /// An ability resolved. `outcome` is `None` for non-strike effects;
    /// `amount` is damage dealt or health restored.
    AbilityResolved {
        actor: CombatantId,
        ability: AbilityId,
        effect: EffectKind,
        target: Option<CombatantId>,
        outcome: Option<AttackOutcome>,
        amount: u32,
    },

    /// A timed stat modifier was written onto a combatant.
    StatusApplied {
        target: CombatantId,
        ability: AbilityId,
        stat: StatKind,
        delta: i32,
        duration_turns: u8,
    },

    /// A combatant's health reached zero.
    Defeated { combatant: CombatantId },

    /// Terminal. No further events follow.
    BattleEnded { result: BattleResult },
}
