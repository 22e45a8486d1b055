//! Pure combat resolver.
//!
//! Every function here takes snapshots and pre-drawn rolls and returns
//! results; nothing in this module mutates shared battle state (upkeep is
//! the one deliberate exception, operating on a side handed in by the
//! engine).
mod damage;
mod hit;
mod outcome;
mod resolve;
mod stats;
mod targeting;

pub use damage::{ability_damage, basic_attack_damage};
pub use hit::{HitProfile, crit_chance, miss_chance};
pub use outcome::{BattleOutcome, battle_outcome, end_of_turn_upkeep};
pub use resolve::{
    AttackOutcome, AttackResult, AttackRolls, StatusDelta, resolve_ability_strike,
    resolve_basic_attack, resolve_heal, status_deltas,
};
pub use stats::{EffectiveStats, effective_stats};
pub use targeting::targetable_combatants;
