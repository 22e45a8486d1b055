//! Deterministic battle rules and data types shared across clients.
//!
//! `battle-core` defines the canonical combat rules (abilities, resolver,
//! engine, battle state) and exposes pure APIs that can be reused by both the
//! runtime and offline tools. All state mutation flows through
//! [`engine::BattleEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod ability;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod progression;
pub mod state;

pub use ability::{Ability, AbilityId, EffectKind, StatKind, StatModifier};
pub use combat::{
    AttackOutcome, AttackResult, AttackRolls, BattleOutcome, EffectiveStats, HitProfile,
    StatusDelta, ability_damage, basic_attack_damage, battle_outcome, crit_chance,
    effective_stats, end_of_turn_upkeep, miss_chance, resolve_ability_strike,
    resolve_basic_attack, resolve_heal, status_deltas, targetable_combatants,
};
pub use config::BattleConfig;
pub use engine::{
    BattleAction, BattleCommand, BattleEngine, BattleEvent, ExecuteError, RejectReason,
};
pub use env::{
    AbilityOracle, BattleEnv, ConsumableDefinition, ConsumableId, Env, LootDefinition, LootId,
    OracleError, PcgRng, Rarity, RewardParams, RngOracle, TablesOracle, compute_seed,
};
pub use progression::{
    LevelProgress, MAX_LEVEL, RewardBundle, add_experience, battle_rewards, level_for_xp,
};
pub use state::{
    BattlePhase, BattleResult, BattleState, BoardSlot, Combatant, CombatantId, CombatantSpec,
    CooldownEntry, SetupError, Side, StatBlock, StatusEffect, StatusEffects, StatusKey, TurnState,
};
