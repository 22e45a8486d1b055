//! Boundary traits and the opponent controller.
//!
//! The host application implements [`RosterProvider`], [`OpponentGenerator`],
//! and [`InventorySink`]; the session only ever talks to these traits.

mod opponent;

pub use opponent::BasicOpponentProvider;

use battle_core::engine::BattleAction;
use battle_core::progression::LevelProgress;
use battle_core::state::{BattleState, CombatantSpec};

/// Roster changes persisted after a battle ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartyWriteback {
    /// Lead combatant's health as the battle left it.
    pub lead_health: u32,
    /// Lead combatant's mana as the battle left it.
    pub lead_mana: u32,
    /// Experience outcome per roster member, in roster order. Empty unless
    /// the battle was won.
    pub progress: Vec<LevelProgress>,
}

/// Supplies the player's party and absorbs post-battle changes.
///
/// Part bonuses are folded into each spec's stats before it crosses this
/// boundary; the battle never sees individual parts.
pub trait RosterProvider {
    /// Ordered party specs, at most four. The first entry is the lead.
    fn party(&self) -> Vec<CombatantSpec>;

    /// Experience totals aligned with [`RosterProvider::party`] order.
    fn experience(&self) -> Vec<u64>;

    /// Absorbs the battle's outcome back into the roster.
    fn apply(&mut self, writeback: &PartyWriteback);
}

/// Produces the opposing party for a battle.
pub trait OpponentGenerator {
    fn opponents(&self, level: u32) -> Vec<CombatantSpec>;
}

/// Receives the reward bundle of a won battle. Owns persistence.
pub trait InventorySink {
    fn grant(&mut self, bundle: &battle_core::progression::RewardBundle);
}

/// Chooses the opposing side's action on its turn.
pub trait OpponentProvider {
    /// `None` when the battle is over or it is not an opponent's turn.
    fn provide_action(&self, state: &BattleState) -> Option<BattleAction>;
}

/// Opponent generator backed by the built-in level-scaled templates.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateOpponentGenerator {
    /// Opposing party size per battle.
    pub count: usize,
}

impl TemplateOpponentGenerator {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl OpponentGenerator for TemplateOpponentGenerator {
    fn opponents(&self, level: u32) -> Vec<CombatantSpec> {
        battle_content::opponent_party(level, self.count.max(1))
    }
}
