//! Deliberately simple opponent controller.

use battle_core::combat::targetable_combatants;
use battle_core::engine::{BattleAction, BattleCommand};
use battle_core::state::{BattleState, Side};

use super::OpponentProvider;

/// Basic attack against the first targetable player combatant.
///
/// This is the complete controller behavior, not a stub: opponents never use
/// abilities and never prioritize targets. Difficulty comes from their
/// level-scaled stats and hit profile, not from cleverness.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicOpponentProvider;

impl BasicOpponentProvider {
    pub fn new() -> Self {
        Self
    }
}

impl OpponentProvider for BasicOpponentProvider {
    fn provide_action(&self, state: &BattleState) -> Option<BattleAction> {
        let actor = state.turn.current_actor()?;
        if state.side_of(actor) != Some(Side::Opponent) {
            return None;
        }

        let target = targetable_combatants(state.side(Side::Player))
            .first()
            .copied()?;

        Some(BattleAction {
            actor,
            command: BattleCommand::BasicAttack { target },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::state::{BattleState, CombatantSpec, StatBlock};

    fn spec(name: &str, speed: i32) -> CombatantSpec {
        CombatantSpec {
            name: name.to_owned(),
            level: 1,
            stats: StatBlock {
                attack: 10,
                defense: 5,
                speed,
                magic: 5,
                max_health: 30,
            },
            health: None,
            mana: 20,
            abilities: Vec::new(),
        }
    }

    #[test]
    fn declines_on_player_turn() {
        // Player is faster, so the opening turn is theirs.
        let state = BattleState::setup(0, &[spec("lead", 10)], &[spec("rustjaw", 5)]).unwrap();
        assert!(BasicOpponentProvider::new().provide_action(&state).is_none());
    }

    #[test]
    fn attacks_the_first_targetable_player_combatant() {
        // Opponent is faster and goes first.
        let state = BattleState::setup(
            0,
            &[spec("lead", 5), spec("backup", 4)],
            &[spec("rustjaw", 10)],
        )
        .unwrap();

        let action = BasicOpponentProvider::new().provide_action(&state).unwrap();
        match action.command {
            BattleCommand::BasicAttack { target } => {
                assert_eq!(state.combatant(target).unwrap().name, "lead");
            }
            other => panic!("expected a basic attack, got {other:?}"),
        }
    }
}
