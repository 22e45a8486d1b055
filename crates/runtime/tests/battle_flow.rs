//! End-to-end session tests: full battles through the public runtime API.

use battle_core::ability::AbilityId;
use battle_core::engine::{BattleCommand, ExecuteError, RejectReason};
use battle_core::env::{LootId, RngOracle};
use battle_core::progression::RewardBundle;
use battle_core::state::{BattleResult, CombatantSpec, Side, StatBlock};
use battle_content::ability_ids;
use battle_runtime::{
    ActionId, BattleSession, InventorySink, PartyWriteback, RosterProvider, RuntimeError,
    TemplateOpponentGenerator,
};

/// Fixed-value RNG: every roll is 997, which means no misses, no crits, zero
/// damage variance, and a fixed reward draw.
struct FixedRng(u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

struct TestRoster {
    specs: Vec<CombatantSpec>,
    experience: Vec<u64>,
    applied: Option<PartyWriteback>,
}

impl TestRoster {
    fn solo(mana: u32) -> Self {
        Self {
            specs: vec![CombatantSpec {
                name: "scrapfang".to_owned(),
                level: 1,
                stats: StatBlock {
                    attack: 14,
                    defense: 8,
                    speed: 12,
                    magic: 5,
                    max_health: 40,
                },
                health: None,
                mana,
                abilities: vec![ability_ids::SCRAP_BITE, ability_ids::VOLT_SURGE],
            }],
            experience: vec![0],
            applied: None,
        }
    }
}

impl RosterProvider for TestRoster {
    fn party(&self) -> Vec<CombatantSpec> {
        self.specs.clone()
    }

    fn experience(&self) -> Vec<u64> {
        self.experience.clone()
    }

    fn apply(&mut self, writeback: &PartyWriteback) {
        for (xp, progress) in self.experience.iter_mut().zip(&writeback.progress) {
            *xp = progress.experience;
        }
        self.applied = Some(writeback.clone());
    }
}

#[derive(Default)]
struct TestInventory {
    bundles: Vec<RewardBundle>,
}

impl InventorySink for TestInventory {
    fn grant(&mut self, bundle: &RewardBundle) {
        self.bundles.push(*bundle);
    }
}

fn start_session(roster: &TestRoster) -> BattleSession {
    BattleSession::start(roster, &TemplateOpponentGenerator::new(1), 1, Some(7))
        .unwrap()
        .with_rng(Box::new(FixedRng(997)))
}

fn is_player_turn(session: &BattleSession) -> bool {
    let state = session.state();
    state
        .turn
        .current_actor()
        .and_then(|id| state.side_of(id))
        == Some(Side::Player)
}

fn first_enemy(session: &BattleSession) -> battle_core::state::CombatantId {
    session
        .state()
        .side(Side::Opponent)
        .iter()
        .find(|c| !c.defeated)
        .map(|c| c.id)
        .expect("a live opponent")
}

/// Drives the battle with player basic attacks until it terminates.
fn play_out(session: &mut BattleSession) {
    let mut next_id = 0;
    for _ in 0..50 {
        if session.is_over() {
            return;
        }
        if is_player_turn(session) {
            next_id += 1;
            let target = first_enemy(session);
            session
                .submit(ActionId(next_id), BattleCommand::BasicAttack { target })
                .unwrap();
        } else {
            // Settle, then think: three ticks cover both.
            session.advance_clock(3).unwrap();
        }
    }
    panic!("battle did not terminate within the turn bound");
}

#[test]
fn player_wins_and_rewards_flow_back_to_the_host() {
    let mut roster = TestRoster::solo(20);
    let mut inventory = TestInventory::default();
    let mut session = start_session(&roster);

    play_out(&mut session);

    let outcome = session
        .finish(&mut roster, &mut inventory)
        .expect("finished battle has an outcome");
    assert_eq!(outcome.result, BattleResult::PlayerWin);

    let rewards = outcome.rewards.expect("a win grants rewards");
    // Level-1 opponent: base 10 gold plus a bonus below half of base.
    assert!((10..15).contains(&rewards.gold), "gold {}", rewards.gold);
    // Pool of 50, one participant.
    assert_eq!(rewards.experience_each, 50);
    // Roll 98 lands in the epic tier; the catalog has exactly one epic item.
    assert_eq!(rewards.loot, Some(LootId(8)));
    // Roll 98 misses the 85% consumable chance.
    assert_eq!(rewards.consumable, None);

    assert_eq!(roster.experience, vec![50]);
    let writeback = roster.applied.as_ref().expect("writeback applied");
    assert!(writeback.lead_health > 0);
    assert_eq!(inventory.bundles.len(), 1);

    // Finishing twice never grants twice.
    assert!(session.finish(&mut roster, &mut inventory).is_none());
    assert_eq!(inventory.bundles.len(), 1);
}

#[test]
fn insufficient_mana_rejection_leaves_the_turn_with_the_player() {
    let roster = TestRoster::solo(3);
    let mut session = start_session(&roster);
    assert!(is_player_turn(&session));

    let before = session.state().clone();
    let target = first_enemy(&session);
    let err = session
        .submit(
            ActionId(1),
            BattleCommand::UseAbility {
                ability: ability_ids::VOLT_SURGE,
                target: Some(target),
            },
        )
        .unwrap_err();

    match err {
        RuntimeError::Execute(ExecuteError::Rejected(RejectReason::InsufficientMana {
            needed,
            available,
        })) => {
            assert_eq!(needed, 12);
            assert_eq!(available, 3);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Zero mutation, turn not consumed; a different action still goes
    // through afterward.
    assert_eq!(session.state(), &before);
    assert!(is_player_turn(&session));
    session
        .submit(ActionId(2), BattleCommand::BasicAttack { target })
        .unwrap();
}

#[test]
fn fleeing_ends_the_battle_without_rewards() {
    let mut roster = TestRoster::solo(20);
    let mut inventory = TestInventory::default();
    let mut session = start_session(&roster);

    session.submit(ActionId(1), BattleCommand::Flee).unwrap();
    assert!(session.is_over());

    let outcome = session.finish(&mut roster, &mut inventory).unwrap();
    assert_eq!(outcome.result, BattleResult::Fled);
    assert_eq!(outcome.rewards, None);
    assert!(outcome.writeback.progress.is_empty());
    assert!(inventory.bundles.is_empty());
    assert_eq!(roster.experience, vec![0]);
}

#[test]
fn duplicate_action_ids_are_ignored() {
    let roster = TestRoster::solo(20);
    let mut session = start_session(&roster);
    let target = first_enemy(&session);

    let events = session
        .submit(ActionId(1), BattleCommand::BasicAttack { target })
        .unwrap();
    assert!(!events.is_empty());
    let nonce_after = session.state().nonce;

    // Redelivery of the same id: no events, no state change, even though the
    // turn has moved on.
    let replay = session
        .submit(ActionId(1), BattleCommand::BasicAttack { target })
        .unwrap();
    assert!(replay.is_empty());
    assert_eq!(session.state().nonce, nonce_after);
}

#[test]
fn opponent_acts_only_when_the_clock_advances() {
    let roster = TestRoster::solo(20);
    let mut session = start_session(&roster);
    let target = first_enemy(&session);

    session
        .submit(ActionId(1), BattleCommand::BasicAttack { target })
        .unwrap();
    assert!(!is_player_turn(&session));

    let lead_health = session.state().lead().health;

    // Not enough ticks for settle + think.
    let events = session.advance_clock(1).unwrap();
    assert!(events.is_empty());
    assert_eq!(session.state().lead().health, lead_health);

    // Two more ticks fire the think task; the opponent's basic attack lands
    // (fixed rolls: no miss).
    let events = session.advance_clock(2).unwrap();
    assert!(!events.is_empty());
    assert!(session.state().lead().health < lead_health);
    assert!(is_player_turn(&session));
}

#[test]
fn unknown_ability_is_an_error_not_a_rejection() {
    let roster = TestRoster::solo(20);
    let mut session = start_session(&roster);

    let err = session
        .submit(
            ActionId(1),
            BattleCommand::UseAbility {
                ability: AbilityId(999),
                target: None,
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Execute(ExecuteError::UnknownAbility(AbilityId(999)))
    ));
}
