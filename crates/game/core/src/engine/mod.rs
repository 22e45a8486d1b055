//! Turn orchestration and action execution pipeline.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`]:
//! `(state, action) -> events`. It validates the action against the current
//! turn and resource rules, applies the resolver's results in one atomic
//! transition, checks for termination, and advances the schedule. All state
//! mutation flows through [`BattleEngine::execute`].

mod errors;
mod events;
pub(crate) mod scheduler;

pub use errors::{ExecuteError, RejectReason};
pub use events::BattleEvent;

use crate::ability::{AbilityId, EffectKind};
use crate::combat::{
    AttackRolls, BattleOutcome, battle_outcome, effective_stats, end_of_turn_upkeep,
    resolve_ability_strike, resolve_basic_attack, resolve_heal, status_deltas,
    targetable_combatants,
};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, compute_seed};
use crate::state::{BattlePhase, BattleResult, BattleState, CombatantId, Side};

// Roll contexts: distinct streams for multiple rolls within one action.
const ROLL_MISS: u32 = 0;
const ROLL_VARIANCE: u32 = 1;
const ROLL_CRIT: u32 = 2;

/// What a combatant does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleCommand {
    /// Free basic attack; no mana cost, no cooldown.
    BasicAttack { target: CombatantId },
    /// Use an equipped ability, optionally against a target.
    UseAbility {
        ability: AbilityId,
        target: Option<CombatantId>,
    },
    /// Abandon the battle. Immediately terminal; bypasses outcome checks
    /// and reward computation.
    Flee,
}

/// An action submitted for the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    pub actor: CombatantId,
    pub command: BattleCommand,
}

/// Battle engine that manages action execution, turn scheduling, and
/// termination.
///
/// Rejections and stale references return errors without mutating anything;
/// only a fully validated action commits, and it commits completely.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Executes an action for the current turn.
    ///
    /// On success, returns the events describing everything that happened,
    /// ending with either a `TurnStarted` for the next actor or a
    /// `BattleEnded`. On error, the state is untouched and the turn is not
    /// consumed.
    pub fn execute(
        &mut self,
        env: &BattleEnv<'_>,
        action: &BattleAction,
    ) -> Result<Vec<BattleEvent>, ExecuteError> {
        if self.state.turn.is_over() {
            return Err(ExecuteError::BattleOver);
        }
        let current = self
            .state
            .turn
            .current_actor()
            .ok_or(ExecuteError::EmptyTurnOrder)?;
        if action.actor != current {
            return Err(ExecuteError::NotCurrentActor {
                actor: action.actor,
                current,
            });
        }

        let mut events = Vec::new();

        match action.command {
            BattleCommand::Flee => {
                self.state.turn.phase = BattlePhase::BattleOver(BattleResult::Fled);
                self.state.nonce += 1;
                events.push(BattleEvent::BattleEnded {
                    result: BattleResult::Fled,
                });
                return Ok(events);
            }
            BattleCommand::BasicAttack { target } => {
                self.apply_basic_attack(env, current, target, &mut events)?;
            }
            BattleCommand::UseAbility { ability, target } => {
                self.apply_ability(env, current, ability, target, &mut events)?;
            }
        }
        self.state.nonce += 1;

        // Outcome check after every state-affecting action keeps the
        // empty-turn-order invariant.
        match battle_outcome(&self.state.player_side, &self.state.opponent_side) {
            BattleOutcome::Continue => {
                let side = self.side_of_actor(current);
                end_of_turn_upkeep(
                    self.state.side_mut(side),
                    self.config.mana_regen_per_turn,
                );
                self.advance(&mut events)?;
            }
            decided => {
                let result = decided
                    .into_result()
                    .expect("non-continue outcome has a result");
                self.state.turn.phase = BattlePhase::BattleOver(result);
                events.push(BattleEvent::BattleEnded { result });
            }
        }

        Ok(events)
    }

    fn side_of_actor(&self, actor: CombatantId) -> Side {
        self.state
            .side_of(actor)
            .expect("current actor must belong to a side")
    }

    /// Validates that `target` is a live, targetable combatant on the side
    /// opposing `actor_side`. Back-line combatants are shielded while any
    /// front-line combatant on their side survives.
    fn validate_enemy_target(
        &self,
        actor_side: Side,
        target: CombatantId,
    ) -> Result<(), ExecuteError> {
        let target_side = self
            .state
            .side_of(target)
            .ok_or(ExecuteError::StaleTarget(target))?;
        if target_side != actor_side.opposing() {
            return Err(ExecuteError::InvalidTarget { target });
        }
        let combatant = self
            .state
            .combatant(target)
            .ok_or(ExecuteError::StaleTarget(target))?;
        if combatant.defeated {
            return Err(ExecuteError::StaleTarget(target));
        }
        if !targetable_combatants(self.state.side(target_side)).contains(&target) {
            return Err(ExecuteError::InvalidTarget { target });
        }
        Ok(())
    }

    fn draw_rolls(&self, env: &BattleEnv<'_>, actor: CombatantId) -> Result<AttackRolls, ExecuteError> {
        let rng = env.rng()?;
        let seed = |context| compute_seed(self.state.battle_seed, self.state.nonce, actor.0, context);
        Ok(AttackRolls {
            miss: rng.roll_permille(seed(ROLL_MISS)),
            variance: rng.variance(seed(ROLL_VARIANCE)),
            crit: rng.roll_permille(seed(ROLL_CRIT)),
        })
    }

    fn apply_basic_attack(
        &mut self,
        env: &BattleEnv<'_>,
        actor: CombatantId,
        target: CombatantId,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), ExecuteError> {
        let actor_side = self.side_of_actor(actor);
        self.validate_enemy_target(actor_side, target)?;

        let attacker_eff = effective_stats(self.state.combatant(actor).expect("actor exists"));
        let target_eff = effective_stats(self.state.combatant(target).expect("target validated"));
        let profile = env.tables()?.hit_profile(actor_side);
        let rolls = self.draw_rolls(env, actor)?;

        let result = resolve_basic_attack(&attacker_eff, &target_eff, &profile, rolls);

        events.push(BattleEvent::AttackResolved {
            attacker: actor,
            target,
            outcome: result.outcome,
            damage: result.damage.unwrap_or(0),
        });

        if let Some(damage) = result.damage {
            let victim = self.state.combatant_mut(target).expect("target validated");
            victim.apply_damage(damage);
            if victim.defeated {
                events.push(BattleEvent::Defeated { combatant: target });
            }
        }

        Ok(())
    }

    fn apply_ability(
        &mut self,
        env: &BattleEnv<'_>,
        actor: CombatantId,
        ability_id: AbilityId,
        target: Option<CombatantId>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), ExecuteError> {
        let ability = env
            .abilities()?
            .ability(ability_id)
            .ok_or(ExecuteError::UnknownAbility(ability_id))?;

        // Validation order is fixed: mana, cooldown, target presence. Each
        // failure rejects with zero mutation and no turn consumption.
        let caster = self.state.combatant(actor).expect("actor exists");
        if caster.mana < ability.mana_cost {
            return Err(RejectReason::InsufficientMana {
                needed: ability.mana_cost,
                available: caster.mana,
            }
            .into());
        }
        let remaining = caster.cooldown_remaining(ability_id);
        if remaining > 0 {
            return Err(RejectReason::OnCooldown {
                ability: ability_id,
                turns_remaining: remaining,
            }
            .into());
        }
        if ability.effect.requires_target() && target.is_none() {
            return Err(RejectReason::MissingTarget {
                effect: ability.effect,
            }
            .into());
        }

        let actor_side = self.side_of_actor(actor);
        if let Some(target) = target
            && ability.effect.requires_target()
        {
            self.validate_enemy_target(actor_side, target)?;
        }

        // All validation passed; the transition below commits atomically.
        match ability.effect {
            EffectKind::Attack | EffectKind::MagicAttack => {
                let target = target.expect("strike target validated");
                let attacker_eff =
                    effective_stats(self.state.combatant(actor).expect("actor exists"));
                let target_eff =
                    effective_stats(self.state.combatant(target).expect("target validated"));
                let profile = env.tables()?.hit_profile(actor_side);
                let rolls = self.draw_rolls(env, actor)?;

                let result =
                    resolve_ability_strike(ability, &attacker_eff, &target_eff, &profile, rolls);

                self.charge(actor, ability.mana_cost, ability_id, ability.cooldown_turns);
                events.push(BattleEvent::AbilityResolved {
                    actor,
                    ability: ability_id,
                    effect: ability.effect,
                    target: Some(target),
                    outcome: Some(result.outcome),
                    amount: result.damage.unwrap_or(0),
                });

                if let Some(damage) = result.damage {
                    let victim = self.state.combatant_mut(target).expect("target validated");
                    victim.apply_damage(damage);
                    if victim.defeated {
                        events.push(BattleEvent::Defeated { combatant: target });
                    }
                }
            }
            EffectKind::Heal => {
                let caster = self.state.combatant(actor).expect("actor exists");
                let new_health =
                    resolve_heal(ability, caster.health, caster.stats.max_health);
                let healed = new_health - caster.health;

                self.charge(actor, ability.mana_cost, ability_id, ability.cooldown_turns);
                let caster = self.state.combatant_mut(actor).expect("actor exists");
                caster.health = new_health;

                events.push(BattleEvent::AbilityResolved {
                    actor,
                    ability: ability_id,
                    effect: EffectKind::Heal,
                    target: None,
                    outcome: None,
                    amount: healed,
                });
            }
            EffectKind::Buff | EffectKind::Debuff => {
                let is_debuff = ability.effect == EffectKind::Debuff;
                let recipient = if is_debuff {
                    target.expect("debuff target validated")
                } else {
                    actor
                };
                let deltas = status_deltas(ability, is_debuff);

                self.charge(actor, ability.mana_cost, ability_id, ability.cooldown_turns);
                events.push(BattleEvent::AbilityResolved {
                    actor,
                    ability: ability_id,
                    effect: ability.effect,
                    target: is_debuff.then_some(recipient),
                    outcome: None,
                    amount: 0,
                });

                let combatant = self
                    .state
                    .combatant_mut(recipient)
                    .expect("recipient validated");
                for delta in deltas {
                    combatant.statuses.apply(delta.key, delta.turns, delta.delta);
                    events.push(BattleEvent::StatusApplied {
                        target: recipient,
                        ability: ability_id,
                        stat: delta.key.stat,
                        delta: delta.delta,
                        duration_turns: delta.turns,
                    });
                }
            }
        }

        Ok(())
    }

    /// Deducts the mana cost and starts the cooldown, exactly once per
    /// successful use.
    fn charge(&mut self, actor: CombatantId, mana_cost: u32, ability: AbilityId, cooldown: u8) {
        let caster = self.state.combatant_mut(actor).expect("actor exists");
        caster.spend_mana(mana_cost);
        caster.set_cooldown(ability, cooldown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{Ability, StatKind, StatModifier};
    use crate::env::{
        AbilityOracle, ConsumableDefinition, Env, LootDefinition, RngOracle, TablesOracle,
    };
    use crate::state::{BattleState, CombatantSpec, StatBlock};
    use arrayvec::ArrayVec;

    struct TestCatalog(Vec<Ability>);

    impl AbilityOracle for TestCatalog {
        fn ability(&self, id: AbilityId) -> Option<&Ability> {
            self.0.iter().find(|a| a.id == id)
        }
    }

    struct TestTables;

    impl TablesOracle for TestTables {
        fn loot_catalog(&self) -> &[LootDefinition] {
            &[]
        }
        fn consumable_catalog(&self) -> &[ConsumableDefinition] {
            &[]
        }
    }

    /// Fixed-value RNG: 997 yields no miss, no crit, zero variance.
    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn spec(name: &str, attack: i32, defense: i32, speed: i32, health: u32) -> CombatantSpec {
        CombatantSpec {
            name: name.to_owned(),
            level: 1,
            stats: StatBlock {
                attack,
                defense,
                speed,
                magic: 5,
                max_health: health,
            },
            health: None,
            mana: 10,
            abilities: vec![AbilityId(1), AbilityId(2)],
        }
    }

    fn catalog() -> TestCatalog {
        let mut stats = ArrayVec::new();
        stats.push(StatKind::Attack);
        TestCatalog(vec![
            Ability::new(AbilityId(1), "bite", EffectKind::Attack, 10).with_cost(12, 2),
            Ability::new(AbilityId(2), "war cry", EffectKind::Buff, 0)
                .with_cost(4, 2)
                .with_modifier(StatModifier {
                    stats,
                    magnitude: 3,
                    duration_turns: 2,
                }),
        ])
    }

    fn one_v_one() -> BattleState {
        // Player (id 0, speed 10) acts before the opponent (id 1, speed 5).
        BattleState::setup(
            7,
            &[spec("scrapfang", 10, 5, 10, 30)],
            &[spec("rustjaw", 5, 5, 5, 20)],
        )
        .unwrap()
    }

    #[test]
    fn insufficient_mana_rejects_without_any_mutation() {
        let mut state = one_v_one();
        let before = state.clone();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);

        let mut engine = BattleEngine::new(&mut state, &config);
        let err = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::UseAbility {
                        ability: AbilityId(1),
                        target: Some(CombatantId(1)),
                    },
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::Rejected(RejectReason::InsufficientMana {
                needed: 12,
                available: 10
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn buff_deducts_exact_mana_and_sets_declared_cooldown() {
        let mut state = one_v_one();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);

        let mut engine = BattleEngine::new(&mut state, &config);
        let events = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::UseAbility {
                        ability: AbilityId(2),
                        target: None,
                    },
                },
            )
            .unwrap();

        assert!(events.iter().any(|e| matches!(
            e,
            BattleEvent::StatusApplied {
                stat: StatKind::Attack,
                delta: 3,
                ..
            }
        )));

        // Upkeep ran for the player side at end of turn: the cooldown set to
        // 2 ticked once, and mana 10 - 4 + 2 regen = 8.
        let caster = state.combatant(CombatantId(0)).unwrap();
        assert_eq!(caster.mana, 8);
        assert_eq!(caster.cooldown_remaining(AbilityId(2)), 1);
    }

    #[test]
    fn missing_target_is_rejected_before_any_roll() {
        let mut state = one_v_one();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);
        // Give the caster enough mana for the strike.
        state.combatant_mut(CombatantId(0)).unwrap().mana = 20;
        let before = state.clone();

        let mut engine = BattleEngine::new(&mut state, &config);
        let err = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::UseAbility {
                        ability: AbilityId(1),
                        target: None,
                    },
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::Rejected(RejectReason::MissingTarget {
                effect: EffectKind::Attack
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn wrong_actor_is_refused() {
        let mut state = one_v_one();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);

        let mut engine = BattleEngine::new(&mut state, &config);
        let err = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(1),
                    command: BattleCommand::BasicAttack {
                        target: CombatantId(0),
                    },
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::NotCurrentActor {
                actor: CombatantId(1),
                current: CombatantId(0),
            }
        );
    }

    #[test]
    fn basic_attacks_defeat_the_opponent_and_end_the_battle() {
        let mut state = one_v_one();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);

        // Damage per hit: 10 - 5/2 + 0 = 8 against 20 health, so three
        // player turns at most settle it.
        let mut ended = false;
        for _ in 0..8 {
            let mut engine = BattleEngine::new(&mut state, &config);
            let Some(actor) = engine.current_actor() else {
                break;
            };
            let target = if engine.is_player_turn() {
                CombatantId(1)
            } else {
                CombatantId(0)
            };
            let events = engine
                .execute(
                    &env.as_battle_env(),
                    &BattleAction {
                        actor,
                        command: BattleCommand::BasicAttack { target },
                    },
                )
                .unwrap();
            if events.iter().any(|e| {
                matches!(
                    e,
                    BattleEvent::BattleEnded {
                        result: BattleResult::PlayerWin
                    }
                )
            }) {
                ended = true;
                break;
            }
        }

        assert!(ended);
        assert!(state.combatant(CombatantId(1)).unwrap().defeated);
        assert!(state.turn.is_over());
    }

    #[test]
    fn flee_is_immediately_terminal() {
        let mut state = one_v_one();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);

        let mut engine = BattleEngine::new(&mut state, &config);
        let events = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::Flee,
                },
            )
            .unwrap();

        assert_eq!(
            events,
            vec![BattleEvent::BattleEnded {
                result: BattleResult::Fled
            }]
        );

        // Terminal: nothing further is accepted.
        let mut engine = BattleEngine::new(&mut state, &config);
        let err = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(1),
                    command: BattleCommand::BasicAttack {
                        target: CombatantId(0),
                    },
                },
            )
            .unwrap_err();
        assert_eq!(err, ExecuteError::BattleOver);
    }

    #[test]
    fn stale_target_errors_without_consuming_the_turn() {
        let mut state = one_v_one();
        state.combatant_mut(CombatantId(1)).unwrap().apply_damage(100);
        // Keep the battle formally undecided by adding nothing; outcome
        // would be PlayerWin, but the engine only checks after an action.
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);
        let index_before = state.turn.index;

        let mut engine = BattleEngine::new(&mut state, &config);
        let err = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::BasicAttack {
                        target: CombatantId(1),
                    },
                },
            )
            .unwrap_err();

        assert_eq!(err, ExecuteError::StaleTarget(CombatantId(1)));
        assert_eq!(state.turn.index, index_before);
    }

    #[test]
    fn back_line_is_shielded_while_the_front_line_stands() {
        // Three opponents: two front-line, one back-left.
        let mut state = BattleState::setup(
            5,
            &[spec("lead", 10, 5, 12, 40)],
            &[
                spec("front-a", 5, 5, 5, 20),
                spec("front-b", 5, 5, 5, 20),
                spec("hider", 5, 5, 5, 20),
            ],
        )
        .unwrap();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);

        let mut engine = BattleEngine::new(&mut state, &config);
        let err = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::BasicAttack {
                        target: CombatantId(3),
                    },
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            ExecuteError::InvalidTarget {
                target: CombatantId(3)
            }
        );

        // Front-line targets go through.
        let mut engine = BattleEngine::new(&mut state, &config);
        engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::BasicAttack {
                        target: CombatantId(1),
                    },
                },
            )
            .unwrap();
    }

    #[test]
    fn defeated_combatants_are_skipped_until_recompute() {
        // Order: lead (10), rustjaw (9), backup (8), gearjaw (7). Lead kills
        // rustjaw, so advance() must skip it and land on backup.
        let mut state = BattleState::setup(
            11,
            &[
                spec("lead", 30, 5, 10, 30),
                spec("backup", 5, 5, 8, 30),
            ],
            &[
                spec("rustjaw", 5, 5, 9, 10),
                spec("gearjaw", 5, 5, 7, 30),
            ],
        )
        .unwrap();
        let config = BattleConfig::default();
        let rng = FixedRng(997);
        let abilities = catalog();
        let env = Env::with_all(&rng, &abilities, &TestTables);

        let mut engine = BattleEngine::new(&mut state, &config);
        assert_eq!(engine.current_actor(), Some(CombatantId(0)));

        // 30 - 5/2 = 28 damage kills the 10-health rustjaw outright.
        let events = engine
            .execute(
                &env.as_battle_env(),
                &BattleAction {
                    actor: CombatantId(0),
                    command: BattleCommand::BasicAttack {
                        target: CombatantId(2),
                    },
                },
            )
            .unwrap();

        assert!(events.iter().any(|e| matches!(
            e,
            BattleEvent::Defeated {
                combatant: CombatantId(2)
            }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            BattleEvent::TurnStarted {
                combatant: CombatantId(1)
            }
        )));
        assert_eq!(state.turn.current_actor(), Some(CombatantId(1)));
    }
}
