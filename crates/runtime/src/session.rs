//! Battle session: owns one battle from setup to writeback.
//!
//! The session is the single dispatch point for player commands, runs the
//! opponent controller on a virtual clock, publishes every event onto the
//! bus, and computes progression when the battle is won. Deferred work
//! (opponent thinking, post-action settling) re-validates phase and nonce
//! against the latest committed state before it runs; captured snapshots are
//! never trusted.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use battle_core::config::BattleConfig;
use battle_core::engine::{BattleAction, BattleCommand, BattleEngine, BattleEvent, ExecuteError};
use battle_core::env::{AbilityOracle, BattleEnv, Env, PcgRng, RngOracle, TablesOracle};
use battle_core::progression::{MAX_LEVEL, RewardBundle, add_experience, battle_rewards};
use battle_core::state::{BattlePhase, BattleResult, BattleState, Side};
use battle_content::{AbilityCatalog, BalanceTables};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, ProgressionEvent, Topic};
use crate::providers::{
    BasicOpponentProvider, InventorySink, OpponentGenerator, OpponentProvider, PartyWriteback,
    RosterProvider,
};
use crate::clock::{Schedule, VirtualClock};

/// Ticks between an action resolving and the state being considered settled.
const SETTLE_TICKS: u64 = 1;
/// Ticks an opponent "thinks" before acting.
const THINK_TICKS: u64 = 2;

/// Caller-supplied identifier for one dispatched action. A session executes
/// each id at most once; redelivery is a logged no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u64);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action:{}", self.0)
    }
}

/// Work deferred onto the virtual clock. Each task carries the nonce it was
/// scheduled under and is dropped if the state moved on without it.
#[derive(Clone, Copy, Debug)]
enum Deferred {
    /// Post-action settling; decides whether the opponent should start
    /// thinking.
    Settle { nonce: u64 },
    /// Opponent controller acts when this fires.
    OpponentThink { nonce: u64 },
}

/// Terminal summary of a finished battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub result: BattleResult,
    /// Present only for a player win; fleeing and losing grant nothing.
    pub rewards: Option<RewardBundle>,
    pub writeback: PartyWriteback,
}

/// One battle from setup to writeback.
pub struct BattleSession {
    state: BattleState,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    abilities: AbilityCatalog,
    tables: BalanceTables,
    bus: EventBus,
    clock: VirtualClock,
    schedule: Schedule<Deferred>,
    executed: HashSet<ActionId>,
    opponent: BasicOpponentProvider,
    opponent_level: u32,
    party_experience: Vec<u64>,
    outcome: Option<SessionOutcome>,
}

impl BattleSession {
    /// Assembles a battle from the roster and an opponent party scaled to
    /// `opponent_level`. `seed` pins the battle for replays; `None` draws a
    /// fresh one.
    pub fn start(
        roster: &dyn RosterProvider,
        generator: &dyn OpponentGenerator,
        opponent_level: u32,
        seed: Option<u64>,
    ) -> Result<Self> {
        let party = roster.party();
        let party_experience = roster.experience();
        if party.len() != party_experience.len() {
            return Err(RuntimeError::RosterMismatch);
        }

        let opponents = generator.opponents(opponent_level);
        let opponent_level = opponents.iter().map(|s| s.level).max().unwrap_or(1);

        let seed = seed.unwrap_or_else(rand::random);
        let state = BattleState::setup(seed, &party, &opponents)?;

        tracing::info!(
            seed,
            party = party.len(),
            opponents = opponents.len(),
            opponent_level,
            "battle started"
        );

        let mut session = Self {
            state,
            config: BattleConfig::default(),
            rng: Box::new(PcgRng),
            abilities: AbilityCatalog::builtin(),
            tables: BalanceTables,
            bus: EventBus::new(),
            clock: VirtualClock::new(),
            schedule: Schedule::new(),
            executed: HashSet::new(),
            opponent: BasicOpponentProvider::new(),
            opponent_level,
            party_experience,
            outcome: None,
        };

        session.publish_battle(&[
            BattleEvent::RoundStarted { round: 1 },
            BattleEvent::TurnStarted {
                combatant: session
                    .state
                    .turn
                    .current_actor()
                    .expect("fresh battle has a current actor"),
            },
        ]);

        // A faster opponent may open the battle.
        session.schedule_settle();

        Ok(session)
    }

    /// Swaps in a different RNG oracle. Deterministic tests use a fixed one.
    pub fn with_rng(mut self, rng: Box<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn is_over(&self) -> bool {
        self.state.turn.is_over()
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    /// Dispatches a player command for the current turn.
    ///
    /// Redelivered action ids and stale targets are logged no-ops; genuine
    /// rejections (mana, cooldown, missing target) surface as errors so the
    /// caller can present the reason. The turn is consumed only on success.
    pub fn submit(&mut self, id: ActionId, command: BattleCommand) -> Result<Vec<BattleEvent>> {
        if self.executed.contains(&id) {
            tracing::warn!(%id, "duplicate action dispatch ignored");
            return Ok(Vec::new());
        }

        let actor = self
            .state
            .turn
            .current_actor()
            .ok_or(RuntimeError::Execute(ExecuteError::BattleOver))?;
        if self.state.side_of(actor) != Some(Side::Player) {
            return Err(RuntimeError::NotPlayerTurn);
        }

        let action = BattleAction { actor, command };
        let events = match self.execute_action(&action) {
            Ok(events) => events,
            Err(ExecuteError::StaleTarget(target)) => {
                tracing::warn!(%target, "action referenced a stale target; ignored");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        self.executed.insert(id);
        self.publish_battle(&events);
        self.after_action(&events)?;
        Ok(events)
    }

    /// Advances the virtual clock, running any deferred work that comes due.
    /// Returns the battle events produced by opponent actions.
    pub fn advance_clock(&mut self, ticks: u64) -> Result<Vec<BattleEvent>> {
        let mut produced = Vec::new();

        for _ in 0..ticks {
            let now = self.clock.tick();
            for task in self.schedule.take_due(now) {
                self.run_deferred(task, &mut produced)?;
            }
        }

        Ok(produced)
    }

    fn run_deferred(&mut self, task: Deferred, produced: &mut Vec<BattleEvent>) -> Result<()> {
        match task {
            Deferred::Settle { nonce } => {
                if !self.still_current(nonce) {
                    return Ok(());
                }
                if self.current_side() == Some(Side::Opponent) {
                    let due = self.clock.now() + THINK_TICKS;
                    self.schedule
                        .push(due, Deferred::OpponentThink { nonce: self.state.nonce });
                    tracing::debug!(due, "opponent thinking scheduled");
                }
            }
            Deferred::OpponentThink { nonce } => {
                if !self.still_current(nonce) {
                    return Ok(());
                }
                let Some(action) = self.opponent.provide_action(&self.state) else {
                    return Ok(());
                };

                let events = match self.execute_action(&action) {
                    Ok(events) => events,
                    Err(ExecuteError::StaleTarget(target)) => {
                        tracing::warn!(%target, "opponent chose a stale target; skipped");
                        return Ok(());
                    }
                    Err(err) => return Err(err.into()),
                };

                self.publish_battle(&events);
                self.after_action(&events)?;
                produced.extend(events);
            }
        }
        Ok(())
    }

    /// Deferred work only runs against the exact state it was scheduled
    /// under: same nonce, battle still awaiting an action.
    fn still_current(&self, nonce: u64) -> bool {
        if self.state.turn.phase != BattlePhase::AwaitingAction {
            return false;
        }
        if self.state.nonce != nonce {
            tracing::debug!(
                scheduled = nonce,
                current = self.state.nonce,
                "deferred task outdated; dropped"
            );
            return false;
        }
        true
    }

    fn current_side(&self) -> Option<Side> {
        self.state
            .turn
            .current_actor()
            .and_then(|id| self.state.side_of(id))
    }

    fn execute_action(
        &mut self,
        action: &BattleAction,
    ) -> std::result::Result<Vec<BattleEvent>, ExecuteError> {
        let env: BattleEnv<'_> = Env::new(
            Some(self.rng.as_ref()),
            Some(&self.abilities as &dyn AbilityOracle),
            Some(&self.tables as &dyn TablesOracle),
        );
        let mut engine = BattleEngine::new(&mut self.state, &self.config);
        engine.execute(&env, action)
    }

    fn after_action(&mut self, events: &[BattleEvent]) -> Result<()> {
        let ended = events.iter().find_map(|e| match e {
            BattleEvent::BattleEnded { result } => Some(*result),
            _ => None,
        });

        match ended {
            Some(result) => self.finalize(result),
            None => {
                self.schedule_settle();
                Ok(())
            }
        }
    }

    fn schedule_settle(&mut self) {
        if self.state.turn.is_over() {
            return;
        }
        let due = self.clock.now() + SETTLE_TICKS;
        self.schedule.push(
            due,
            Deferred::Settle {
                nonce: self.state.nonce,
            },
        );
    }

    fn finalize(&mut self, result: BattleResult) -> Result<()> {
        tracing::info!(?result, "battle ended");

        let rewards = match result {
            BattleResult::PlayerWin => Some(self.compute_rewards()?),
            BattleResult::OpponentWin | BattleResult::Fled => None,
        };

        let progress = match rewards {
            Some(bundle) => {
                let progress: Vec<_> = self
                    .party_experience
                    .iter()
                    .map(|xp| add_experience(*xp, bundle.experience_each, MAX_LEVEL))
                    .collect();

                for (member, p) in progress.iter().enumerate() {
                    self.bus.publish(Event::Progression(
                        ProgressionEvent::ExperienceAwarded {
                            member,
                            amount: bundle.experience_each,
                        },
                    ));
                    if p.leveled_up() {
                        tracing::info!(
                            member,
                            old_level = p.old_level,
                            new_level = p.new_level,
                            "level up"
                        );
                        self.bus
                            .publish(Event::Progression(ProgressionEvent::LeveledUp {
                                member,
                                old_level: p.old_level,
                                new_level: p.new_level,
                            }));
                    }
                }
                self.bus
                    .publish(Event::Progression(ProgressionEvent::RewardGranted {
                        gold: bundle.gold,
                        loot: bundle.loot,
                        consumable: bundle.consumable,
                    }));
                progress
            }
            None => Vec::new(),
        };

        let lead = self.state.lead();
        self.outcome = Some(SessionOutcome {
            result,
            rewards,
            writeback: PartyWriteback {
                lead_health: lead.health,
                lead_mana: lead.mana,
                progress,
            },
        });
        Ok(())
    }

    fn compute_rewards(&self) -> Result<RewardBundle> {
        let env: BattleEnv<'_> = Env::new(
            Some(self.rng.as_ref()),
            Some(&self.abilities as &dyn AbilityOracle),
            Some(&self.tables as &dyn TablesOracle),
        );
        let bundle = battle_rewards(
            &env,
            self.state.battle_seed,
            self.state.nonce,
            self.opponent_level,
            self.state.player_side.len() as u32,
        )
        .map_err(ExecuteError::from)?;
        Ok(bundle)
    }

    /// Hands the finished battle back to the host: roster writeback and, for
    /// a win, the reward bundle into the inventory. Consumes the outcome so
    /// rewards are granted exactly once.
    pub fn finish(
        &mut self,
        roster: &mut dyn RosterProvider,
        inventory: &mut dyn InventorySink,
    ) -> Option<SessionOutcome> {
        let outcome = self.outcome.take()?;
        roster.apply(&outcome.writeback);
        if let Some(bundle) = &outcome.rewards {
            inventory.grant(bundle);
        }
        Some(outcome)
    }

    /// Subscribes to a bus topic; convenience for presentation wiring.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    fn publish_battle(&self, events: &[BattleEvent]) {
        for event in events {
            self.bus.publish(Event::Battle(*event));
        }
    }
}
