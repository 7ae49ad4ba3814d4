//! In-memory engine double driven by per-operation response queues.
//!
//! Each operation pops its next scripted response; with an empty queue it
//! falls back to a small built-in behaviour so tests only script what they
//! care about:
//!
//! - `check_continue` answers `false`
//! - `roll_dice` returns [`fixtures::roll`]
//! - `choose_column` picks the first offered pairing
//! - `choose_columns` records a hop on the current snapshot
//! - `end_run` hands the turn to the next seat
//!
//! Every call is recorded with the (possibly paused) Tokio clock, and the
//! number of overlapping mutating calls is tracked.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pond::domain::{
    ColumnChoice, EngineColumns, GameSettings, GameSnapshot, RollOutcome, StatsSummary,
};
use pond::engine::GameEngine;
use pond::error::{EngineError, EngineOp};
use tokio::time::Instant;

use crate::fixtures;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    InitStore,
    StartGame { players: usize },
    StopGame,
    GameState,
    RollDice,
    ChooseColumns(EngineColumns),
    EndRun { forced: bool },
    CheckContinue,
    ChooseColumn,
    GameStatistics,
    Name(Option<u64>),
}

impl EngineCall {
    pub fn op(&self) -> EngineOp {
        match self {
            Self::InitStore => EngineOp::InitStore,
            Self::StartGame { .. } => EngineOp::StartGame,
            Self::StopGame => EngineOp::StopGame,
            Self::GameState => EngineOp::GameState,
            Self::RollDice => EngineOp::RollDice,
            Self::ChooseColumns(_) => EngineOp::ChooseColumns,
            Self::EndRun { .. } => EngineOp::EndRun,
            Self::CheckContinue => EngineOp::CheckContinue,
            Self::ChooseColumn => EngineOp::ChooseColumn,
            Self::GameStatistics => EngineOp::GameStatistics,
            Self::Name(_) => EngineOp::Name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub at: Instant,
    pub call: EngineCall,
}

type Reply<T> = Result<T, EngineError>;

#[derive(Default)]
struct Script {
    init_store: VecDeque<Reply<()>>,
    start_game: VecDeque<Reply<bool>>,
    game_state: VecDeque<Reply<GameSnapshot>>,
    roll_dice: VecDeque<Reply<Option<RollOutcome>>>,
    choose_columns: VecDeque<Reply<Option<GameSnapshot>>>,
    end_run: VecDeque<Reply<GameSnapshot>>,
    check_continue: VecDeque<Reply<bool>>,
    choose_column: VecDeque<Reply<ColumnChoice>>,
    game_statistics: VecDeque<Reply<StatsSummary>>,
}

pub struct ScriptedEngine {
    snapshot: Mutex<GameSnapshot>,
    script: Mutex<Script>,
    calls: Mutex<Vec<RecordedCall>>,
    mutation_latency: Mutex<Duration>,
    decision_latency: Mutex<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new(snapshot: GameSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            script: Mutex::new(Script::default()),
            calls: Mutex::new(Vec::new()),
            mutation_latency: Mutex::new(Duration::ZERO),
            decision_latency: Mutex::new(Duration::ZERO),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Every roll, choose and end-run call takes this long to answer.
    pub fn set_mutation_latency(&self, latency: Duration) {
        *self.mutation_latency.lock() = latency;
    }

    /// Every continue and choose-column query takes this long to answer.
    pub fn set_decision_latency(&self, latency: Duration) {
        *self.decision_latency.lock() = latency;
    }

    /// Replace the engine's own view of the game without going through a call.
    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        *self.snapshot.lock() = snapshot;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot.lock().clone()
    }

    pub fn push_init_store(&self, reply: Reply<()>) {
        self.script.lock().init_store.push_back(reply);
    }

    pub fn push_start_game(&self, reply: Reply<bool>) {
        self.script.lock().start_game.push_back(reply);
    }

    pub fn push_game_state(&self, reply: Reply<GameSnapshot>) {
        self.script.lock().game_state.push_back(reply);
    }

    pub fn push_roll(&self, reply: Reply<Option<RollOutcome>>) {
        self.script.lock().roll_dice.push_back(reply);
    }

    pub fn push_choose_columns(&self, reply: Reply<Option<GameSnapshot>>) {
        self.script.lock().choose_columns.push_back(reply);
    }

    pub fn push_end_run(&self, reply: Reply<GameSnapshot>) {
        self.script.lock().end_run.push_back(reply);
    }

    pub fn push_continue(&self, reply: Reply<bool>) {
        self.script.lock().check_continue.push_back(reply);
    }

    pub fn push_choose_column(&self, reply: Reply<ColumnChoice>) {
        self.script.lock().choose_column.push_back(reply);
    }

    pub fn push_statistics(&self, reply: Reply<StatsSummary>) {
        self.script.lock().game_statistics.push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn ops(&self) -> Vec<EngineOp> {
        self.calls.lock().iter().map(|recorded| recorded.call.op()).collect()
    }

    pub fn count(&self, op: EngineOp) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|recorded| recorded.call.op() == op)
            .count()
    }

    /// Mutating calls only, in order.
    pub fn mutations(&self) -> Vec<EngineCall> {
        self.calls
            .lock()
            .iter()
            .filter(|recorded| recorded.call.op().is_mutating())
            .map(|recorded| recorded.call.clone())
            .collect()
    }

    pub fn first_call_at(&self, op: EngineOp) -> Option<Instant> {
        self.calls
            .lock()
            .iter()
            .find(|recorded| recorded.call.op() == op)
            .map(|recorded| recorded.at)
    }

    /// Most mutating calls ever outstanding at once.
    pub fn max_concurrent_mutations(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(RecordedCall {
            at: Instant::now(),
            call,
        });
    }

    async fn mutate<T>(&self, call: EngineCall, reply: impl FnOnce(&Self) -> T) -> T {
        self.record(call);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let latency = *self.mutation_latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let out = reply(self);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }

    async fn decide(&self, call: EngineCall) {
        self.record(call);
        let latency = *self.decision_latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn adopt(&self, snapshot: &GameSnapshot) {
        *self.snapshot.lock() = snapshot.clone();
    }
}

#[async_trait]
impl GameEngine for ScriptedEngine {
    async fn init_store(&self) -> Result<(), EngineError> {
        self.record(EngineCall::InitStore);
        self.script.lock().init_store.pop_front().unwrap_or(Ok(()))
    }

    async fn start_game(&self, settings: &GameSettings) -> Result<bool, EngineError> {
        self.record(EngineCall::StartGame {
            players: settings.players.len(),
        });
        let reply = self.script.lock().start_game.pop_front();
        let started = reply.unwrap_or(Ok(true))?;
        if started {
            let mut snapshot = fixtures::snapshot(&[], 0);
            snapshot.settings = settings.clone();
            self.adopt(&snapshot);
        }
        Ok(started)
    }

    async fn stop_game(&self) -> Result<(), EngineError> {
        self.record(EngineCall::StopGame);
        Ok(())
    }

    async fn game_state(&self) -> Result<GameSnapshot, EngineError> {
        self.record(EngineCall::GameState);
        let reply = self.script.lock().game_state.pop_front();
        match reply {
            Some(reply) => {
                let snapshot = reply?;
                self.adopt(&snapshot);
                Ok(snapshot)
            }
            None => Ok(self.snapshot()),
        }
    }

    async fn roll_dice(&self) -> Result<Option<RollOutcome>, EngineError> {
        self.mutate(EngineCall::RollDice, |engine| {
            engine
                .script
                .lock()
                .roll_dice
                .pop_front()
                .unwrap_or_else(|| Ok(Some(fixtures::roll())))
        })
        .await
    }

    async fn choose_columns(
        &self,
        columns: EngineColumns,
    ) -> Result<Option<GameSnapshot>, EngineError> {
        self.mutate(EngineCall::ChooseColumns(columns), |engine| {
            let reply = engine.script.lock().choose_columns.pop_front();
            match reply {
                Some(Ok(Some(snapshot))) => {
                    engine.adopt(&snapshot);
                    Ok(Some(snapshot))
                }
                Some(other) => other,
                None => {
                    let mut snapshot = engine.snapshot.lock();
                    snapshot.hops += 1;
                    Ok(Some(snapshot.clone()))
                }
            }
        })
        .await
    }

    async fn end_run(&self, forced: bool) -> Result<GameSnapshot, EngineError> {
        self.mutate(EngineCall::EndRun { forced }, |engine| {
            let reply = engine.script.lock().end_run.pop_front();
            let snapshot = match reply {
                Some(reply) => reply?,
                None => fixtures::next_turn(engine.snapshot()),
            };
            engine.adopt(&snapshot);
            Ok(snapshot)
        })
        .await
    }

    async fn check_continue(&self) -> Result<bool, EngineError> {
        self.decide(EngineCall::CheckContinue).await;
        self.script
            .lock()
            .check_continue
            .pop_front()
            .unwrap_or(Ok(false))
    }

    async fn choose_column(&self, outcome: &RollOutcome) -> Result<ColumnChoice, EngineError> {
        self.decide(EngineCall::ChooseColumn).await;
        let reply = self.script.lock().choose_column.pop_front();
        reply.unwrap_or_else(|| {
            outcome.choices.first().copied().ok_or_else(|| {
                EngineError::rejected(EngineOp::ChooseColumn, "no pairing to choose from")
            })
        })
    }

    async fn game_statistics(&self) -> Result<StatsSummary, EngineError> {
        self.record(EngineCall::GameStatistics);
        self.script
            .lock()
            .game_statistics
            .pop_front()
            .unwrap_or_else(|| {
                Err(EngineError::rejected(
                    EngineOp::GameStatistics,
                    "no statistics scripted",
                ))
            })
    }

    async fn name(&self, seed: Option<u64>) -> Result<String, EngineError> {
        self.record(EngineCall::Name(seed));
        const NAMES: [&str; 4] = ["Ribbit Rex", "Toadally Tom", "Fly Catcher", "Wart Hog"];
        let index = seed.map_or(0, |seed| (seed % NAMES.len() as u64) as usize);
        Ok(NAMES[index].to_string())
    }
}
