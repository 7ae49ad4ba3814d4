//! Autonomous turn driver.
//!
//! Owns the decision cycle of a non-human active participant. A single loop
//! task watches the shared turn state and calls [`DriverCore::reconcile`] on
//! every change; reconcile is the only place an episode phase is entered
//! from outside, and it is safe to call any number of times.
//!
//! Each episode runs as scheduled steps:
//!
//! 1. think, ask the engine whether to continue, publish `hop` or `stop`
//! 2. act: roll (continue) or bank with `end_run(false)` (stop)
//! 3. once dice land, think and ask which pairing to take, publish
//!    `choose(target)`; with no pairing publish `croaked` straight away
//! 4. act: submit the pairing, or `end_run(true)` after a croak
//!
//! Every step carries an [`Episode`] ticket. Ceding control (human turn,
//! walkthrough, shutdown) bumps the generation and cancels the ticket's
//! token, so a sleeping step wakes up cancelled and a step that was mid-call
//! finds its generation stale before it can issue another mutating call.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::PacingConfig;
use crate::domain::{ColumnChoice, DecisionIntent, RollOutcome, Seat};
use crate::error::{AppError, EngineOp};
use crate::errors::ErrorCode;
use crate::utils::tasks::spawn_named_task;

use super::controller::TurnController;
use super::episode::{DriverPhase, Episode};
use super::presentation::TurnView;
use super::state::{MutationGuard, SharedTurn, TurnState};

#[derive(Debug, Default)]
struct DriverState {
    phase: DriverPhase,
    /// Set for the whole of an episode, cleared only when it completes,
    /// fails or is ceded.
    busy: bool,
    generation: u64,
    episode: Option<CancellationToken>,
    seat: Option<Seat>,
    /// Revision at which the last episode failed. No new episode starts
    /// until the shared revision moves past it.
    stalled_at: Option<u64>,
}

struct DriverCore {
    controller: TurnController,
    shared: SharedTurn,
    pacing: PacingConfig,
    state: Mutex<DriverState>,
    intent: watch::Sender<DecisionIntent>,
    root: CancellationToken,
}

/// Handle to the running driver. Dropping it tears the driver down.
pub struct AutonomousTurnDriver {
    core: Arc<DriverCore>,
}

impl AutonomousTurnDriver {
    /// Start the driver loop over the controller's shared turn state.
    pub fn spawn(controller: TurnController, pacing: PacingConfig) -> Self {
        let shared = controller.shared().clone();
        let (intent, _) = watch::channel(DecisionIntent::None);
        let core = Arc::new(DriverCore {
            controller,
            shared,
            pacing,
            state: Mutex::new(DriverState::default()),
            intent,
            root: CancellationToken::new(),
        });

        let mut changes = core.shared.subscribe();
        let loop_core = Arc::clone(&core);
        spawn_named_task("turn-driver", async move {
            loop_core.reconcile();
            loop {
                tokio::select! {
                    biased;
                    _ = loop_core.root.cancelled() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        loop_core.reconcile();
                    }
                }
            }
            debug!("turn driver loop exited");
        });

        Self { core }
    }

    pub fn intent(&self) -> DecisionIntent {
        *self.core.intent.borrow()
    }

    /// Follow intent changes, e.g. to move a highlight.
    pub fn watch_intent(&self) -> watch::Receiver<DecisionIntent> {
        self.core.intent.subscribe()
    }

    pub fn phase(&self) -> DriverPhase {
        self.core.state.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.core.state.lock().busy
    }

    pub fn view(&self) -> TurnView {
        TurnView::derive(&self.core.shared.current(), self.intent())
    }

    /// Drop any pending steps right now instead of on the loop's next tick.
    pub fn cede(&self, reason: &'static str) {
        self.core.cede(reason);
    }

    /// Stop the loop and cancel every pending step. Idempotent.
    pub fn shutdown(&self) {
        if !self.core.root.is_cancelled() {
            self.core.root.cancel();
            self.core.cede("session torn down");
        }
    }
}

impl Drop for AutonomousTurnDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl DriverCore {
    fn reconcile(self: &Arc<Self>) {
        if self.root.is_cancelled() {
            return;
        }
        let mut state = self.state.lock();
        let turn = self.shared.current();

        if !turn.autonomous_applies() {
            if state.busy || state.phase != DriverPhase::Idle || !self.intent.borrow().is_none() {
                let reason = if turn.walkthrough_open {
                    "walkthrough opened"
                } else if turn.snapshot.is_over() {
                    "game over"
                } else {
                    "active participant is human"
                };
                self.cede_locked(&mut state, reason);
            }
            return;
        }

        // A mutating call in flight belongs to the current episode; its step
        // reconciles again once the call settles.
        if self.shared.mutation_in_flight().is_some() {
            return;
        }

        let seat = turn.snapshot.current_player;
        if state.busy && state.seat != Some(seat) {
            self.cede_locked(&mut state, "active participant changed");
        }

        let phase = state.phase;
        match phase {
            DriverPhase::Idle => {
                if state.stalled_at == Some(turn.revision) {
                    return;
                }
                state.stalled_at = None;
                let episode = self.open_episode(&mut state, seat);
                if turn.roll.is_rolled() {
                    // Dice were left showing (a failed choice query, or a
                    // walkthrough that closed mid-turn): pick up from them.
                    self.begin_choice(&mut state, &turn, episode);
                } else {
                    self.begin_continue(&mut state, &turn, episode);
                }
            }
            DriverPhase::ActingOnContinue if turn.roll.is_rolled() => {
                if let Some(episode) = current_episode(&state) {
                    self.begin_choice(&mut state, &turn, episode);
                }
            }
            _ => {}
        }
    }

    fn open_episode(&self, state: &mut DriverState, seat: Seat) -> Episode {
        state.generation += 1;
        state.busy = true;
        state.seat = Some(seat);
        let token = self.root.child_token();
        if let Some(previous) = state.episode.replace(token.clone()) {
            previous.cancel();
        }
        Episode {
            generation: state.generation,
            cancel: token,
        }
    }

    fn begin_continue(
        self: &Arc<Self>,
        state: &mut DriverState,
        turn: &TurnState,
        episode: Episode,
    ) {
        state.phase = DriverPhase::DecidingContinue;
        info!(
            player = player_name(turn),
            generation = episode.generation,
            hops = turn.snapshot.run_progress(),
            "autonomous episode started"
        );
        spawn_named_task("decide-continue", Arc::clone(self).continue_step(episode));
    }

    fn begin_choice(
        self: &Arc<Self>,
        state: &mut DriverState,
        turn: &TurnState,
        episode: Episode,
    ) {
        // hop -> none once the dice are down
        self.set_intent(DecisionIntent::None);

        if turn.roll.is_croaked() {
            state.phase = DriverPhase::ActingOnChoice;
            self.set_intent(DecisionIntent::Croaked);
            let name = player_name(turn);
            info!(
                player = name,
                generation = episode.generation,
                dice = ?turn.roll.dice,
                "croaked"
            );
            self.controller
                .actions()
                .notify_info(ErrorCode::Ai, format!("AI ({name}) Croaked!"));
            spawn_named_task("end-croaked-run", Arc::clone(self).croak_step(episode));
        } else {
            state.phase = DriverPhase::DecidingChoice;
            debug!(
                generation = episode.generation,
                choices = turn.roll.choices.len(),
                "deciding choice"
            );
            spawn_named_task(
                "decide-choice",
                Arc::clone(self).choice_step(episode, turn.roll.clone()),
            );
        }
    }

    async fn continue_step(self: Arc<Self>, episode: Episode) {
        if !self.pause(&episode, self.pacing.think_delay).await {
            return;
        }
        let hop = match self.controller.actions().check_continue().await {
            Ok(hop) => hop,
            Err(err) => return self.fail(&episode, err),
        };
        let intent = if hop {
            DecisionIntent::Hop
        } else {
            DecisionIntent::Stop
        };
        if !self.advance(&episode, DriverPhase::ActingOnContinue, intent) {
            return;
        }
        if !self.pause(&episode, self.pacing.act_delay).await {
            return;
        }
        if hop {
            self.roll(&episode).await;
        } else {
            self.end_run(&episode, false).await;
        }
    }

    async fn choice_step(self: Arc<Self>, episode: Episode, roll: RollOutcome) {
        if !self.pause(&episode, self.pacing.think_delay).await {
            return;
        }
        let choice = match self.controller.actions().choose_column(&roll).await {
            Ok(choice) => choice,
            Err(err) => return self.fail(&episode, err),
        };
        if !roll.offers(&choice) {
            warn!(%choice, "engine picked a pairing that was not offered");
        }
        if !self.advance(&episode, DriverPhase::ActingOnChoice, DecisionIntent::Choose(choice)) {
            return;
        }
        if !self.pause(&episode, self.pacing.act_delay).await {
            return;
        }
        self.choose(&episode, choice).await;
    }

    async fn croak_step(self: Arc<Self>, episode: Episode) {
        if !self.pause(&episode, self.pacing.act_delay).await {
            return;
        }
        self.end_run(&episode, true).await;
    }

    async fn roll(self: &Arc<Self>, episode: &Episode) {
        let held = match self.claim(episode, EngineOp::RollDice) {
            Ok(Some(held)) => held,
            Ok(None) => return,
            Err(err) => return self.fail(episode, err),
        };
        self.shared.clear_roll();
        if !self.pause(episode, self.pacing.roll_delay).await {
            return;
        }
        let result = self.controller.roll_held(&held).await;
        drop(held);
        match result {
            // Dice are down; reconcile moves the episode on to the choice.
            Ok(()) => self.reconcile(),
            Err(err) => self.fail(episode, err),
        }
    }

    async fn choose(self: &Arc<Self>, episode: &Episode, choice: ColumnChoice) {
        let held = match self.claim(episode, EngineOp::ChooseColumns) {
            Ok(Some(held)) => held,
            Ok(None) => return,
            Err(err) => return self.fail(episode, err),
        };
        let result = self.controller.choose_held(&held, choice).await;
        drop(held);
        match result {
            Ok(()) => self.complete(episode),
            Err(err) => self.fail(episode, err),
        }
    }

    async fn end_run(self: &Arc<Self>, episode: &Episode, forced: bool) {
        let held = match self.claim(episode, EngineOp::EndRun) {
            Ok(Some(held)) => held,
            Ok(None) => return,
            Err(err) => return self.fail(episode, err),
        };
        let result = self.controller.end_run_held(&held, forced).await;
        drop(held);
        match result {
            Ok(()) => self.complete(episode),
            Err(err) => self.fail(episode, err),
        }
    }

    /// Sleep unless cancelled first. Returns whether the episode is still
    /// current afterwards.
    async fn pause(&self, episode: &Episode, delay: Duration) -> bool {
        tokio::select! {
            biased;
            _ = episode.cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => self.is_current(episode),
        }
    }

    fn is_current(&self, episode: &Episode) -> bool {
        is_current_locked(&self.state.lock(), episode)
    }

    fn advance(&self, episode: &Episode, phase: DriverPhase, intent: DecisionIntent) -> bool {
        let mut state = self.state.lock();
        if !is_current_locked(&state, episode) {
            debug!(generation = episode.generation, %phase, "stale step dropped");
            return false;
        }
        state.phase = phase;
        self.set_intent(intent);
        info!(generation = episode.generation, %phase, %intent, "decision made");
        true
    }

    /// Take the mutation latch for `op`, but only if the episode is still
    /// current. The generation check and the claim happen under one lock.
    fn claim(&self, episode: &Episode, op: EngineOp) -> Result<Option<MutationGuard>, AppError> {
        let state = self.state.lock();
        if !is_current_locked(&state, episode) {
            debug!(generation = episode.generation, %op, "stale step skipped its call");
            return Ok(None);
        }
        debug!(generation = episode.generation, %op, "mutating call");
        self.shared.begin_mutation(op).map(Some)
    }

    fn complete(self: &Arc<Self>, episode: &Episode) {
        {
            let mut state = self.state.lock();
            if is_current_locked(&state, episode) {
                debug!(generation = episode.generation, "episode complete");
                self.reset_locked(&mut state);
            }
        }
        self.reconcile();
    }

    fn fail(&self, episode: &Episode, err: AppError) {
        let mut state = self.state.lock();
        if !is_current_locked(&state, episode) {
            debug!(generation = episode.generation, error = %err, "stale step failed");
            return;
        }
        let revision = self.shared.current().revision;
        warn!(
            generation = episode.generation,
            phase = %state.phase,
            revision,
            error = %err,
            "autonomous episode failed, waiting for the game state to change"
        );
        self.reset_locked(&mut state);
        state.stalled_at = Some(revision);
    }

    fn cede(&self, reason: &'static str) {
        let mut state = self.state.lock();
        self.cede_locked(&mut state, reason);
    }

    fn cede_locked(&self, state: &mut DriverState, reason: &'static str) {
        let phase = state.phase;
        state.generation += 1;
        self.reset_locked(state);
        state.stalled_at = None;
        info!(reason, %phase, generation = state.generation, "autonomous control ceded");
    }

    fn reset_locked(&self, state: &mut DriverState) {
        if let Some(token) = state.episode.take() {
            token.cancel();
        }
        state.phase = DriverPhase::Idle;
        state.busy = false;
        state.seat = None;
        self.set_intent(DecisionIntent::None);
    }

    fn set_intent(&self, intent: DecisionIntent) {
        self.intent.send_if_modified(|current| {
            if *current == intent {
                return false;
            }
            *current = intent;
            true
        });
    }
}

fn is_current_locked(state: &DriverState, episode: &Episode) -> bool {
    state.generation == episode.generation && !episode.cancel.is_cancelled()
}

fn current_episode(state: &DriverState) -> Option<Episode> {
    state.episode.as_ref().map(|token| Episode {
        generation: state.generation,
        cancel: token.clone(),
    })
}

fn player_name(turn: &TurnState) -> &str {
    turn.active_participant()
        .map(|participant| participant.name.as_str())
        .unwrap_or("?")
}
