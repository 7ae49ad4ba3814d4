//! Direct-input turn controller.
//!
//! Forwards a human participant's roll, choice and end-run requests to the
//! engine and keeps the shared roll in step. The autonomous driver enacts
//! its decisions through the same `*_held` primitives, so both paths share
//! one mutation latch and one set of state updates.

use tracing::{debug, info, warn};

use crate::config::PacingConfig;
use crate::domain::ColumnChoice;
use crate::error::{AppError, EngineError, EngineOp};
use crate::errors::ErrorCode;
use crate::services::actions::EngineActions;

use super::state::{MutationGuard, SharedTurn, TurnState};

#[derive(Clone)]
pub struct TurnController {
    shared: SharedTurn,
    actions: EngineActions,
    pacing: PacingConfig,
}

impl TurnController {
    pub fn new(shared: SharedTurn, actions: EngineActions, pacing: PacingConfig) -> Self {
        Self {
            shared,
            actions,
            pacing,
        }
    }

    pub fn shared(&self) -> &SharedTurn {
        &self.shared
    }

    pub fn actions(&self) -> &EngineActions {
        &self.actions
    }

    /// Clear the shown roll, pause briefly, then roll.
    ///
    /// Does nothing while an autonomous participant is active or while dice
    /// are already showing.
    pub async fn request_roll(&self) -> Result<(), AppError> {
        let state = self.shared.current();
        if !accepts_direct_input(&state, EngineOp::RollDice)? {
            return Ok(());
        }
        if state.roll.is_rolled() {
            debug!("roll ignored, dice already showing");
            return Ok(());
        }

        let held = self.shared.begin_mutation(EngineOp::RollDice)?;
        self.shared.clear_roll();
        tokio::time::sleep(self.pacing.roll_delay).await;
        self.roll_held(&held).await
    }

    /// Submit one of the offered pairings. A pairing the shown roll does not
    /// offer is ignored.
    pub async fn request_choice(&self, choice: ColumnChoice) -> Result<(), AppError> {
        let state = self.shared.current();
        if !accepts_direct_input(&state, EngineOp::ChooseColumns)? {
            return Ok(());
        }
        if !state.roll.offers(&choice) {
            debug!(
                %choice,
                offered = state.roll.choices.len(),
                "choice ignored, not offered by the shown roll"
            );
            return Ok(());
        }
        let held = self.shared.begin_mutation(EngineOp::ChooseColumns)?;
        self.choose_held(&held, choice).await
    }

    /// End the run: `forced` after a croak, otherwise bank the progress.
    ///
    /// Banking is only possible before the dice are rolled, and a forced end
    /// only once they have croaked; any other request is ignored.
    pub async fn request_end_run(&self, forced: bool) -> Result<(), AppError> {
        let state = self.shared.current();
        if !accepts_direct_input(&state, EngineOp::EndRun)? {
            return Ok(());
        }
        let fits_roll = if forced {
            state.roll.is_croaked()
        } else {
            !state.roll.is_rolled()
        };
        if !fits_roll {
            debug!(
                forced,
                rolled = state.roll.is_rolled(),
                croaked = state.roll.is_croaked(),
                "end of run ignored, does not match the shown roll"
            );
            return Ok(());
        }
        if !forced && state.snapshot.run_progress() == 0 {
            debug!("voluntary end requested with no run progress");
        }
        let held = self.shared.begin_mutation(EngineOp::EndRun)?;
        self.end_run_held(&held, forced).await
    }

    /// Roll now. The caller owns the latch and any pacing.
    pub(crate) async fn roll_held(&self, _held: &MutationGuard) -> Result<(), AppError> {
        match self.actions.roll_dice().await {
            Some(outcome) => {
                info!(dice = ?outcome.dice, choices = outcome.choices.len(), "dice landed");
                self.shared.set_roll(outcome);
                Ok(())
            }
            None => Err(EngineError::rejected(EngineOp::RollDice, "no dice returned").into()),
        }
    }

    /// Submit `choice`. The roll is cleared whatever the engine answers; the
    /// snapshot is replaced only when one comes back.
    pub(crate) async fn choose_held(
        &self,
        _held: &MutationGuard,
        choice: ColumnChoice,
    ) -> Result<(), AppError> {
        let result = self.actions.choose_columns(choice).await;
        match result {
            Some(snapshot) => {
                info!(%choice, hops = snapshot.hops, "columns chosen");
                self.shared.commit(snapshot);
                Ok(())
            }
            None => {
                self.shared.clear_roll();
                self.actions.notify_error(
                    ErrorCode::ChoiceError,
                    "Something went wrong choosing columns",
                );
                Err(EngineError::rejected(EngineOp::ChooseColumns, "no snapshot returned").into())
            }
        }
    }

    pub(crate) async fn end_run_held(
        &self,
        _held: &MutationGuard,
        forced: bool,
    ) -> Result<(), AppError> {
        let snapshot = self.actions.end_run(forced).await?;
        info!(forced, next_player = snapshot.current_player, "run ended");
        self.shared.commit(snapshot);
        Ok(())
    }
}

fn accepts_direct_input(state: &TurnState, op: EngineOp) -> Result<bool, AppError> {
    match state.active_participant() {
        Some(participant) if participant.is_autonomous() => {
            debug!(
                %op,
                player = %participant.name,
                mode = %participant.mode,
                "direct input ignored on autonomous turn"
            );
            Ok(false)
        }
        Some(_) => Ok(true),
        None => {
            warn!(
                %op,
                seat = state.snapshot.current_player,
                "direct input with no active participant"
            );
            Err(AppError::NoActiveTurn)
        }
    }
}
