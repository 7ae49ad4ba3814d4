//! Primitive action wrappers over the remote engine.
//!
//! Each wrapper reports its own failure to the notification sink with a
//! message naming the operation. What reaches the caller afterwards depends
//! on the operation:
//!
//! - `init_store`, `stop_game`: nothing, the notice is the whole story
//! - `start_game`: `false`
//! - `roll_dice`, `choose_columns`: `None`
//! - everything else: the error itself, for the caller to decide

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::domain::snapshot::{MAX_SEATS, MIN_PLAYERS};
use crate::domain::{ColumnChoice, GameSettings, GameSnapshot, RollOutcome, StatsSummary};
use crate::engine::GameEngine;
use crate::error::{code_for_op, AppError, EngineError};
use crate::errors::ErrorCode;
use crate::services::notifications::{Notice, Notifier};

#[derive(Clone)]
pub struct EngineActions {
    engine: Arc<dyn GameEngine>,
    notifier: Arc<dyn Notifier>,
    notices: NotificationConfig,
}

impl EngineActions {
    pub fn new(
        engine: Arc<dyn GameEngine>,
        notifier: Arc<dyn Notifier>,
        notices: NotificationConfig,
    ) -> Self {
        Self {
            engine,
            notifier,
            notices,
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn notify_error(&self, id: ErrorCode, message: impl Into<String>) {
        self.notifier
            .notify(Notice::error(id, message, self.notices.timeout));
    }

    pub fn notify_info(&self, id: ErrorCode, message: impl Into<String>) {
        self.notifier
            .notify(Notice::info(id, message, self.notices.timeout));
    }

    fn report(&self, err: &EngineError, message: String) {
        warn!(op = %err.op, kind = ?err.kind, detail = %err.detail, "engine call failed");
        self.notify_error(code_for_op(err.op), message);
    }

    pub async fn init_store(&self) {
        if let Err(err) = self.engine.init_store().await {
            self.report(&err, format!("Failed to initialize game storage: {}", err.detail));
        }
    }

    /// Validate locally, then ask the engine to start. Invalid settings never
    /// reach the engine.
    pub async fn start_game(&self, settings: &GameSettings) -> bool {
        if let Err(err) = validate_settings(settings) {
            warn!(error = %err, "refusing to start game");
            self.notify_error(ErrorCode::StartError, format!("Failed to start game: {err}"));
            return false;
        }
        match self.engine.start_game(settings).await {
            Ok(started) => {
                debug!(players = settings.players.len(), started, "start_game answered");
                started
            }
            Err(err) => {
                self.report(&err, format!("Failed to start game: {}", err.detail));
                false
            }
        }
    }

    pub async fn stop_game(&self) {
        if let Err(err) = self.engine.stop_game().await {
            self.report(&err, format!("Failed to stop game: {}", err.detail));
        }
    }

    pub async fn roll_dice(&self) -> Option<RollOutcome> {
        match self.engine.roll_dice().await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.report(&err, format!("Failed to roll dice: {}", err.detail));
                None
            }
        }
    }

    /// Translate the pairing to engine indices and submit it.
    pub async fn choose_columns(&self, choice: ColumnChoice) -> Option<GameSnapshot> {
        let columns = choice.engine_columns();
        debug!(choice = %choice, first = columns.first, second = ?columns.second, "choose_columns");
        match self.engine.choose_columns(columns).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.report(&err, format!("Failed to choose columns: {}", err.detail));
                None
            }
        }
    }

    pub async fn end_run(&self, forced: bool) -> Result<GameSnapshot, AppError> {
        self.engine.end_run(forced).await.map_err(|err| {
            self.report(&err, format!("Failed to end run: {}", err.detail));
            err.into()
        })
    }

    pub async fn game_state(&self) -> Result<GameSnapshot, AppError> {
        self.engine.game_state().await.map_err(|err| {
            self.report(&err, format!("Failed to load game state: {}", err.detail));
            err.into()
        })
    }

    pub async fn game_statistics(&self) -> Result<StatsSummary, AppError> {
        self.engine.game_statistics().await.map_err(|err| {
            self.report(&err, format!("Failed to load game statistics: {}", err.detail));
            err.into()
        })
    }

    pub async fn name(&self, seed: Option<u64>) -> Result<String, AppError> {
        self.engine.name(seed).await.map_err(|err| {
            self.report(&err, format!("Failed to generate a name: {}", err.detail));
            err.into()
        })
    }

    pub async fn check_continue(&self) -> Result<bool, AppError> {
        self.engine.check_continue().await.map_err(|err| {
            self.report(&err, "AI encountered an error deciding.".to_string());
            AppError::decision(err.to_string())
        })
    }

    pub async fn choose_column(&self, outcome: &RollOutcome) -> Result<ColumnChoice, AppError> {
        self.engine.choose_column(outcome).await.map_err(|err| {
            self.report(&err, "AI encountered an error choosing.".to_string());
            AppError::decision(err.to_string())
        })
    }
}

pub fn validate_settings(settings: &GameSettings) -> Result<(), AppError> {
    let players = settings.players.len();
    if !(MIN_PLAYERS..=MAX_SEATS).contains(&players) {
        return Err(AppError::config(format!(
            "a game needs {MIN_PLAYERS} to {MAX_SEATS} players, got {players}"
        )));
    }
    if settings.win_cols == 0 {
        return Err(AppError::config("win_cols must be at least 1"));
    }
    Ok(())
}
