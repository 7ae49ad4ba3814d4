//! One local game session: the engine, the shared turn state, the direct
//! controller and the autonomous driver, wired together.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::{NotificationConfig, PacingConfig};
use crate::domain::{GameSettings, StatsSummary};
use crate::engine::GameEngine;
use crate::error::AppError;
use crate::services::actions::EngineActions;
use crate::services::notifications::Notifier;
use crate::services::turn_flow::{
    AutonomousTurnDriver, SharedTurn, TurnController, TurnState, TurnView,
};
use crate::services::walkthrough::{TourStep, Walkthrough};

pub struct GameSession {
    controller: TurnController,
    driver: AutonomousTurnDriver,
    walkthrough: Mutex<Walkthrough>,
}

impl GameSession {
    /// Load persisted state, fetch the current game and start the driver.
    ///
    /// Must be called inside a Tokio runtime.
    pub async fn start(
        engine: Arc<dyn GameEngine>,
        notifier: Arc<dyn Notifier>,
        pacing: PacingConfig,
        notices: NotificationConfig,
    ) -> Result<Self, AppError> {
        let actions = EngineActions::new(engine, notifier, notices);
        actions.init_store().await;
        let snapshot = actions.game_state().await?;
        info!(
            players = snapshot.settings.players.len(),
            current_player = snapshot.current_player,
            in_progress = snapshot.in_progress,
            "session started"
        );

        let shared = SharedTurn::new(snapshot);
        let controller = TurnController::new(shared, actions, pacing);
        let driver = AutonomousTurnDriver::spawn(controller.clone(), pacing);
        Ok(Self {
            controller,
            driver,
            walkthrough: Mutex::new(Walkthrough::default()),
        })
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn driver(&self) -> &AutonomousTurnDriver {
        &self.driver
    }

    pub fn state(&self) -> TurnState {
        self.controller.shared().current()
    }

    pub fn watch_state(&self) -> watch::Receiver<TurnState> {
        self.controller.shared().subscribe()
    }

    pub fn view(&self) -> TurnView {
        self.driver.view()
    }

    /// Start a new game and load its first snapshot. `Ok(false)` when the
    /// engine (or local validation) declined.
    pub async fn new_game(&self, settings: &GameSettings) -> Result<bool, AppError> {
        if !self.controller.actions().start_game(settings).await {
            return Ok(false);
        }
        let snapshot = self.controller.actions().game_state().await?;
        info!(players = snapshot.settings.players.len(), "new game started");
        self.controller.shared().commit(snapshot);
        Ok(true)
    }

    /// Replace the snapshot with the engine's current one. A roll on show
    /// stays on show.
    pub async fn reload(&self) -> Result<(), AppError> {
        let snapshot = self.controller.actions().game_state().await?;
        self.controller.shared().replace_snapshot(snapshot);
        Ok(())
    }

    pub fn open_walkthrough(&self) -> &'static TourStep {
        let step = self.walkthrough.lock().open();
        self.controller.shared().set_walkthrough_open(true);
        self.driver.cede("walkthrough opened");
        step
    }

    pub fn walkthrough_step(&self) -> Option<&'static TourStep> {
        self.walkthrough.lock().current()
    }

    pub fn next_walkthrough_step(&self) -> Option<&'static TourStep> {
        let mut walkthrough = self.walkthrough.lock();
        let step = walkthrough.next();
        if !walkthrough.is_open() {
            self.controller.shared().set_walkthrough_open(false);
        }
        step
    }

    pub fn previous_walkthrough_step(&self) -> Option<&'static TourStep> {
        self.walkthrough.lock().previous()
    }

    pub fn close_walkthrough(&self) {
        self.walkthrough.lock().close();
        self.controller.shared().set_walkthrough_open(false);
    }

    /// End-of-game statistics. Only meaningful once there is a winner.
    pub async fn statistics(&self) -> Result<StatsSummary, AppError> {
        if !self.state().snapshot.is_over() {
            debug!("statistics requested before the game is over");
        }
        self.controller.actions().game_statistics().await
    }

    pub async fn random_name(&self, seed: Option<u64>) -> Result<String, AppError> {
        self.controller.actions().name(seed).await
    }

    /// Stop the game on the engine and tear the session down.
    pub async fn stop(self) {
        self.driver.shutdown();
        self.controller.actions().stop_game().await;
        info!("session stopped");
    }

    pub fn shutdown(&self) {
        self.driver.shutdown();
    }
}
