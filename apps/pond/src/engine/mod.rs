//! Remote rules engine interface.

use async_trait::async_trait;

use crate::domain::{
    ColumnChoice, EngineColumns, GameSettings, GameSnapshot, RollOutcome, StatsSummary,
};
use crate::error::EngineError;

/// The authoritative rules engine.
///
/// Every call may fail. Legality, progress, win detection and persistence
/// all live on the other side of this trait; callers only carry what it
/// reports back.
#[async_trait]
pub trait GameEngine: Send + Sync {
    /// Load persisted state.
    async fn init_store(&self) -> Result<(), EngineError>;

    async fn start_game(&self, settings: &GameSettings) -> Result<bool, EngineError>;

    async fn stop_game(&self) -> Result<(), EngineError>;

    async fn game_state(&self) -> Result<GameSnapshot, EngineError>;

    /// Roll four dice for the active participant.
    ///
    /// `Ok(None)` means the engine accepted the call but had nothing to roll.
    async fn roll_dice(&self) -> Result<Option<RollOutcome>, EngineError>;

    /// Advance the columns of a pairing, given as zero-based engine indices.
    ///
    /// `Ok(None)` means the engine produced no snapshot for the pairing.
    async fn choose_columns(&self, columns: EngineColumns)
        -> Result<Option<GameSnapshot>, EngineError>;

    /// End the current run. `forced` marks an involuntary end after a croak;
    /// otherwise the run's progress is banked.
    async fn end_run(&self, forced: bool) -> Result<GameSnapshot, EngineError>;

    /// Autonomous continue-or-stop decision for the active participant.
    async fn check_continue(&self) -> Result<bool, EngineError>;

    /// Autonomous pick among the legal pairings of `outcome`.
    async fn choose_column(&self, outcome: &RollOutcome) -> Result<ColumnChoice, EngineError>;

    async fn game_statistics(&self) -> Result<StatsSummary, EngineError>;

    /// A random frog name; the same seed yields the same name.
    async fn name(&self, seed: Option<u64>) -> Result<String, EngineError>;
}
