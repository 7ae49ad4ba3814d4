#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{NotificationConfig, PacingConfig};
pub use domain::{
    ColumnChoice, ColumnId, DecisionIntent, GameSettings, GameSnapshot, Participant, PlayerMode,
    RollOutcome, StatsSummary,
};
pub use engine::GameEngine;
pub use error::{AppError, EngineError, EngineOp};
pub use errors::ErrorCode;
pub use services::notifications::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use services::session::GameSession;
pub use services::turn_flow::{AutonomousTurnDriver, DriverPhase, TurnController, TurnView};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
