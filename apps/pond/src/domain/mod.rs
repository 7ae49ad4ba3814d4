//! Domain types shared by the turn controller and the autonomous driver.
//!
//! Game legality is owned by the engine; these types only carry what it
//! reports.

pub mod dice;
pub mod intent;
pub mod player;
pub mod snapshot;
pub mod stats;

pub use dice::{ColumnChoice, ColumnId, EngineColumns, InvalidColumn, RollOutcome};
pub use intent::DecisionIntent;
pub use player::{Participant, PlayerMode, Seat};
pub use snapshot::{Column, GameSettings, GameSnapshot};
pub use stats::{PlayerStats, StatsSummary};
