//! Turn orchestration: direct input and the autonomous driver over one
//! shared turn state.

pub mod controller;
pub mod driver;
pub mod episode;
pub mod presentation;
pub mod state;

pub use controller::TurnController;
pub use driver::AutonomousTurnDriver;
pub use episode::DriverPhase;
pub use presentation::{ChoiceView, RollControl, TurnView};
pub use state::{MutationGuard, SharedTurn, TurnState};
