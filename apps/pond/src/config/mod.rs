//! Runtime configuration loaded from the environment, plus static
//! presentation tables.

pub mod pacing;
pub mod palette;

pub use pacing::{NotificationConfig, PacingConfig};
