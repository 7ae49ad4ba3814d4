use std::fmt;

use tokio_util::sync::CancellationToken;

/// Where the autonomous driver is within one decision episode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    #[default]
    Idle,
    DecidingContinue,
    ActingOnContinue,
    DecidingChoice,
    ActingOnChoice,
}

impl DriverPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DecidingContinue => "deciding_continue",
            Self::ActingOnContinue => "acting_on_continue",
            Self::DecidingChoice => "deciding_choice",
            Self::ActingOnChoice => "acting_on_choice",
        }
    }
}

impl fmt::Display for DriverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket held by every scheduled step.
///
/// A step may touch shared state only while its generation is still the
/// driver's current one and its token has not been cancelled.
#[derive(Debug, Clone)]
pub(crate) struct Episode {
    pub generation: u64,
    pub cancel: CancellationToken,
}
