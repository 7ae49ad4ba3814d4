//! Notification identifiers.
//!
//! Every failure site that reaches the notification sink names itself with
//! one of these codes. Add new codes here; never pass ad-hoc strings.
//!
//! The string forms are the toast identifiers the presentation layer keys
//! on, so repeated failures at the same site replace rather than stack.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Engine operations
    /// Persisted state could not be loaded
    StoreError,
    StartError,
    StopError,
    GameStateError,
    RollDiceError,
    ChooseColumnsError,
    EndRunError,
    StatsError,
    NameError,

    // Turn flow
    /// Engine accepted the call but returned no snapshot for a choice
    ChoiceError,
    /// Autonomous decision query failed
    AiError,
    /// Informational autonomous-player channel
    Ai,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 12] = [
        Self::StoreError,
        Self::StartError,
        Self::StopError,
        Self::GameStateError,
        Self::RollDiceError,
        Self::ChooseColumnsError,
        Self::EndRunError,
        Self::StatsError,
        Self::NameError,
        Self::ChoiceError,
        Self::AiError,
        Self::Ai,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StoreError => "StoreError",
            Self::StartError => "StartError",
            Self::StopError => "StopError",
            Self::GameStateError => "GameStateError",
            Self::RollDiceError => "RollDiceError",
            Self::ChooseColumnsError => "ChooseColumnsError",
            Self::EndRunError => "EndRunError",
            Self::StatsError => "StatsError",
            Self::NameError => "NameError",
            Self::ChoiceError => "choiceError",
            Self::AiError => "aiError",
            Self::Ai => "ai",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique() {
        let unique: HashSet<&str> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
        assert_eq!(unique.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn turn_flow_codes_keep_their_toast_ids() {
        assert_eq!(ErrorCode::ChoiceError.as_str(), "choiceError");
        assert_eq!(ErrorCode::AiError.as_str(), "aiError");
        assert_eq!(format!("{}", ErrorCode::RollDiceError), "RollDiceError");
    }
}
