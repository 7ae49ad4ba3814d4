use std::fmt;

use serde::{Deserialize, Serialize};

use super::dice::ColumnId;

/// Seat index of a participant within the game settings.
pub type Seat = usize;

/// How a participant's turns are driven.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerMode {
    /// Turns are driven by direct input.
    #[default]
    Human,
    /// Autonomous profile that banks early.
    Safe,
    /// Autonomous profile with a balanced risk threshold.
    Normal,
    /// Autonomous profile that keeps hopping.
    Risky,
}

impl PlayerMode {
    /// Every non-human profile is driven by remote decision queries.
    pub const fn is_autonomous(self) -> bool {
        !matches!(self, PlayerMode::Human)
    }
}

impl fmt::Display for PlayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerMode::Human => "Human",
            PlayerMode::Safe => "Safe",
            PlayerMode::Normal => "Normal",
            PlayerMode::Risky => "Risky",
        };
        f.write_str(label)
    }
}

/// A participant as configured for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub mode: PlayerMode,
    pub id: Seat,
    pub name: String,
    /// Columns this participant has claimed, as reported by the engine.
    #[serde(default)]
    pub won_cols: Vec<ColumnId>,
}

impl Participant {
    pub fn new(id: Seat, name: impl Into<String>, mode: PlayerMode) -> Self {
        Self {
            mode,
            id,
            name: name.into(),
            won_cols: Vec::new(),
        }
    }

    pub fn is_autonomous(&self) -> bool {
        self.mode.is_autonomous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_human_requires_direct_input() {
        assert!(!PlayerMode::Human.is_autonomous());
        assert!(PlayerMode::Safe.is_autonomous());
        assert!(PlayerMode::Normal.is_autonomous());
        assert!(PlayerMode::Risky.is_autonomous());
    }

    #[test]
    fn mode_uses_engine_spelling_on_the_wire() {
        let json = serde_json::to_string(&PlayerMode::Risky).unwrap();
        assert_eq!(json, "\"Risky\"");
        let parsed: PlayerMode = serde_json::from_str("\"Safe\"").unwrap();
        assert_eq!(parsed, PlayerMode::Safe);
    }
}
