use serde::{Deserialize, Serialize};

use super::dice::ColumnId;

/// End-of-game figures for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Most hops in a run that was banked.
    pub longest_run: usize,
    pub croaked: usize,
    pub banked: usize,
    /// Average of croak odds faced minus croaks suffered, per turn.
    pub luck: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub player_stats: Vec<PlayerStats>,
    /// Column with the most hops relative to its height.
    pub most_contested_column: ColumnId,
    pub total_turns: usize,
}
