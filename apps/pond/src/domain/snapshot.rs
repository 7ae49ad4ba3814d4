//! Authoritative game state as returned by the engine.

use serde::{Deserialize, Serialize};

use super::dice::ColumnId;
use super::player::{Participant, Seat};

/// Seats tracked per column by the engine.
pub const MAX_SEATS: usize = 4;
pub const MIN_PLAYERS: usize = 2;
pub const DEFAULT_WIN_COLS: usize = 3;

/// One lilypad track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub col: ColumnId,
    pub height: usize,
    /// Settled progress for each seat.
    pub hops: [usize; MAX_SEATS],
    /// Uncommitted hops of the active participant in this column.
    pub risked: usize,
    /// Seat that claimed the column.
    pub locked: Option<Seat>,
}

impl Column {
    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub players: Vec<Participant>,
    /// Columns a participant must claim to win.
    pub win_cols: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            win_cols: DEFAULT_WIN_COLS,
        }
    }
}

/// Replaced wholesale after every mutating call; never merged locally.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    #[serde(default)]
    pub in_progress: bool,
    pub settings: GameSettings,
    pub current_player: Seat,
    /// Hops made in the current uncommitted run.
    pub hops: usize,
    pub columns: Vec<Column>,
    pub winner: Option<Participant>,
}

impl GameSnapshot {
    pub fn active_participant(&self) -> Option<&Participant> {
        self.settings.players.get(self.current_player)
    }

    /// True when the active participant is driven by decision queries.
    pub fn active_is_autonomous(&self) -> bool {
        self.active_participant()
            .is_some_and(Participant::is_autonomous)
    }

    pub fn run_progress(&self) -> usize {
        self.hops
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Columns picked in the current run.
    pub fn risked_columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.columns
            .iter()
            .filter(|column| column.risked > 0)
            .map(|column| column.col)
    }

    pub fn locked_columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.columns
            .iter()
            .filter(|column| column.is_locked())
            .map(|column| column.col)
    }
}
