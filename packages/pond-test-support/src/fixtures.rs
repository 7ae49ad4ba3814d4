//! Snapshot and roll fixtures.

use pond::domain::dice::{MAX_COLUMN, MIN_COLUMN};
use pond::domain::snapshot::{Column, MAX_SEATS};
use pond::domain::{
    ColumnChoice, ColumnId, GameSettings, GameSnapshot, Participant, PlayerMode, RollOutcome,
};

const NAMES: [&str; MAX_SEATS] = ["Sir Hopsalot", "Lily Padster", "Croaky Joe", "Bog Zilla"];

/// Eleven empty columns, heights following the usual 3..13..3 shape.
pub fn columns() -> Vec<Column> {
    (MIN_COLUMN..=MAX_COLUMN)
        .filter_map(|sum| ColumnId::new(sum).ok())
        .map(|col| {
            let distance = col.get().abs_diff(7) as usize;
            Column {
                col,
                height: 13 - 2 * distance,
                hops: [0; MAX_SEATS],
                risked: 0,
                locked: None,
            }
        })
        .collect()
}

/// An in-progress game with one participant per mode, seat order kept.
pub fn snapshot(modes: &[PlayerMode], current_player: usize) -> GameSnapshot {
    let players = modes
        .iter()
        .enumerate()
        .map(|(seat, mode)| Participant::new(seat, NAMES[seat % MAX_SEATS], *mode))
        .collect();
    GameSnapshot {
        in_progress: true,
        settings: GameSettings {
            players,
            win_cols: 3,
        },
        current_player,
        hops: 0,
        columns: columns(),
        winner: None,
    }
}

/// Same game, with the run progressed by `hops`.
pub fn with_hops(mut snapshot: GameSnapshot, hops: usize) -> GameSnapshot {
    snapshot.hops = hops;
    snapshot
}

/// Same game, handed to the next seat with a fresh run.
pub fn next_turn(mut snapshot: GameSnapshot) -> GameSnapshot {
    let seats = snapshot.settings.players.len().max(1);
    snapshot.current_player = (snapshot.current_player + 1) % seats;
    snapshot.hops = 0;
    for column in &mut snapshot.columns {
        column.risked = 0;
    }
    snapshot
}

/// Build a pairing from dice sums. Panics on an out-of-range sum.
pub fn choice(first: u8, second: Option<u8>) -> ColumnChoice {
    ColumnChoice::from_sums(first, second).expect("column sums are in range")
}

/// Dice `[2, 3, 4, 5]` offering `5 & 9` and `6 & 8`.
pub fn roll() -> RollOutcome {
    RollOutcome::new([2, 3, 4, 5], vec![choice(5, Some(9)), choice(6, Some(8))])
}

/// Dice with no legal pairing.
pub fn croaked_roll() -> RollOutcome {
    RollOutcome::new([1, 1, 1, 1], Vec::new())
}
