//! Static presentation tables.
//!
//! Seat colours and mode labels belong to the rendering layer; nothing in
//! the turn state machine reads them.

use crate::domain::{PlayerMode, Seat};

/// Counter colour per seat, indexed by seat.
pub const PLAYER_COLORS: [&str; 4] = ["white", "red-500", "yellow-400", "purple-500"];

/// Every selectable mode in menu order.
pub const PLAYER_MODES: [PlayerMode; 4] = [
    PlayerMode::Human,
    PlayerMode::Safe,
    PlayerMode::Normal,
    PlayerMode::Risky,
];

pub fn color_for_seat(seat: Seat) -> Option<&'static str> {
    PLAYER_COLORS.get(seat).copied()
}

pub const fn mode_label(mode: PlayerMode) -> &'static str {
    match mode {
        PlayerMode::Human => "Human",
        PlayerMode::Safe => "AI (Safe)",
        PlayerMode::Normal => "AI (Normal)",
        PlayerMode::Risky => "AI (Risky)",
    }
}
