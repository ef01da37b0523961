//! Win detection.
//!
//! A player wins once all ten of their pieces sit in the opponent's starting
//! row band (rows 13-16 for player one, rows 0-3 for player two). Each band
//! holds exactly ten cells, the opponent's start cells, so this is the same
//! as occupying every one of those cells.

use crate::core::{GameState, Player};

/// The player whose win condition currently holds, checking player one first.
#[must_use]
pub fn detect_winner(state: &GameState) -> Option<Player> {
    Player::ALL.into_iter().find(|&player| {
        let rows = player.target_rows();
        state.pieces(player).iter().all(|coord| rows.contains(&coord.row))
    })
}

/// Record a winner if none is set yet. An existing winner is never replaced.
pub fn update_winner(state: &mut GameState) {
    if state.winner.is_none() {
        state.winner = detect_winner(state);
    }
}
