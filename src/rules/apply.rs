//! Move application.
//!
//! Moves are assumed to come from the most recent action mask. The only
//! checks made here are the ones needed to keep the grid and piece lists
//! consistent; breaking them is a caller bug and panics.

use crate::core::{Cell, GameState, Move, MoveKind, SkipState};

use super::win::update_winner;

/// Apply `mv` for the player to move, in place.
///
/// - `EndTurn`: clears the skip sequence and passes the turn.
/// - Piece move into an empty neighbor: steps and passes the turn.
/// - Piece move toward an occupied neighbor: jumps, records the skip sequence,
///   and keeps the same player to move.
///
/// Win detection runs whenever the turn passes.
///
/// # Panics
/// Panics if the move was not legal: a plain step during a skip sequence, a
/// step off the board, or a jump landing off the board or on a piece.
pub fn apply_move(state: &mut GameState, mv: Move) -> MoveKind {
    let Move::Piece { piece, direction } = mv else {
        state.pass_turn();
        update_winner(state);
        return MoveKind::EndTurn;
    };

    let player = state.current_player;
    let index = piece as usize;
    let from = state.piece(player, index);
    let one_step = from.step(direction);

    match state.cell(one_step) {
        Cell::Empty => {
            assert!(
                !state.skip.is_active(),
                "plain step by piece {} during a skip sequence",
                piece
            );
            state.relocate(player, index, one_step);
            state.pass_turn();
            update_winner(state);
            MoveKind::Step
        }
        Cell::Occupied(_) => {
            let landing = from.jump(direction);
            assert!(
                state.is_empty(landing),
                "jump by piece {} from {} lands on {:?} at {}",
                piece,
                from,
                state.cell(landing),
                landing
            );
            state.relocate(player, index, landing);
            state.skip = SkipState::Jumping { piece, direction };
            MoveKind::Jump
        }
        Cell::Invalid => panic!("piece {} at {} cannot move {:?} off the board", piece, from, direction),
    }
}
