//! Rules engine trait and the standard rule set.
//!
//! Callers that drive games (the batch driver, the replay validator, search
//! code outside this crate) go through `RulesEngine` rather than the free
//! functions, so an alternative rule set can be swapped in.

use smallvec::SmallVec;

use crate::core::{GameState, Move, MoveKind, Player};

use super::apply::apply_move;
use super::mask::{action_mask, ActionMask};

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `action_mask`: Must not mutate state; may be called concurrently
/// - `apply_move`: Must be deterministic; only called with masked moves
/// - `winner`: Return None while the game continues
pub trait RulesEngine: Send + Sync {
    /// Legal moves for the player to move.
    fn action_mask(&self, state: &GameState) -> ActionMask;

    /// Apply a legal move in place.
    fn apply_move(&self, state: &mut GameState, mv: Move) -> MoveKind;

    /// The decided winner, if any.
    fn winner(&self, state: &GameState) -> Option<Player>;

    // === Convenience Methods ===

    /// Enumerate legal moves.
    fn legal_moves(&self, state: &GameState) -> SmallVec<[Move; 16]> {
        self.action_mask(state).moves()
    }

    /// Whether `mv` is legal right now.
    fn is_legal(&self, state: &GameState, mv: Move) -> bool {
        self.action_mask(state).contains(mv)
    }
}

/// Standard two-player rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRules;

impl RulesEngine for StandardRules {
    fn action_mask(&self, state: &GameState) -> ActionMask {
        action_mask(state)
    }

    fn apply_move(&self, state: &mut GameState, mv: Move) -> MoveKind {
        apply_move(state, mv)
    }

    fn winner(&self, state: &GameState) -> Option<Player> {
        state.winner
    }
}
