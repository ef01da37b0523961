//! Shared helpers for integration tests.

#![allow(dead_code)]

use chinese_checkers::{action_mask, apply_move, GameState, Move};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for a test seed.
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A uniformly random legal move, or None if the mask is empty.
pub fn random_move(state: &GameState, rng: &mut ChaCha8Rng) -> Option<Move> {
    let moves = action_mask(state).moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.gen_range(0..moves.len())])
}

/// Play up to `plies` random legal moves from the start position.
pub fn random_state(seed: u64, plies: usize) -> GameState {
    let mut rng = rng(seed);
    let mut state = GameState::new();
    for _ in 0..plies {
        match random_move(&state, &mut rng) {
            Some(mv) => {
                apply_move(&mut state, mv);
            }
            None => break,
        }
    }
    state
}
