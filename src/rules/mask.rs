//! Legal-move bitmask generation.
//!
//! The action space has 61 slots, so a mask fits in one `u64`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, Direction, GameState, Move, SkipState, N_MOVES};
use crate::core::config::PIECES_PER_PLAYER;

/// Set of legal moves, one bit per action index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMask(u64);

impl ActionMask {
    /// Mask with no legal moves.
    pub const EMPTY: ActionMask = ActionMask(0);

    /// Raw bits; bit `i` is action index `i`.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Mark a move legal.
    #[inline]
    pub fn insert(&mut self, mv: Move) {
        self.0 |= 1u64 << mv.index();
    }

    /// Whether a move is legal.
    #[inline]
    #[must_use]
    pub const fn contains(self, mv: Move) -> bool {
        self.contains_index(mv.index())
    }

    /// Whether an action index is set. Out-of-range indices are never set.
    #[must_use]
    pub const fn contains_index(self, index: usize) -> bool {
        index < N_MOVES && self.0 & (1u64 << index) != 0
    }

    /// Number of legal moves.
    #[must_use]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no move is legal.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether end-turn is offered.
    #[must_use]
    pub const fn can_end_turn(self) -> bool {
        self.contains(Move::EndTurn)
    }

    /// Iterate over legal moves in index order.
    pub fn iter(self) -> impl Iterator<Item = Move> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Move::from_index(index)
        })
    }

    /// Legal moves collected inline.
    #[must_use]
    pub fn moves(self) -> SmallVec<[Move; 16]> {
        self.iter().collect()
    }

    /// Write as `N_MOVES` 0/1 values.
    ///
    /// # Panics
    /// Panics if `out.len() != N_MOVES`.
    pub fn write_to(self, out: &mut [i32]) {
        assert_eq!(out.len(), N_MOVES, "mask row must be {} values", N_MOVES);
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = ((self.0 >> i) & 1) as i32;
        }
    }
}

impl FromIterator<Move> for ActionMask {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut mask = ActionMask::EMPTY;
        for mv in iter {
            mask.insert(mv);
        }
        mask
    }
}

/// Compute the legal moves for the player to move. Does not mutate `state`.
///
/// - Idle: every piece may step into an empty neighbor or jump an occupied one.
/// - Jumping: only the jumping piece may move, only by further jumps, never
///   straight back; end-turn is always offered.
#[must_use]
pub fn action_mask(state: &GameState) -> ActionMask {
    let player = state.current_player;
    let (candidates, jumping, forbidden) = match state.skip {
        SkipState::Idle => (0..PIECES_PER_PLAYER, false, None),
        SkipState::Jumping { piece, direction } => {
            let piece = piece as usize;
            (piece..piece + 1, true, Some(direction.reverse()))
        }
    };

    let mut mask = ActionMask::EMPTY;
    for piece in candidates {
        let from = state.piece(player, piece);
        for direction in Direction::ALL {
            let legal = match state.cell(from.step(direction)) {
                Cell::Invalid => false,
                Cell::Empty => !jumping,
                Cell::Occupied(_) => state.is_empty(from.jump(direction)) && forbidden != Some(direction),
            };
            if legal {
                mask.insert(Move::piece(piece, direction));
            }
        }
    }

    if jumping {
        mask.insert(Move::EndTurn);
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, PLAYER_1_START, PLAYER_2_START};
    use crate::core::Player;

    #[test]
    fn test_start_mask_has_steps_but_no_end_turn() {
        let mask = action_mask(&GameState::new());

        assert!(!mask.can_end_turn());
        assert!(!mask.is_empty());
        // Frontline pieces 6..=9 sit on row 3 and can step down.
        for piece in 6..PIECES_PER_PLAYER {
            let any = Direction::ALL.iter().any(|&d| mask.contains(Move::piece(piece, d)));
            assert!(any, "piece {} should have a move", piece);
        }
        // The tip piece is fully surrounded.
        for d in Direction::ALL {
            assert!(!mask.contains(Move::piece(0, d)));
        }
    }

    #[test]
    fn test_start_mask_jumps_over_own_pieces() {
        let mask = action_mask(&GameState::new());

        // Piece 3 at (2,5) jumps SE over (3,5) onto (4,6).
        assert!(mask.contains(Move::piece(3, Direction::SE)));
    }

    #[test]
    fn test_mask_bits_match_destinations() {
        let state = GameState::new();
        let mask = action_mask(&state);

        for mv in mask.iter() {
            let Move::Piece { piece, direction } = mv else {
                panic!("unexpected end turn");
            };
            let from = state.piece(Player::One, piece as usize);
            let one = from.step(direction);
            let dest = if state.is_empty(one) { one } else { from.jump(direction) };
            assert!(state.is_empty(dest), "{:?} lands on {}", mv, dest);
        }
    }

    #[test]
    fn test_jumping_restricts_to_one_piece() {
        let mut p1 = PLAYER_1_START;
        p1[0] = Coord::new(9, 6);
        let mut p2 = PLAYER_2_START;
        p2[9] = Coord::new(8, 6);
        let mut state = GameState::from_positions(p1, p2).unwrap();
        state.skip = SkipState::Jumping {
            piece: 0,
            direction: Direction::SE,
        };

        let mask = action_mask(&state);

        assert!(mask.can_end_turn());
        for mv in mask.iter().filter(|m| !m.is_end_turn()) {
            assert!(matches!(mv, Move::Piece { piece: 0, .. }), "{:?}", mv);
        }
        // Jumping back NW over (8,6) would undo the last jump.
        assert!(!mask.contains(Move::piece(0, Direction::NW)));
    }

    #[test]
    fn test_jumping_with_no_continuation_only_ends_turn() {
        let mut p1 = PLAYER_1_START;
        p1[0] = Coord::new(9, 6);
        let mut state = GameState::from_positions(p1, PLAYER_2_START).unwrap();
        state.skip = SkipState::Jumping {
            piece: 0,
            direction: Direction::SE,
        };

        let mask = action_mask(&state);
        assert_eq!(mask.moves().as_slice(), &[Move::EndTurn]);
    }

    #[test]
    fn test_mask_iteration_and_count() {
        let mask: ActionMask = [Move::EndTurn, Move::piece(1, Direction::E), Move::piece(0, Direction::NE)]
            .into_iter()
            .collect();

        assert_eq!(mask.count(), 3);
        assert_eq!(
            mask.moves().as_slice(),
            &[Move::piece(0, Direction::NE), Move::piece(1, Direction::E), Move::EndTurn]
        );
        assert!(mask.contains_index(60));
        assert!(!mask.contains_index(61));
        assert!(!mask.contains_index(200));
    }

    #[test]
    fn test_write_to() {
        let mask: ActionMask = [Move::piece(0, Direction::NE), Move::piece(0, Direction::SE), Move::EndTurn]
            .into_iter()
            .collect();
        let mut out = [9; N_MOVES];
        mask.write_to(&mut out);

        assert_eq!(&out[..4], &[1, 0, 1, 0]);
        assert_eq!(out[60], 1);
        assert_eq!(out.iter().sum::<i32>(), 3);
    }
}
