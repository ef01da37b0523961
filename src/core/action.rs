//! Move representation: (piece, direction) pairs plus end-turn.
//!
//! Moves are encoded as indices into the 61-slot action space:
//! - `piece * 6 + direction` for the 60 piece moves
//! - `60` for end-turn
//!
//! Whether a piece move is a plain step or a jump is not part of the move; it
//! follows from the board when the move is applied.

use serde::{Deserialize, Serialize};

use super::config::{N_DIRECTIONS, N_MOVES, PIECES_PER_PLAYER};
use crate::error::EngineError;

/// A hex direction. Discriminants are the packed direction codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    NE = 0,
    E = 1,
    SE = 2,
    SW = 3,
    W = 4,
    NW = 5,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; N_DIRECTIONS] = [
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Direction index (0..6).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode a direction index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < N_DIRECTIONS {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// The opposite direction (`d + 3 mod 6`).
    #[inline]
    #[must_use]
    pub const fn reverse(self) -> Self {
        Self::ALL[(self.index() + 3) % N_DIRECTIONS]
    }
}

/// A move for the current player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Move piece `piece` one step, or jump, in `direction`.
    Piece { piece: u8, direction: Direction },
    /// Conclude a skip sequence and pass the turn.
    EndTurn,
}

impl Move {
    /// Index of the end-turn slot.
    pub const END_TURN_INDEX: usize = N_MOVES - 1;

    /// Create a piece move.
    ///
    /// # Panics
    /// Panics if `piece` is not below `PIECES_PER_PLAYER`.
    #[must_use]
    pub fn piece(piece: usize, direction: Direction) -> Self {
        assert!(piece < PIECES_PER_PLAYER, "piece index {} out of range", piece);
        Move::Piece {
            piece: piece as u8,
            direction,
        }
    }

    /// Decode an action index.
    ///
    /// ```
    /// use chinese_checkers::core::{Direction, Move};
    ///
    /// assert_eq!(Move::from_index(2), Some(Move::piece(0, Direction::SE)));
    /// assert_eq!(Move::from_index(60), Some(Move::EndTurn));
    /// assert_eq!(Move::from_index(61), None);
    /// ```
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index == Self::END_TURN_INDEX {
            return Some(Move::EndTurn);
        }
        if index > Self::END_TURN_INDEX {
            return None;
        }
        Some(Move::Piece {
            piece: (index / N_DIRECTIONS) as u8,
            direction: Direction::ALL[index % N_DIRECTIONS],
        })
    }

    /// Decode a signed action index as found in move buffers.
    pub fn try_from_code(code: i32) -> Result<Self, EngineError> {
        usize::try_from(code)
            .ok()
            .and_then(Self::from_index)
            .ok_or(EngineError::MoveOutOfRange { element: 0, index: code })
    }

    /// Encode as an action index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Move::Piece { piece, direction } => piece as usize * N_DIRECTIONS + direction.index(),
            Move::EndTurn => Self::END_TURN_INDEX,
        }
    }

    /// Whether this is the end-turn move.
    #[must_use]
    pub const fn is_end_turn(self) -> bool {
        matches!(self, Move::EndTurn)
    }
}

/// What applying a move did to the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Single step into an empty neighbor; the turn passed.
    Step,
    /// Jump over an occupied neighbor; the same player continues.
    Jump,
    /// Explicit end of turn; the turn passed.
    EndTurn,
}

impl MoveKind {
    /// Whether the turn advanced to the other player.
    #[must_use]
    pub const fn ends_turn(self) -> bool {
        !matches!(self, MoveKind::Jump)
    }
}
