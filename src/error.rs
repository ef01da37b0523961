//! Engine error type.
//!
//! These cover malformed buffers and batch shape mismatches at the engine
//! boundary. Rule violations inside a single move application are contract
//! breaches and panic instead; see `rules::apply`.

use crate::core::config::{N_MOVES, STATE_LEN};

/// Errors reported by the packed-state codec and the batch driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The state buffer does not hold a whole number of packed states.
    #[error("state buffer length {len} is not a multiple of {}", STATE_LEN)]
    BufferLength { len: usize },

    /// The number of moves does not match the number of states.
    #[error("batch holds {states} states but {moves} moves were supplied")]
    BatchMismatch { states: usize, moves: usize },

    /// The mask output buffer has the wrong size.
    #[error("mask buffer length {len} does not match expected {expected}")]
    MaskLength { len: usize, expected: usize },

    /// A move index lies outside the action space.
    #[error("move index {index} for element {element} is outside [0, {})", N_MOVES)]
    MoveOutOfRange { element: usize, index: i32 },

    /// Strict mode: the move is not set in the element's action mask.
    #[error("move {index} is not legal for element {element}")]
    IllegalMove { element: usize, index: usize },

    /// A packed metadata or cell field holds an out-of-range value.
    #[error("invalid value {value} for field `{field}`")]
    InvalidField { field: &'static str, value: i32 },

    /// A piece sits on a coordinate that is not a board cell.
    #[error("piece {piece} of player {player} is off the board at ({row}, {col})")]
    PieceOffBoard {
        player: i32,
        piece: usize,
        row: i32,
        col: i32,
    },

    /// Grid and piece lists disagree, or two pieces share a cell.
    #[error("state invariant violated: {0}")]
    Inconsistent(String),

    /// Error attributed to one element of a batch.
    #[error("batch element {element}: {source}")]
    Element {
        element: usize,
        #[source]
        source: Box<EngineError>,
    },

    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl EngineError {
    /// Attribute this error to a batch element.
    #[must_use]
    pub fn at(self, element: usize) -> Self {
        match self {
            EngineError::MoveOutOfRange { index, .. } => EngineError::MoveOutOfRange { element, index },
            EngineError::IllegalMove { index, .. } => EngineError::IllegalMove { element, index },
            other => EngineError::Element {
                element,
                source: Box::new(other),
            },
        }
    }
}
