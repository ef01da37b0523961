//! Board constants, packed-layout offsets, and batch configuration.
//!
//! ## Packed state layout
//!
//! One game state packs into `STATE_LEN` `i32` values:
//!
//! ```text
//! [grid: ROWS*COLS] [player 1 pieces: 10 x (row, col)] [player 2 pieces: 10 x (row, col)]
//! [current_player] [last_skipped_piece] [last_direction] [winner] [turn_count]
//! ```
//!
//! This is the wire format shared with external drivers, so the offsets below
//! must never change.

use serde::{Deserialize, Serialize};

/// Number of players.
pub const N_PLAYERS: usize = 2;

/// Pieces owned by each player.
pub const PIECES_PER_PLAYER: usize = 10;

/// Hex directions per cell.
pub const N_DIRECTIONS: usize = 6;

/// Grid rows.
pub const ROWS: usize = 17;

/// Grid columns.
pub const COLS: usize = 13;

/// Cells in the rectangular grid, valid or not.
pub const NUM_CELLS: usize = ROWS * COLS;

/// Size of the action space: one slot per (piece, direction) plus end-turn.
pub const N_MOVES: usize = PIECES_PER_PLAYER * N_DIRECTIONS + 1;

/// Offset of the first player-1 piece coordinate.
pub const P1_PIECES_OFFSET: usize = NUM_CELLS;

/// Offset of the first player-2 piece coordinate.
pub const P2_PIECES_OFFSET: usize = P1_PIECES_OFFSET + PIECES_PER_PLAYER * 2;

/// Offset of `current_player`.
pub const CURRENT_PLAYER_OFFSET: usize = P2_PIECES_OFFSET + PIECES_PER_PLAYER * 2;

/// Offset of `last_skipped_piece`.
pub const LAST_SKIPPED_OFFSET: usize = CURRENT_PLAYER_OFFSET + 1;

/// Offset of `last_direction`.
pub const LAST_DIRECTION_OFFSET: usize = CURRENT_PLAYER_OFFSET + 2;

/// Offset of `winner`.
pub const WINNER_OFFSET: usize = CURRENT_PLAYER_OFFSET + 3;

/// Offset of `turn_count`.
pub const TURN_COUNT_OFFSET: usize = CURRENT_PLAYER_OFFSET + 4;

/// Metadata fields after the piece lists.
pub const GAME_METADATA: usize = 5;

/// Length of one packed state.
pub const STATE_LEN: usize = NUM_CELLS + N_PLAYERS * PIECES_PER_PLAYER * 2 + GAME_METADATA;

/// Batch driver configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads for batch calls.
    /// `None` runs on the global rayon pool; `Some(n)` builds a dedicated pool.
    pub num_threads: Option<usize>,

    /// Minimum batch elements handed to a single parallel task.
    /// Small batches stay on one thread.
    pub min_chunk: usize,

    /// Check every move against a freshly computed mask before applying.
    /// Off by default: callers are expected to derive moves from their own masks.
    pub strict: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_chunk: 64,
            strict: false,
        }
    }
}

impl BatchConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a dedicated pool with `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Set the minimum elements per parallel task.
    pub fn with_min_chunk(mut self, min_chunk: usize) -> Self {
        self.min_chunk = min_chunk.max(1);
        self
    }

    /// Enable or disable mask verification before applying moves.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(NUM_CELLS, 221);
        assert_eq!(N_MOVES, 61);
        assert_eq!(STATE_LEN, 266);
        assert_eq!(TURN_COUNT_OFFSET, STATE_LEN - 1);
    }

    #[test]
    fn test_metadata_order() {
        assert_eq!(CURRENT_PLAYER_OFFSET, 261);
        assert_eq!(LAST_SKIPPED_OFFSET, 262);
        assert_eq!(LAST_DIRECTION_OFFSET, 263);
        assert_eq!(WINNER_OFFSET, 264);
        assert_eq!(TURN_COUNT_OFFSET, 265);
    }

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.num_threads, None);
        assert_eq!(config.min_chunk, 64);
        assert!(!config.strict);
    }

    #[test]
    fn test_builder_pattern() {
        let config = BatchConfig::new().with_threads(4).with_min_chunk(0).with_strict(true);

        assert_eq!(config.num_threads, Some(4));
        assert_eq!(config.min_chunk, 1);
        assert!(config.strict);
    }

    #[test]
    fn test_serialization() {
        let config = BatchConfig::default().with_threads(2);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
