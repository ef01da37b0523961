//! # chinese-checkers
//!
//! A batched two-player Chinese Checkers rules engine for RL/MCTS training.
//!
//! ## Design Principles
//!
//! 1. **Packed States**: Every game is a fixed `STATE_LEN` block of `i32`s.
//!    Batches are flat buffers of these blocks, shared as-is with external drivers.
//!
//! 2. **Element Isolation**: No operation on batch element `i` reads or writes
//!    element `j`. Parallelism is injected at the batch driver and nowhere else.
//!
//! 3. **Caller Owns Legality**: Moves are expected to come from the most recent
//!    action mask. The hot path does not re-validate; strict mode and the
//!    replay validator exist for when it should.
//!
//! ## Turn Structure
//!
//! A plain step ends the turn. A jump does not: the same piece may keep
//! jumping (never straight back) until the player ends the turn explicitly
//! with the end-turn move.
//!
//! ## Modules
//!
//! - `board`: Grid geometry, neighbor tables, start cells
//! - `core`: Players, moves, state, packed layout, configuration
//! - `rules`: Action masks, move application, win detection
//! - `batch`: Parallel driver over packed state buffers
//! - `replay`: Move-log codec and validator
//! - `python`: numpy bindings (feature `python`)

pub mod board;
pub mod core;
pub mod error;
pub mod rules;
pub mod batch;
pub mod replay;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::board::Coord;

pub use crate::core::{
    BatchConfig, Cell, Direction, GameState, Move, MoveKind, Player, PlayerPair, SkipState, N_MOVES,
    STATE_LEN,
};

pub use crate::error::EngineError;

pub use crate::rules::{action_mask, apply_move, detect_winner, ActionMask, RulesEngine, StandardRules};

pub use crate::batch::{BatchEngine, StateBatch};

pub use crate::replay::{validate_log, LogEntry, ReplayReport, ReplayValidator, Violation};
