//! Core engine types: players, moves, state, configuration.
//!
//! `GameState` is the unit every other module operates on. Its packed form
//! (see `config`) is the format batches are stored and exchanged in.

pub mod player;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Player, PlayerPair};
pub use config::{BatchConfig, N_MOVES, STATE_LEN};
pub use action::{Direction, Move, MoveKind};
pub use state::{Cell, GameState, SkipState};
