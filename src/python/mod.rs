//! Python bindings for the batched Chinese Checkers engine.
//!
//! # Quick Start
//!
//! ```python
//! import numpy as np
//! import chinese_checkers as cc
//!
//! states = cc.initialize_state_batched(1024)
//! masks = cc.get_action_mask_batched(states)
//!
//! # Pick one legal move per game, then apply in place
//! moves = np.array([np.flatnonzero(m)[0] for m in masks], dtype=np.int32)
//! cc.update_state_batched(states, moves)
//!
//! winners = cc.get_winner_batched(states)
//! ```

use pyo3::prelude::*;

mod py_batch;

pub use py_batch::*;

use crate::board::{
    Coord, DOUBLE_STEP_NEIGHBORS, EVEN_ROW_NEIGHBORS, MIN_MAX_COLS, ODD_ROW_NEIGHBORS, PLAYER_1_START,
    PLAYER_2_START,
};
use crate::core::config::{COLS, N_DIRECTIONS, N_MOVES, PIECES_PER_PLAYER, ROWS, STATE_LEN};

fn coords(cells: &[Coord]) -> Vec<(i32, i32)> {
    cells.iter().map(|c| (c.row, c.col)).collect()
}

/// chinese_checkers: batched rules engine for self-play training.
///
/// This module provides:
/// - Board and layout constants
/// - Batched state initialization, action masks, move application and winners
/// - A configurable `BatchEngine` (dedicated threads, strict move checking)
#[pymodule]
fn chinese_checkers(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Constants
    m.add("ROWS", ROWS)?;
    m.add("COLS", COLS)?;
    m.add("N_PIECES_PER_PLAYER", PIECES_PER_PLAYER)?;
    m.add("N_DIRECTIONS", N_DIRECTIONS)?;
    m.add("N_MOVES", N_MOVES)?;
    m.add("TOTAL_STATE", STATE_LEN)?;
    m.add("even_row_neighbors", EVEN_ROW_NEIGHBORS.to_vec())?;
    m.add("odd_row_neighbors", ODD_ROW_NEIGHBORS.to_vec())?;
    m.add("double_step_neighbors", DOUBLE_STEP_NEIGHBORS.to_vec())?;
    m.add("min_max_cols", MIN_MAX_COLS.to_vec())?;
    m.add("player_1_start", coords(&PLAYER_1_START))?;
    m.add("player_2_start", coords(&PLAYER_2_START))?;

    // Batched entry points
    m.add_function(wrap_pyfunction!(initialize_state_batched, m)?)?;
    m.add_function(wrap_pyfunction!(get_action_mask_batched, m)?)?;
    m.add_function(wrap_pyfunction!(update_state_batched, m)?)?;
    m.add_function(wrap_pyfunction!(get_winner_batched, m)?)?;

    m.add_class::<PyBatchEngine>()?;

    Ok(())
}
