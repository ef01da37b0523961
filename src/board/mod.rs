//! Static board geometry.
//!
//! The star-shaped board is stored as a 17x13 offset grid. Each row has its own
//! valid column range; everything outside it is permanently off the board.
//! Adjacency depends on row parity because odd rows are shifted half a cell.
//!
//! Nothing here holds state. All tables are constants.

pub mod topology;

pub use topology::{
    Coord, DOUBLE_STEP_NEIGHBORS, EVEN_ROW_NEIGHBORS, MIN_MAX_COLS, ODD_ROW_NEIGHBORS,
    PLAYER_1_START, PLAYER_2_START, is_valid_cell, valid_cells,
};
