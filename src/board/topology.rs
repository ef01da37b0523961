//! Cell coordinates, validity and neighbor lookup tables.
//!
//! ## Directions
//!
//! Direction indices run clockwise starting at north-east:
//!
//! ```text
//!      5 NW   0 NE
//!   4 W    .    1 E
//!      3 SW   2 SE
//! ```
//!
//! Single steps use a parity-dependent table. Jumps (two steps in the same
//! direction) cross exactly one parity flip, so their offsets are the same
//! from every row.

use serde::{Deserialize, Serialize};

use crate::core::action::Direction;
use crate::core::config::{COLS, PIECES_PER_PLAYER, ROWS};

/// `[min_col, max_col]` for each row.
pub const MIN_MAX_COLS: [(i32, i32); ROWS] = [
    (6, 6),
    (5, 6),
    (5, 7),
    (4, 7),
    (0, 12),
    (0, 11),
    (1, 11),
    (1, 10),
    (2, 10),
    (1, 10),
    (1, 11),
    (0, 11),
    (0, 12),
    (4, 7),
    (5, 7),
    (5, 6),
    (6, 6),
];

/// One-step `(dr, dc)` offsets from an even row, indexed by direction.
pub const EVEN_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (0, 1), (1, 0), (1, -1), (0, -1), (-1, -1)];

/// One-step `(dr, dc)` offsets from an odd row, indexed by direction.
pub const ODD_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, 1), (0, 1), (1, 1), (1, 0), (0, -1), (-1, 0)];

/// Jump landing `(dr, dc)` offsets, indexed by direction. Row parity does not matter.
pub const DOUBLE_STEP_NEIGHBORS: [(i32, i32); 6] = [(-2, 1), (0, 2), (2, 1), (2, -1), (0, -2), (-2, -1)];

/// Player 1 start cells, in piece-index order.
pub const PLAYER_1_START: [Coord; PIECES_PER_PLAYER] = [
    Coord::new(0, 6),
    Coord::new(1, 5),
    Coord::new(1, 6),
    Coord::new(2, 5),
    Coord::new(2, 6),
    Coord::new(2, 7),
    Coord::new(3, 4),
    Coord::new(3, 5),
    Coord::new(3, 6),
    Coord::new(3, 7),
];

/// Player 2 start cells, in piece-index order.
pub const PLAYER_2_START: [Coord; PIECES_PER_PLAYER] = [
    Coord::new(16, 6),
    Coord::new(15, 5),
    Coord::new(15, 6),
    Coord::new(14, 5),
    Coord::new(14, 6),
    Coord::new(14, 7),
    Coord::new(13, 4),
    Coord::new(13, 5),
    Coord::new(13, 6),
    Coord::new(13, 7),
];

/// Check whether `(r, c)` lies on the star.
///
/// ```
/// use chinese_checkers::board::is_valid_cell;
///
/// assert!(is_valid_cell(0, 6));
/// assert!(!is_valid_cell(0, 5));
/// assert!(!is_valid_cell(-1, 6));
/// assert!(!is_valid_cell(4, 13));
/// ```
#[inline]
#[must_use]
pub const fn is_valid_cell(r: i32, c: i32) -> bool {
    if r < 0 || r >= ROWS as i32 || c < 0 || c >= COLS as i32 {
        return false;
    }
    let (min_col, max_col) = MIN_MAX_COLS[r as usize];
    c >= min_col && c <= max_col
}

/// Iterate over every valid cell in row-major order.
pub fn valid_cells() -> impl Iterator<Item = Coord> {
    (0..ROWS as i32).flat_map(|r| {
        let (min_col, max_col) = MIN_MAX_COLS[r as usize];
        (min_col..=max_col).map(move |c| Coord::new(r, c))
    })
}

/// A `(row, col)` grid position.
///
/// Coordinates are signed so that neighbor arithmetic can step off the board;
/// use [`Coord::is_valid`] before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether this coordinate is on the star.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        is_valid_cell(self.row, self.col)
    }

    /// Row-major index into the flat grid. Only meaningful for valid cells.
    #[inline]
    #[must_use]
    pub const fn grid_index(self) -> usize {
        self.row as usize * COLS + self.col as usize
    }

    /// The adjacent position in `direction`, possibly off the board.
    #[inline]
    #[must_use]
    pub const fn step(self, direction: Direction) -> Coord {
        let table = if self.row % 2 == 0 {
            &EVEN_ROW_NEIGHBORS
        } else {
            &ODD_ROW_NEIGHBORS
        };
        let (dr, dc) = table[direction.index()];
        Coord::new(self.row + dr, self.col + dc)
    }

    /// The jump landing position two steps away in `direction`, possibly off the board.
    #[inline]
    #[must_use]
    pub const fn jump(self, direction: Direction) -> Coord {
        let (dr, dc) = DOUBLE_STEP_NEIGHBORS[direction.index()];
        Coord::new(self.row + dr, self.col + dc)
    }

    /// The adjacent cell in `direction`, if it is on the board.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<Coord> {
        Some(self.step(direction)).filter(|c| c.is_valid())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
