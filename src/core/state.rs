//! Game state and its packed integer encoding.
//!
//! ## GameState
//!
//! One complete game:
//! - Grid of cell values (17x13, cells outside the star are `Invalid`)
//! - Index-stable piece lists for both players
//! - Turn metadata: current player, skip sequence, winner, turn count
//!
//! The grid and the piece lists are two views of the same occupancy and are
//! only mutated together through `relocate`.
//!
//! ## Packing
//!
//! `pack_into` / `unpack` convert to and from the fixed `STATE_LEN` layout used
//! by the batch driver and external callers. Sentinel encodings (`-1` for no
//! skip, `0` for no winner) exist only at this boundary.

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::{
    COLS, CURRENT_PLAYER_OFFSET, LAST_DIRECTION_OFFSET, LAST_SKIPPED_OFFSET, NUM_CELLS,
    P1_PIECES_OFFSET, P2_PIECES_OFFSET, PIECES_PER_PLAYER, ROWS, STATE_LEN, TURN_COUNT_OFFSET,
    WINNER_OFFSET,
};
use super::player::{Player, PlayerPair};
use crate::board::{is_valid_cell, Coord, PLAYER_1_START, PLAYER_2_START};
use crate::error::EngineError;

/// Contents of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Outside the star. Never changes.
    Invalid,
    /// On the board, unoccupied.
    Empty,
    /// Holds one of the player's pieces.
    Occupied(Player),
}

impl Cell {
    /// Packed cell code: -1 invalid, 0 empty, 1/2 player.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Cell::Invalid => -1,
            Cell::Empty => 0,
            Cell::Occupied(player) => player.code(),
        }
    }

    /// Decode a packed cell code.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Cell::Invalid),
            0 => Some(Cell::Empty),
            _ => match Player::from_code(code) {
                Some(player) => Some(Cell::Occupied(player)),
                None => None,
            },
        }
    }

    /// Whether a piece sits here.
    #[inline]
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        matches!(self, Cell::Occupied(_))
    }
}

/// Turn sub-state: idle, or mid skip sequence with one piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipState {
    /// No jump made yet this turn.
    #[default]
    Idle,
    /// `piece` jumped last, in `direction`. Only that piece may continue.
    Jumping { piece: u8, direction: Direction },
}

impl SkipState {
    /// Whether a skip sequence is in progress.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, SkipState::Jumping { .. })
    }

    /// The piece allowed to continue jumping, if any.
    #[must_use]
    pub const fn piece(self) -> Option<usize> {
        match self {
            SkipState::Idle => None,
            SkipState::Jumping { piece, .. } => Some(piece as usize),
        }
    }

    /// The direction that would undo the last jump, if any.
    #[must_use]
    pub const fn forbidden_direction(self) -> Option<Direction> {
        match self {
            SkipState::Idle => None,
            SkipState::Jumping { direction, .. } => Some(direction.reverse()),
        }
    }

    /// Packed `(last_skipped_piece, last_direction)` pair.
    #[must_use]
    pub const fn codes(self) -> (i32, i32) {
        match self {
            SkipState::Idle => (-1, -1),
            SkipState::Jumping { piece, direction } => (piece as i32, direction.index() as i32),
        }
    }

    /// Decode a packed `(last_skipped_piece, last_direction)` pair.
    pub fn from_codes(piece: i32, direction: i32) -> Result<Self, EngineError> {
        if piece == -1 && direction == -1 {
            return Ok(SkipState::Idle);
        }
        let piece = usize::try_from(piece)
            .ok()
            .filter(|&p| p < PIECES_PER_PLAYER)
            .ok_or(EngineError::InvalidField {
                field: "last_skipped_piece",
                value: piece,
            })?;
        let direction = usize::try_from(direction)
            .ok()
            .and_then(Direction::from_index)
            .ok_or(EngineError::InvalidField {
                field: "last_direction",
                value: direction,
            })?;
        Ok(SkipState::Jumping {
            piece: piece as u8,
            direction,
        })
    }
}

/// Largest turn count the packed `i32` field can hold. Counting stops here.
pub const MAX_TURN_COUNT: u32 = i32::MAX as u32;

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    grid: [[Cell; COLS]; ROWS],
    pieces: PlayerPair<[Coord; PIECES_PER_PLAYER]>,

    /// Player to move.
    pub current_player: Player,

    /// Skip sequence in progress, if any.
    pub skip: SkipState,

    /// Set once a player has won. Never cleared.
    pub winner: Option<Player>,

    /// Completed turns. Saturates at `MAX_TURN_COUNT`.
    pub turn_count: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The canonical start position.
    ///
    /// ```
    /// use chinese_checkers::core::{GameState, Player};
    ///
    /// let state = GameState::new();
    /// assert_eq!(state.current_player, Player::One);
    /// assert_eq!(state.turn_count, 0);
    /// assert!(state.winner.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_positions(PLAYER_1_START, PLAYER_2_START)
    }

    /// A start-of-game state with pieces on arbitrary cells.
    ///
    /// Metadata is canonical: player one to move, no skip, no winner, turn 0.
    /// Fails if any piece is off the board or two pieces share a cell.
    pub fn from_positions(
        player_1: [Coord; PIECES_PER_PLAYER],
        player_2: [Coord; PIECES_PER_PLAYER],
    ) -> Result<Self, EngineError> {
        for (player, coords) in [(Player::One, &player_1), (Player::Two, &player_2)] {
            for (piece, coord) in coords.iter().enumerate() {
                if !coord.is_valid() {
                    return Err(EngineError::PieceOffBoard {
                        player: player.code(),
                        piece,
                        row: coord.row,
                        col: coord.col,
                    });
                }
            }
        }
        let state = Self::with_positions(player_1, player_2);
        state.check_invariants()?;
        Ok(state)
    }

    fn with_positions(player_1: [Coord; PIECES_PER_PLAYER], player_2: [Coord; PIECES_PER_PLAYER]) -> Self {
        let mut grid = [[Cell::Invalid; COLS]; ROWS];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if is_valid_cell(r as i32, c as i32) {
                    *cell = Cell::Empty;
                }
            }
        }
        for coord in &player_1 {
            grid[coord.row as usize][coord.col as usize] = Cell::Occupied(Player::One);
        }
        for coord in &player_2 {
            grid[coord.row as usize][coord.col as usize] = Cell::Occupied(Player::Two);
        }

        Self {
            grid,
            pieces: PlayerPair::new(player_1, player_2),
            current_player: Player::One,
            skip: SkipState::Idle,
            winner: None,
            turn_count: 0,
        }
    }

    // === Queries ===

    /// Contents of a cell. Off-grid coordinates read as `Invalid`.
    #[inline]
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Cell {
        if coord.is_valid() {
            self.grid[coord.row as usize][coord.col as usize]
        } else {
            Cell::Invalid
        }
    }

    /// Whether `coord` is an on-board, unoccupied cell.
    #[inline]
    #[must_use]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.cell(coord) == Cell::Empty
    }

    /// Position of one of a player's pieces.
    #[inline]
    #[must_use]
    pub fn piece(&self, player: Player, index: usize) -> Coord {
        self.pieces[player][index]
    }

    /// All of a player's piece positions, in index order.
    #[must_use]
    pub fn pieces(&self, player: Player) -> &[Coord; PIECES_PER_PLAYER] {
        &self.pieces[player]
    }

    /// The owner and index of the piece on `coord`, if any.
    #[must_use]
    pub fn piece_at(&self, coord: Coord) -> Option<(Player, usize)> {
        let Cell::Occupied(player) = self.cell(coord) else {
            return None;
        };
        self.pieces[player]
            .iter()
            .position(|&c| c == coord)
            .map(|index| (player, index))
    }

    /// Whether a winner has been decided.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    // === Mutation (rules only) ===

    /// Move a piece, keeping grid and piece list in agreement.
    pub(crate) fn relocate(&mut self, player: Player, index: usize, to: Coord) {
        let from = self.pieces[player][index];
        self.grid[from.row as usize][from.col as usize] = Cell::Empty;
        self.grid[to.row as usize][to.col as usize] = Cell::Occupied(player);
        self.pieces[player][index] = to;
    }

    /// Clear the skip sequence and hand the turn to the opponent.
    pub(crate) fn pass_turn(&mut self) {
        self.skip = SkipState::Idle;
        self.current_player = self.current_player.opponent();
        self.turn_count = self.turn_count.saturating_add(1).min(MAX_TURN_COUNT);
    }

    // === Packing ===

    /// Pack into a new `STATE_LEN` buffer.
    #[must_use]
    pub fn pack(&self) -> Vec<i32> {
        let mut out = vec![0; STATE_LEN];
        self.pack_into(&mut out);
        out
    }

    /// Pack into `out`.
    ///
    /// # Panics
    /// Panics if `out.len() != STATE_LEN`.
    pub fn pack_into(&self, out: &mut [i32]) {
        assert_eq!(out.len(), STATE_LEN, "packed state must be {} values", STATE_LEN);

        for (dst, cell) in out[..NUM_CELLS].iter_mut().zip(self.grid.iter().flatten()) {
            *dst = cell.code();
        }
        for (player, offset) in [(Player::One, P1_PIECES_OFFSET), (Player::Two, P2_PIECES_OFFSET)] {
            for (i, coord) in self.pieces[player].iter().enumerate() {
                out[offset + 2 * i] = coord.row;
                out[offset + 2 * i + 1] = coord.col;
            }
        }
        let (piece, direction) = self.skip.codes();
        out[CURRENT_PLAYER_OFFSET] = self.current_player.code();
        out[LAST_SKIPPED_OFFSET] = piece;
        out[LAST_DIRECTION_OFFSET] = direction;
        out[WINNER_OFFSET] = self.winner.map_or(0, Player::code);
        out[TURN_COUNT_OFFSET] = i32::try_from(self.turn_count).unwrap_or(i32::MAX);
    }

    /// Decode a packed state.
    ///
    /// Every field is range-checked. Cross-field consistency is not; use
    /// [`GameState::check_invariants`] for that.
    pub fn unpack(buf: &[i32]) -> Result<Self, EngineError> {
        if buf.len() != STATE_LEN {
            return Err(EngineError::BufferLength { len: buf.len() });
        }

        let mut grid = [[Cell::Invalid; COLS]; ROWS];
        for (cell, &code) in grid.iter_mut().flatten().zip(&buf[..NUM_CELLS]) {
            *cell = Cell::from_code(code).ok_or(EngineError::InvalidField { field: "grid", value: code })?;
        }

        let read_pieces = |player: Player, offset: usize| -> Result<[Coord; PIECES_PER_PLAYER], EngineError> {
            let mut coords = [Coord::new(0, 0); PIECES_PER_PLAYER];
            for (piece, coord) in coords.iter_mut().enumerate() {
                let (row, col) = (buf[offset + 2 * piece], buf[offset + 2 * piece + 1]);
                if !is_valid_cell(row, col) {
                    return Err(EngineError::PieceOffBoard {
                        player: player.code(),
                        piece,
                        row,
                        col,
                    });
                }
                *coord = Coord::new(row, col);
            }
            Ok(coords)
        };
        let pieces = PlayerPair::new(
            read_pieces(Player::One, P1_PIECES_OFFSET)?,
            read_pieces(Player::Two, P2_PIECES_OFFSET)?,
        );

        let code = buf[CURRENT_PLAYER_OFFSET];
        let current_player = Player::from_code(code).ok_or(EngineError::InvalidField {
            field: "current_player",
            value: code,
        })?;

        let skip = SkipState::from_codes(buf[LAST_SKIPPED_OFFSET], buf[LAST_DIRECTION_OFFSET])?;

        let code = buf[WINNER_OFFSET];
        let winner = match code {
            0 => None,
            _ => Some(Player::from_code(code).ok_or(EngineError::InvalidField { field: "winner", value: code })?),
        };

        let code = buf[TURN_COUNT_OFFSET];
        let turn_count = u32::try_from(code).map_err(|_| EngineError::InvalidField {
            field: "turn_count",
            value: code,
        })?;

        Ok(Self {
            grid,
            pieces,
            current_player,
            skip,
            winner,
            turn_count,
        })
    }

    // === Validation ===

    /// Verify the occupancy invariants.
    ///
    /// - Cells outside the star are `Invalid`, cells on it are not
    /// - Each piece's cell holds its owner
    /// - No two pieces share a cell and no other cell is occupied
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let mut occupied = 0usize;
        for (r, row) in self.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let valid = is_valid_cell(r as i32, c as i32);
                if valid == (*cell == Cell::Invalid) {
                    return Err(EngineError::Inconsistent(format!(
                        "cell ({}, {}) is {:?} but board validity is {}",
                        r, c, cell, valid
                    )));
                }
                if cell.is_occupied() {
                    occupied += 1;
                }
            }
        }

        let mut seen = [false; NUM_CELLS];
        for (player, coords) in self.pieces.iter() {
            for (piece, coord) in coords.iter().enumerate() {
                if self.cell(*coord) != Cell::Occupied(player) {
                    return Err(EngineError::Inconsistent(format!(
                        "{} piece {} at {} but the cell holds {:?}",
                        player,
                        piece,
                        coord,
                        self.cell(*coord)
                    )));
                }
                let idx = coord.grid_index();
                if seen[idx] {
                    return Err(EngineError::Inconsistent(format!("two pieces share cell {}", coord)));
                }
                seen[idx] = true;
            }
        }

        let expected = 2 * PIECES_PER_PLAYER;
        if occupied != expected {
            return Err(EngineError::Inconsistent(format!(
                "{} occupied cells for {} pieces",
                occupied, expected
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for GameState {
    /// ASCII board. Odd rows are indented half a cell, matching the hex offset.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            if r % 2 == 1 {
                write!(f, " ")?;
            }
            for cell in row {
                let glyph = match cell {
                    Cell::Invalid => "  ",
                    Cell::Empty => ". ",
                    Cell::Occupied(Player::One) => "1 ",
                    Cell::Occupied(Player::Two) => "2 ",
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        write!(f, "to move: {}, turn {}", self.current_player, self.turn_count)?;
        if let SkipState::Jumping { piece, direction } = self.skip {
            write!(f, ", jumping piece {} ({:?})", piece, direction)?;
        }
        if let Some(winner) = self.winner {
            write!(f, ", winner: {}", winner)?;
        }
        Ok(())
    }
}
