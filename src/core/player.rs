//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The two sides. Their integer codes (1 and 2) double as grid cell values
//! and as the `current_player` / `winner` fields of the packed layout.
//!
//! ## PlayerPair
//!
//! Fixed two-slot storage indexed by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, RangeInclusive};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Starts at the top tip (rows 0-3), moves first.
    One,
    /// Starts at the bottom tip (rows 13-16).
    Two,
}

impl Player {
    /// Both players, in win-check priority order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Integer code used in the grid and packed metadata.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Decode a player code.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Zero-based index (0 or 1).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// The other player.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Rows this player must fill to win: the opponent's starting band.
    #[must_use]
    pub const fn target_rows(self) -> RangeInclusive<i32> {
        match self {
            Player::One => 13..=16,
            Player::Two => 0..=3,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.code())
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use chinese_checkers::core::{Player, PlayerPair};
///
/// let mut moves: PlayerPair<u32> = PlayerPair::with_value(0);
/// moves[Player::Two] += 3;
///
/// assert_eq!(moves[Player::One], 0);
/// assert_eq!(moves[Player::Two], 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create from explicit values for player one and player two.
    pub const fn new(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(Player) -> T) -> Self {
        Self::new(factory(Player::One), factory(Player::Two))
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a player's data.
    #[inline]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    #[inline]
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T: Default> Default for PlayerPair<T> {
    fn default() -> Self {
        Self::new(T::default(), T::default())
    }
}

impl<T> Index<Player> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerPair<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
