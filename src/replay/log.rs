//! Text move-log codec.
//!
//! One move per line:
//!
//! ```text
//! PLAYER <p> MOVE: <piece> <direction>
//! PLAYER <p> MOVE: END TURN
//! ```
//!
//! `<piece>` and `<direction>` are the same indices the action space uses, so
//! a parsed entry maps straight onto a `Move`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::{N_DIRECTIONS, PIECES_PER_PLAYER};
use crate::core::{Direction, Move, Player};

/// Why a log line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("expected `PLAYER <p> MOVE: ...`")]
    Shape,

    #[error("unknown player `{0}`")]
    Player(String),

    #[error("piece `{0}` is not in 0..{}", PIECES_PER_PLAYER)]
    Piece(String),

    #[error("direction `{0}` is not in 0..{}", N_DIRECTIONS)]
    Direction(String),
}

/// One parsed log line: who claims to move, and what.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub player: Player,
    pub mv: Move,
}

impl LogEntry {
    pub fn new(player: Player, mv: Move) -> Self {
        Self { player, mv }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PLAYER {} MOVE: ", self.player.code())?;
        match self.mv {
            Move::Piece { piece, direction } => write!(f, "{} {}", piece, direction.index()),
            Move::EndTurn => write!(f, "END TURN"),
        }
    }
}

impl FromStr for LogEntry {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (player, rest) = match tokens.as_slice() {
            [] => return Err(ParseError::Empty),
            ["PLAYER", player, "MOVE:", rest @ ..] => (*player, rest),
            _ => return Err(ParseError::Shape),
        };

        let player = player
            .parse::<i32>()
            .ok()
            .and_then(Player::from_code)
            .ok_or_else(|| ParseError::Player(player.to_string()))?;

        let mv = match rest {
            ["END", "TURN"] => Move::EndTurn,
            [piece, direction] => {
                let index = piece
                    .parse::<usize>()
                    .ok()
                    .filter(|&p| p < PIECES_PER_PLAYER)
                    .ok_or_else(|| ParseError::Piece(piece.to_string()))?;
                let direction = direction
                    .parse::<usize>()
                    .ok()
                    .and_then(Direction::from_index)
                    .ok_or_else(|| ParseError::Direction(direction.to_string()))?;
                Move::piece(index, direction)
            }
            _ => return Err(ParseError::Shape),
        };

        Ok(LogEntry { player, mv })
    }
}
