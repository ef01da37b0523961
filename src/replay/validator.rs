//! Replay a move log through the engine and collect every bad line.
//!
//! Unlike the batch driver, which trusts its caller, the validator checks each
//! logged move before applying it. A bad line is recorded with its number,
//! raw text and reason, then skipped; scanning always continues to the end.

use std::fmt;

use super::log::{LogEntry, ParseError};
use crate::board::Coord;
use crate::core::config::PIECES_PER_PLAYER;
use crate::core::{Cell, Direction, GameState, Move, Player, PlayerPair};
use crate::rules::{RulesEngine, StandardRules};

/// Why a logged move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("could not parse move: {0}")]
    Malformed(#[from] ParseError),

    #[error("wrong player: expected {expected}, got {found}")]
    WrongPlayer { expected: Player, found: Player },

    #[error("END TURN when not in a skip sequence")]
    EndTurnWithoutSkip,

    #[error("cannot move piece {piece} in the middle of a skip sequence with piece {jumping}")]
    WrongPiece { piece: usize, jumping: usize },

    #[error("piece {piece} at {from} cannot move {direction:?}: off the board")]
    OffBoard {
        piece: usize,
        from: Coord,
        direction: Direction,
    },

    #[error("cannot make a plain step during a skip sequence")]
    StepDuringSkip,

    #[error("jump destination off board: {0}")]
    JumpOffBoard(Coord),

    #[error("jump destination {landing} occupied by {owner} piece {piece}")]
    JumpOccupied { landing: Coord, owner: Player, piece: usize },

    #[error("cannot jump back to the previous position")]
    JumpBack,

    #[error("move {index} is not legal under the active rules")]
    Illegal { index: usize },
}

/// A rejected log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    /// 1-based line number.
    pub line: usize,
    /// The line as written, trimmed.
    pub text: String,
    pub reason: Violation,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} - {}", self.line, self.text, self.reason)
    }
}

/// Outcome of replaying a whole log.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub errors: Vec<ReplayError>,
    /// Lines that were applied to the state.
    pub moves_applied: usize,
    /// Applied lines that handed the turn to the other player.
    pub turns_completed: usize,
    pub final_state: GameState,
    /// Applied piece moves per player and piece index. End-turn lines are not counted.
    pub piece_moves: PlayerPair<[u32; PIECES_PER_PLAYER]>,
}

impl ReplayReport {
    /// Whether every line was valid.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Incremental log validator.
///
/// ## Example
///
/// ```
/// use chinese_checkers::replay::ReplayValidator;
///
/// let mut validator = ReplayValidator::new();
/// validator.push_line("PLAYER 1 MOVE: 6 3");
/// validator.push_line("PLAYER 1 MOVE: 6 3");
///
/// let report = validator.finish();
/// assert_eq!(report.moves_applied, 1);
/// assert_eq!(report.errors.len(), 1);
/// assert_eq!(report.errors[0].line, 2);
/// ```
pub struct ReplayValidator<R: RulesEngine = StandardRules> {
    rules: R,
    state: GameState,
    line: usize,
    moves_applied: usize,
    turns_completed: usize,
    piece_moves: PlayerPair<[u32; PIECES_PER_PLAYER]>,
    errors: Vec<ReplayError>,
}

impl ReplayValidator<StandardRules> {
    /// Validator starting from the canonical start position.
    pub fn new() -> Self {
        Self::with_rules(StandardRules, GameState::new())
    }
}

impl Default for ReplayValidator<StandardRules> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RulesEngine> ReplayValidator<R> {
    /// Validator over a given rule set and starting state.
    pub fn with_rules(rules: R, state: GameState) -> Self {
        Self {
            rules,
            state,
            line: 0,
            moves_applied: 0,
            turns_completed: 0,
            piece_moves: PlayerPair::with_value([0; PIECES_PER_PLAYER]),
            errors: Vec::new(),
        }
    }

    /// The state after every valid line so far.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn errors(&self) -> &[ReplayError] {
        &self.errors
    }

    /// Check an entry against the current state without applying it.
    ///
    /// Legality is decided by the rule set; the reason for a rejection is
    /// then named from the board.
    pub fn check(&self, entry: LogEntry) -> Result<(), Violation> {
        let state = &self.state;
        if entry.player != state.current_player {
            return Err(Violation::WrongPlayer {
                expected: state.current_player,
                found: entry.player,
            });
        }
        if self.rules.is_legal(state, entry.mv) {
            return Ok(());
        }
        Err(diagnose(state, entry.mv))
    }

    /// Validate and, if valid, apply one log line.
    pub fn push_line(&mut self, text: &str) {
        self.line += 1;
        let outcome = text
            .parse::<LogEntry>()
            .map_err(Violation::from)
            .and_then(|entry| self.check(entry).map(|()| entry));

        match outcome {
            Ok(entry) => {
                if let Move::Piece { piece, .. } = entry.mv {
                    self.piece_moves[entry.player][piece as usize] += 1;
                }
                if self.rules.apply_move(&mut self.state, entry.mv).ends_turn() {
                    self.turns_completed += 1;
                }
                self.moves_applied += 1;
            }
            Err(reason) => self.errors.push(ReplayError {
                line: self.line,
                text: text.trim().to_string(),
                reason,
            }),
        }
    }

    pub fn finish(self) -> ReplayReport {
        ReplayReport {
            errors: self.errors,
            moves_applied: self.moves_applied,
            turns_completed: self.turns_completed,
            final_state: self.state,
            piece_moves: self.piece_moves,
        }
    }
}

/// Name the board rule a rejected move breaks.
///
/// Falls back to `Illegal` when the move is fine on the board but the rule
/// set still refuses it.
fn diagnose(state: &GameState, mv: Move) -> Violation {
    let illegal = Violation::Illegal { index: mv.index() };
    let Move::Piece { piece, direction } = mv else {
        return if state.skip.is_active() {
            illegal
        } else {
            Violation::EndTurnWithoutSkip
        };
    };
    let piece = piece as usize;

    if let Some(jumping) = state.skip.piece() {
        if jumping != piece {
            return Violation::WrongPiece { piece, jumping };
        }
    }

    let from = state.piece(state.current_player, piece);
    let Some(one_step) = from.neighbor(direction) else {
        return Violation::OffBoard { piece, from, direction };
    };
    if state.is_empty(one_step) {
        return if state.skip.is_active() {
            Violation::StepDuringSkip
        } else {
            illegal
        };
    }

    let landing = from.jump(direction);
    match state.cell(landing) {
        Cell::Invalid => Violation::JumpOffBoard(landing),
        Cell::Occupied(_) => match state.piece_at(landing) {
            Some((owner, piece)) => Violation::JumpOccupied { landing, owner, piece },
            None => illegal,
        },
        Cell::Empty if state.skip.forbidden_direction() == Some(direction) => Violation::JumpBack,
        Cell::Empty => illegal,
    }
}

/// Replay a whole log from the start position.
pub fn validate_log(log: &str) -> ReplayReport {
    let mut validator = ReplayValidator::new();
    for line in log.lines() {
        validator.push_line(line);
    }
    validator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MoveKind;
    use crate::rules::{action_mask, apply_move, ActionMask};

    /// Standard rules with every jump removed.
    struct StepsOnly;

    impl RulesEngine for StepsOnly {
        fn action_mask(&self, state: &GameState) -> ActionMask {
            action_mask(state)
                .iter()
                .filter(|&mv| match mv {
                    Move::Piece { piece, direction } => {
                        let from = state.piece(state.current_player, piece as usize);
                        state.is_empty(from.step(direction))
                    }
                    Move::EndTurn => true,
                })
                .collect()
        }

        fn apply_move(&self, state: &mut GameState, mv: Move) -> MoveKind {
            apply_move(state, mv)
        }

        fn winner(&self, state: &GameState) -> Option<Player> {
            state.winner
        }
    }

    fn reasons(log: &str) -> Vec<(usize, Violation)> {
        validate_log(log)
            .errors
            .into_iter()
            .map(|e| (e.line, e.reason))
            .collect()
    }

    #[test]
    fn test_clean_log() {
        let log = "PLAYER 1 MOVE: 6 3\nPLAYER 2 MOVE: 6 0\nPLAYER 1 MOVE: 3 2\nPLAYER 1 MOVE: END TURN\n";

        let report = validate_log(log);

        assert!(report.is_clean(), "{:?}", report.errors);
        assert_eq!(report.moves_applied, 4);
        assert_eq!(report.turns_completed, 3);
        assert_eq!(report.final_state.current_player, Player::Two);
        assert_eq!(report.final_state.turn_count, 3);
        assert_eq!(report.piece_moves[Player::One][6], 1);
        assert_eq!(report.piece_moves[Player::One][3], 1);
        assert_eq!(report.piece_moves[Player::Two][6], 1);
        report.final_state.check_invariants().unwrap();
    }

    #[test]
    fn test_wrong_player_and_end_turn_without_skip() {
        let log = "PLAYER 2 MOVE: 6 0\nPLAYER 1 MOVE: END TURN\nPLAYER 1 MOVE: 6 3";

        assert_eq!(
            reasons(log),
            vec![
                (
                    1,
                    Violation::WrongPlayer {
                        expected: Player::One,
                        found: Player::Two
                    }
                ),
                (2, Violation::EndTurnWithoutSkip),
            ]
        );
    }

    #[test]
    fn test_skip_sequence_violations() {
        // Piece 3 jumps SE to (4,6); then a different piece, a plain step,
        // and a jump straight back are all rejected.
        let log = "PLAYER 1 MOVE: 3 2\nPLAYER 1 MOVE: 6 3\nPLAYER 1 MOVE: 3 2\nPLAYER 1 MOVE: 3 5\nPLAYER 1 MOVE: END TURN";

        assert_eq!(
            reasons(log),
            vec![
                (2, Violation::WrongPiece { piece: 6, jumping: 3 }),
                (3, Violation::StepDuringSkip),
                (4, Violation::JumpBack),
            ]
        );
    }

    #[test]
    fn test_board_edge_violations() {
        // Tip piece: NE leaves the board; SE jump lands on (2,7), occupied.
        let log = "PLAYER 1 MOVE: 0 0\nPLAYER 1 MOVE: 0 2";

        assert_eq!(
            reasons(log),
            vec![
                (
                    1,
                    Violation::OffBoard {
                        piece: 0,
                        from: Coord::new(0, 6),
                        direction: Direction::NE
                    }
                ),
                (
                    2,
                    Violation::JumpOccupied {
                        landing: Coord::new(2, 7),
                        owner: Player::One,
                        piece: 5
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_malformed_lines_are_recorded_and_skipped() {
        let log = "garbage\n\nPLAYER 1 MOVE: 6 3";

        let report = validate_log(log);

        assert_eq!(report.moves_applied, 1);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].text, "garbage");
        assert_eq!(report.errors[1].reason, Violation::Malformed(ParseError::Empty));
        assert_eq!(
            report.errors[0].to_string(),
            "line 1: garbage - could not parse move: expected `PLAYER <p> MOVE: ...`"
        );
    }

    #[test]
    fn test_legality_comes_from_the_rule_set() {
        let mut validator = ReplayValidator::with_rules(StepsOnly, GameState::new());
        // A jump the standard rules allow, then a plain step.
        validator.push_line("PLAYER 1 MOVE: 3 2");
        validator.push_line("PLAYER 1 MOVE: 6 3");

        let report = validator.finish();

        assert_eq!(report.moves_applied, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 1);
        assert_eq!(
            report.errors[0].reason,
            Violation::Illegal {
                index: Move::piece(3, Direction::SE).index()
            }
        );
        assert_eq!(report.final_state.piece(Player::One, 3), Coord::new(2, 5));
    }
}
