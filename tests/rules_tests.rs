//! Rules integration tests: start position, jumps, skip sequences, wins.

use chinese_checkers::board::{Coord, PLAYER_1_START, PLAYER_2_START};
use chinese_checkers::core::config::{LAST_DIRECTION_OFFSET, LAST_SKIPPED_OFFSET};
use chinese_checkers::{action_mask, apply_move, Direction, GameState, Move, MoveKind, Player, SkipState};

/// Player one's piece 0 on (7,5), with player two's pieces on (8,6) and (10,7).
fn chain_position() -> GameState {
    let mut p1 = PLAYER_1_START;
    p1[0] = Coord::new(7, 5);
    let mut p2 = PLAYER_2_START;
    p2[9] = Coord::new(8, 6);
    p2[8] = Coord::new(10, 7);
    GameState::from_positions(p1, p2).unwrap()
}

// =============================================================================
// Start Position
// =============================================================================

#[test]
fn test_start_mask_offers_steps_only() {
    let state = GameState::new();
    let mask = action_mask(&state);

    assert!(!mask.can_end_turn());
    for piece in 6..10 {
        let has_step = Direction::ALL.iter().any(|&d| {
            let target = state.piece(Player::One, piece).step(d);
            mask.contains(Move::piece(piece, d)) && state.is_empty(target)
        });
        assert!(has_step, "frontline piece {} has no step", piece);
    }
}

#[test]
fn test_any_start_step_hands_over_the_turn() {
    let start = GameState::new();

    for mv in action_mask(&start).iter() {
        let Move::Piece { piece, direction } = mv else {
            unreachable!();
        };
        if !start.is_empty(start.piece(Player::One, piece as usize).step(direction)) {
            continue;
        }
        let mut state = start.clone();
        assert_eq!(apply_move(&mut state, mv), MoveKind::Step);
        assert_eq!(state.current_player, Player::Two);
        assert_eq!(state.turn_count, 1);
    }
}

// =============================================================================
// Jumps and Skip Sequences
// =============================================================================

#[test]
fn test_jump_over_opponent() {
    let mut state = chain_position();
    let jump = Move::piece(0, Direction::SE);
    assert!(action_mask(&state).contains(jump));

    assert_eq!(apply_move(&mut state, jump), MoveKind::Jump);

    assert_eq!(state.piece(Player::One, 0), Coord::new(9, 6));
    assert_eq!(state.current_player, Player::One);
    assert_eq!(state.turn_count, 0);
    let packed = state.pack();
    assert_eq!(packed[LAST_SKIPPED_OFFSET], 0);
    assert_eq!(packed[LAST_DIRECTION_OFFSET], Direction::SE.index() as i32);
}

#[test]
fn test_double_jump_then_end_turn() {
    let mut state = chain_position();

    apply_move(&mut state, Move::piece(0, Direction::SE));
    assert_eq!(state.current_player, Player::One);

    let mask = action_mask(&state);
    assert!(mask.contains(Move::piece(0, Direction::SE)));
    assert!(mask.can_end_turn());

    apply_move(&mut state, Move::piece(0, Direction::SE));
    assert_eq!(state.piece(Player::One, 0), Coord::new(11, 7));
    assert_eq!(state.current_player, Player::One);
    assert_eq!(state.turn_count, 0);

    let mask = action_mask(&state);
    assert!(!mask.contains(Move::piece(0, Direction::NW)));
    for mv in mask.iter().filter(|m| !m.is_end_turn()) {
        assert!(matches!(mv, Move::Piece { piece: 0, .. }));
    }

    assert_eq!(apply_move(&mut state, Move::EndTurn), MoveKind::EndTurn);
    assert_eq!(state.skip, SkipState::Idle);
    let packed = state.pack();
    assert_eq!(packed[LAST_SKIPPED_OFFSET], -1);
    assert_eq!(packed[LAST_DIRECTION_OFFSET], -1);
    assert_eq!(state.current_player, Player::Two);
    assert_eq!(state.turn_count, 1);
    state.check_invariants().unwrap();
}

#[test]
fn test_skip_mask_never_offers_reverse() {
    let mut state = GameState::new();
    apply_move(&mut state, Move::piece(3, Direction::SE));

    let mask = action_mask(&state);

    assert!(!mask.contains(Move::piece(3, Direction::NW)));
    assert!(mask.can_end_turn());
    for piece in (0..10).filter(|&p| p != 3) {
        for d in Direction::ALL {
            assert!(!mask.contains(Move::piece(piece, d)));
        }
    }
}

// =============================================================================
// Winning
// =============================================================================

#[test]
fn test_win_by_jump_then_end_turn() {
    // Nine pieces home; the last jumps from (11,6) over (12,7) into (13,7).
    let mut p1 = PLAYER_2_START;
    p1[9] = Coord::new(11, 6);
    let mut p2 = PLAYER_1_START;
    p2[9] = Coord::new(12, 7);
    let mut state = GameState::from_positions(p1, p2).unwrap();

    assert_eq!(apply_move(&mut state, Move::piece(9, Direction::SE)), MoveKind::Jump);
    assert_eq!(state.piece(Player::One, 9), Coord::new(13, 7));
    // The turn has not ended yet.
    assert_eq!(state.winner, None);

    apply_move(&mut state, Move::EndTurn);

    assert_eq!(state.winner, Some(Player::One));
    assert!(state.is_terminal());
}

#[test]
fn test_winner_is_frozen() {
    let mut state = GameState::new();
    state.winner = Some(Player::Two);

    apply_move(&mut state, Move::piece(6, Direction::SW));
    apply_move(&mut state, Move::piece(6, Direction::NE));

    assert_eq!(state.winner, Some(Player::Two));
}
