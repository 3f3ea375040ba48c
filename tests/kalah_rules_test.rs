//! Whole-move scenarios for the Kalah rules.

use kalah::games::kalah::{NORTH_STORE, SOUTH_STORE};
use kalah::{Board, MoveError, Side, rules};

fn stones(board: &Board, position: u8) -> u32 {
    board.pit_at(position).unwrap().stones()
}

/// Validates then sows, the way the session plays a move.
fn play(board: &mut Board, position: u8) -> Result<(), MoveError> {
    rules::validate(board, position)?;
    rules::apply_move(board, position)?;
    Ok(())
}

#[test]
fn test_fresh_board() {
    let board = Board::with_turn(Side::South);
    for position in (1..=6).chain(8..=13) {
        assert_eq!(stones(&board, position), 6, "house {position}");
    }
    assert_eq!(stones(&board, SOUTH_STORE), 0);
    assert_eq!(stones(&board, NORTH_STORE), 0);
    assert!(!board.is_over());
    assert_eq!(board.winner(), None);
    assert!(!board.is_draw());
}

#[test]
fn test_opening_move_into_own_store() {
    let mut board = Board::with_turn(Side::South);
    play(&mut board, 1).unwrap();

    assert_eq!(stones(&board, 1), 0);
    for position in 2..=6 {
        assert_eq!(stones(&board, position), 7);
    }
    assert_eq!(stones(&board, SOUTH_STORE), 1);
    for position in 8..=13 {
        assert_eq!(stones(&board, position), 6);
    }
    assert_eq!(stones(&board, NORTH_STORE), 0);
    assert_eq!(board.turn(), Side::South);
}

#[test]
fn test_capture_from_facing_house() {
    let mut board = Board::with_turn(Side::South);
    board.set_stones(1, 1).unwrap();
    board.set_stones(2, 0).unwrap();

    play(&mut board, 1).unwrap();

    assert_eq!(stones(&board, 1), 0);
    assert_eq!(stones(&board, 2), 0);
    assert_eq!(stones(&board, SOUTH_STORE), 7);
    assert_eq!(stones(&board, 12), 0);
    assert_eq!(board.turn(), Side::North);
    assert_eq!(board.total_stones(), 61);
}

#[test]
fn test_last_stone_ends_the_game() {
    let mut board = Board::with_turn(Side::South);
    for position in 1..=5 {
        board.set_stones(position, 0).unwrap();
    }
    board.set_stones(6, 1).unwrap();

    play(&mut board, 6).unwrap();

    for position in 1..=6 {
        assert_eq!(stones(&board, position), 0);
    }
    assert_eq!(stones(&board, SOUTH_STORE), 1);
    for position in 8..=13 {
        assert_eq!(stones(&board, position), 0);
    }
    assert_eq!(stones(&board, NORTH_STORE), 36);
    assert!(board.is_over());
    assert_eq!(board.winner(), Some(Side::North));
    assert!(!board.is_draw());
}

#[test]
fn test_wrong_turn_reports_both_sides() {
    let mut board = Board::with_turn(Side::North);
    let before = board.clone();

    let err = play(&mut board, 1).unwrap_err();
    assert_eq!(
        err,
        MoveError::WrongTurn {
            chosen_side: Side::South,
            current_turn: Side::North,
        }
    );
    assert_eq!(err.to_string(), "Wrong turn [SOUTH], the current turn is [NORTH].");
    assert_eq!(board, before);
}

#[test]
fn test_rejections_in_order() {
    let mut board = Board::with_turn(Side::South);

    assert_eq!(
        Board::checked_position(0).unwrap_err().to_string(),
        "Pit index [0] is out of range, expected 1 to 14."
    );
    assert_eq!(
        play(&mut board, 7).unwrap_err().to_string(),
        "Cannot make a move from a kalah pit with index [7]."
    );

    board.set_stones(3, 0).unwrap();
    assert_eq!(
        play(&mut board, 3).unwrap_err().to_string(),
        "Cannot make a move, a pit with index [3] is empty."
    );
}

#[test]
fn test_finished_game_rejects_every_move() {
    let mut board = Board::with_turn(Side::South);
    for position in 1..=5 {
        board.set_stones(position, 0).unwrap();
    }
    board.set_stones(6, 1).unwrap();
    play(&mut board, 6).unwrap();

    let err = play(&mut board, 8).unwrap_err();
    assert_eq!(
        err,
        MoveError::GameOver {
            winner: Some(Side::North)
        }
    );
    assert_eq!(err.to_string(), "Game is over, the winner side is [NORTH].");
}

#[test]
fn test_draw_is_reported() {
    // South empties its last house into its store: 36 against 36.
    let mut stones = [0; 14];
    stones[5] = 1;
    stones[6] = 35;
    stones[7] = 36;
    let mut board = Board::restore(stones, Side::South, None, false, false);

    play(&mut board, 6).unwrap();

    assert!(board.is_over());
    assert!(board.is_draw());
    assert_eq!(board.winner(), None);
    assert_eq!(
        play(&mut board, 8).unwrap_err().to_string(),
        "Game is over, it ended in a draw."
    );
}

#[test]
fn test_opponent_store_is_skipped() {
    // North house 13 with 3 stones: 14 gets one, then 1 and 2.
    let mut board = Board::with_turn(Side::North);
    board.set_stones(13, 3).unwrap();
    play(&mut board, 13).unwrap();
    assert_eq!(stones(&board, NORTH_STORE), 1);
    assert_eq!(stones(&board, 1), 7);
    assert_eq!(stones(&board, 2), 7);
    assert_eq!(board.turn(), Side::South);

    // South house 6 with 9 stones crosses North's store, which drops one.
    let mut board = Board::with_turn(Side::South);
    board.set_stones(6, 9).unwrap();
    let before = board.total_stones();
    rules::apply_move(&mut board, 6).unwrap();
    assert_eq!(stones(&board, NORTH_STORE), 0);
    assert_eq!(board.total_stones(), before - 1);
    assert_eq!(stones(&board, SOUTH_STORE), 1);
}
