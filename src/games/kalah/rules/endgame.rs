//! End-of-game detection and final sweep.

use super::super::{Board, Side};
use std::cmp::Ordering;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// Ends the game if either side has no stones left in its houses.
///
/// Sides are checked South first. When a side is empty, the other side's
/// houses are swept into that side's own store, the stores are compared
/// and the result is recorded. A board with stones on both sides is left
/// untouched.
#[instrument(skip(board))]
pub fn check_and_resolve(board: &mut Board) {
    if board.is_over() {
        return;
    }

    let Some(empty_side) = Side::iter().find(|side| board.house_stones(*side) == 0) else {
        return;
    };
    let other = empty_side.opposite();

    let swept = sweep_houses(board, other);

    let own = board.store_for(empty_side).stones();
    let theirs = board.store_for(other).stones();
    let winner = match own.cmp(&theirs) {
        Ordering::Greater => Some(empty_side),
        Ordering::Less => Some(other),
        Ordering::Equal => None,
    };
    board.finish(winner);

    info!(
        empty_side = %empty_side,
        swept,
        south_store = board.store_for(Side::South).stones(),
        north_store = board.store_for(Side::North).stones(),
        winner = ?winner,
        "Game over"
    );
}

/// Moves every stone in `side`'s houses into `side`'s store.
fn sweep_houses(board: &mut Board, side: Side) -> u32 {
    let swept = board.house_stones(side);
    let positions: Vec<u8> = board.houses(side).map(|pit| pit.position()).collect();
    for position in positions {
        board.pit_mut(position).set_stones(0);
    }
    let store = board.pit_mut(Board::store_position(side));
    store.set_stones(store.stones() + swept);
    swept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: [u32; 14]) -> Board {
        Board::restore(stones, Side::South, None, false, false)
    }

    #[test]
    fn test_fresh_board_is_not_over() {
        let mut board = Board::with_turn(Side::South);
        check_and_resolve(&mut board);
        assert!(!board.is_over());
        assert_eq!(board, Board::with_turn(Side::South));
    }

    #[test]
    fn test_empty_south_sweeps_north_and_north_wins() {
        //          1  2  3  4  5  6   7  8  9 10 11 12 13  14
        let mut board = board_with([0, 0, 0, 0, 0, 0, 10, 1, 2, 3, 0, 0, 4, 20]);
        check_and_resolve(&mut board);

        assert!(board.is_over());
        assert_eq!(board.winner(), Some(Side::North));
        assert!(!board.is_draw());
        assert_eq!(board.house_stones(Side::North), 0);
        assert_eq!(board.store_for(Side::North).stones(), 30);
        assert_eq!(board.store_for(Side::South).stones(), 10);
    }

    #[test]
    fn test_empty_north_lets_south_win() {
        let mut board = board_with([1, 1, 1, 1, 1, 1, 20, 0, 0, 0, 0, 0, 0, 10]);
        check_and_resolve(&mut board);

        assert!(board.is_over());
        assert_eq!(board.winner(), Some(Side::South));
        assert_eq!(board.store_for(Side::South).stones(), 26);
        assert_eq!(board.house_stones(Side::South), 0);
    }

    #[test]
    fn test_empty_side_can_win_on_store_count() {
        let mut board = board_with([0, 0, 0, 0, 0, 0, 40, 1, 0, 0, 0, 0, 0, 20]);
        check_and_resolve(&mut board);

        assert_eq!(board.winner(), Some(Side::South));
        assert_eq!(board.store_for(Side::North).stones(), 21);
    }

    #[test]
    fn test_equal_stores_is_a_draw() {
        let mut board = board_with([0, 0, 0, 0, 0, 0, 10, 0, 0, 0, 0, 0, 0, 10]);
        check_and_resolve(&mut board);

        assert!(board.is_over());
        assert!(board.is_draw());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_resolved_board_is_left_alone() {
        let mut stones = [0; 14];
        stones[6] = 5;
        stones[13] = 7;
        let mut board = Board::restore(stones, Side::North, Some(Side::North), false, true);
        let before = board.clone();
        check_and_resolve(&mut board);
        assert_eq!(board, before);
    }
}
