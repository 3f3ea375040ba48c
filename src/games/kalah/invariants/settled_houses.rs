//! Settled houses invariant: a finished board has nothing left to sow.

use super::Invariant;
use crate::games::kalah::{Board, Side};
use strum::IntoEnumIterator;

/// Invariant: once the game is over every house is empty.
pub struct SettledHousesInvariant;

impl Invariant<Board> for SettledHousesInvariant {
    fn holds(board: &Board) -> bool {
        !board.is_over() || Side::iter().all(|side| board.house_stones(side) == 0)
    }

    fn description() -> &'static str {
        "A finished game has no stones left in any house"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unswept_finished_board_violates() {
        let mut stones = [0; 14];
        stones[9] = 3;
        let board = Board::restore(stones, Side::South, Some(Side::South), false, true);
        assert!(!SettledHousesInvariant::holds(&board));
    }

    #[test]
    fn test_running_board_holds() {
        assert!(SettledHousesInvariant::holds(&Board::with_turn(Side::North)));
    }
}
