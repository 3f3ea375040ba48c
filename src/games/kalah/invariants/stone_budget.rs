//! Stone budget invariant: stones can leave play but never appear.

use super::Invariant;
use crate::games::kalah::{Board, HOUSES_PER_SIDE, INITIAL_STONES};

/// Stones on a fresh board.
const STARTING_STONES: u32 = 2 * HOUSES_PER_SIDE as u32 * INITIAL_STONES;

/// Invariant: the board never holds more stones than it started with.
///
/// Sowing past the opponent's store drops stones, so the total may shrink.
pub struct StoneBudgetInvariant;

impl Invariant<Board> for StoneBudgetInvariant {
    fn holds(board: &Board) -> bool {
        board.total_stones() <= STARTING_STONES
    }

    fn description() -> &'static str {
        "The board holds at most the 72 stones it started with"
    }
}
