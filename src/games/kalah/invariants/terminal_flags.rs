//! Terminal flags invariant: a result exists exactly when the game is over.

use super::Invariant;
use crate::games::kalah::Board;

/// Invariant: a finished game has exactly one of a winner or a draw, and
/// an unfinished game has neither.
pub struct TerminalFlagsInvariant;

impl Invariant<Board> for TerminalFlagsInvariant {
    fn holds(board: &Board) -> bool {
        if board.is_over() {
            board.winner().is_some() != board.is_draw()
        } else {
            board.winner().is_none() && !board.is_draw()
        }
    }

    fn description() -> &'static str {
        "A finished game has exactly one of winner or draw; an unfinished game has neither"
    }
}
