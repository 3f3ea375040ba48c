//! Move legality checks.

use super::super::{Board, MoveError, Pit};
use tracing::{debug, instrument};

/// Checks that the pit at `position` may be sown by the side on turn.
///
/// Rules are checked in a fixed order and the first failure wins:
/// finished game, store selected, wrong side, empty house.
///
/// # Errors
///
/// Returns the [`MoveError`] for the first rule the move breaks, or
/// [`MoveError::OutOfRange`] when `position` is not on the board.
#[instrument(skip(board), fields(turn = %board.turn()))]
pub fn validate(board: &Board, position: u8) -> Result<Pit, MoveError> {
    let pit = *board.pit_at(position)?;

    if board.is_over() {
        return Err(MoveError::GameOver {
            winner: board.winner(),
        });
    }
    if pit.is_store() {
        return Err(MoveError::KalahSelected { position });
    }
    if pit.side() != board.turn() {
        return Err(MoveError::WrongTurn {
            chosen_side: pit.side(),
            current_turn: board.turn(),
        });
    }
    if pit.stones() == 0 {
        return Err(MoveError::EmptyHouse { position });
    }

    debug!(position, stones = pit.stones(), "Move is legal");
    Ok(pit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kalah::Side;

    #[test]
    fn test_legal_move_returns_pit_unchanged() {
        let board = Board::with_turn(Side::North);
        let pit = validate(&board, 13).unwrap();
        assert_eq!(pit.position(), 13);
        assert_eq!(pit.stones(), 6);
        assert_eq!(board, Board::with_turn(Side::North));
    }

    #[test]
    fn test_wrong_turn_reports_both_sides() {
        let board = Board::with_turn(Side::North);
        assert_eq!(
            validate(&board, 1),
            Err(MoveError::WrongTurn {
                chosen_side: Side::South,
                current_turn: Side::North,
            })
        );
    }

    #[test]
    fn test_store_cannot_be_sown() {
        let board = Board::with_turn(Side::South);
        assert_eq!(
            validate(&board, 7),
            Err(MoveError::KalahSelected { position: 7 })
        );
        // Store check comes before the turn check.
        assert_eq!(
            validate(&board, 14),
            Err(MoveError::KalahSelected { position: 14 })
        );
    }

    #[test]
    fn test_empty_house_rejected() {
        let mut board = Board::with_turn(Side::South);
        board.set_stones(1, 0).unwrap();
        assert_eq!(
            validate(&board, 1),
            Err(MoveError::EmptyHouse { position: 1 })
        );
    }

    #[test]
    fn test_finished_game_rejects_everything() {
        let mut stones = [0; 14];
        stones[6] = 40;
        stones[13] = 32;
        let board = Board::restore(stones, Side::South, Some(Side::South), false, true);
        assert_eq!(
            validate(&board, 7),
            Err(MoveError::GameOver {
                winner: Some(Side::South)
            })
        );
    }

    #[test]
    fn test_out_of_range_position() {
        let board = Board::with_turn(Side::South);
        assert_eq!(
            validate(&board, 15),
            Err(MoveError::OutOfRange { position: 15 })
        );
    }
}
