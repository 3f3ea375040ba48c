//! Sowing: distributing the stones of one house around the board.

use super::super::{Board, MoveError, MoveOutcome};
use super::endgame::check_and_resolve;
use tracing::{debug, instrument};

/// Sows the house at `position` and settles the board afterwards.
///
/// The caller validates the move first; this function does not re-check
/// turn, store or emptiness. Each of the `n` stones in the house goes one
/// pit further counter-clockwise:
///
/// - a stone aimed at the opponent's store is dropped from play;
/// - the last stone landing in an empty house of the mover captures itself
///   and the facing house into the mover's store;
/// - any other stone is added to the pit it reaches.
///
/// The mover plays again only if the last stone was aimed at their own
/// store. The endgame check always runs afterwards.
///
/// # Errors
///
/// Returns [`MoveError::OutOfRange`] when `position` is not on the board.
#[instrument(skip(board), fields(turn = %board.turn()))]
pub fn apply_move(board: &mut Board, position: u8) -> Result<MoveOutcome, MoveError> {
    let chosen = *board.pit_at(position)?;
    let side = chosen.side();
    let weight = chosen.stones();
    let own_store = Board::store_position(side);

    let mut outcome = MoveOutcome {
        side,
        sown: weight,
        last_position: position,
        captured: None,
        removed: 0,
        extra_turn: false,
    };

    for step in 1..=weight {
        let target_position = Board::next_position(position, step);
        let target = *board.pit(target_position);
        let last_stone = step == weight;
        outcome.last_position = target_position;

        if target.is_store() && target.side() != side {
            take_one(board, position);
            outcome.removed += 1;
            continue;
        }

        let lands_in_empty_house = target.is_house_of(side) && target.stones() == 0;
        if last_stone && lands_in_empty_house {
            outcome.captured = Some(capture(board, position, target_position, own_store));
        } else {
            let pit = board.pit_mut(target_position);
            pit.set_stones(pit.stones() + 1);
            take_one(board, position);
        }
    }

    outcome.extra_turn = outcome.last_position == own_store;
    if !outcome.extra_turn {
        board.set_turn(side.opposite());
    }

    debug!(
        position,
        sown = outcome.sown,
        last_position = outcome.last_position,
        captured = ?outcome.captured,
        removed = outcome.removed,
        extra_turn = outcome.extra_turn,
        "Stones sown"
    );

    check_and_resolve(board);
    Ok(outcome)
}

fn take_one(board: &mut Board, position: u8) {
    let pit = board.pit_mut(position);
    pit.set_stones(pit.stones().saturating_sub(1));
}

/// Moves the last stone and everything in the facing house into the store.
///
/// The landing house stays empty. Returns the stones added to the store.
fn capture(board: &mut Board, from: u8, landing: u8, store: u8) -> u32 {
    let opposite = Board::opposite_position(landing)
        .map(|p| {
            let pit = board.pit_mut(p);
            let stones = pit.stones();
            pit.set_stones(0);
            stones
        })
        .unwrap_or(0);
    let captured = opposite + 1;

    let store = board.pit_mut(store);
    store.set_stones(store.stones() + captured);
    take_one(board, from);

    debug!(landing, captured, "Captured facing house");
    captured
}
