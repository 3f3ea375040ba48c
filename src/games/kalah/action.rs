//! Move errors and move results for Kalah.
//!
//! A move is just a pit position; what matters is why it was rejected
//! or what happened when it was sown.

use super::Side;
use serde::{Deserialize, Serialize};

/// Reasons a requested move cannot be played.
///
/// None of these are transient: retrying the same move against the same
/// board always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game has already finished.
    #[display("{}", game_over_message(winner))]
    GameOver {
        /// Winning side, `None` for a draw.
        winner: Option<Side>,
    },

    /// The chosen pit is a store.
    #[display("Cannot make a move from a kalah pit with index [{position}].")]
    KalahSelected {
        /// Position of the store.
        position: u8,
    },

    /// The chosen pit belongs to the side that is not on turn.
    #[display("Wrong turn [{chosen_side}], the current turn is [{current_turn}].")]
    WrongTurn {
        /// Side owning the chosen pit.
        chosen_side: Side,
        /// Side whose turn it is.
        current_turn: Side,
    },

    /// The chosen house holds no stones.
    #[display("Cannot make a move, a pit with index [{position}] is empty.")]
    EmptyHouse {
        /// Position of the empty house.
        position: u8,
    },

    /// The position is not on the board.
    #[display("Pit index [{position}] is out of range, expected 1 to 14.")]
    OutOfRange {
        /// Position as requested.
        position: i64,
    },
}

fn game_over_message(winner: &Option<Side>) -> String {
    match winner {
        Some(side) => format!("Game is over, the winner side is [{side}]."),
        None => "Game is over, it ended in a draw.".to_string(),
    }
}

/// What a single sowing did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Side that moved.
    pub side: Side,
    /// Stones picked up from the chosen house.
    pub sown: u32,
    /// Position the last stone was aimed at.
    pub last_position: u8,
    /// Stones moved into the store by a capture, including the capturing stone.
    pub captured: Option<u32>,
    /// Stones dropped while passing the opponent's store.
    pub removed: u32,
    /// Whether the mover plays again.
    pub extra_turn: bool,
}
