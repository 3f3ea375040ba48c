//! Kalah: six houses and one store per side, sown counter-clockwise.

mod action;
mod board;
pub mod invariants;
pub mod rules;
mod status;
mod types;

pub use action::{MoveError, MoveOutcome};
pub use board::{
    Board, HOUSES_PER_SIDE, INITIAL_STONES, NORTH_STORE, PIT_COUNT, SOUTH_STORE,
};
pub use status::{BoardStatus, GameStatus};
pub use types::{Pit, Side};
