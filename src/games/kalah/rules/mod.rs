//! Game rules for Kalah.
//!
//! Pure functions over a [`Board`](super::Board): a move is validated,
//! then sown, then the board is checked for a finished game. Rules are
//! kept apart from board storage so each step can be tested alone.

pub mod endgame;
pub mod sowing;
pub mod validate;

pub use endgame::check_and_resolve;
pub use sowing::apply_move;
pub use validate::validate;
