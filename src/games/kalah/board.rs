//! The Kalah board: fourteen pits in a ring plus turn and result flags.
//!
//! Layout, counter-clockwise from South's left:
//!
//! ```text
//!        13  12  11  10   9   8
//!   14                          7
//!         1   2   3   4   5   6
//! ```
//!
//! Positions 1-6 are South's houses and 7 its store; 8-13 are North's
//! houses and 14 its store. A house at `p` faces the house at `14 - p`.

use super::{MoveError, Pit, Side};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of pits on the board, stores included.
pub const PIT_COUNT: usize = 14;

/// Houses owned by each side.
pub const HOUSES_PER_SIDE: usize = 6;

/// Stones placed in every house of a new board.
pub const INITIAL_STONES: u32 = 6;

/// Position of South's store.
pub const SOUTH_STORE: u8 = 7;

/// Position of North's store.
pub const NORTH_STORE: u8 = 14;

/// Complete state of one Kalah game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pits: [Pit; PIT_COUNT],
    turn: Side,
    winner: Option<Side>,
    is_draw: bool,
    is_over: bool,
}

impl Board {
    /// Creates a fresh board with the starting side drawn from `rng`.
    ///
    /// Either side starts with probability one half.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let turn = if rng.gen_bool(0.5) {
            Side::South
        } else {
            Side::North
        };
        Self::with_turn(turn)
    }

    /// Creates a fresh board where `turn` moves first.
    pub fn with_turn(turn: Side) -> Self {
        let pits = std::array::from_fn(|index| {
            let position = index as u8 + 1;
            let side = if position <= SOUTH_STORE {
                Side::South
            } else {
                Side::North
            };
            let is_store = position == SOUTH_STORE || position == NORTH_STORE;
            let stones = if is_store { 0 } else { INITIAL_STONES };
            Pit::new(position, side, is_store, stones)
        });
        Self {
            pits,
            turn,
            winner: None,
            is_draw: false,
            is_over: false,
        }
    }

    /// Rebuilds a board from stored stone counts and result flags.
    ///
    /// `stones[i]` is the count at position `i + 1`.
    pub fn restore(
        stones: [u32; PIT_COUNT],
        turn: Side,
        winner: Option<Side>,
        is_draw: bool,
        is_over: bool,
    ) -> Self {
        let mut board = Self::with_turn(turn);
        for (pit, count) in board.pits.iter_mut().zip(stones) {
            pit.set_stones(count);
        }
        board.winner = winner;
        board.is_draw = is_draw;
        board.is_over = is_over;
        board
    }

    /// Checks that `position` names a pit and narrows it to `u8`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] outside 1..=14.
    pub fn checked_position(position: i64) -> Result<u8, MoveError> {
        u8::try_from(position)
            .ok()
            .filter(|p| (1..=PIT_COUNT as u8).contains(p))
            .ok_or(MoveError::OutOfRange { position })
    }

    /// Returns the pit at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] outside 1..=14.
    pub fn pit_at(&self, position: u8) -> Result<&Pit, MoveError> {
        Self::checked_position(position.into())?;
        Ok(self.pit(position))
    }

    /// Returns the house facing `pit`, or `None` for a store.
    pub fn opposite(&self, pit: &Pit) -> Option<&Pit> {
        Self::opposite_position(pit.position()).map(|position| self.pit(position))
    }

    /// Position of the house facing `position`, or `None` for a store.
    pub fn opposite_position(position: u8) -> Option<u8> {
        match position {
            SOUTH_STORE | NORTH_STORE => None,
            1..=13 => Some(PIT_COUNT as u8 - position),
            _ => None,
        }
    }

    /// Returns the store owned by `side`.
    pub fn store_for(&self, side: Side) -> &Pit {
        self.pit(Self::store_position(side))
    }

    /// Position of the store owned by `side`.
    pub fn store_position(side: Side) -> u8 {
        match side {
            Side::South => SOUTH_STORE,
            Side::North => NORTH_STORE,
        }
    }

    /// Position reached by walking `steps` pits counter-clockwise from `from`.
    ///
    /// Plain ring arithmetic; no pit is skipped.
    pub fn next_position(from: u8, steps: u32) -> u8 {
        let offset = (u32::from(from) - 1 + steps) % PIT_COUNT as u32;
        offset as u8 + 1
    }

    /// Overwrites the stone count at `position`.
    ///
    /// Intended for setting up positions; legal play goes through the rules.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] outside 1..=14.
    pub fn set_stones(&mut self, position: u8, stones: u32) -> Result<(), MoveError> {
        Self::checked_position(position.into())?;
        self.pit_mut(position).set_stones(stones);
        Ok(())
    }

    /// All pits in ascending position order.
    pub fn pits(&self) -> &[Pit; PIT_COUNT] {
        &self.pits
    }

    /// Houses owned by `side`, in position order.
    pub fn houses(&self, side: Side) -> impl Iterator<Item = &Pit> {
        self.pits.iter().filter(move |pit| pit.is_house_of(side))
    }

    /// Total stones left in the houses of `side`.
    pub fn house_stones(&self, side: Side) -> u32 {
        self.houses(side).map(Pit::stones).sum()
    }

    /// Total stones on the board, stores included.
    pub fn total_stones(&self) -> u32 {
        self.pits.iter().map(Pit::stones).sum()
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// Winner of a finished game.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Whether the game finished level.
    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    /// Whether the game has finished.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Textual picture of the board, North on top.
    pub fn display(&self) -> String {
        let row = |positions: &mut dyn Iterator<Item = u8>| {
            positions
                .map(|p| format!("{:>3}", self.pit(p).stones()))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let north = row(&mut (8..=13).rev());
        let south = row(&mut (1..=6));
        format!(
            "     {north}\n{:>3}{:>26}\n     {south}",
            self.store_for(Side::North).stones(),
            self.store_for(Side::South).stones(),
        )
    }

    // Positions passed here come from `next_position`, `opposite_position`
    // or `store_position`, which only yield 1..=14.
    pub(super) fn pit(&self, position: u8) -> &Pit {
        &self.pits[usize::from(position) - 1]
    }

    pub(super) fn pit_mut(&mut self, position: u8) -> &mut Pit {
        &mut self.pits[usize::from(position) - 1]
    }

    pub(super) fn set_turn(&mut self, turn: Side) {
        self.turn = turn;
    }

    pub(super) fn finish(&mut self, winner: Option<Side>) {
        self.winner = winner;
        self.is_draw = winner.is_none();
        self.is_over = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_fresh_board_layout() {
        let board = Board::with_turn(Side::South);
        for pit in board.pits() {
            let expected_side = if pit.position() <= 7 {
                Side::South
            } else {
                Side::North
            };
            assert_eq!(pit.side(), expected_side);
            if pit.position() == 7 || pit.position() == 14 {
                assert!(pit.is_store());
                assert_eq!(pit.stones(), 0);
            } else {
                assert!(!pit.is_store());
                assert_eq!(pit.stones(), 6);
            }
        }
        assert_eq!(board.total_stones(), 72);
        assert!(!board.is_over());
    }

    #[test]
    fn test_starting_side_comes_from_rng() {
        let mut low = StepRng::new(0, 0);
        assert_eq!(Board::new(&mut low).turn(), Side::South);

        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(Board::new(&mut high).turn(), Side::North);
    }

    #[test]
    fn test_pit_at_rejects_out_of_range() {
        let board = Board::with_turn(Side::South);
        assert_eq!(
            board.pit_at(0),
            Err(MoveError::OutOfRange { position: 0 })
        );
        assert_eq!(
            board.pit_at(15),
            Err(MoveError::OutOfRange { position: 15 })
        );
        assert_eq!(board.pit_at(14).map(Pit::is_store), Ok(true));
    }

    #[test]
    fn test_checked_position_handles_wide_values() {
        assert_eq!(Board::checked_position(1), Ok(1));
        assert_eq!(
            Board::checked_position(-3),
            Err(MoveError::OutOfRange { position: -3 })
        );
        assert_eq!(
            Board::checked_position(270),
            Err(MoveError::OutOfRange { position: 270 })
        );
    }

    #[test]
    fn test_opposite_houses_face_each_other() {
        let board = Board::with_turn(Side::South);
        for position in 1..=6u8 {
            let south = board.pit_at(position).unwrap();
            let north = board.opposite(south).unwrap();
            assert_eq!(north.side(), Side::North);
            assert!(!north.is_store());
            assert_eq!(board.opposite(north).unwrap().position(), position);
        }
        assert!(board.opposite(board.store_for(Side::South)).is_none());
        assert!(board.opposite(board.store_for(Side::North)).is_none());
    }

    #[test]
    fn test_next_position_wraps() {
        assert_eq!(Board::next_position(7, 1), 8);
        assert_eq!(Board::next_position(14, 1), 1);
        assert_eq!(Board::next_position(1, 14), 1);
        assert_eq!(Board::next_position(13, 3), 2);
    }

    #[test]
    fn test_store_for_each_side() {
        let board = Board::with_turn(Side::North);
        assert_eq!(board.store_for(Side::South).position(), 7);
        assert_eq!(board.store_for(Side::North).position(), 14);
    }

    #[test]
    fn test_restore_round_trips_counts() {
        let mut stones = [0; PIT_COUNT];
        stones[6] = 30;
        stones[13] = 42;
        let board = Board::restore(stones, Side::North, Some(Side::North), false, true);
        assert_eq!(board.store_for(Side::North).stones(), 42);
        assert_eq!(board.winner(), Some(Side::North));
        assert!(board.is_over());
        assert_eq!(board.house_stones(Side::South), 0);
    }
}
