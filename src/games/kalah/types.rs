//! Core domain types for Kalah.

use serde::{Deserialize, Serialize};

/// One of the two players.
///
/// Renders in upper case (`SOUTH`, `NORTH`) both on the wire and in
/// error messages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Side {
    /// Owns positions 1-6 and the store at 7.
    South,
    /// Owns positions 8-13 and the store at 14.
    North,
}

impl Side {
    /// Returns the other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::South => Side::North,
            Side::North => Side::South,
        }
    }
}

/// A single pit on the board: a house or a store.
///
/// Position, side and store flag never change after the board is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pit {
    position: u8,
    side: Side,
    is_store: bool,
    stones: u32,
}

impl Pit {
    pub(super) fn new(position: u8, side: Side, is_store: bool, stones: u32) -> Self {
        Self {
            position,
            side,
            is_store,
            stones,
        }
    }

    /// 1-based position on the board.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Side owning this pit.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Whether this pit is a store (kalah).
    pub fn is_store(&self) -> bool {
        self.is_store
    }

    /// Stones currently in the pit.
    pub fn stones(&self) -> u32 {
        self.stones
    }

    /// Whether this pit is a house owned by `side`.
    pub fn is_house_of(&self, side: Side) -> bool {
        !self.is_store && self.side == side
    }

    pub(super) fn set_stones(&mut self, stones: u32) {
        self.stones = stones;
    }
}
