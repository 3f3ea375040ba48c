//! Wire-visible views of a board.

use super::{Board, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stone counts keyed by pit position, as decimal strings.
///
/// Serializes as `{"status": {"1": "6", ..., "14": "0"}}` with keys in
/// ascending position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStatus {
    status: BTreeMap<u8, String>,
}

impl BoardStatus {
    /// The position to count map.
    pub fn pits(&self) -> &BTreeMap<u8, String> {
        &self.status
    }

    /// Rendered count at `position`, if it is on the board.
    pub fn get(&self, position: u8) -> Option<&str> {
        self.status.get(&position).map(String::as_str)
    }
}

impl From<&Board> for BoardStatus {
    fn from(board: &Board) -> Self {
        let status = board
            .pits()
            .iter()
            .map(|pit| (pit.position(), pit.stones().to_string()))
            .collect();
        Self { status }
    }
}

/// Progress of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves can still be made; holds the side on turn.
    InProgress(Side),
    /// Game ended with a winner.
    Won(Side),
    /// Game ended with equal stores.
    Draw,
}

impl From<&Board> for GameStatus {
    fn from(board: &Board) -> Self {
        match (board.is_over(), board.winner()) {
            (false, _) => GameStatus::InProgress(board.turn()),
            (true, Some(side)) => GameStatus::Won(side),
            (true, None) => GameStatus::Draw,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress(side) => write!(f, "{side} to move"),
            GameStatus::Won(side) => write!(f, "{side} wins"),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lists_every_pit_in_order() {
        let board = Board::with_turn(Side::South);
        let status = BoardStatus::from(&board);

        let keys: Vec<u8> = status.pits().keys().copied().collect();
        assert_eq!(keys, (1..=14).collect::<Vec<_>>());
        assert_eq!(status.get(1), Some("6"));
        assert_eq!(status.get(7), Some("0"));
        assert_eq!(status.get(15), None);
    }

    #[test]
    fn test_status_json_shape() {
        let board = Board::with_turn(Side::South);
        let json = serde_json::to_value(BoardStatus::from(&board)).unwrap();
        assert_eq!(json["status"]["1"], "6");
        assert_eq!(json["status"]["14"], "0");
        assert_eq!(json["status"].as_object().unwrap().len(), 14);
    }

    #[test]
    fn test_game_status_follows_flags() {
        let board = Board::with_turn(Side::North);
        assert_eq!(GameStatus::from(&board), GameStatus::InProgress(Side::North));

        let stones = [0; 14];
        let drawn = Board::restore(stones, Side::North, None, true, true);
        assert_eq!(GameStatus::from(&drawn), GameStatus::Draw);
        assert_eq!(GameStatus::from(&drawn).to_string(), "Draw");
    }
}
