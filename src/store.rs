//! Game persistence contract and the in-memory store.

use crate::db::DbError;
use crate::games::kalah::Board;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument};

/// Identifier of a stored game.
pub type GameId = i32;

/// Failure to read or write a game record.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    /// No game with this id exists.
    #[display("Game with id [{game_id}] not found on the server.")]
    NotFound {
        /// Requested id.
        game_id: GameId,
    },
    /// The backing database failed.
    #[display("{_0}")]
    Backend(DbError),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        Self::Backend(err)
    }
}

/// Storage for whole boards keyed by game id.
///
/// Implementations hold no game logic; the session loads a board, applies
/// a move and saves it back.
pub trait GameStore: std::fmt::Debug + Send + Sync {
    /// Stores a new board and returns its id.
    fn create(&self, board: &Board) -> Result<GameId, StoreError>;

    /// Loads the board of game `id`.
    fn load(&self, id: GameId) -> Result<Board, StoreError>;

    /// Replaces the board of game `id`.
    fn save(&self, id: GameId, board: &Board) -> Result<(), StoreError>;

    /// All games in ascending id order.
    fn list_all(&self) -> Result<Vec<(GameId, Board)>, StoreError>;
}

/// Process-local store; ids start at 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: Arc<Mutex<BTreeMap<GameId, Board>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, board))]
    fn create(&self, board: &Board) -> Result<GameId, StoreError> {
        let mut games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        let id = games.keys().next_back().map_or(1, |last| last + 1);
        games.insert(id, board.clone());
        debug!(game_id = id, "Game stored");
        Ok(id)
    }

    #[instrument(skip(self))]
    fn load(&self, id: GameId) -> Result<Board, StoreError> {
        let games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        games
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { game_id: id })
    }

    #[instrument(skip(self, board))]
    fn save(&self, id: GameId, board: &Board) -> Result<(), StoreError> {
        let mut games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = games
            .get_mut(&id)
            .ok_or(StoreError::NotFound { game_id: id })?;
        *slot = board.clone();
        debug!(game_id = id, "Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn list_all(&self) -> Result<Vec<(GameId, Board)>, StoreError> {
        let games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(games.iter().map(|(id, board)| (*id, board.clone())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kalah::Side;

    #[test]
    fn test_ids_are_sequential_from_one() {
        let store = MemoryStore::new();
        let board = Board::with_turn(Side::South);
        assert_eq!(store.create(&board).unwrap(), 1);
        assert_eq!(store.create(&board).unwrap(), 2);
        let ids: Vec<_> = store.list_all().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_save_replaces_board() {
        let store = MemoryStore::new();
        let id = store.create(&Board::with_turn(Side::South)).unwrap();
        let mut board = store.load(id).unwrap();
        board.set_stones(1, 0).unwrap();
        store.save(id, &board).unwrap();
        assert_eq!(store.load(id).unwrap(), board);
    }

    #[test]
    fn test_missing_game_is_not_found() {
        let store = MemoryStore::new();
        let err = store.load(9).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { game_id: 9 }));
        assert_eq!(err.to_string(), "Game with id [9] not found on the server.");
        assert!(store.save(9, &Board::with_turn(Side::North)).is_err());
    }
}
