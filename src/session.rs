//! Game session orchestration: load, validate, sow, settle, save.

use crate::games::kalah::invariants::{InvariantSet, InvariantViolation, KalahInvariants};
use crate::games::kalah::{Board, BoardStatus, MoveError, MoveOutcome, rules};
use crate::store::{GameId, GameStore, StoreError};
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info, instrument, warn};

/// Failure of a session operation.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// The move was rejected.
    #[display("{_0}")]
    Move(MoveError),
    /// The game could not be read or written.
    #[display("{_0}")]
    Store(StoreError),
    /// A move produced a board that breaks a board invariant; it was not saved.
    #[display("Move on game [{game_id}] broke invariants: {}", describe(violations))]
    #[from(ignore)]
    Corrupted {
        /// Game the move was applied to.
        game_id: GameId,
        /// Violated invariants.
        #[error(not(source))]
        violations: Vec<InvariantViolation>,
    },
}

fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

type GameLocks = Arc<Mutex<HashMap<GameId, Arc<Mutex<()>>>>>;

/// Runs Kalah games held in a [`GameStore`].
///
/// Moves on the same game are serialized by a per-game lock held across
/// load, apply and save. Moves on different games do not contend.
#[derive(Clone)]
pub struct GameSession {
    store: Arc<dyn GameStore>,
    rng: Arc<Mutex<Box<dyn RngCore + Send>>>,
    locks: GameLocks,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session drawing starting sides from an entropy-seeded RNG.
    #[instrument(skip(store))]
    pub fn new(store: impl GameStore + 'static) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Creates a session drawing starting sides from `rng`.
    #[instrument(skip(store, rng))]
    pub fn with_rng(store: impl GameStore + 'static, rng: impl RngCore + Send + 'static) -> Self {
        info!("Creating game session");
        Self {
            store: Arc::new(store),
            rng: Arc::new(Mutex::new(Box::new(rng))),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates and stores a fresh game.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the game cannot be stored.
    #[instrument(skip(self))]
    pub fn create_game(&self) -> Result<GameId, SessionError> {
        let board = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            Board::new(&mut **rng)
        };
        let id = self.store.create(&board)?;
        info!(game_id = id, turn = %board.turn(), "New game created");
        Ok(id)
    }

    /// Plays the house at `position` in game `game_id`.
    ///
    /// The board is only saved when the move is legal and the result
    /// satisfies every board invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] for an unknown game or storage
    /// failure, [`SessionError::Move`] for an illegal move, and
    /// [`SessionError::Corrupted`] if the resulting board is inconsistent.
    #[instrument(skip(self))]
    pub fn apply_move(&self, game_id: GameId, position: i64) -> Result<BoardStatus, SessionError> {
        let lock = self.game_lock(game_id)?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut board = self.store.load(game_id)?;
        let outcome = play(&mut board, position).inspect_err(|e| {
            warn!(game_id, position, error = %e, "Move rejected");
        })?;

        if let Err(violations) = KalahInvariants::check_all(&board) {
            error!(game_id, ?violations, "Board invariants violated, discarding move");
            return Err(SessionError::Corrupted {
                game_id,
                violations,
            });
        }

        self.store.save(game_id, &board)?;
        info!(
            game_id,
            position,
            side = %outcome.side,
            extra_turn = outcome.extra_turn,
            next_turn = %board.turn(),
            is_over = board.is_over(),
            "Move applied"
        );
        Ok(BoardStatus::from(&board))
    }

    /// Current pit counts of game `game_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] for an unknown game or storage failure.
    #[instrument(skip(self))]
    pub fn status(&self, game_id: GameId) -> Result<BoardStatus, SessionError> {
        Ok(BoardStatus::from(&self.store.load(game_id)?))
    }

    /// Full board of game `game_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] for an unknown game or storage failure.
    #[instrument(skip(self))]
    pub fn game(&self, game_id: GameId) -> Result<Board, SessionError> {
        Ok(self.store.load(game_id)?)
    }

    /// Every stored game in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] on storage failure.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<(GameId, Board)>, SessionError> {
        let games = self.store.list_all()?;
        debug!(count = games.len(), "Listed games");
        Ok(games)
    }

    /// Lock guarding game `game_id`.
    ///
    /// Games are never deleted, so an id only gets an entry once the store
    /// has confirmed it exists; unknown ids leave the map untouched.
    fn game_lock(&self, game_id: GameId) -> Result<Arc<Mutex<()>>, SessionError> {
        let known = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&game_id)
            .cloned();
        if let Some(lock) = known {
            return Ok(lock);
        }

        self.store.load(game_id)?;
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(locks.entry(game_id).or_default()))
    }
}

/// Validates and sows one move on `board`.
///
/// Nothing is mutated when the move is rejected.
fn play(board: &mut Board, position: i64) -> Result<MoveOutcome, MoveError> {
    let position = Board::checked_position(position)?;
    rules::validate(board, position)?;
    rules::apply_move(board, position)
}
