//! Database error types.

use crate::store::{GameId, StoreError};
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong in the database layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// Opening the database, migrating it or running a query failed.
    #[display("query")]
    Query,
    /// A stored game could not be turned back into a board.
    #[display("corrupt game")]
    CorruptGame,
}

/// Database error with the game it concerns and the call site that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Database {} error{}: {} at {}:{}", kind, game_suffix(game_id), message, file, line)]
pub struct DbError {
    /// Category of the failure.
    pub kind: DbErrorKind,
    /// Game being read or written, when known.
    pub game_id: Option<GameId>,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

fn game_suffix(game_id: &Option<GameId>) -> String {
    game_id.map(|id| format!(" on game [{id}]")).unwrap_or_default()
}

impl DbError {
    /// Creates a query error recording the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind: DbErrorKind::Query,
            game_id: None,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Stored rows of `game_id` do not describe a valid board.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn corrupt_game(game_id: GameId, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind: DbErrorKind::CorruptGame,
            game_id: Some(game_id),
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

// Lets transactions return store errors directly.
impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Backend(DbError::from(err))
    }
}
