//! Kalah library - rules, persistence and HTTP service for the sowing game
//!
//! # Architecture
//!
//! - **Games**: the Kalah board and its rules (validate, sow, settle)
//! - **Store**: whole-board persistence, in memory or SQLite via diesel
//! - **Session**: per-game serialized moves over a store
//! - **Server**: axum REST API over a session
//!
//! # Example
//!
//! ```
//! use kalah::{GameSession, MemoryStore};
//!
//! let session = GameSession::new(MemoryStore::new());
//! let id = session.create_game().unwrap();
//! let status = session.status(id).unwrap();
//! assert_eq!(status.get(1), Some("6"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod db;
pub mod games;
pub mod server;
pub mod session;
pub mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, MEMORY_DATABASE, ServerConfig};

// Crate-level exports - Database
pub use db::{DbError, DbErrorKind, GameRepository};

// Crate-level exports - Game types
pub use games::kalah::{
    Board, BoardStatus, GameStatus, MoveError, MoveOutcome, Pit, Side, rules,
};

// Crate-level exports - Server
pub use server::{AppState, ErrorBody, GameRef, GameView, router};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError};

// Crate-level exports - Storage
pub use store::{GameId, GameStore, MemoryStore, StoreError};
