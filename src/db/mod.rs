//! SQLite persistence for Kalah games.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{GameRecord, NewGameRecord, NewPitRecord, PitRecord};
pub use repository::GameRepository;
