//! Database repository for Kalah games.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::stones_column;
use crate::db::{DbError, GameRecord, NewGameRecord, NewPitRecord, PitRecord, schema};
use crate::games::kalah::Board;
use crate::store::{GameId, GameStore, StoreError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Per-connection settings. Every request opens its own connection, so
/// writers wait on each other instead of failing with `database is locked`.
const CONNECTION_PRAGMAS: &str = "PRAGMA busy_timeout = 5000; \
     PRAGMA journal_mode = WAL; \
     PRAGMA synchronous = NORMAL; \
     PRAGMA foreign_keys = ON;";

/// SQLite-backed game repository.
///
/// Opens a fresh connection per operation; every write runs in a single
/// immediate transaction so a board is never half saved and concurrent
/// writers queue on the busy timeout.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        conn.batch_execute(CONNECTION_PRAGMAS)?;
        Ok(conn)
    }

    /// Applies any migrations the database has not seen yet.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Loads the game row with the given id, if any.
    #[instrument(skip(self, conn))]
    fn find_game(
        &self,
        conn: &mut SqliteConnection,
        id: GameId,
    ) -> Result<Option<GameRecord>, DbError> {
        let game = schema::games::table
            .find(id)
            .select(GameRecord::as_select())
            .first(conn)
            .optional()?;
        Ok(game)
    }
}

impl GameStore for GameRepository {
    #[instrument(skip(self, board), fields(turn = %board.turn()))]
    fn create(&self, board: &Board) -> Result<GameId, StoreError> {
        debug!("Creating game");
        let mut conn = self.connection()?;

        let id = conn.immediate_transaction::<_, StoreError, _>(|conn| {
            let game = diesel::insert_into(schema::games::table)
                .values(NewGameRecord::from(board))
                .returning(GameRecord::as_returning())
                .get_result(conn)?;

            diesel::insert_into(schema::pits::table)
                .values(NewPitRecord::for_board(*game.id(), board))
                .execute(conn)?;

            Ok(*game.id())
        })?;

        info!(game_id = id, "Game created");
        Ok(id)
    }

    #[instrument(skip(self))]
    fn load(&self, id: GameId) -> Result<Board, StoreError> {
        debug!(game_id = id, "Loading game");
        let mut conn = self.connection()?;

        let game = self
            .find_game(&mut conn, id)?
            .ok_or(StoreError::NotFound { game_id: id })?;

        let pits = PitRecord::belonging_to(&game)
            .order(schema::pits::position.asc())
            .select(PitRecord::as_select())
            .load(&mut conn)
            .map_err(DbError::from)?;

        Ok(game.to_board(&pits)?)
    }

    #[instrument(skip(self, board), fields(turn = %board.turn(), is_over = board.is_over()))]
    fn save(&self, id: GameId, board: &Board) -> Result<(), StoreError> {
        debug!(game_id = id, "Saving game");
        let mut conn = self.connection()?;

        conn.immediate_transaction::<_, StoreError, _>(|conn| {
            use schema::games::dsl as games;
            use schema::pits::dsl as pits;

            let updated = diesel::update(games::games.find(id))
                .set((
                    games::turn.eq(board.turn().to_string()),
                    games::winner.eq(board.winner().map(|side| side.to_string())),
                    games::is_draw.eq(board.is_draw()),
                    games::is_over.eq(board.is_over()),
                    games::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(StoreError::NotFound { game_id: id });
            }

            for pit in board.pits() {
                diesel::update(
                    pits::pits
                        .filter(pits::game_id.eq(id))
                        .filter(pits::position.eq(i32::from(pit.position()))),
                )
                .set(pits::stones.eq(stones_column(pit.stones())))
                .execute(conn)?;
            }
            Ok(())
        })?;

        debug!(game_id = id, "Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn list_all(&self) -> Result<Vec<(GameId, Board)>, StoreError> {
        debug!("Listing all games");
        let mut conn = self.connection()?;

        let games = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRecord::as_select())
            .load(&mut conn)
            .map_err(DbError::from)?;

        let pits = PitRecord::belonging_to(&games)
            .order(schema::pits::position.asc())
            .select(PitRecord::as_select())
            .load(&mut conn)
            .map_err(DbError::from)?
            .grouped_by(&games);

        let boards = games
            .iter()
            .zip(pits)
            .map(|(game, pits)| Ok((*game.id(), game.to_board(&pits)?)))
            .collect::<Result<Vec<_>, DbError>>()?;

        info!(count = boards.len(), "Games loaded");
        Ok(boards)
    }
}
