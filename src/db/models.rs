//! Database models and their mapping to boards.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use std::str::FromStr;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::kalah::{Board, PIT_COUNT, Side};

/// Game row: turn and result flags.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRecord {
    id: i32,
    turn: String,
    winner: Option<String>,
    is_draw: bool,
    is_over: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Rebuilds the board from this row and its pit rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the pits do not cover positions 1-14 exactly
    /// once or a stored value cannot be parsed.
    #[instrument(skip(self, pits), fields(game_id = self.id, pit_count = pits.len()))]
    pub fn to_board(&self, pits: &[PitRecord]) -> Result<Board, DbError> {
        if pits.len() != PIT_COUNT {
            return Err(DbError::corrupt_game(
                self.id,
                format!("{} pits stored, expected {}", pits.len(), PIT_COUNT),
            ));
        }

        let mut stones = [0u32; PIT_COUNT];
        let mut seen = [false; PIT_COUNT];
        for pit in pits {
            let index = usize::try_from(pit.position - 1)
                .ok()
                .filter(|i| *i < PIT_COUNT && !seen[*i])
                .ok_or_else(|| {
                    DbError::corrupt_game(
                        self.id,
                        format!("invalid or repeated pit position {}", pit.position),
                    )
                })?;
            seen[index] = true;
            stones[index] = u32::try_from(pit.stones).map_err(|_| {
                DbError::corrupt_game(
                    self.id,
                    format!("pit {} has a negative stone count {}", pit.position, pit.stones),
                )
            })?;
        }

        let turn = parse_side(self.id, &self.turn)?;
        let winner = self
            .winner
            .as_deref()
            .map(|side| parse_side(self.id, side))
            .transpose()?;
        Ok(Board::restore(
            stones,
            turn,
            winner,
            self.is_draw,
            self.is_over,
        ))
    }
}

fn parse_side(game_id: i32, s: &str) -> Result<Side, DbError> {
    Side::from_str(s).map_err(|_| DbError::corrupt_game(game_id, format!("Invalid side: '{}'", s)))
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    turn: String,
    winner: Option<String>,
    is_draw: bool,
    is_over: bool,
}

impl From<&Board> for NewGameRecord {
    fn from(board: &Board) -> Self {
        Self::new(
            board.turn().to_string(),
            board.winner().map(|side| side.to_string()),
            board.is_draw(),
            board.is_over(),
        )
    }
}

/// Pit row: stone count at one position of one game.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::pits)]
#[diesel(belongs_to(GameRecord, foreign_key = game_id))]
pub struct PitRecord {
    id: i32,
    game_id: i32,
    position: i32,
    stones: i32,
}

/// Insertable pit row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::pits)]
pub struct NewPitRecord {
    game_id: i32,
    position: i32,
    stones: i32,
}

impl NewPitRecord {
    /// Pit rows for every position of `board`.
    pub fn for_board(game_id: i32, board: &Board) -> Vec<Self> {
        board
            .pits()
            .iter()
            .map(|pit| Self::new(game_id, i32::from(pit.position()), stones_column(pit.stones())))
            .collect()
    }
}

/// Stone counts never exceed 72, so the column conversion cannot overflow.
pub(crate) fn stones_column(stones: u32) -> i32 {
    i32::try_from(stones).unwrap_or(i32::MAX)
}
