//! HTTP interface for Kalah games.
//!
//! Routes:
//!
//! - `POST /games` creates a game
//! - `GET /games` lists games
//! - `GET /games/{game_id}` returns the full game view
//! - `GET /games/{game_id}/status` returns the pit counts
//! - `PUT /games/{game_id}/pits/{pit}` plays a house

use crate::games::kalah::{Board, BoardStatus, GameStatus, Side};
use crate::session::{GameSession, SessionError};
use crate::store::{GameId, StoreError};
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State, rejection::PathRejection},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    session: GameSession,
    public_url: String,
}

impl AppState {
    /// Creates handler state; game URIs are built under `public_url`.
    pub fn new(session: GameSession, public_url: impl Into<String>) -> Self {
        let public_url = public_url.into().trim_end_matches('/').to_string();
        Self {
            session,
            public_url,
        }
    }

    fn game_uri(&self, id: GameId) -> String {
        format!("{}/games/{}", self.public_url, id)
    }
}

/// Builds the application router with request logging.
#[instrument(skip(state), fields(public_url = %state.public_url))]
pub fn router(state: AppState) -> Router {
    info!("Building HTTP router");
    Router::new()
        .route("/games", get(list_games).post(create_game))
        .route("/games/{game_id}", get(game))
        .route("/games/{game_id}/status", get(status))
        .route("/games/{game_id}/pits/{pit}", put(make_move))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(
                method = %req.method(),
                uri = %req.uri(),
                "Incoming HTTP request"
            );
            req
        }))
        .with_state(state)
}

/// Reference to a stored game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
    /// Game id.
    pub id: GameId,
    /// Absolute URI of the game.
    pub uri: String,
}

/// Full state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Game id.
    pub id: GameId,
    /// Absolute URI of the game.
    pub uri: String,
    /// Side to move.
    pub turn: Side,
    /// Winning side, once decided.
    pub winner: Option<Side>,
    /// The game ended level.
    pub is_draw: bool,
    /// No more moves are accepted.
    pub is_over: bool,
    /// Readable progress, such as `SOUTH to move`.
    pub result: String,
    /// Pit counts.
    #[serde(flatten)]
    pub status: BoardStatus,
}

impl GameView {
    fn new(id: GameId, uri: String, board: &Board) -> Self {
        Self {
            id,
            uri,
            turn: board.turn(),
            winner: board.winner(),
            is_draw: board.is_draw(),
            is_over: board.is_over(),
            result: GameStatus::from(board).to_string(),
            status: BoardStatus::from(board),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Status name, such as `BAD_REQUEST`.
    pub status: String,
    /// Human-readable reason.
    pub message: String,
}

/// Failure of a request, rendered as an [`ErrorBody`].
#[derive(Debug, derive_more::Display)]
#[display("{status}: {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let status = match &err {
            SessionError::Move(_) => StatusCode::BAD_REQUEST,
            SessionError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            SessionError::Store(StoreError::Backend(_)) | SessionError::Corrupted { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Request task failed: {}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "Request failed");
        } else {
            debug!(status = %self.status, message = %self.message, "Request rejected");
        }
        let body = ErrorBody {
            status: status_name(self.status),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// `404 Not Found` becomes `NOT_FOUND`.
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace(' ', "_")
}

/// Runs a session call on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, SessionError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

#[instrument(skip(state))]
async fn create_game(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<GameRef>), ApiError> {
    let session = state.session.clone();
    let id = blocking(move || session.create_game()).await?;
    let uri = state.game_uri(id);
    info!(game_id = id, %uri, "Game created");
    Ok((StatusCode::CREATED, Json(GameRef { id, uri })))
}

#[instrument(skip(state))]
async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<GameRef>>, ApiError> {
    let session = state.session.clone();
    let games = blocking(move || session.list_games()).await?;
    let refs = games
        .into_iter()
        .map(|(id, _)| GameRef {
            id,
            uri: state.game_uri(id),
        })
        .collect();
    Ok(Json(refs))
}

#[instrument(skip(state, path))]
async fn game(
    State(state): State<AppState>,
    path: Result<Path<GameId>, PathRejection>,
) -> Result<Json<GameView>, ApiError> {
    let Path(game_id) = path?;
    let session = state.session.clone();
    let board = blocking(move || session.game(game_id)).await?;
    Ok(Json(GameView::new(game_id, state.game_uri(game_id), &board)))
}

#[instrument(skip(state, path))]
async fn status(
    State(state): State<AppState>,
    path: Result<Path<GameId>, PathRejection>,
) -> Result<Json<BoardStatus>, ApiError> {
    let Path(game_id) = path?;
    let session = state.session.clone();
    Ok(Json(blocking(move || session.status(game_id)).await?))
}

#[instrument(skip(state, path))]
async fn make_move(
    State(state): State<AppState>,
    path: Result<Path<(GameId, i64)>, PathRejection>,
) -> Result<Json<BoardStatus>, ApiError> {
    let Path((game_id, pit)) = path?;
    let session = state.session.clone();
    Ok(Json(blocking(move || session.apply_move(game_id, pit)).await?))
}
