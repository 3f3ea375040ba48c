//! Kalah - unified CLI
//!
//! Runs the HTTP game server or inspects stored games.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use kalah::{
    AppState, GameRepository, GameSession, GameStatus, MemoryStore, ServerConfig, router,
};
use std::path::Path;
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            database,
            config,
        } => {
            let config = load_config(&config)?.with_overrides(host, port, database);
            run_server(config).await
        }
        Command::Games { database, config } => {
            let config = load_config(&config)?.with_overrides(None, None, database);
            print_games(&config)
        }
    }
}

/// Reads the config file, then applies environment overrides.
#[instrument(skip(path), fields(path = %path.display()))]
fn load_config(path: &Path) -> Result<ServerConfig> {
    Ok(ServerConfig::from_file_or_default(path)?.with_env()?)
}

/// Opens the configured store and wraps it in a session.
#[instrument(skip(config), fields(database = %config.database()))]
fn open_session(config: &ServerConfig) -> Result<GameSession> {
    if config.is_memory() {
        info!("Using in-memory game store");
        return Ok(GameSession::new(MemoryStore::new()));
    }

    let repository = GameRepository::new(config.database().clone())?;
    repository.run_migrations()?;
    Ok(GameSession::new(repository))
}

/// Run the HTTP game server
#[instrument(skip(config), fields(bind = %config.bind_address()))]
async fn run_server(config: ServerConfig) -> Result<()> {
    let session = open_session(&config)?;
    let app = router(AppState::new(session, config.base_url()));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        address = %config.bind_address(),
        public_url = %config.base_url(),
        "Kalah server ready"
    );

    axum::serve(listener, app).await?;
    warn!("Server stopped");
    Ok(())
}

/// Print every stored game with its turn and progress
#[instrument(skip(config))]
fn print_games(config: &ServerConfig) -> Result<()> {
    if config.is_memory() {
        warn!("In-memory store holds no games outside a running server");
    }
    let session = open_session(config)?;
    let games = session.list_games()?;

    if games.is_empty() {
        println!("No games stored.");
        return Ok(());
    }

    for (id, board) in games {
        println!("Game {}: {}", id, GameStatus::from(&board));
        println!("{}", board.display());
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,kalah=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Tracing initialized");
}
