//! Command-line interface for the Kalah server.

use clap::{Parser, Subcommand};

/// Kalah - two-player sowing game over HTTP
#[derive(Parser, Debug)]
#[command(name = "kalah")]
#[command(about = "Kalah game server with SQLite persistence", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path, or ":memory:"
        #[arg(long)]
        database: Option<String>,

        /// Path to the TOML config file
        #[arg(short, long, default_value = "kalah.toml")]
        config: std::path::PathBuf,
    },

    /// Print every stored game
    Games {
        /// SQLite database path
        #[arg(long)]
        database: Option<String>,

        /// Path to the TOML config file
        #[arg(short, long, default_value = "kalah.toml")]
        config: std::path::PathBuf,
    },
}
