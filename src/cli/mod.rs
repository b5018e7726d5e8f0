//! CLI module for Trove
//!
//! Provides command-line argument parsing for the trove-server binary.
//! Configuration comes from the environment; flags here override it for
//! one-off runs.

use clap::Parser;

/// Trove - community resource-sharing API server
#[derive(Parser, Debug)]
#[command(
    name = "trove-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Trove - community resource-sharing API with credential-gated access",
    after_help = "EXAMPLES:\n    \
                  trove-server                          # Serve with settings from the environment\n    \
                  trove-server --port 9000              # Override the listen port\n    \
                  trove-server --database trove.db      # Use a specific SQLite file"
)]
pub struct Cli {
    /// Host address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the SQLite database file (overrides DATABASE_PATH)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
