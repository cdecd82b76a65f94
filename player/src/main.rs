//! slide - play 2048 in the terminal
//!
//! Reads one command per line from stdin and prints the board to stdout after
//! each one. Logs go to stderr so they never interleave with the board.

use std::io;

use anyhow::Result;
use clap::Parser;
use player::{run, Config};
use tracing::{error, info};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        size = config.size,
        four_chance = config.four_chance,
        "Starting slide on a {0}x{0} board",
        config.size
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&config, stdin.lock(), stdout.lock()) {
        Ok(score) => {
            info!(score, "Session finished");
            Ok(())
        }
        Err(e) => {
            error!("Session failed: {}", e);
            Err(e)
        }
    }
}
