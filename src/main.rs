//! twenty48 - terminal 2048.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};
use twenty48::{GameConfig, ResultRepository, SessionRunner, TerminalConsole};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    initialize_tracing(&config)?;

    info!(db_path = %config.db_path(), "Starting twenty48");

    let repository = ResultRepository::open(config.db_path().clone())
        .context("Failed to open the results database")?;

    let (trigger, shutdown) = twenty48::shutdown_channel();
    let listener = twenty48::listen_for_interrupt(trigger);

    let rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    };

    let console = TerminalConsole::new(shutdown, config.prompt_timeout())?;
    let mut runner = SessionRunner::new(console, repository, rng);
    let result = runner.run().await;

    listener.abort();
    info!("Shutting down");
    result.context("Game loop failed")
}

#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let base = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    let config = base.with_overrides(
        cli.db_path.clone(),
        cli.log_file.clone(),
        cli.prompt_timeout_secs,
        cli.seed,
    )?;
    Ok(config)
}

/// Logs go to a file so they never interleave with the board on stdout.
fn initialize_tracing(config: &GameConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,twenty48=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
