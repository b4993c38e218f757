//! Command-line interface for twenty48.

use clap::Parser;
use std::path::PathBuf;

/// twenty48 - 2048 in the terminal with a per-size leaderboard
#[derive(Parser, Debug)]
#[command(name = "twenty48")]
#[command(about = "Play 2048 in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file (values below override it)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// SQLite file for the leaderboard (created if missing)
    #[arg(long)]
    pub db_path: Option<String>,

    /// File receiving log output
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Seconds a name or size prompt waits before asking again
    #[arg(long)]
    pub prompt_timeout_secs: Option<u64>,

    /// Fixed seed for reproducible tile placement
    #[arg(long)]
    pub seed: Option<u64>,
}
