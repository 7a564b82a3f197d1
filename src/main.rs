use anyhow::{Context, Result};
use clap::Parser;
use power_snake::game::GameConfig;
use power_snake::leaderboard::LeaderboardStore;
use power_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "power_snake")]
#[command(version, about = "Snake with power-ups and a leaderboard")]
struct Cli {
    /// JSON file overriding the game tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the top scores are stored
    #[arg(long, default_value = "snake_leaderboard.json")]
    leaderboard: PathBuf,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let store = LeaderboardStore::new(cli.leaderboard);
    let mut human_mode = HumanMode::new(config, store, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
