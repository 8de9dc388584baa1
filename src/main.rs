use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use classic_snake::{app, FileScoreStore, Game, GameConfig, MemoryScoreStore, ScoreStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, value_name = "PATH")]
    score_file: Option<PathBuf>,

    /// Keep the high score for this session only
    #[arg(long, conflicts_with = "score_file")]
    no_save: bool,

    /// Log destination; the level comes from RUST_LOG
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let store: Box<dyn ScoreStore> = if cli.no_save {
        Box::new(MemoryScoreStore::default())
    } else {
        let path = cli.score_file.unwrap_or_else(FileScoreStore::default_path);
        tracing::info!(path = %path.display(), "using score file");
        Box::new(FileScoreStore::new(path))
    };

    let game = Game::seeded(GameConfig::default(), store, cli.seed);
    app::run(game)
}

/// The game owns the terminal, so logs always go to a file.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| {
        FileScoreStore::default_path().with_file_name("snake.log")
    });

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("classic_snake=info,snake=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
