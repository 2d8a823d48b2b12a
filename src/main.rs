use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{Game, GameConfig};
use grid_snake::modes::{DEFAULT_FPS, PlayMode};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a 30x30 grid in your terminal")]
struct Cli {
    /// Seed for food placement, for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Frames drawn per second; movement speed is unaffected
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Write a log to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Print the game configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::default();
    config.validate().context("Invalid game configuration")?;

    if cli.print_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
        println!("{json}");
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level, Config::default(), file)
            .context("Failed to initialize logger")?;
    }

    let game = match cli.seed {
        Some(seed) => Game::seeded(config, seed),
        None => Game::new(config),
    };

    let mut play_mode = PlayMode::new(game, cli.fps);
    play_mode.run().await
}
