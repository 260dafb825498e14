use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::logging::init_logging;
use grid_snake::modes::PlayMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Single-screen Snake on a fixed tick")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Tick period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "grid_snake::game_loop=trace"
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_delay_ms = tick_ms;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref(), cli.log_level.as_deref())?;
    let config = cli.game_config()?;
    tracing::info!(?config, "starting");

    let mut play_mode = PlayMode::new(config);
    play_mode.run().await?;

    Ok(())
}
