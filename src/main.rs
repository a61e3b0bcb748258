use anyhow::{Context, Result};
use clap::Parser;
use snake_sim::game::GameConfig;
use snake_sim::input::Autopilot;
use snake_sim::modes::{LogPresenter, SessionConfig, SessionDriver};
use std::path::PathBuf;
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_sim")]
#[command(version, about = "Headless Snake simulation steered by an autopilot")]
struct Cli {
    /// JSON file with grid_size and tick_interval_ms
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play (0 plays until interrupted)
    #[arg(long, default_value = "1")]
    games: u32,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Pause between games in milliseconds
    #[arg(long, default_value = "1000")]
    restart_delay_ms: u64,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }

        config.validate().context("Invalid command line overrides")?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut session = SessionConfig::new(cli.game_config()?);
    session.seed = cli.seed;
    session.max_games = (cli.games > 0).then_some(cli.games);
    session.max_ticks = cli.max_ticks;
    session.restart_delay_ms = cli.restart_delay_ms;

    let (input_tx, input_rx) = unbounded_channel();
    let presenter = Autopilot::new(LogPresenter::new(), input_tx);
    let driver = SessionDriver::new(session, presenter, input_rx)?;

    let summary = driver.run().await?;
    info!(
        summary = %serde_json::to_string(&summary).context("Failed to encode summary")?,
        "done"
    );

    Ok(())
}
