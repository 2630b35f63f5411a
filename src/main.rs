use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use torus_snake::game::{ApplePlacer, GameConfig, RandomPlacer};
use torus_snake::logging::{self, LogTarget};
use torus_snake::modes::{HumanMode, ReplayMode, parse_moves};

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around board")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board columns
    #[arg(long)]
    cols: Option<i32>,

    /// Board rows
    #[arg(long)]
    rows: Option<i32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for apple placement (replay defaults to 0)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Replay: one turn per tick, as N/S/E/W letters
    #[arg(long, default_value = "")]
    moves: String,

    /// Replay: number of ticks to run
    #[arg(long, default_value = "100")]
    ticks: u32,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run a scripted game without a terminal UI and print a JSON report
    Replay,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_target = match (&cli.log_file, &cli.mode) {
        (Some(path), _) => LogTarget::File(path),
        (None, Mode::Replay) => LogTarget::Stderr,
        (None, Mode::Human) => LogTarget::Off,
    };
    logging::init(log_target)?;

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let placer: Box<dyn ApplePlacer + Send> = match cli.seed {
                Some(seed) => Box::new(RandomPlacer::seeded(seed)),
                None => Box::new(RandomPlacer::from_entropy()),
            };
            let mut human_mode = HumanMode::new(config, placer);
            human_mode.run().await?;
        }
        Mode::Replay => {
            let moves = parse_moves(&cli.moves)?;
            let placer = RandomPlacer::seeded(cli.seed.unwrap_or(0));
            let report = ReplayMode::new(config, placer, moves, cli.ticks).run();

            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize replay report")?;
            println!("{json}");
        }
    }

    Ok(())
}
