use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use led_snake::game::GameConfig;
use led_snake::modes::{HeadlessMode, SimulateMode, parse_script};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "led_snake")]
#[command(version, about = "Snake on an 8x8 LED matrix")]
struct Cli {
    /// How to run the console
    #[arg(long, default_value = "simulate")]
    mode: Mode,

    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks (overrides the config file)
    #[arg(long)]
    tick_ms: Option<u32>,

    /// Ticks to run in headless mode
    #[arg(long, default_value = "200")]
    ticks: u64,

    /// Button script for headless mode, one of U/D/L/R/. per tick
    #[arg(long, default_value = "")]
    script: String,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play on a simulated matrix in the terminal
    Simulate,
    /// Run a button script without a terminal and log a summary
    Headless,
}

fn init_logging(mode: Mode, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (mode, log_file) {
        (_, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        (Mode::Headless, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // The terminal belongs to the simulator
        (Mode::Simulate, None) => {}
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }

    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.mode, cli.log_file.as_deref())?;
    let config = load_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Simulate => {
            let mut simulate_mode = SimulateMode::new(config);
            simulate_mode.run().await?;
        }
        Mode::Headless => {
            let script = parse_script(&cli.script).context("Invalid --script")?;
            let mut headless_mode = HeadlessMode::new(config, script);
            headless_mode.run(cli.ticks)?;
        }
    }

    Ok(())
}
