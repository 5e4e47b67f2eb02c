// main.rs - Glitching Game of Life driver: windowed by default, headless on request

use std::path::PathBuf;

use clap::Parser;
use conway::GlitchLevel;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod headless;
mod simulation;
mod ui;

use config::SimConfig;
use error::{AppError, AppResult};
use headless::HeadlessOptions;
use simulation::Simulation;

#[derive(Parser, Debug)]
#[command(name = "conway_coro", version, about = "Toroidal Game of Life with glitch injection")]
struct Cli {
    /// TOML config file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Generations per minute
    #[arg(short, long)]
    bpm: Option<u32>,

    /// Library pattern name, `random` or `empty`
    #[arg(short, long)]
    pattern: Option<String>,

    /// none, low, medium or high
    #[arg(short, long)]
    glitch: Option<GlitchLevel>,

    /// Seed for a replayable run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run the tick loop in the terminal instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Stop after this many generations (headless only)
    #[arg(short = 'n', long)]
    generations: Option<u64>,

    /// Stop as soon as a repeating state is detected (headless only)
    #[arg(long)]
    stop_on_cycle: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut SimConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(bpm) = self.bpm {
            config.bpm = bpm;
        }
        if let Some(pattern) = &self.pattern {
            config.pattern = Some(pattern.clone());
            config.custom_pattern = None;
        }
        if let Some(glitch) = self.glitch {
            config.glitch = glitch;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    cli.apply_to(&mut config);

    let mut sim = Simulation::new(&config)?;

    if cli.headless {
        let runtime = tokio::runtime::Runtime::new().map_err(AppError::Runtime)?;
        let options = HeadlessOptions {
            generations: cli.generations,
            stop_on_cycle: cli.stop_on_cycle,
        };
        let reason = runtime.block_on(headless::run(&mut sim, config.tick_interval(), options));
        info!(?reason, generation = sim.generation(), "headless run finished");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([820.0, 960.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Glitch Life",
        options,
        Box::new(move |_cc| Box::new(ui::ConwayApp::new(sim, &config))),
    )
    .map_err(|err| AppError::Gui(err.to_string()))
}
