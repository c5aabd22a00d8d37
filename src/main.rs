//! # Tombs Roguelike Main Entry Point
//!
//! Parses the command line, sets up logging and the macroquad window, and hands
//! control to the scene manager.

use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use std::path::PathBuf;
use tombs::{config, GenerationConfig, SceneManager, TombsResult};

/// Command line arguments for the Tombs roguelike.
#[derive(Parser, Debug)]
#[command(name = "tombs")]
#[command(about = "A turn-based roguelike of procedurally generated tombs")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation; every new game gets a fresh seed if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to save and load the game
    #[arg(long, default_value = config::SAVE_FILE)]
    save_file: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Tombs".to_owned(),
        window_width: config::WINDOW_WIDTH as i32,
        window_height: config::WINDOW_HEIGHT as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Tombs v{}", tombs::VERSION);

    let generation = match load_generation_config(&args) {
        Ok(generation) => generation,
        Err(e) => {
            error!("Cannot start: {e}");
            std::process::exit(1);
        }
    };

    let mut scenes = SceneManager::new(generation, &args.save_file);
    scenes.random_seeds = args.seed.is_none() && args.config.is_none();
    scenes.run().await;

    info!("Goodbye");
}

/// Initializes env_logger with the CLI level as the default filter.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .init();
}

/// Builds the generation parameters from the config file and seed flags.
fn load_generation_config(args: &Args) -> TombsResult<GenerationConfig> {
    let mut generation = match &args.config {
        Some(path) => {
            info!("Loading generation config from {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => GenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        generation.seed = seed;
    }
    generation.validate()?;
    Ok(generation)
}
