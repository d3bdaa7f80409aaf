//! # Burrow Main Entry Point
//!
//! Parses the command line, sets up logging, loads settings and runs the
//! scene loop in a macroquad window.

use burrow::{BurrowResult, InputHandler, SceneManager, Settings};
use clap::Parser;
use log::{error, info};
use macroquad::window::Conf;
use std::path::{Path, PathBuf};

const DEFAULT_SETTINGS: &str = "settings.json";

/// Command line arguments for Burrow.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "A turn-based cave roguelike where the things you kill become the things you are")]
#[command(version)]
struct Args {
    /// Random seed for cave generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file; defaults to ./settings.json when present
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace or module=level pairs)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Burrow".to_owned(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Burrow v{}", burrow::VERSION);
    if let Err(e) = run_game(&args).await {
        error!("Burrow stopped: {}", e);
        std::process::exit(1);
    }
}

/// Loads settings and runs the scene loop until the player quits.
async fn run_game(args: &Args) -> BurrowResult<()> {
    let settings = load_settings(args.settings.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);

    let mut scenes = SceneManager::new(settings, seed, InputHandler::new())?;
    scenes.run().await?;

    info!("Game loop ended");
    Ok(())
}

/// Initializes the logging system from a filter string.
fn initialize_logging(filters: &str) {
    env_logger::Builder::new()
        .parse_filters(filters)
        .format_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> BurrowResult<Settings> {
    match path {
        Some(path) => Settings::load(path),
        None if Path::new(DEFAULT_SETTINGS).exists() => Settings::load(DEFAULT_SETTINGS),
        None => {
            info!("No {} found, using built-in settings", DEFAULT_SETTINGS);
            Ok(Settings::default())
        }
    }
}
