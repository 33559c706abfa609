//! Coin Dash entry point
//!
//! Headless driver: runs the simulation under the autopilot, logs gameplay
//! events and prints the final frame snapshot as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use coin_dash::consts::FRAME_RATE;
use coin_dash::sim::{GameEvent, GameState, Level, autopilot_input};
use coin_dash::{InputState, Settings};

/// Default run length: two minutes of game time
const DEFAULT_FRAMES: u64 = 120 * FRAME_RATE as u64;

#[derive(Parser)]
#[command(name = "coin-dash")]
#[command(about = "Run Coin Dash headless under the autopilot")]
struct Args {
    /// Settings JSON file (defaults are used if missing or invalid)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Level JSON file (built-in level if not given)
    #[arg(long)]
    level: Option<PathBuf>,

    /// Stop after this many frames if the game is not won
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Coin Dash (headless) starting...");

    let args = Args::parse();

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let level = match args.level.as_deref() {
        Some(path) => match Level::load(path, &settings) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Failed to load level {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Level::builtin(),
    };

    let mut state = GameState::with_level(&settings, level);
    log::info!(
        "Running up to {} frames on a {}x{} world with {} coins",
        args.frames,
        state.world.width,
        state.world.height,
        state.coins.len()
    );

    // The autopilot presses keys through the configured bindings like a player would
    let mut input = InputState::default();
    for _ in 0..args.frames {
        let unbound = input.press_through(&settings.bindings, autopilot_input(&state));
        if state.frame == 0 {
            for action in unbound {
                log::warn!("No key bound to {}, autopilot cannot press it", action.as_str());
            }
        }
        state.set_input_state(input);
        state.advance_frame();

        for event in &state.events {
            match event {
                GameEvent::CoinCollected { index, score } => {
                    log::info!("Frame {}: coin {} collected, score {}", state.frame, index, score)
                }
                GameEvent::Respawned => log::info!("Frame {}: respawned", state.frame),
                GameEvent::Won { score, reason } => {
                    log::info!("Frame {}: won ({:?}) with score {}", state.frame, reason, score)
                }
            }
        }

        if state.status.win {
            break;
        }
    }

    log::info!("{}", state.status.message());

    match serde_json::to_string_pretty(&state.view()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize frame: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
