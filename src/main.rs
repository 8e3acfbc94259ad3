//! # Overworld Demo Entry Point
//!
//! Generates a world and runs a headless session with a drunkard-walk
//! player, the same key pipeline a real front end would use. Prints the
//! closing HUD line and can export JSON snapshots for inspection.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use overworld::{
    Command, HudSnapshot, MapWindow, OverworldResult, RunStatus, TickReport, WorldConfig,
    WorldSnapshot, WorldState,
};

/// Keys the autoplayer presses, drawn uniformly each turn.
const WALK_KEYS: [char; 5] = ['h', 'j', 'k', 'l', '.'];

/// Command line arguments for the overworld demo.
#[derive(Parser, Debug)]
#[command(name = "overworld")]
#[command(about = "A toroidal overworld simulation with roaming monster camps")]
#[command(version)]
struct Args {
    /// Random seed for world generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of turns to simulate
    #[arg(short, long, default_value_t = 200)]
    ticks: u64,

    /// Write a JSON snapshot of the final world to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Record the player's view each turn as JSON frames in this directory
    #[arg(long)]
    record: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> OverworldResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting overworld demo v{}", overworld::VERSION);

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = WorldConfig::new(seed);

    info!(
        "Generating a {}x{} world with seed {}",
        config.world_width, config.world_height, seed
    );

    let mut state = WorldState::generate(config)?;
    let mut keyboard = StdRng::seed_from_u64(seed);

    if let Some(dir) = &args.record {
        fs::create_dir_all(dir)?;
    }

    let mut last_report: Option<TickReport> = None;
    for frame in 0..args.ticks {
        let key = WALK_KEYS[keyboard.gen_range(0..WALK_KEYS.len())];
        let Some(action) = Command::from_key(key).and_then(Command::action) else {
            continue;
        };

        let report = state.tick(action)?;
        for line in &report.messages {
            info!("turn {}: {}", report.turn, line);
        }

        if let Some(dir) = &args.record {
            record_frame(dir, frame, &state)?;
        }

        let fell = report.status == RunStatus::PlayerDied;
        last_report = Some(report);
        if fell {
            info!("The player fell on turn {}", state.turn);
            break;
        }
    }

    info!("Simulated {} turns", state.turn);
    println!("{}", HudSnapshot::capture(&state));

    if let Some(path) = &args.export {
        let messages = last_report.map(|report| report.messages).unwrap_or_default();
        let snapshot = WorldSnapshot::capture(&state, &messages);
        fs::write(path, snapshot.to_json()?)?;
        info!("Wrote world snapshot to {}", path.display());
    }

    Ok(())
}

/// Initializes env_logger, preferring `RUST_LOG` over the CLI level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

/// Writes one view frame, zero-padded so directory listings sort in
/// playback order.
fn record_frame(dir: &Path, frame: u64, state: &WorldState) -> OverworldResult<()> {
    let window = MapWindow::around_player(state);
    let path = dir.join(format!("run00_f{:05}.json", frame));
    fs::write(path, serde_json::to_string_pretty(&window)?)?;
    Ok(())
}
