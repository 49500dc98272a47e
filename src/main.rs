//! Headless driver for the engine
//!
//! Plays a game with pseudo-random button presses at 60 simulated frames per
//! second, then prints the final field, or the final snapshot as JSON with
//! `--json`.
//!
//! Usage: tetris-engine [settings.toml] [--json]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tetris_engine::{EngineConfig, GameMaster, Input};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Give up after ten simulated minutes
const MAX_FRAMES: u64 = TARGET_FPS * 600;

fn main() -> Result<(), Box<dyn Error>> {
    let mut settings_path: Option<PathBuf> = None;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => settings_path = Some(PathBuf::from(arg)),
        }
    }

    // Setup tracing to a log file in the temp directory
    let log_dir = std::env::temp_dir().join("tetris-engine");
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "headless.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tetris_engine=debug")),
        )
        .with_ansi(false)
        .init();

    let config = match &settings_path {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load(),
    };
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!("Headless run, seed={}, log={}", seed, log_dir.display());

    let mut game = GameMaster::new(config.with_seed(seed))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut now = Duration::ZERO;
    let mut frames = 0;

    while !game.is_game_over() && frames < MAX_FRAMES {
        game.tick(now, random_input(&mut rng));
        now += FRAME_DURATION;
        frames += 1;
    }

    tracing::info!(
        "Finished after {} frames, {} lines, game over: {}",
        frames,
        game.num_deleted_lines(),
        game.is_game_over()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(game.snapshot())?);
    } else {
        print!("{}", game);
        println!(
            "Lines: {} | Score: {} | Level: {}",
            game.num_deleted_lines(),
            game.score().points,
            game.score().level
        );
        if game.is_game_over() {
            println!("Topped out after {:.1}s", now.as_secs_f64());
        }
    }

    Ok(())
}

/// Mostly idle frames with the occasional tap or hold
fn random_input(rng: &mut ChaCha8Rng) -> Input {
    Input {
        rotate_cw: rng.gen_bool(0.05),
        rotate_ccw: rng.gen_bool(0.03),
        hold: rng.gen_bool(0.01),
        soft_drop: rng.gen_bool(0.2),
        hard_drop: rng.gen_bool(0.02),
        move_right: rng.gen_bool(0.15),
        move_left: rng.gen_bool(0.15),
    }
}
