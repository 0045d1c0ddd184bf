//! Brick Sim headless runner
//!
//! Builds a world from a map file or a seed, plays it with a simple
//! ball-tracking autopilot and prints the final world as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use brick_sim::level::{LevelConfig, load_map, random_layout};
use brick_sim::{BreakoutState, GameEvent, Outcome, PaddleDir, Tuning};

#[derive(Debug, Parser)]
#[command(name = "brick-sim", about = "Run a brick-breaker world headless")]
struct Args {
    /// ASCII level map (`#` block, `o` ball, `=` paddle)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Seed for a random layout when no map is given
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Grid rows for the random layout
    #[arg(long, default_value_t = 12)]
    rows: usize,

    /// Grid columns for the random layout
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Block density for the random layout (0.0 - 1.0)
    #[arg(long, default_value_t = 0.7)]
    density: f64,

    /// JSON file with a `LevelConfig`
    #[arg(long)]
    level_config: Option<PathBuf>,

    /// JSON file with `Tuning` overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Leave the paddle where it starts
    #[arg(long)]
    no_autopilot: bool,
}

fn build_world(args: &Args) -> anyhow::Result<BreakoutState> {
    let config = match &args.level_config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading level config {}", path.display()))?;
            LevelConfig::from_json(&json)?
        }
        None => LevelConfig::default(),
    };

    let state = match &args.map {
        Some(path) => load_map(path, &config)
            .with_context(|| format!("loading map {}", path.display()))?,
        None => random_layout(args.seed, args.rows, args.cols, args.density, &config)?,
    };

    let tuning = match &args.tuning {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading tuning {}", path.display()))?;
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };

    Ok(state.with_tuning(tuning))
}

/// Steer the paddle under the first ball; returns the direction moved
fn autopilot(state: &mut BreakoutState) -> PaddleDir {
    let Some(ball) = state.balls().first() else {
        return PaddleDir::Still;
    };
    let target = ball.center().x();
    let paddle_x = state.paddle().center().x();
    let step = state.tuning().paddle_step;

    if target < paddle_x - step / 2 {
        state.move_paddle_left();
    } else if target > paddle_x + step / 2 {
        state.move_paddle_right();
    }

    match state.paddle().center().x().cmp(&paddle_x) {
        std::cmp::Ordering::Less => PaddleDir::Left,
        std::cmp::Ordering::Equal => PaddleDir::Still,
        std::cmp::Ordering::Greater => PaddleDir::Right,
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    let args = Args::parse();

    let mut state = match build_world(&args) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to build world: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Brick Sim starting: {} balls, {} blocks",
        state.balls().len(),
        state.blocks().len()
    );

    let mut ticks = 0;
    let mut destroyed = 0;
    while ticks < args.ticks && state.outcome() == Outcome::InProgress {
        let dir = if args.no_autopilot {
            PaddleDir::Still
        } else {
            autopilot(&mut state)
        };
        for event in state.tick(dir) {
            match event {
                GameEvent::BlockDestroyed { .. } => destroyed += 1,
                GameEvent::BallLost { ball } => log::info!("Tick {}: ball {} lost", ticks, ball),
                GameEvent::Bounce { .. } => {}
            }
        }
        ticks += 1;
    }

    match state.outcome() {
        Outcome::Won => log::info!("Won after {} ticks", ticks),
        Outcome::Dead => log::info!("Lost after {} ticks", ticks),
        Outcome::InProgress => log::warn!("Still in progress after {} ticks", ticks),
    }
    log::info!("{} blocks destroyed", destroyed);

    match serde_json::to_string_pretty(&state) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize world: {}", e);
            ExitCode::FAILURE
        }
    }
}
