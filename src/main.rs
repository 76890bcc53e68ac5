//! Runner Dash entry point
//!
//! Natively this drives the simulation headless with a simple autopilot and
//! prints a summary of each run. The browser build is driven from JS through
//! `runner_dash::web::WebRunner`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use runner_dash::audio::Mixer;
    use runner_dash::consts::FRAME_MS;
    use runner_dash::persistence::{BestScoreStore, FileStore, MemoryStore};
    use runner_dash::presentation::LogPresenter;
    use runner_dash::sim::{EntityKind, FrameInput, GameEvent, GameState, RunPhase};
    use runner_dash::{Game, Settings, Tuning};

    #[derive(Parser)]
    #[command(name = "runner-dash")]
    #[command(about = "Run the endless-runner simulation headless with an autopilot")]
    struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to simulate at 60 Hz
        #[arg(long, default_value_t = 3600)]
        frames: u32,
        /// JSON tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Where to keep the best score (in-memory if omitted)
        #[arg(long)]
        best_file: Option<PathBuf>,
    }

    /// Seconds of look-ahead the autopilot uses to time a jump
    const JUMP_LEAD_SECS: f32 = 0.12;

    /// Jump when an obstacle is about to reach the actor
    fn autopilot(state: &GameState) -> FrameInput {
        let action = match state.phase {
            RunPhase::Ready => true,
            RunPhase::Running => {
                let reach = state.speed * JUMP_LEAD_SECS + state.actor.half_extents.x;
                state.actor.on_ground
                    && state.obstacles.iter().any(|o| {
                        o.kind == EntityKind::Obstacle && {
                            let dx = o.pos.x - state.actor.pos.x;
                            dx > 0.0 && dx < reach + o.half_extents.x
                        }
                    })
            }
            RunPhase::Paused | RunPhase::GameOver => false,
        };
        FrameInput {
            action,
            pause: false,
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let settings = match &args.settings {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        let seed = match args.seed {
            Some(seed) => seed,
            None => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .context("system clock before unix epoch")?
                .as_millis() as u64,
        };
        let store: Box<dyn BestScoreStore> = match &args.best_file {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };

        log::info!("Runner Dash (headless) starting...");
        let presenter = LogPresenter::new(Mixer::from_settings(&settings));
        let mut game = Game::new(seed, tuning, &settings, store, presenter);

        let mut runs = 0u32;
        let mut restart_next = false;
        for _ in 0..args.frames {
            let mut input = autopilot(game.state());
            if restart_next {
                input.action = true;
                restart_next = false;
            }
            let report = game.frame(FRAME_MS, &input);
            if report.events.contains(&GameEvent::GameOver) {
                runs += 1;
                let snapshot = game.snapshot();
                println!("Run {}: {}", runs, snapshot.status_line());
                restart_next = true;
            }
        }

        let snapshot = game.snapshot();
        println!();
        println!("=== SESSION ===");
        println!("  Seed:       {}", seed);
        println!("  Frames:     {}", args.frames);
        println!("  Runs ended: {}", runs);
        println!("  Current:    {}", snapshot.status_line());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is runner_dash::web::wasm_main, this is just to satisfy the compiler
}
