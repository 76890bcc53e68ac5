//! Per-frame simulation step
//!
//! Order within a running frame is fixed: difficulty ramp, motion and cull,
//! passive scoring, timer decay and effects, spawning, collision resolution.
//! A collision found this frame therefore sees this frame's speed and timers.

use super::collision::{detect_overlaps, integrate_actor};
use super::difficulty::Ramp;
use super::motion;
use super::powerup;
use super::resolve::{self, Outcome};
use super::run;
use super::spawner::{spawn_coin_cluster, spawn_obstacle, spawn_powerup};
use super::state::{GameEvent, GameState, RunPhase};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Tap / click / SPACE / UP: start, jump or restart depending on phase
    pub action: bool,
    /// P: pause toggle
    pub pause: bool,
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// Set on the frame the run ended; the best score to persist
    pub best_to_save: Option<u32>,
}

/// Advance the game state by one frame of `dt` seconds.
///
/// `dt` is clamped to `[0, tuning.max_frame_dt]`; a non-finite `dt` counts as zero.
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> FrameReport {
    let mut report = FrameReport::default();

    if input.pause {
        if let Some(paused) = run::toggle_pause(state) {
            report.events.push(GameEvent::PauseToggled(paused));
        }
    }

    if input.action {
        match state.phase {
            RunPhase::Ready => {
                run::start(state);
            }
            RunPhase::Running => report.events.extend(run::jump(state)),
            RunPhase::GameOver => {
                run::restart(state);
            }
            RunPhase::Paused => {}
        }
    }

    if state.phase != RunPhase::Running {
        return report;
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.tuning.max_frame_dt)
    } else {
        0.0
    };
    state.clock.advance(dt);
    let time_ms = state.clock.elapsed_ms();

    // Difficulty ramp
    let ramp = Ramp::from_tuning(&state.tuning);
    state.speed = ramp.speed(state.run.distance, state.run.speed_boost_active());
    let speed = state.speed;
    state.parallax_offset += speed / state.tuning.parallax_divisor * dt;

    // Motion and cull
    integrate_actor(&mut state.actor, &state.tuning, dt);
    let gravity = state.tuning.gravity;
    let cull_x = state.tuning.cull_x;
    for entities in [&mut state.obstacles, &mut state.coins, &mut state.powerups] {
        motion::advance(entities, speed, gravity, dt);
        motion::cull(entities, cull_x);
    }
    resolve::accrue_passive(&mut state.run, speed, dt, &state.tuning);

    // Timers and their effects
    let magnet_was_active = state.run.magnet_active();
    let expired = powerup::decay(&mut state.run, dt);
    if magnet_was_active {
        powerup::attract_coins(
            &mut state.coins,
            state.actor.pos,
            state.tuning.magnet_radius,
            state.tuning.magnet_pull_speed,
        );
    }
    powerup::sync_shield_overlay(
        &mut state.shield_overlay,
        state.run.shield_active(),
        state.actor.pos,
        time_ms,
        &state.tuning,
        state.reduced_motion,
    );
    if expired.shield {
        log::debug!("Shield expired");
    }
    if expired.magnet {
        log::debug!("Magnet expired");
    }
    if expired.speed_boost {
        log::debug!("Speed boost expired");
    }

    // Spawning
    let triggers = state.spawner.poll(state.phase, dt * 1000.0);
    if triggers.obstacle {
        let obstacle = spawn_obstacle(&state.tuning, &mut state.rng, &mut state.ids);
        state.obstacles.push(obstacle);
    }
    if triggers.coins {
        let cluster = spawn_coin_cluster(&state.tuning, &mut state.rng, &mut state.ids);
        state.coins.extend(cluster);
    }
    if triggers.powerup {
        let powerup = spawn_powerup(&state.tuning, &mut state.rng, &mut state.ids);
        state.powerups.push(powerup);
    }

    // Collisions
    let overlaps = detect_overlaps(state);
    let outcome = resolve::resolve(state, &overlaps, &mut report.events);
    for entities in [&mut state.obstacles, &mut state.coins, &mut state.powerups] {
        motion::sweep(entities);
    }
    if outcome == Outcome::Fatal {
        report.best_to_save = Some(run::game_over(state));
        report.events.push(GameEvent::GameOver);
    }

    // Ensure deterministic ordering
    state.normalize_order();
    report
}
