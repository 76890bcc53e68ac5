//! Run state transitions and the jump action
//!
//! `Ready -> Running <-> Paused`, `Running -> GameOver -> (restart) -> Ready`.

use super::state::{GameEvent, GameState, RunPhase};

/// Leave `Ready`. Returns false from any other phase.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != RunPhase::Ready {
        return false;
    }
    state.phase = RunPhase::Running;
    log::info!("Run started (seed {})", state.seed);
    true
}

/// Toggle between `Running` and `Paused`; returns the new paused flag.
/// Ignored in `Ready` and `GameOver`.
pub fn toggle_pause(state: &mut GameState) -> Option<bool> {
    let paused = match state.phase {
        RunPhase::Running => {
            state.phase = RunPhase::Paused;
            true
        }
        RunPhase::Paused => {
            state.phase = RunPhase::Running;
            false
        }
        RunPhase::Ready | RunPhase::GameOver => return None,
    };
    state.run.paused = paused;
    log::info!("{}", if paused { "Paused" } else { "Resumed" });
    Some(paused)
}

/// Jump if grounded, else spend the double-jump credit if armed
pub fn jump(state: &mut GameState) -> Option<GameEvent> {
    if state.phase != RunPhase::Running {
        return None;
    }
    let actor = &mut state.actor;
    if actor.on_ground {
        actor.vel_y = -state.tuning.jump_impulse;
        actor.on_ground = false;
        actor.can_double_jump = true;
        Some(GameEvent::Jump)
    } else if actor.can_double_jump {
        actor.vel_y = -state.tuning.double_jump_impulse;
        actor.can_double_jump = false;
        Some(GameEvent::DoubleJump)
    } else {
        None
    }
}

/// End the run: freeze, tint the actor, fold the score into `best`.
/// Returns the best score to persist.
pub fn game_over(state: &mut GameState) -> u32 {
    state.phase = RunPhase::GameOver;
    state.run.game_over = true;
    state.run.paused = true;
    state.actor.vel_y = 0.0;
    state.actor.tinted = true;
    let best = state.run.record_best();
    log::info!(
        "Game over: score {} coins {} distance {:.0}m best {}",
        state.run.score.floor(),
        state.run.coins,
        state.run.distance,
        best
    );
    best
}

/// Wipe the run from `GameOver` back to `Ready`. Returns false from any other phase.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != RunPhase::GameOver {
        return false;
    }
    state.reset_run();
    log::info!("Run reset (best {})", state.run.best);
    true
}
