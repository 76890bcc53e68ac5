//! Timed power-up effects
//!
//! Shield, magnet and speed boost each run an independent countdown. A timer
//! is active while its value is above zero. Picking a kind up again resets
//! it to the full duration.

use glam::Vec2;

use super::clock::countdown;
use super::state::{PowerupKind, RunState, ScrollingEntity, ShieldOverlay};
use crate::tuning::Tuning;

/// Timers that reached zero this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired {
    pub shield: bool,
    pub magnet: bool,
    pub speed_boost: bool,
}

/// Set the timer for `kind` to its full duration (overwrite, never add)
pub fn activate(run: &mut RunState, kind: PowerupKind, tuning: &Tuning) {
    *run.timer_mut(kind) = kind.duration(tuning);
}

/// Count all active timers down by `dt`
pub fn decay(run: &mut RunState, dt: f32) -> Expired {
    Expired {
        shield: countdown(&mut run.shield_remaining, dt),
        magnet: countdown(&mut run.magnet_remaining, dt),
        speed_boost: countdown(&mut run.speed_boost_remaining, dt),
    }
}

/// Aim every live coin within `radius` of the actor straight at it.
///
/// Coins outside the radius keep whatever velocity they had. Returns the
/// number of coins pulled.
pub fn attract_coins(
    coins: &mut [ScrollingEntity],
    actor_pos: Vec2,
    radius: f32,
    pull_speed: f32,
) -> usize {
    let mut pulled = 0;
    for coin in coins.iter_mut().filter(|c| c.is_live()) {
        let to_actor = actor_pos - coin.pos;
        let dist = to_actor.length();
        if dist < radius {
            coin.vel = to_actor.normalize_or_zero() * pull_speed;
            pulled += 1;
        }
    }
    pulled
}

/// Shield overlay scale at `time_ms`
pub fn shield_pulse_scale(time_ms: f64, tuning: &Tuning, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 1.0;
    }
    let phase = time_ms / f64::from(tuning.shield_pulse_period_ms);
    1.0 + tuning.shield_pulse_amplitude * phase.sin() as f32
}

/// Keep the overlay in lockstep with the shield timer: present and following
/// the actor while active, gone the frame it expires.
pub fn sync_shield_overlay(
    overlay: &mut Option<ShieldOverlay>,
    shield_active: bool,
    actor_pos: Vec2,
    time_ms: f64,
    tuning: &Tuning,
    reduced_motion: bool,
) {
    if !shield_active {
        if overlay.take().is_some() {
            log::debug!("Shield overlay removed");
        }
        return;
    }
    let fx = overlay.get_or_insert(ShieldOverlay {
        pos: actor_pos,
        scale: 1.0,
        alpha: tuning.shield_alpha,
    });
    fx.pos = actor_pos;
    fx.scale = shield_pulse_scale(time_ms, tuning, reduced_motion);
    fx.alpha = tuning.shield_alpha;
}
