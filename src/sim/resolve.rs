//! Collision and scoring resolution
//!
//! Consumes the overlap list produced by detection. Each entity is claimed at
//! most once, so an overlap reported twice (or on consecutive frames before
//! the sweep) never double-counts.

use super::collision::CollisionEvent;
use super::powerup;
use super::state::{Collection, GameEvent, GameState, RunState};
use crate::tuning::Tuning;

/// What the resolver decided for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Unshielded obstacle hit
    Fatal,
}

/// Per-frame score and distance accrual
pub fn accrue_passive(run: &mut RunState, speed: f32, dt: f32, tuning: &Tuning) {
    run.distance += speed * dt / tuning.distance_divisor;
    let mut gained = dt * tuning.passive_score_rate;
    if run.magnet_active() {
        gained += tuning.magnet_score_bonus * dt;
    }
    run.score += gained;
}

/// Apply overlap events in order. Stops at the first fatal hit.
pub fn resolve(
    state: &mut GameState,
    events: &[CollisionEvent],
    cues: &mut Vec<GameEvent>,
) -> Outcome {
    for event in events {
        let shielded = state.run.shield_active();
        let Some(entity) = state
            .collection_mut(event.collection)
            .iter_mut()
            .find(|e| e.id == event.entity_id)
        else {
            continue;
        };

        match event.collection {
            Collection::Coins => {
                if !entity.claim() {
                    continue;
                }
                state.run.coins += 1;
                state.run.score += state.tuning.coin_score;
                cues.push(GameEvent::CoinCollected);
            }
            Collection::Powerups => {
                let Some(kind) = entity.powerup_kind() else {
                    continue;
                };
                if !entity.claim() {
                    continue;
                }
                powerup::activate(&mut state.run, kind, &state.tuning);
                log::debug!("Power-up collected: {}", kind.as_str());
                cues.push(GameEvent::PowerupCollected(kind));
            }
            Collection::Obstacles => {
                if !entity.is_live() {
                    continue;
                }
                if shielded {
                    entity.claim();
                    cues.push(GameEvent::ShieldBlock);
                } else {
                    return Outcome::Fatal;
                }
            }
        }
    }
    Outcome::Continue
}
