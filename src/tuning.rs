//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a run can be re-tuned
//! from a JSON file without recompiling. Defaults reproduce the reference
//! 960x540 world.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read or parse a tuning/settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Downward acceleration applied to the actor (px/s²)
    pub gravity: f32,
    /// Y coordinate of the ground surface (screen space, y grows downward)
    pub ground_y: f32,
    /// Entities left of this x are culled
    pub cull_x: f32,
    /// Longest frame the simulation will integrate in one step (seconds)
    pub max_frame_dt: f32,

    // === Actor ===
    pub actor_x: f32,
    pub actor_start_y: f32,
    pub actor_half_width: f32,
    pub actor_half_height: f32,
    pub jump_impulse: f32,
    pub double_jump_impulse: f32,

    // === Difficulty ramp ===
    pub base_speed: f32,
    pub ramp_cap: f32,
    pub ramp_divisor: f32,
    pub boost_multiplier: f32,
    /// World pixels per unit of distance
    pub distance_divisor: f32,
    /// Background scrolls at speed / parallax_divisor
    pub parallax_divisor: f32,

    // === Spawner ===
    pub obstacle_period_ms: f32,
    pub coin_period_ms: f32,
    pub powerup_period_ms: f32,
    pub obstacle_spawn_margin: f32,
    pub obstacle_y: f32,
    pub obstacle_gap_min: i32,
    pub obstacle_gap_max: i32,
    pub coin_cluster_chance: f32,
    pub coin_cluster_min: i32,
    pub coin_cluster_max: i32,
    pub coin_spacing: f32,
    pub coin_height_min: i32,
    pub coin_height_max: i32,
    pub coin_jitter: i32,
    pub coin_radius: f32,
    pub powerup_spawn_margin: f32,
    pub powerup_height_min: i32,
    pub powerup_height_max: i32,
    /// Unit-interval split points: [0, shield) shield, [shield, magnet) magnet, rest speed
    pub powerup_shield_cut: f32,
    pub powerup_magnet_cut: f32,

    // === Power-ups ===
    pub shield_duration: f32,
    pub magnet_duration: f32,
    pub speed_boost_duration: f32,
    pub magnet_radius: f32,
    pub magnet_pull_speed: f32,
    pub shield_pulse_amplitude: f32,
    pub shield_pulse_period_ms: f32,
    pub shield_alpha: f32,

    // === Scoring ===
    pub coin_score: f32,
    pub passive_score_rate: f32,
    pub magnet_score_bonus: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 960.0,
            world_height: 540.0,
            gravity: 1800.0,
            ground_y: 476.0,
            cull_x: -100.0,
            max_frame_dt: 0.1,

            actor_x: 160.0,
            actor_start_y: 400.0,
            actor_half_width: 20.0,
            actor_half_height: 30.0,
            jump_impulse: 760.0,
            double_jump_impulse: 680.0,

            base_speed: 340.0,
            ramp_cap: 520.0,
            ramp_divisor: 12.0,
            boost_multiplier: 1.35,
            distance_divisor: 16.0,
            parallax_divisor: 8.0,

            obstacle_period_ms: 900.0,
            coin_period_ms: 400.0,
            powerup_period_ms: 4500.0,
            obstacle_spawn_margin: 48.0,
            obstacle_y: 446.0,
            obstacle_gap_min: 64,
            obstacle_gap_max: 160,
            coin_cluster_chance: 0.8,
            coin_cluster_min: 3,
            coin_cluster_max: 6,
            coin_spacing: 36.0,
            coin_height_min: 180,
            coin_height_max: 280,
            coin_jitter: 20,
            coin_radius: 14.0,
            powerup_spawn_margin: 50.0,
            powerup_height_min: 180,
            powerup_height_max: 300,
            powerup_shield_cut: 0.34,
            powerup_magnet_cut: 0.67,

            shield_duration: 6.0,
            magnet_duration: 8.0,
            speed_boost_duration: 4.0,
            magnet_radius: 240.0,
            magnet_pull_speed: 600.0,
            shield_pulse_amplitude: 0.05,
            shield_pulse_period_ms: 120.0,
            shield_alpha: 0.6,

            coin_score: 5.0,
            passive_score_rate: 10.0,
            magnet_score_bonus: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Highest ramp speed before any boost
    pub fn max_ramp_speed(&self) -> f32 {
        self.base_speed + self.ramp_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "base_speed": 400.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 400.0);
        assert_eq!(tuning.ramp_cap, 520.0);
        assert_eq!(tuning.obstacle_period_ms, 900.0);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Tuning::from_json_str("{ base_speed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
