//! Difficulty ramp
//!
//! World speed grows with distance up to a cap and is multiplied while a
//! speed boost is active. Recomputed every frame, never cached, so a boost
//! expiring takes effect on the next frame.

use crate::tuning::Tuning;

/// Reference ramp cap (px/s added at full difficulty)
pub const RAMP_CAP: f32 = 520.0;
/// Reference distance units per px/s of ramp
pub const RAMP_DIVISOR: f32 = 12.0;
/// Reference speed-boost multiplier
pub const BOOST_MULTIPLIER: f32 = 1.35;

/// Ramp parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub base_speed: f32,
    pub cap: f32,
    pub divisor: f32,
    pub boost_multiplier: f32,
}

impl Ramp {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            base_speed: tuning.base_speed,
            cap: tuning.ramp_cap,
            divisor: tuning.ramp_divisor,
            boost_multiplier: tuning.boost_multiplier,
        }
    }

    /// Speed before the boost multiplier, in [base, base + cap]
    pub fn ramp_speed(&self, distance: f32) -> f32 {
        let extra = (distance.max(0.0) / self.divisor).min(self.cap);
        self.base_speed + extra
    }

    pub fn speed(&self, distance: f32, boost_active: bool) -> f32 {
        let speed = self.ramp_speed(distance);
        if boost_active {
            speed * self.boost_multiplier
        } else {
            speed
        }
    }
}

/// World speed for the reference ramp
pub fn compute_speed(base_speed: f32, distance: f32, speed_boost_active: bool) -> f32 {
    Ramp {
        base_speed,
        cap: RAMP_CAP,
        divisor: RAMP_DIVISOR,
        boost_multiplier: BOOST_MULTIPLIER,
    }
    .speed(distance, speed_boost_active)
}
