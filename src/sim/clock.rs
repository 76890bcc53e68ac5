//! Frame timing helpers
//!
//! Everything timed in the simulation is polled once per frame; nothing
//! preempts. Paused frames never reach these helpers, so time simply stops.

use serde::{Deserialize, Serialize};

/// Convert a raw frame delta in milliseconds to seconds, clamped to `max_dt`
#[inline]
pub fn frame_seconds(delta_ms: f32, max_dt: f32) -> f32 {
    if !delta_ms.is_finite() {
        return 0.0;
    }
    (delta_ms / 1000.0).clamp(0.0, max_dt)
}

/// Run time accumulated over simulated (running) frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunClock {
    elapsed_ms: f64,
}

impl RunClock {
    pub fn advance(&mut self, dt: f32) {
        self.elapsed_ms += f64::from(dt) * 1000.0;
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

/// Repeating trigger with a fixed period
///
/// Fires at most once per poll. Leftover time carries into the next period
/// but is capped at one period, so a long frame never causes a burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    period_ms: f32,
    accumulated_ms: f32,
}

impl Interval {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            accumulated_ms: 0.0,
        }
    }

    /// Advance by `dt_ms`; returns true when the period elapsed
    pub fn poll(&mut self, dt_ms: f32) -> bool {
        self.accumulated_ms += dt_ms.max(0.0);
        if self.accumulated_ms >= self.period_ms {
            self.accumulated_ms = (self.accumulated_ms - self.period_ms).min(self.period_ms);
            true
        } else {
            false
        }
    }

    pub fn accumulated_ms(&self) -> f32 {
        self.accumulated_ms
    }
}

/// Count `remaining` down by `dt`.
///
/// Returns true exactly on the frame an active timer reaches zero. The value
/// is clamped at zero so `remaining > 0` always means active.
#[inline]
pub fn countdown(remaining: &mut f32, dt: f32) -> bool {
    if *remaining <= 0.0 {
        return false;
    }
    *remaining -= dt;
    if *remaining <= 0.0 {
        *remaining = 0.0;
        true
    } else {
        false
    }
}
