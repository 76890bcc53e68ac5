//! Randomness source for the spawner
//!
//! Production runs use a seeded PCG so a run is reproducible from its seed.
//! Tests and replays can substitute a scripted sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform draws consumed by the spawner
pub trait RandomSource {
    /// Uniform real in [0, 1)
    fn unit(&mut self) -> f32;
    /// Uniform integer in [lo, hi], both inclusive
    fn int_inclusive(&mut self, lo: i32, hi: i32) -> i32;
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn int_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}

/// Create the run generator for a seed
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays fixed draws in order, cycling when exhausted.
///
/// Integer draws are clamped into the requested range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    units: Vec<f32>,
    ints: Vec<i32>,
    unit_cursor: usize,
    int_cursor: usize,
}

impl ScriptedRandom {
    pub fn new(units: Vec<f32>, ints: Vec<i32>) -> Self {
        Self {
            units,
            ints,
            unit_cursor: 0,
            int_cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f32 {
        if self.units.is_empty() {
            return 0.0;
        }
        let v = self.units[self.unit_cursor % self.units.len()];
        self.unit_cursor += 1;
        v
    }

    fn int_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if self.ints.is_empty() {
            return lo;
        }
        let v = self.ints[self.int_cursor % self.ints.len()];
        self.int_cursor += 1;
        v.clamp(lo, hi.max(lo))
    }
}
