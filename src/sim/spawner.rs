//! Procedural spawning of obstacles, coin clusters and power-ups
//!
//! Three independent periodic triggers. Each only fires while the run is
//! `Running`; pausing freezes their progress where it stands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Interval;
use super::rng::RandomSource;
use super::state::{EntityIds, EntityKind, PowerupKind, RunPhase, ScrollingEntity};
use crate::tuning::Tuning;

/// Obstacle hit box half extents
pub const OBSTACLE_HALF_EXTENTS: Vec2 = Vec2::new(22.0, 14.0);

/// Which spawn triggers fired this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnTriggers {
    pub obstacle: bool,
    pub coins: bool,
    pub powerup: bool,
}

/// Periodic spawn timers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    obstacle: Interval,
    coins: Interval,
    powerup: Interval,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle: Interval::new(tuning.obstacle_period_ms),
            coins: Interval::new(tuning.coin_period_ms),
            powerup: Interval::new(tuning.powerup_period_ms),
        }
    }

    /// Advance the triggers. No-op outside `Running`.
    pub fn poll(&mut self, phase: RunPhase, dt_ms: f32) -> SpawnTriggers {
        if phase != RunPhase::Running {
            return SpawnTriggers::default();
        }
        SpawnTriggers {
            obstacle: self.obstacle.poll(dt_ms),
            coins: self.coins.poll(dt_ms),
            powerup: self.powerup.poll(dt_ms),
        }
    }
}

/// One obstacle at the right edge, sometimes pushed further out
pub fn spawn_obstacle<R: RandomSource + ?Sized>(
    tuning: &Tuning,
    rng: &mut R,
    ids: &mut EntityIds,
) -> ScrollingEntity {
    let gap = if rng.int_inclusive(0, 1) == 1 {
        0
    } else {
        rng.int_inclusive(tuning.obstacle_gap_min, tuning.obstacle_gap_max)
    };
    let x = tuning.world_width + tuning.obstacle_spawn_margin + gap as f32;
    ScrollingEntity::new(
        ids.next_id(),
        EntityKind::Obstacle,
        Vec2::new(x, tuning.obstacle_y),
        OBSTACLE_HALF_EXTENTS,
    )
}

/// A horizontal line of coins, or nothing if the roll misses
pub fn spawn_coin_cluster<R: RandomSource + ?Sized>(
    tuning: &Tuning,
    rng: &mut R,
    ids: &mut EntityIds,
) -> Vec<ScrollingEntity> {
    if rng.unit() >= tuning.coin_cluster_chance {
        return Vec::new();
    }
    let count = rng.int_inclusive(tuning.coin_cluster_min, tuning.coin_cluster_max).max(0);
    let height = rng.int_inclusive(tuning.coin_height_min, tuning.coin_height_max);
    let base_y = tuning.world_height - height as f32;
    let half = Vec2::splat(tuning.coin_radius);

    (0..count)
        .map(|i| {
            let jitter = rng.int_inclusive(-tuning.coin_jitter, tuning.coin_jitter) as f32;
            let pos = Vec2::new(
                tuning.world_width + i as f32 * tuning.coin_spacing,
                base_y + jitter,
            );
            ScrollingEntity::new(ids.next_id(), EntityKind::Coin, pos, half)
        })
        .collect()
}

/// Exactly one power-up with a kind picked from the unit roll
pub fn spawn_powerup<R: RandomSource + ?Sized>(
    tuning: &Tuning,
    rng: &mut R,
    ids: &mut EntityIds,
) -> ScrollingEntity {
    let kind = PowerupKind::from_roll(rng.unit(), tuning);
    let y = tuning.world_height
        - rng.int_inclusive(tuning.powerup_height_min, tuning.powerup_height_max) as f32;
    ScrollingEntity::new(
        ids.next_id(),
        EntityKind::Powerup(kind),
        Vec2::new(tuning.world_width + tuning.powerup_spawn_margin, y),
        kind.half_extents(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, seeded};

    #[test]
    fn test_poll_gated_by_phase() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        for phase in [RunPhase::Ready, RunPhase::Paused, RunPhase::GameOver] {
            assert_eq!(spawner.poll(phase, 10_000.0), SpawnTriggers::default());
        }
        // Frozen phases made no progress
        assert_eq!(spawner, Spawner::new(&tuning));
    }

    #[test]
    fn test_poll_periods() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning);
        let mut obstacles = 0;
        let mut coins = 0;
        let mut powerups = 0;
        // 9 seconds in 10 ms steps
        for _ in 0..900 {
            let t = spawner.poll(RunPhase::Running, 10.0);
            obstacles += t.obstacle as u32;
            coins += t.coins as u32;
            powerups += t.powerup as u32;
        }
        assert_eq!(obstacles, 10);
        assert_eq!(coins, 22);
        assert_eq!(powerups, 2);
    }

    #[test]
    fn test_obstacle_without_gap() {
        let tuning = Tuning::default();
        let mut rng = ScriptedRandom::new(vec![], vec![1]);
        let mut ids = EntityIds::default();
        let o = spawn_obstacle(&tuning, &mut rng, &mut ids);
        assert_eq!(o.kind, EntityKind::Obstacle);
        assert_eq!(o.pos.x, 960.0 + 48.0);
        assert!(o.immovable);
        assert!(!o.allow_gravity);
    }

    #[test]
    fn test_obstacle_with_gap() {
        let tuning = Tuning::default();
        let mut rng = ScriptedRandom::new(vec![], vec![0, 100]);
        let mut ids = EntityIds::default();
        let o = spawn_obstacle(&tuning, &mut rng, &mut ids);
        assert_eq!(o.pos.x, 960.0 + 48.0 + 100.0);
    }

    #[test]
    fn test_obstacle_gap_range() {
        let tuning = Tuning::default();
        let mut rng = seeded(3);
        let mut ids = EntityIds::default();
        for _ in 0..200 {
            let gap = spawn_obstacle(&tuning, &mut rng, &mut ids).pos.x - 1008.0;
            assert!(gap == 0.0 || (64.0..=160.0).contains(&gap));
        }
    }

    #[test]
    fn test_coin_roll_miss_spawns_nothing() {
        let tuning = Tuning::default();
        let mut rng = ScriptedRandom::new(vec![0.9], vec![5]);
        let mut ids = EntityIds::default();
        assert!(spawn_coin_cluster(&tuning, &mut rng, &mut ids).is_empty());
    }

    #[test]
    fn test_coin_cluster_layout() {
        let tuning = Tuning::default();
        // count 4, base 200 above ground, jitters -20, 0, 20, 5
        let mut rng = ScriptedRandom::new(vec![0.5], vec![4, 200, -20, 0, 20, 5]);
        let mut ids = EntityIds::default();
        let coins = spawn_coin_cluster(&tuning, &mut rng, &mut ids);
        assert_eq!(coins.len(), 4);
        let ys: Vec<f32> = coins.iter().map(|c| c.pos.y).collect();
        assert_eq!(ys, vec![320.0, 340.0, 360.0, 345.0]);
        let xs: Vec<f32> = coins.iter().map(|c| c.pos.x).collect();
        assert_eq!(xs, vec![960.0, 996.0, 1032.0, 1068.0]);
        assert!(coins.iter().all(|c| c.kind == EntityKind::Coin && !c.allow_gravity));
    }

    #[test]
    fn test_coin_cluster_bounds() {
        let tuning = Tuning::default();
        let mut rng = seeded(11);
        let mut ids = EntityIds::default();
        for _ in 0..200 {
            let coins = spawn_coin_cluster(&tuning, &mut rng, &mut ids);
            assert!(coins.is_empty() || (3..=6).contains(&coins.len()));
            for c in &coins {
                let above_ground = 540.0 - c.pos.y;
                assert!((160.0..=300.0).contains(&above_ground));
            }
        }
    }

    #[test]
    fn test_powerup_kind_and_height() {
        let tuning = Tuning::default();
        let mut rng = ScriptedRandom::new(vec![0.5], vec![250]);
        let mut ids = EntityIds::default();
        let p = spawn_powerup(&tuning, &mut rng, &mut ids);
        assert_eq!(p.kind, EntityKind::Powerup(PowerupKind::Magnet));
        assert_eq!(p.pos, Vec2::new(1010.0, 290.0));
    }
}
