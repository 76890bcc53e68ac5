//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update pass per frame, fixed step order
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or storage dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod powerup;
pub mod resolve;
pub mod rng;
pub mod run;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{Interval, RunClock, countdown, frame_seconds};
pub use collision::{Aabb, CollisionEvent, detect_overlaps};
pub use difficulty::{Ramp, compute_speed};
pub use rng::{RandomSource, ScriptedRandom};
pub use spawner::{SpawnTriggers, Spawner};
pub use state::{
    Actor, ActorPose, Collection, EntityKind, GameEvent, GameState, PowerupKind, Removal, RunPhase,
    RunState, ScrollingEntity, ShieldOverlay,
};
pub use tick::{FrameInput, FrameReport, tick};
