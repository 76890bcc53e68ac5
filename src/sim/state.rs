//! Run state and core simulation types
//!
//! One `GameState` exists per session. Restarting wipes everything except the
//! best score, the tuning and the RNG stream.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::RunClock;
use super::rng;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the start trigger, simulation frozen
    Ready,
    /// Full update cycle active
    Running,
    /// Frozen, all state preserved
    Paused,
    /// Run ended, waiting for the restart trigger
    GameOver,
}

/// Power-up effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKind {
    Shield,
    Magnet,
    Speed,
}

impl PowerupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Shield => "shield",
            PowerupKind::Magnet => "magnet",
            PowerupKind::Speed => "speed",
        }
    }

    /// Full timer value granted on pickup
    pub fn duration(&self, tuning: &Tuning) -> f32 {
        match self {
            PowerupKind::Shield => tuning.shield_duration,
            PowerupKind::Magnet => tuning.magnet_duration,
            PowerupKind::Speed => tuning.speed_boost_duration,
        }
    }

    /// Pick a kind from a unit-interval roll
    pub fn from_roll(roll: f32, tuning: &Tuning) -> Self {
        if roll < tuning.powerup_shield_cut {
            PowerupKind::Shield
        } else if roll < tuning.powerup_magnet_cut {
            PowerupKind::Magnet
        } else {
            PowerupKind::Speed
        }
    }

    /// Hit box half extents (icon size)
    pub fn half_extents(&self) -> Vec2 {
        match self {
            PowerupKind::Shield => Vec2::new(20.0, 20.0),
            PowerupKind::Magnet => Vec2::new(16.0, 12.0),
            PowerupKind::Speed => Vec2::new(12.0, 12.0),
        }
    }
}

/// Scrolling entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Coin,
    Powerup(PowerupKind),
}

/// Why an entity is leaving its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Removal {
    /// Scrolled past the trailing edge
    Culled,
    /// Taken by a collision
    Consumed,
}

/// An obstacle, coin or power-up scrolling toward the actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollingEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Velocity assigned by effects (magnet); world scroll is applied separately
    pub vel: Vec2,
    pub half_extents: Vec2,
    pub allow_gravity: bool,
    /// Immovable entities ignore assigned velocity
    pub immovable: bool,
    /// Set once when marked; swept at the end of the step
    pub removal: Option<Removal>,
}

impl ScrollingEntity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, half_extents: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            half_extents,
            allow_gravity: false,
            immovable: matches!(kind, EntityKind::Obstacle),
            removal: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.removal.is_none()
    }

    /// Mark as consumed. Returns false if it was already marked, so a
    /// repeated overlap report never counts twice.
    pub fn claim(&mut self) -> bool {
        if self.removal.is_some() {
            return false;
        }
        self.removal = Some(Removal::Consumed);
        true
    }

    pub fn powerup_kind(&self) -> Option<PowerupKind> {
        match self.kind {
            EntityKind::Powerup(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Which collection an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Obstacles,
    Coins,
    Powerups,
}

/// Animation pose of the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorPose {
    Run { frame: u8 },
    Jump,
}

/// Run cycle frame period in ms
pub const RUN_FRAME_MS: f64 = 120.0;
/// Number of frames in the run cycle
pub const RUN_FRAME_COUNT: u8 = 3;

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Center of the hit box
    pub pos: Vec2,
    pub vel_y: f32,
    pub half_extents: Vec2,
    pub on_ground: bool,
    pub can_double_jump: bool,
    /// Game-over tint
    pub tinted: bool,
}

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, tuning.actor_start_y),
            vel_y: 0.0,
            half_extents: Vec2::new(tuning.actor_half_width, tuning.actor_half_height),
            on_ground: false,
            can_double_jump: false,
            tinted: false,
        }
    }

    pub fn pose(&self, time_ms: f64) -> ActorPose {
        if self.on_ground {
            let step = (time_ms / RUN_FRAME_MS).floor() as u64;
            let frame = (step % u64::from(RUN_FRAME_COUNT)) as u8;
            ActorPose::Run { frame }
        } else {
            ActorPose::Jump
        }
    }
}

/// Score, counters and power-up timers of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: f32,
    pub distance: f32,
    pub coins: u32,
    /// Survives restarts
    pub best: u32,
    pub shield_remaining: f32,
    pub magnet_remaining: f32,
    pub speed_boost_remaining: f32,
    pub paused: bool,
    pub game_over: bool,
}

impl RunState {
    pub fn new(best: u32) -> Self {
        Self {
            best,
            ..Default::default()
        }
    }

    pub fn shield_active(&self) -> bool {
        self.shield_remaining > 0.0
    }

    pub fn magnet_active(&self) -> bool {
        self.magnet_remaining > 0.0
    }

    pub fn speed_boost_active(&self) -> bool {
        self.speed_boost_remaining > 0.0
    }

    pub fn timer_mut(&mut self, kind: PowerupKind) -> &mut f32 {
        match kind {
            PowerupKind::Shield => &mut self.shield_remaining,
            PowerupKind::Magnet => &mut self.magnet_remaining,
            PowerupKind::Speed => &mut self.speed_boost_remaining,
        }
    }

    /// Fold the current score into `best`
    pub fn record_best(&mut self) -> u32 {
        self.best = self.best.max(self.score.max(0.0).floor() as u32);
        self.best
    }
}

/// Pulsing overlay drawn over the actor while the shield is up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldOverlay {
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
}

/// Discrete events for audio/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected,
    PowerupCollected(PowerupKind),
    ShieldBlock,
    Jump,
    DoubleJump,
    GameOver,
    PauseToggled(bool),
}

/// Monotonic entity ID allocator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub run: RunState,
    pub actor: Actor,
    /// Entity collections (sorted by id)
    pub obstacles: Vec<ScrollingEntity>,
    pub coins: Vec<ScrollingEntity>,
    pub powerups: Vec<ScrollingEntity>,
    pub spawner: Spawner,
    pub clock: RunClock,
    /// World speed computed this frame
    pub speed: f32,
    /// Background scroll offset
    pub parallax_offset: f32,
    pub shield_overlay: Option<ShieldOverlay>,
    /// Disables the shield pulse
    pub reduced_motion: bool,
    pub ids: EntityIds,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, best: u32) -> Self {
        Self {
            seed,
            rng: rng::seeded(seed),
            phase: RunPhase::Ready,
            run: RunState::new(best),
            actor: Actor::new(&tuning),
            obstacles: Vec::new(),
            coins: Vec::new(),
            powerups: Vec::new(),
            spawner: Spawner::new(&tuning),
            clock: RunClock::default(),
            speed: tuning.base_speed,
            parallax_offset: 0.0,
            shield_overlay: None,
            reduced_motion: false,
            ids: EntityIds::default(),
            tuning,
        }
    }

    pub fn collection(&self, which: Collection) -> &[ScrollingEntity] {
        match which {
            Collection::Obstacles => &self.obstacles,
            Collection::Coins => &self.coins,
            Collection::Powerups => &self.powerups,
        }
    }

    pub fn collection_mut(&mut self, which: Collection) -> &mut Vec<ScrollingEntity> {
        match which {
            Collection::Obstacles => &mut self.obstacles,
            Collection::Coins => &mut self.coins,
            Collection::Powerups => &mut self.powerups,
        }
    }

    /// Total live entities across all collections
    pub fn entity_count(&self) -> usize {
        self.obstacles.len() + self.coins.len() + self.powerups.len()
    }

    /// Wipe the run back to `Ready`, keeping best score, tuning and RNG
    pub fn reset_run(&mut self) {
        let best = self.run.best;
        self.run = RunState::new(best);
        self.actor = Actor::new(&self.tuning);
        self.obstacles.clear();
        self.coins.clear();
        self.powerups.clear();
        self.spawner = Spawner::new(&self.tuning);
        self.clock = RunClock::default();
        self.speed = self.tuning.base_speed;
        self.parallax_offset = 0.0;
        self.shield_overlay = None;
        self.phase = RunPhase::Ready;
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|e| e.id);
        self.coins.sort_by_key(|e| e.id);
        self.powerups.sort_by_key(|e| e.id);
    }
}
