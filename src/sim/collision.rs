//! Axis-aligned overlap detection and actor gravity
//!
//! This is the thin physics layer the run logic sits on: boxes, one body
//! under gravity, a flat ground, and overlap reports. Reports are collected
//! into a list and resolved after detection, never mid-iteration.

use glam::Vec2;

use super::state::{Actor, Collection, GameState, ScrollingEntity};
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

impl Actor {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extents)
    }
}

impl ScrollingEntity {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extents)
    }
}

/// An overlap between the actor and one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub collection: Collection,
    pub entity_id: u32,
}

/// Integrate actor gravity and resolve ground and ceiling contact
pub fn integrate_actor(actor: &mut Actor, tuning: &Tuning, dt: f32) {
    actor.vel_y += tuning.gravity * dt;
    actor.pos.y += actor.vel_y * dt;

    let feet = actor.pos.y + actor.half_extents.y;
    if feet >= tuning.ground_y {
        actor.pos.y = tuning.ground_y - actor.half_extents.y;
        if actor.vel_y > 0.0 {
            actor.vel_y = 0.0;
        }
        actor.on_ground = true;
    } else {
        actor.on_ground = false;
    }

    // World bounds: the top edge
    let head = actor.pos.y - actor.half_extents.y;
    if head < 0.0 {
        actor.pos.y = actor.half_extents.y;
        if actor.vel_y < 0.0 {
            actor.vel_y = 0.0;
        }
    }
}

/// Collect overlaps between the actor and every live entity.
///
/// Order is coins, power-ups, obstacles so pickups touched on the fatal frame
/// still count.
pub fn detect_overlaps(state: &GameState) -> Vec<CollisionEvent> {
    let actor_box = state.actor.aabb();
    let mut events = Vec::new();
    for collection in [Collection::Coins, Collection::Powerups, Collection::Obstacles] {
        events.extend(
            state
                .collection(collection)
                .iter()
                .filter(|e| e.is_live() && e.aabb().overlaps(&actor_box))
                .map(|e| CollisionEvent {
                    collection,
                    entity_id: e.id,
                }),
        );
    }
    events
}
