//! Entity motion and culling
//!
//! Every live entity scrolls left at world speed and integrates any velocity
//! an effect assigned to it. Removal is mark-and-sweep: `mark_out_of_bounds`
//! flags, `sweep` drops. Both are safe to call more than once per frame.

use super::state::{Removal, ScrollingEntity};

/// Scroll and integrate all live entities in one collection
pub fn advance(entities: &mut [ScrollingEntity], speed: f32, gravity: f32, dt: f32) {
    for entity in entities.iter_mut().filter(|e| e.is_live()) {
        entity.pos.x -= speed * dt;
        if entity.immovable {
            continue;
        }
        if entity.allow_gravity {
            entity.vel.y += gravity * dt;
        }
        entity.pos += entity.vel * dt;
    }
}

/// Flag entities left of `cull_x`; returns how many were newly flagged
pub fn mark_out_of_bounds(entities: &mut [ScrollingEntity], cull_x: f32) -> usize {
    let mut marked = 0;
    for entity in entities.iter_mut() {
        if entity.is_live() && entity.pos.x < cull_x {
            entity.removal = Some(Removal::Culled);
            marked += 1;
        }
    }
    marked
}

/// Drop every flagged entity
pub fn sweep(entities: &mut Vec<ScrollingEntity>) -> usize {
    let before = entities.len();
    entities.retain(ScrollingEntity::is_live);
    before - entities.len()
}

/// Flag and drop out-of-bounds entities; returns how many left
pub fn cull(entities: &mut Vec<ScrollingEntity>, cull_x: f32) -> usize {
    mark_out_of_bounds(entities, cull_x);
    let removed = sweep(entities);
    if removed > 0 {
        log::trace!("Culled {} entities", removed);
    }
    removed
}
