//! Cleanup system: removes destroyed actors, stray munitions and anything
//! whose kinematic state has gone non-finite.

use hecs::Entity;

use bastion_core::components::{Drone, Projectile};
use bastion_core::constants::*;
use bastion_core::enums::Lifecycle;
use bastion_core::types::{Position, Velocity};

use crate::context::SimContext;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(ctx: &mut SimContext, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    let field = ctx.battlefield;

    // Count down destroying actors; remove when the countdown ends.
    for (entity, life) in ctx.world.query_mut::<&mut Lifecycle>() {
        if let Lifecycle::Destroying { remaining_ticks } = life {
            if *remaining_ticks <= 1 {
                despawn_buffer.push(entity);
            } else {
                *remaining_ticks -= 1;
            }
        }
    }

    // Corrupted kinematics: remove rather than let NaN spread.
    for (entity, (pos, vel)) in ctx.world.query_mut::<(&Position, &Velocity)>() {
        if !pos.is_finite() || !vel.is_finite() {
            tracing::warn!(?entity, "non-finite position or velocity, removing entity");
            despawn_buffer.push(entity);
        }
    }

    // Munitions that left the battlefield or flew too long.
    for (entity, (projectile, pos)) in ctx.world.query_mut::<(&Projectile, &Position)>() {
        if !field.contains(pos, OUT_OF_BOUNDS_MARGIN)
            || projectile.age_ticks > PROJECTILE_MAX_AGE_TICKS
        {
            despawn_buffer.push(entity);
        }
    }
    for (entity, (_drone, pos)) in ctx.world.query_mut::<(&Drone, &Position)>() {
        if !field.contains(pos, OUT_OF_BOUNDS_MARGIN) {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_unstable();
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        let _ = ctx.world.despawn(entity);
    }
}
