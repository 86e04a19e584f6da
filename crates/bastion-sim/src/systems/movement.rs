//! Unit movement: mobile units advance toward the enemy side until something
//! is in reach. Disabled units and structures stay put; air units keep
//! their altitude.

use bastion_core::components::{Actor, Capability, Disabled, DroneBay};
use bastion_core::constants::DRONE_LAUNCH_RANGE;
use bastion_core::enums::{Category, Lifecycle};
use bastion_core::types::{Position, Velocity};

use crate::context::SimContext;
use crate::systems::combat::can_engage;

pub fn run(ctx: &mut SimContext) {
    let actors = ctx.live_actors();
    let width = ctx.battlefield.width;

    for (_entity, (actor, pos, vel, cap, life, disabled, bay)) in ctx.world.query_mut::<(
        &Actor,
        &mut Position,
        &mut Velocity,
        &Capability,
        &Lifecycle,
        Option<&Disabled>,
        Option<&DroneBay>,
    )>() {
        *vel = Velocity::zero();
        if *life != Lifecycle::Alive
            || disabled.is_some()
            || actor.category == Category::Structure
            || cap.speed <= 0.0
        {
            continue;
        }

        let in_reach = actors.iter().any(|a| {
            if cap.munition.is_some() && cap.range > 0.0 {
                can_engage(actor.team, pos, cap, a)
            } else if bay.is_some() {
                actor.team.is_hostile_to(a.team)
                    && pos.horizontal_distance_to(&a.position) <= DRONE_LAUNCH_RANGE
            } else {
                false
            }
        });
        if in_reach {
            continue;
        }

        *vel = Velocity::new(actor.team.facing() * cap.speed, 0.0);
        let mut next = *pos;
        next.step(vel);
        next.x = next.x.clamp(0.0, width);
        *pos = Position::new(next.x, pos.y);
    }
}
