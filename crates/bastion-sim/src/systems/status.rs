//! Status upkeep: expires disables and counts down weapon and launch timers.

use hecs::Entity;

use bastion_core::components::{Disabled, DroneBay, Weapon};

use crate::context::SimContext;

pub fn run(ctx: &mut SimContext) {
    let tick = ctx.tick();

    let expired: Vec<Entity> = ctx
        .world
        .query::<&Disabled>()
        .iter()
        .filter(|(_, d)| d.until_tick <= tick)
        .map(|(e, _)| e)
        .collect();
    for entity in expired {
        let _ = ctx.world.remove_one::<Disabled>(entity);
    }

    for (_entity, weapon) in ctx.world.query_mut::<&mut Weapon>() {
        weapon.cooldown_ticks = weapon.cooldown_ticks.saturating_sub(1);
    }
    for (_entity, bay) in ctx.world.query_mut::<&mut DroneBay>() {
        bay.launch_cooldown_ticks = bay.launch_cooldown_ticks.saturating_sub(1);
    }
}
