//! Fire control: armed actors pick targets and fire; carriers launch drones.

use hecs::Entity;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::EffectOptions;
use bastion_core::types::Position;

use crate::context::{ActorView, SimContext};
use crate::factory;
use crate::systems::damage;

struct Shot {
    shooter: Entity,
    team: Team,
    origin: Position,
    target: ActorView,
    capability: Capability,
}

/// Whether `shooter` at `origin` can engage `target` with `capability`.
pub fn can_engage(team: Team, origin: &Position, capability: &Capability, target: &ActorView) -> bool {
    team.is_hostile_to(target.team)
        && capability.targets.allows(target.category)
        && origin.horizontal_distance_to(&target.position) <= capability.range * ENGAGE_RANGE_FACTOR
}

/// Fire every ready weapon and launch drones from ready carriers.
pub fn run(ctx: &mut SimContext) {
    let actors = ctx.live_actors();
    let mut shots: Vec<Shot> = Vec::new();

    {
        let mut query = ctx
            .world
            .query::<(&Actor, &Position, &Capability, &Weapon, &Lifecycle)>()
            .without::<&Disabled>();
        for (entity, (actor, pos, cap, weapon, life)) in query.iter() {
            if *life != Lifecycle::Alive || weapon.cooldown_ticks > 0 || cap.munition.is_none() {
                continue;
            }
            let current = weapon
                .target
                .and_then(|t| actors.iter().find(|a| a.entity == t))
                .filter(|a| can_engage(actor.team, pos, cap, a));
            let target = current.or_else(|| {
                actors
                    .iter()
                    .filter(|a| can_engage(actor.team, pos, cap, a))
                    .min_by(|a, b| {
                        pos.horizontal_distance_to(&a.position)
                            .total_cmp(&pos.horizontal_distance_to(&b.position))
                    })
            });
            if let Some(target) = target {
                shots.push(Shot {
                    shooter: entity,
                    team: actor.team,
                    origin: *pos,
                    target: *target,
                    capability: *cap,
                });
            }
        }
    }

    for shot in shots {
        fire(ctx, &shot);
    }

    launch_drones(ctx, &actors);
}

fn fire(ctx: &mut SimContext, shot: &Shot) {
    let Some(kind) = shot.capability.munition else {
        return;
    };
    if let Ok(mut weapon) = ctx.world.get::<&mut Weapon>(shot.shooter) {
        weapon.cooldown_ticks = shot.capability.fire_interval_ticks;
        weapon.target = Some(shot.target.entity);
    }

    let cap = &shot.capability;
    if kind.motion() == MotionModel::Hitscan {
        ctx.effect(
            EffectKind::MuzzleFlash,
            shot.origin,
            EffectOptions {
                team: Some(shot.team),
                ..EffectOptions::default()
            },
        );
        ctx.audio(AudioCue::Gunfire);
        damage::direct_fire(
            ctx,
            shot.origin,
            shot.target.position,
            cap.damage,
            shot.team,
            cap.targets,
        );
    } else {
        factory::spawn_projectile(
            ctx,
            shot.origin,
            shot.target.position,
            Some(shot.target.entity),
            cap.damage,
            shot.team,
            kind,
            cap.targets,
        );
    }
}

fn launch_drones(ctx: &mut SimContext, actors: &[ActorView]) {
    let mut launches: Vec<(Entity, Team, Position)> = Vec::new();
    for (entity, (actor, pos, bay, life)) in ctx
        .world
        .query_mut::<(&Actor, &Position, &mut DroneBay, &Lifecycle)>()
        .without::<&Disabled>()
    {
        if *life != Lifecycle::Alive || bay.docked == 0 || bay.launch_cooldown_ticks > 0 {
            continue;
        }
        let enemy_near = actors.iter().any(|a| {
            actor.team.is_hostile_to(a.team)
                && pos.horizontal_distance_to(&a.position) <= DRONE_LAUNCH_RANGE
        });
        if !enemy_near {
            continue;
        }
        bay.docked -= 1;
        bay.launch_cooldown_ticks = DRONE_LAUNCH_INTERVAL_TICKS;
        launches.push((entity, actor.team, *pos));
    }

    for (carrier, team, pos) in launches {
        let spec = ctx.catalog.spec_or_fallback(ActorKind::HunterDrone);
        let origin = Position::new(pos.x, pos.y + RECALL_HOVER_OFFSET);
        factory::spawn_drone(ctx, team, &spec, origin, Some(carrier));
        tracing::trace!(?team, "hunter drone launched");
    }
}
