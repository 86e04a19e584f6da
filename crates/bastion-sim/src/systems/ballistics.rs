//! Ballistics system: advances every in-flight projectile and resolves impacts.
//!
//! Motion per munition model:
//! - homing: re-aim at the bound target each tick, or at its last known point
//! - arc: constant horizontal velocity, gravity on the vertical
//! - drop: straight down onto a fixed x
//! - cruise: fixed heading toward a precomputed point, leaving a trail

use hecs::Entity;

use bastion_core::components::Projectile;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::EffectOptions;
use bastion_core::profiles::{munition_profile, ImpactRule};
use bastion_core::types::{Position, Velocity};

use crate::context::SimContext;
use crate::systems::damage;

struct Impact {
    entity: Entity,
    projectile: Projectile,
    point: Position,
}

/// Advance all projectiles one tick, then apply impacts.
pub fn run(ctx: &mut SimContext) {
    let ground = ctx.battlefield.ground_y;

    // Refresh aim points from live targets first; a dead target leaves the
    // last known point in place.
    let mut retargets: Vec<(Entity, Option<Position>)> = Vec::new();
    for (entity, projectile) in ctx.world.query::<&Projectile>().iter() {
        if let Some(target) = projectile.target {
            let live = if ctx.is_alive(target) {
                ctx.position_of(target)
            } else {
                None
            };
            retargets.push((entity, live));
        }
    }
    for (entity, live) in retargets {
        if let Ok(mut projectile) = ctx.world.get::<&mut Projectile>(entity) {
            match live {
                Some(pos) => projectile.aim = pos,
                None => projectile.target = None,
            }
        }
    }

    let mut impacts: Vec<Impact> = Vec::new();
    let mut trails: Vec<Position> = Vec::new();

    for (entity, (projectile, pos, vel)) in ctx
        .world
        .query_mut::<(&mut Projectile, &mut Position, &mut Velocity)>()
    {
        projectile.age_ticks += 1;
        let speed = munition_profile(projectile.kind).speed;

        let hit = match projectile.kind.motion() {
            MotionModel::Homing => {
                let aim = projectile.aim;
                if pos.distance_to(&aim) <= IMPACT_PROXIMITY.max(speed) {
                    Some(aim)
                } else {
                    *vel = Velocity::toward(pos, &aim, speed);
                    pos.step(vel);
                    None
                }
            }
            MotionModel::Arc | MotionModel::Drop => {
                vel.y -= GRAVITY;
                pos.step(vel);
                if vel.y < 0.0 && pos.y <= ground + 1e-6 {
                    let x = if projectile.kind.motion() == MotionModel::Drop {
                        projectile.aim.x
                    } else {
                        pos.x
                    };
                    Some(Position::new(x, ground))
                } else {
                    None
                }
            }
            MotionModel::Cruise => {
                let aim = projectile.aim;
                if pos.distance_to(&aim) <= IMPACT_PROXIMITY.max(speed) {
                    Some(aim)
                } else {
                    pos.step(vel);
                    if projectile.age_ticks % TRAIL_INTERVAL_TICKS == 0 {
                        trails.push(*pos);
                    }
                    if vel.y < 0.0 && pos.y <= ground {
                        Some(Position::new(pos.x, ground))
                    } else {
                        None
                    }
                }
            }
            // Hitscan munitions never exist as bodies.
            MotionModel::Hitscan => Some(*pos),
        };

        if let Some(point) = hit {
            impacts.push(Impact {
                entity,
                projectile: *projectile,
                point,
            });
        }
    }

    for point in trails {
        ctx.effect(EffectKind::Trail, point, EffectOptions::default());
    }

    for impact in impacts {
        let _ = ctx.world.despawn(impact.entity);
        resolve_impact(ctx, &impact.projectile, impact.point);
    }
}

/// Apply a projectile's impact rule at `point`.
pub fn resolve_impact(ctx: &mut SimContext, projectile: &Projectile, point: Position) {
    if projectile.cosmetic {
        ctx.effect(EffectKind::Explosion, point, EffectOptions::radius(20.0));
        return;
    }
    match munition_profile(projectile.kind).impact {
        ImpactRule::Area(area) => {
            let hits = damage::area_damage(ctx, point, &area, projectile.damage, projectile.team);
            tracing::trace!(kind = ?projectile.kind, hits, "projectile impact");
            ctx.effect(
                EffectKind::Explosion,
                point,
                EffectOptions {
                    radius: area.radius,
                    team: Some(projectile.team),
                },
            );
            ctx.audio(AudioCue::Explosion);
        }
        ImpactRule::DirectFire => {
            damage::direct_fire(
                ctx,
                projectile.origin,
                point,
                projectile.damage,
                projectile.team,
                projectile.targets,
            );
        }
        ImpactRule::Cosmetic => {}
    }
}
