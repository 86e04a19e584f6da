//! Entity spawn factories.
//!
//! Builds units, structures, drones and projectiles with the component
//! bundles the systems expect. Catalog misses fall back to a conservative
//! descriptor instead of failing the spawn.

use hecs::{Entity, EntityBuilder};
use rand::Rng;

use bastion_ai::profiles::{get_profile, Guidance};
use bastion_core::catalog::UnitSpec;
use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::EffectOptions;
use bastion_core::profiles::{munition_profile, ImpactRule};
use bastion_core::types::{Position, Velocity};

use crate::context::SimContext;

/// Spawn a unit (or a drone, for drone kinds) of `kind` at `position`.
/// Air units are lifted to their cruise altitude.
pub fn spawn_unit(ctx: &mut SimContext, team: Team, kind: ActorKind, position: Position) -> Entity {
    let spec = ctx.catalog.spec_or_fallback(kind);
    if kind.is_drone() {
        return spawn_drone(ctx, team, &spec, position, None);
    }
    let mut position = position;
    if spec.category == Category::Air {
        position.y = ctx.battlefield.ground_y + AIR_UNIT_ALTITUDE;
    }
    spawn_actor(ctx, team, &spec, position)
}

/// Spawn a structure on the ground at `x`.
pub fn spawn_structure(ctx: &mut SimContext, team: Team, kind: ActorKind, x: f64) -> Entity {
    let spec = ctx.catalog.spec_or_fallback(kind);
    let position = Position::new(x, ctx.battlefield.ground_y);
    spawn_actor(ctx, team, &spec, position)
}

fn spawn_actor(ctx: &mut SimContext, team: Team, spec: &UnitSpec, position: Position) -> Entity {
    let mut builder = EntityBuilder::new();
    builder.add(Actor {
        kind: spec.kind,
        team,
        category: spec.category,
    });
    builder.add(position);
    builder.add(Velocity::zero());
    builder.add(Health {
        current: spec.max_health,
        max: spec.max_health,
    });
    builder.add(Capability::from(spec));
    builder.add(Lifecycle::Alive);
    if spec.is_armed() {
        builder.add(Weapon::default());
    }
    if spec.drone_capacity > 0 {
        builder.add(DroneBay {
            capacity: spec.drone_capacity,
            docked: spec.drone_capacity,
            launch_cooldown_ticks: 0,
        });
    }
    ctx.world.spawn(builder.build())
}

/// Spawn a drone. Cruise/dive drones are aimed at the highest-priority
/// opposing structure; with none standing they have no point and will be
/// discarded on their first update.
pub fn spawn_drone(
    ctx: &mut SimContext,
    team: Team,
    spec: &UnitSpec,
    position: Position,
    owner: Option<Entity>,
) -> Entity {
    let profile = get_profile(spec.kind);
    let designated = match profile.guidance {
        Guidance::CruiseDive => priority_structure(ctx, team).map(|(_, pos)| pos),
        Guidance::Homing => None,
    };
    let drone = Drone {
        kind: spec.kind,
        team,
        state: profile.initial_state(),
        damage: spec.damage,
        speed: spec.speed,
        locked: None,
        owner,
        designated,
    };
    ctx.audio(AudioCue::Launch);
    ctx.world.spawn((
        drone,
        position,
        Velocity::new(team.facing() * spec.speed, 0.0),
    ))
}

/// Highest-priority live structure hostile to `team`, nearest to its home
/// edge within a priority class.
pub fn priority_structure(ctx: &SimContext, team: Team) -> Option<(Entity, Position)> {
    let home = ctx.battlefield.home_x(team);
    let actors = ctx.live_actors();
    ActorKind::STRUCTURE_PRIORITY.iter().find_map(|kind| {
        actors
            .iter()
            .filter(|a| a.kind == *kind && team.is_hostile_to(a.team))
            .min_by(|a, b| (a.position.x - home).abs().total_cmp(&(b.position.x - home).abs()))
            .map(|a| (a.entity, a.position))
    })
}

/// Spawn at the side's home edge with a little jitter.
pub fn spawn_at_edge(ctx: &mut SimContext, team: Team, kind: ActorKind) -> Entity {
    let edge = ctx.battlefield.home_x(team) + team.facing() * SPAWN_EDGE_OFFSET;
    let jitter = ctx.rng.gen_range(-20.0..20.0);
    let position = Position::new(edge + jitter, ctx.battlefield.ground_y);
    spawn_unit(ctx, team, kind, position)
}

/// Each combatant gets an outpost, a bunker and a command post at mirrored
/// positions.
pub fn setup_battle(ctx: &mut SimContext) {
    let width = ctx.battlefield.width;
    for team in [Team::Player, Team::Opponent] {
        for (kind, offset) in [
            (ActorKind::CommandPost, COMMAND_POST_OFFSET),
            (ActorKind::Bunker, BUNKER_OFFSET),
            (ActorKind::Outpost, OUTPOST_OFFSET),
        ] {
            let x = match team {
                Team::Opponent => width * (1.0 - offset),
                _ => width * offset,
            };
            spawn_structure(ctx, team, kind, x);
        }
    }
    tracing::debug!(width, "battle set up");
}

/// Launch velocity for an arc from `origin` that lands at `aim`
/// after `flight_ticks` steps of `vy -= GRAVITY; position += velocity`.
pub fn arc_velocity(origin: &Position, aim: &Position, flight_ticks: f64) -> Velocity {
    let t = flight_ticks.max(1.0).ceil();
    let vx = (aim.x - origin.x) / t;
    let vy = (aim.y - origin.y) / t + GRAVITY * (t + 1.0) / 2.0;
    Velocity::new(vx, vy)
}

/// Spawn a projectile of `kind` from `origin` toward `aim` (and `target`
/// while it lives). Hitscan munitions have no in-flight body and return
/// `None`; the caller resolves them directly.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    ctx: &mut SimContext,
    origin: Position,
    aim: Position,
    target: Option<Entity>,
    damage: f64,
    team: Team,
    kind: MunitionKind,
    targets: TargetFilter,
) -> Option<Entity> {
    if !origin.is_finite() || !aim.is_finite() {
        tracing::warn!(?kind, "refusing projectile with non-finite endpoints");
        return None;
    }
    let profile = munition_profile(kind);
    let (position, velocity) = match kind.motion() {
        MotionModel::Hitscan => return None,
        MotionModel::Homing | MotionModel::Cruise => {
            (origin, Velocity::toward(&origin, &aim, profile.speed))
        }
        MotionModel::Arc => {
            let horizontal = (aim.x - origin.x).abs();
            let flight = (horizontal / profile.speed.max(f64::EPSILON)).max(ARC_MIN_FLIGHT_TICKS);
            (origin, arc_velocity(&origin, &aim, flight))
        }
        MotionModel::Drop => (
            Position::new(aim.x, ctx.battlefield.ground_y + DROP_SPAWN_ALTITUDE),
            Velocity::new(0.0, -DROP_INITIAL_SPEED),
        ),
    };
    Some(spawn_projectile_body(
        ctx, origin, position, velocity, aim, target, damage, team, kind, targets,
    ))
}

/// Spawn an arc projectile that lands at `aim` after exactly `flight_ticks`.
pub fn spawn_timed_arc(
    ctx: &mut SimContext,
    origin: Position,
    aim: Position,
    team: Team,
    kind: MunitionKind,
    flight_ticks: u64,
) -> Entity {
    let velocity = arc_velocity(&origin, &aim, flight_ticks as f64);
    spawn_projectile_body(
        ctx,
        origin,
        origin,
        velocity,
        aim,
        None,
        0.0,
        team,
        kind,
        TargetFilter::Ground,
    )
}

#[allow(clippy::too_many_arguments)]
fn spawn_projectile_body(
    ctx: &mut SimContext,
    origin: Position,
    position: Position,
    velocity: Velocity,
    aim: Position,
    target: Option<Entity>,
    damage: f64,
    team: Team,
    kind: MunitionKind,
    targets: TargetFilter,
) -> Entity {
    let cosmetic = matches!(munition_profile(kind).impact, ImpactRule::Cosmetic);
    let launch_effect = if cosmetic {
        EffectKind::StrikeLaunch
    } else {
        EffectKind::MuzzleFlash
    };
    ctx.effect(
        launch_effect,
        origin,
        EffectOptions {
            team: Some(team),
            ..EffectOptions::default()
        },
    );
    ctx.audio(AudioCue::Launch);
    ctx.world.spawn((
        Projectile {
            kind,
            team,
            damage,
            origin,
            aim,
            target,
            targets,
            age_ticks: 0,
            cosmetic,
        },
        position,
        velocity,
    ))
}
