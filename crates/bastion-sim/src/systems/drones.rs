//! Drone system: runs the drone FSM for every drone, then moves it.
//!
//! Weak references (lock, owner) are validated here before the FSM sees
//! them, so the FSM never receives a dead handle and a dead lock never
//! survives the tick.

use hecs::Entity;

use bastion_ai::fsm::{evaluate, Candidate, DroneContext, DroneOutcome, DroneUpdate};
use bastion_ai::profiles::get_profile;
use bastion_core::components::{Drone, DroneBay};
use bastion_core::enums::*;
use bastion_core::events::{entity_id, EffectOptions, SimEvent};
use bastion_core::types::{Position, Velocity};

use crate::context::{ActorView, SimContext};
use crate::systems::damage;

/// Run one FSM step for every drone.
pub fn run(ctx: &mut SimContext) {
    let tick = ctx.tick();
    let ground_y = ctx.battlefield.ground_y;
    let actors = ctx.live_actors();

    let mut updates: Vec<(Entity, Drone, Position, DroneUpdate<Entity>)> = Vec::new();
    {
        let mut query = ctx.world.query::<(&Drone, &Position, &Velocity)>();
        for (entity, (drone, pos, vel)) in query.iter() {
            let drone_ctx = DroneContext {
                kind: drone.kind,
                state: drone.state,
                position: *pos,
                velocity: *vel,
                speed: drone.speed,
                facing: drone.team.facing(),
                tick,
                ground_y,
                locked: drone.locked.and_then(|h| live_hostile(&actors, drone.team, h)),
                nearest_unit: nearest_unit(&actors, drone.team, pos),
                fallback_structure: fallback_structure(&actors, drone.team, pos),
                owner: resolve_owner(ctx, drone, pos),
                designated: drone.designated,
            };
            updates.push((entity, *drone, *pos, evaluate(&drone_ctx)));
        }
    }

    for (entity, drone, pos, update) in updates {
        if update.state_changed {
            tracing::trace!(
                kind = ?drone.kind,
                from = ?drone.state,
                to = ?update.new_state,
                "drone state transition"
            );
        }

        match update.outcome {
            DroneOutcome::Continue => {
                if let Ok(mut d) = ctx.world.get::<&mut Drone>(entity) {
                    d.locked = update.locked;
                    d.state = update.new_state;
                }
                if let Ok(mut vel) = ctx.world.get::<&mut Velocity>(entity) {
                    *vel = update.new_velocity;
                }
                if let Ok(mut p) = ctx.world.get::<&mut Position>(entity) {
                    p.step(&update.new_velocity);
                }
            }
            DroneOutcome::Detonate(point) => {
                let _ = ctx.world.despawn(entity);
                detonate(ctx, &drone, point);
            }
            DroneOutcome::Dock(carrier) => {
                let _ = ctx.world.despawn(entity);
                dock(ctx, &drone, carrier, pos);
            }
            DroneOutcome::Discard => {
                tracing::trace!(kind = ?drone.kind, "drone discarded");
                let _ = ctx.world.despawn(entity);
            }
        }
    }
}

fn detonate(ctx: &mut SimContext, drone: &Drone, point: Position) {
    let blast = get_profile(drone.kind).blast;
    damage::area_damage(ctx, point, &blast, drone.damage, drone.team);
    ctx.effect(
        EffectKind::Explosion,
        point,
        EffectOptions {
            radius: blast.radius,
            team: Some(drone.team),
        },
    );
    ctx.audio(AudioCue::Explosion);
    ctx.emit(SimEvent::DroneDetonated {
        team: drone.team,
        kind: drone.kind,
        position: point,
    });
}

fn dock(ctx: &mut SimContext, drone: &Drone, carrier: Entity, pos: Position) {
    if let Ok(mut bay) = ctx.world.get::<&mut DroneBay>(carrier) {
        bay.docked = (bay.docked + 1).min(bay.capacity);
    }
    ctx.effect(EffectKind::Spark, pos, EffectOptions::default());
    ctx.audio(AudioCue::Dock);
    ctx.emit(SimEvent::DroneDocked {
        team: drone.team,
        carrier: entity_id(carrier),
    });
}

fn live_hostile(actors: &[ActorView], team: Team, handle: Entity) -> Option<Candidate<Entity>> {
    actors
        .iter()
        .find(|a| a.entity == handle && team.is_hostile_to(a.team))
        .map(candidate)
}

/// Nearest hostile mobile unit anywhere on the field, by horizontal distance.
fn nearest_unit(actors: &[ActorView], team: Team, pos: &Position) -> Option<Candidate<Entity>> {
    actors
        .iter()
        .filter(|a| !a.is_structure() && team.is_hostile_to(a.team))
        .map(|a| (a, pos.horizontal_distance_to(&a.position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(a, _)| candidate(a))
}

/// First structure class in priority order with a live hostile member,
/// nearest member by horizontal distance.
fn fallback_structure(actors: &[ActorView], team: Team, pos: &Position) -> Option<Candidate<Entity>> {
    ActorKind::STRUCTURE_PRIORITY.iter().find_map(|kind| {
        actors
            .iter()
            .filter(|a| a.kind == *kind && team.is_hostile_to(a.team))
            .min_by(|a, b| {
                pos.horizontal_distance_to(&a.position)
                    .total_cmp(&pos.horizontal_distance_to(&b.position))
            })
            .map(candidate)
    })
}

/// The drone's carrier if it still lives, otherwise any same-side carrier
/// with room. Only recalling drones need an owner.
fn resolve_owner(ctx: &SimContext, drone: &Drone, pos: &Position) -> Option<Candidate<Entity>> {
    if !matches!(drone.state, DroneState::Recalling(_)) {
        return None;
    }
    if let Some(owner) = drone.owner {
        if ctx.is_alive(owner) && ctx.world.get::<&DroneBay>(owner).is_ok() {
            if let Some(position) = ctx.position_of(owner) {
                return Some(Candidate {
                    handle: owner,
                    position,
                });
            }
        }
    }
    ctx.carrier_with_room(drone.team, pos)
        .map(|(handle, position)| Candidate { handle, position })
}

fn candidate(actor: &ActorView) -> Candidate<Entity> {
    Candidate {
        handle: actor.entity,
        position: actor.position,
    }
}

/// Send every recallable drone of `team` back to its carrier. Returns how
/// many drones were recalled.
pub fn recall(ctx: &mut SimContext, team: Team) -> usize {
    let mut recalled = 0;
    for (_entity, drone) in ctx.world.query_mut::<&mut Drone>() {
        if drone.team != team
            || !get_profile(drone.kind).recallable
            || matches!(drone.state, DroneState::Recalling(_))
        {
            continue;
        }
        drone.state = DroneState::Recalling(RecallPhase::Approach);
        drone.locked = None;
        recalled += 1;
    }
    recalled
}

/// Put every homing drone hostile to `team` within `radius` of `center` into
/// the confused state, starting with the next drone pass. A drone already
/// confused has its countdown restarted. Cruising, diving and recalling
/// drones fly scripted paths with no guidance to jam and are left alone.
pub fn confuse_in_radius(
    ctx: &mut SimContext,
    team: Team,
    center: Position,
    radius: f64,
    duration_ticks: u64,
) -> usize {
    let since_tick = ctx.tick() + 1;
    let mut confused = 0;
    for (_entity, (drone, pos)) in ctx.world.query_mut::<(&mut Drone, &Position)>() {
        let guided = matches!(drone.state, DroneState::Homing | DroneState::Confused { .. });
        if !guided || !team.is_hostile_to(drone.team) || pos.distance_to(&center) > radius {
            continue;
        }
        drone.state = DroneState::Confused {
            since_tick,
            duration_ticks,
        };
        drone.locked = None;
        confused += 1;
    }
    confused
}
