//! Drone behavior finite state machine.
//!
//! Pure functions that compute state transitions and velocity for one drone
//! from a snapshot of its situation. No ECS dependency: targets and owners are
//! opaque handles `H` that the caller resolved and validated beforehand.
//!
//! Every state has a defined outcome on every tick, and the state is settled
//! before the caller moves the drone, so movement always uses the post-transition
//! velocity.

use bastion_core::constants::*;
use bastion_core::enums::{ActorKind, DroneState, RecallPhase};
use bastion_core::types::{Position, Velocity};
use glam::DVec2;

use crate::profiles::get_profile;

/// A live, validated actor the drone can see.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<H> {
    pub handle: H,
    pub position: Position,
}

/// Input to the drone FSM for a single drone.
#[derive(Debug, Clone)]
pub struct DroneContext<H> {
    pub kind: ActorKind,
    pub state: DroneState,
    pub position: Position,
    pub velocity: Velocity,
    /// Cruise speed (units per tick).
    pub speed: f64,
    /// Direction of the enemy side along x.
    pub facing: f64,
    pub tick: u64,
    pub ground_y: f64,
    /// The locked target, if it is still alive. A dead lock arrives as `None`.
    pub locked: Option<Candidate<H>>,
    /// Nearest live opposing mobile unit by horizontal distance.
    pub nearest_unit: Option<Candidate<H>>,
    /// Highest-priority live opposing structure.
    pub fallback_structure: Option<Candidate<H>>,
    /// Resolved owner (live reference or rescan result).
    pub owner: Option<Candidate<H>>,
    /// Strike point for cruise/dive drones.
    pub designated: Option<Position>,
}

/// What the caller must do with the drone after this tick's evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DroneOutcome<H> {
    /// Keep flying with the new velocity.
    Continue,
    /// Blow up at the given point and remove the drone.
    Detonate(Position),
    /// Restore one drone of capacity to the owner and remove the drone.
    Dock(H),
    /// The drone is invalid; remove it without effect.
    Discard,
}

/// Output from the drone FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneUpdate<H> {
    pub new_state: DroneState,
    pub new_velocity: Velocity,
    /// Lock to carry into the next tick. Never a dead target.
    pub locked: Option<H>,
    pub outcome: DroneOutcome<H>,
    pub state_changed: bool,
}

/// Evaluate the FSM for one drone.
pub fn evaluate<H: Copy>(ctx: &DroneContext<H>) -> DroneUpdate<H> {
    match ctx.state {
        DroneState::Homing => evaluate_homing(ctx),
        DroneState::Confused {
            since_tick,
            duration_ticks,
        } => evaluate_confused(ctx, since_tick, duration_ticks),
        DroneState::Cruising => evaluate_cruise(ctx),
        DroneState::Diving => evaluate_dive(ctx),
        DroneState::Recalling(phase) => evaluate_recall(ctx, phase),
    }
}

fn update<H>(
    ctx: &DroneContext<H>,
    new_state: DroneState,
    new_velocity: Velocity,
    locked: Option<H>,
    outcome: DroneOutcome<H>,
) -> DroneUpdate<H> {
    DroneUpdate {
        new_state,
        new_velocity,
        locked,
        outcome,
        state_changed: new_state != ctx.state,
    }
}

fn evaluate_homing<H: Copy>(ctx: &DroneContext<H>) -> DroneUpdate<H> {
    let profile = get_profile(ctx.kind);
    let target = ctx
        .locked
        .or(ctx.nearest_unit)
        .or(ctx.fallback_structure);

    match target {
        Some(target) => {
            let distance = ctx.position.distance_to(&target.position);
            if distance <= profile.proximity.max(ctx.speed) {
                update(
                    ctx,
                    DroneState::Homing,
                    Velocity::zero(),
                    None,
                    DroneOutcome::Detonate(target.position),
                )
            } else {
                let velocity = Velocity::toward(&ctx.position, &target.position, ctx.speed);
                update(
                    ctx,
                    DroneState::Homing,
                    velocity,
                    Some(target.handle),
                    DroneOutcome::Continue,
                )
            }
        }
        // Nothing left to hit: drift toward the enemy edge until out of bounds.
        None => update(
            ctx,
            DroneState::Homing,
            Velocity::new(ctx.facing * ctx.speed, 0.0),
            None,
            DroneOutcome::Continue,
        ),
    }
}

fn evaluate_confused<H: Copy>(
    ctx: &DroneContext<H>,
    since_tick: u64,
    duration_ticks: u64,
) -> DroneUpdate<H> {
    let elapsed = ctx.tick.saturating_sub(since_tick);
    if elapsed >= duration_ticks {
        return evaluate_homing(ctx);
    }

    // Fixed heading with a cosmetic wobble; guidance is off.
    let wobble = (elapsed as f64 * 0.5).sin() * DRONE_CONFUSED_WOBBLE;
    let heading = DVec2::new(ctx.facing, 0.0);
    let velocity = DVec2::from_angle(wobble).rotate(heading) * ctx.speed;
    update(ctx, ctx.state, velocity.into(), None, DroneOutcome::Continue)
}

/// Altitude (above ground) a cruising strike drone should hold at a given
/// horizontal distance from its point. Eases down inside the descent band so
/// the dive does not start from full cruise height.
pub fn cruise_altitude(horizontal_distance: f64) -> f64 {
    if horizontal_distance >= STRIKE_DESCENT_START {
        return STRIKE_CRUISE_ALTITUDE;
    }
    let span = STRIKE_DESCENT_START - STRIKE_DIVE_BAND;
    let t = ((horizontal_distance - STRIKE_DIVE_BAND) / span).clamp(0.0, 1.0);
    STRIKE_DIVE_ENTRY_ALTITUDE + (STRIKE_CRUISE_ALTITUDE - STRIKE_DIVE_ENTRY_ALTITUDE) * t
}

fn evaluate_cruise<H: Copy>(ctx: &DroneContext<H>) -> DroneUpdate<H> {
    let Some(point) = ctx.designated else {
        return update(ctx, ctx.state, Velocity::zero(), None, DroneOutcome::Discard);
    };

    let dx = point.x - ctx.position.x;
    if dx.abs() <= STRIKE_DIVE_BAND {
        let velocity = Velocity::toward(&ctx.position, &point, ctx.speed);
        return update(ctx, DroneState::Diving, velocity, None, DroneOutcome::Continue);
    }

    let desired_y = ctx.ground_y + cruise_altitude(dx.abs());
    let climb_limit = ctx.speed * 0.5;
    let vy = (desired_y - ctx.position.y).clamp(-climb_limit, climb_limit);
    let velocity = Velocity::new(dx.signum() * ctx.speed, vy);
    update(ctx, DroneState::Cruising, velocity, None, DroneOutcome::Continue)
}

fn evaluate_dive<H: Copy>(ctx: &DroneContext<H>) -> DroneUpdate<H> {
    let profile = get_profile(ctx.kind);
    let Some(point) = ctx.designated else {
        return update(ctx, ctx.state, Velocity::zero(), None, DroneOutcome::Discard);
    };

    let dive_speed = (ctx.velocity.speed() + STRIKE_DIVE_ACCEL)
        .min(STRIKE_MAX_DIVE_SPEED)
        .max(ctx.speed);
    let distance = ctx.position.distance_to(&point);
    if distance <= profile.proximity.max(dive_speed) || ctx.position.y <= ctx.ground_y {
        return update(
            ctx,
            DroneState::Diving,
            Velocity::zero(),
            None,
            DroneOutcome::Detonate(point),
        );
    }

    let velocity = Velocity::toward(&ctx.position, &point, dive_speed);
    update(ctx, DroneState::Diving, velocity, None, DroneOutcome::Continue)
}

fn evaluate_recall<H: Copy>(ctx: &DroneContext<H>, phase: RecallPhase) -> DroneUpdate<H> {
    // No carrier anywhere: hold station until one turns up.
    let Some(owner) = ctx.owner else {
        return update(ctx, ctx.state, Velocity::zero(), None, DroneOutcome::Continue);
    };

    let hover = Position::new(owner.position.x, owner.position.y + RECALL_HOVER_OFFSET);
    let distance = ctx.position.distance_to(&hover);
    let approach = Velocity::toward(&ctx.position, &hover, ctx.speed.min(distance));

    match phase {
        RecallPhase::Approach => {
            if distance <= RECALL_ARRIVE_DISTANCE {
                update(
                    ctx,
                    DroneState::Recalling(RecallPhase::Land { held_ticks: 0 }),
                    approach,
                    None,
                    DroneOutcome::Continue,
                )
            } else {
                update(ctx, ctx.state, approach, None, DroneOutcome::Continue)
            }
        }
        RecallPhase::Land { held_ticks } => {
            let held_ticks = held_ticks + 1;
            let next = if held_ticks >= RECALL_HOLD_TICKS {
                RecallPhase::Pickup
            } else {
                RecallPhase::Land { held_ticks }
            };
            update(
                ctx,
                DroneState::Recalling(next),
                approach,
                None,
                DroneOutcome::Continue,
            )
        }
        RecallPhase::Pickup => update(
            ctx,
            ctx.state,
            Velocity::zero(),
            None,
            DroneOutcome::Dock(owner.handle),
        ),
    }
}
