//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//!
//! Handles to other entities (`Option<hecs::Entity>`) are weak: the target may
//! have been despawned since the handle was stored, so systems check
//! `World::contains` and the target's `Lifecycle` before every use.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::catalog::UnitSpec;
use crate::enums::*;
use crate::types::Position;

/// Identity of a unit or structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub team: Team,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Combat-relevant slice of the catalog descriptor, copied at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub damage: f64,
    pub range: f64,
    pub fire_interval_ticks: u32,
    pub speed: f64,
    pub munition: Option<MunitionKind>,
    pub targets: TargetFilter,
    pub evasive: bool,
    pub invulnerable: bool,
    pub fortified: bool,
}

impl From<&UnitSpec> for Capability {
    fn from(spec: &UnitSpec) -> Self {
        Self {
            damage: spec.damage,
            range: spec.range,
            fire_interval_ticks: spec.fire_interval_ticks,
            speed: spec.speed,
            munition: spec.munition,
            targets: spec.targets,
            evasive: spec.evasive,
            invulnerable: spec.invulnerable,
            fortified: spec.fortified,
        }
    }
}

/// Fire-control state of an armed actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Weapon {
    /// Ticks until the next shot is allowed.
    pub cooldown_ticks: u32,
    /// Current target (weak).
    pub target: Option<Entity>,
}

/// In-flight munition.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub kind: MunitionKind,
    pub team: Team,
    pub damage: f64,
    pub origin: Position,
    /// Last known aim point. Updated from `target` while it is valid.
    pub aim: Position,
    /// Bound target (weak).
    pub target: Option<Entity>,
    /// Layers this munition can hit.
    pub targets: TargetFilter,
    pub age_ticks: u32,
    /// Visual only: arrives without applying damage.
    pub cosmetic: bool,
}

/// Autonomous munition.
#[derive(Debug, Clone, Copy)]
pub struct Drone {
    pub kind: ActorKind,
    pub team: Team,
    pub state: DroneState,
    pub damage: f64,
    pub speed: f64,
    /// Locked target (weak).
    pub locked: Option<Entity>,
    /// Launching carrier for recall-capable drones (weak).
    pub owner: Option<Entity>,
    /// Strike point for cruise/dive drones.
    pub designated: Option<Position>,
}

/// Drone storage on a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneBay {
    pub capacity: u32,
    pub docked: u32,
    pub launch_cooldown_ticks: u32,
}

/// Temporary incapacitation: no movement, no firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disabled {
    pub until_tick: u64,
}
