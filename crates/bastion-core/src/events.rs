//! Events emitted by the simulation each tick, and options passed to the
//! presentation hooks.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Stable numeric id of an entity (`hecs::Entity::to_bits`).
pub type EntityId = u64;

pub fn entity_id(entity: hecs::Entity) -> EntityId {
    entity.to_bits().get()
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Health removed from an actor.
    Damaged {
        target: EntityId,
        kind: ActorKind,
        team: Team,
        amount: f64,
        remaining: f64,
    },
    /// Actor health reached zero; it is now in the destroying state.
    Destroyed {
        target: EntityId,
        kind: ActorKind,
        team: Team,
        position: Position,
    },
    /// The opponent (or a command) introduced a new actor.
    Produced { team: Team, kind: ActorKind },
    /// A production attempt was refused (resources, cooldown or stock cap).
    ProductionDenied { team: Team, kind: ActorKind },
    SpecialCast {
        team: Team,
        kind: SpecialKind,
        target: Position,
    },
    /// A precision strike was enqueued to resolve at `resolve_tick`.
    StrikeScheduled {
        team: Team,
        target: Position,
        resolve_tick: u64,
    },
    /// A pending precision strike applied its damage.
    StrikeResolved { team: Team, target: Position },
    DroneDetonated {
        team: Team,
        kind: ActorKind,
        position: Position,
    },
    /// A recalled drone was taken aboard its carrier.
    DroneDocked { team: Team, carrier: EntityId },
    BattleOver { winner: Team },
}

/// Optional parameters for a visual effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectOptions {
    /// Visual radius (blast size, pulse size).
    pub radius: f64,
    /// Team color hint.
    pub team: Option<Team>,
}

impl EffectOptions {
    pub fn radius(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }
}
