//! Simulation context passed to every system.
//!
//! Holds the world and everything a system may touch during a tick. Owned by
//! `SimulationEngine`; systems borrow it mutably for the duration of their turn.

use std::sync::Arc;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use bastion_core::catalog::UnitCatalog;
use bastion_core::components::{Actor, Capability, DroneBay};
use bastion_core::enums::*;
use bastion_core::events::{EffectOptions, SimEvent};
use bastion_core::types::{Battlefield, Position, SimTime};

use crate::effects::EffectSink;

pub struct SimContext {
    pub world: World,
    pub time: SimTime,
    pub battlefield: Battlefield,
    pub rng: ChaCha8Rng,
    pub effects: Box<dyn EffectSink>,
    /// Events produced during the current tick.
    pub events: Vec<SimEvent>,
    pub catalog: Arc<UnitCatalog>,
}

/// Snapshot of one live actor, taken before a system starts mutating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub entity: Entity,
    pub kind: ActorKind,
    pub team: Team,
    pub category: Category,
    pub position: Position,
    pub evasive: bool,
    pub invulnerable: bool,
    pub fortified: bool,
}

impl ActorView {
    pub fn is_structure(&self) -> bool {
        self.category == Category::Structure
    }
}

impl SimContext {
    pub fn tick(&self) -> u64 {
        self.time.tick
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn effect(&mut self, kind: EffectKind, position: Position, options: EffectOptions) {
        self.effects.spawn_visual_effect(kind, position, options);
    }

    pub fn audio(&mut self, cue: AudioCue) {
        self.effects.play_audio_cue(cue);
    }

    /// Whether a weak handle still points at a live (not destroying) actor.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world.contains(entity)
            && self
                .world
                .get::<&Lifecycle>(entity)
                .is_ok_and(|l| *l == Lifecycle::Alive)
    }

    pub fn position_of(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    /// Every live actor (units and structures, not munitions).
    pub fn live_actors(&self) -> Vec<ActorView> {
        self.world
            .query::<(&Actor, &Position, &Capability, &Lifecycle)>()
            .iter()
            .filter(|(_, (_, _, _, life))| **life == Lifecycle::Alive)
            .map(|(entity, (actor, pos, cap, _))| ActorView {
                entity,
                kind: actor.kind,
                team: actor.team,
                category: actor.category,
                position: *pos,
                evasive: cap.evasive,
                invulnerable: cap.invulnerable,
                fortified: cap.fortified,
            })
            .collect()
    }

    /// Position of a side's command post while it stands.
    pub fn command_post(&self, team: Team) -> Option<Position> {
        self.live_actors()
            .into_iter()
            .find(|a| a.team == team && a.kind == ActorKind::CommandPost)
            .map(|a| a.position)
    }

    /// Live carrier of `team` with room for another drone, nearest to `near`.
    pub fn carrier_with_room(&self, team: Team, near: &Position) -> Option<(Entity, Position)> {
        self.world
            .query::<(&Actor, &Position, &DroneBay, &Lifecycle)>()
            .iter()
            .filter(|(_, (actor, _, bay, life))| {
                actor.team == team && **life == Lifecycle::Alive && bay.docked < bay.capacity
            })
            .map(|(entity, (_, pos, _, _))| (entity, *pos))
            .min_by(|a, b| near.distance_to(&a.1).total_cmp(&near.distance_to(&b.1)))
    }
}
