//! Damage resolution: single-target direct fire and area blasts.
//!
//! Invulnerable actors and actors already in the destroying state are never
//! damaged. Health is clamped to `[0, max]`; reaching zero starts the
//! destruction countdown.

use hecs::Entity;
use rand::Rng;

use bastion_core::components::{Actor, Capability, Health};
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::{entity_id, EffectOptions, SimEvent};
use bastion_core::profiles::AreaProfile;
use bastion_core::types::Position;

use crate::context::SimContext;

/// Apply `amount` damage to `target`. Returns the damage actually dealt.
pub fn apply_damage(ctx: &mut SimContext, target: Entity, amount: f64) -> f64 {
    if !amount.is_finite() || amount <= 0.0 || !ctx.is_alive(target) {
        return 0.0;
    }
    let Ok(actor) = ctx.world.get::<&Actor>(target).map(|a| *a) else {
        return 0.0;
    };
    let invulnerable = ctx
        .world
        .get::<&Capability>(target)
        .is_ok_and(|c| c.invulnerable);
    if invulnerable {
        return 0.0;
    }

    let (dealt, remaining) = match ctx.world.get::<&mut Health>(target) {
        Ok(mut health) => {
            let before = health.current.min(health.max);
            health.current = (before - amount).clamp(0.0, health.max);
            (before - health.current, health.current)
        }
        Err(_) => return 0.0,
    };

    ctx.emit(SimEvent::Damaged {
        target: entity_id(target),
        kind: actor.kind,
        team: actor.team,
        amount: dealt,
        remaining,
    });

    if remaining <= 0.0 {
        destroy(ctx, target, actor);
    }
    dealt
}

fn destroy(ctx: &mut SimContext, target: Entity, actor: Actor) {
    let _ = ctx.world.insert_one(
        target,
        Lifecycle::Destroying {
            remaining_ticks: DESTROY_TICKS,
        },
    );
    let position = ctx.position_of(target).unwrap_or_default();
    tracing::debug!(?actor.kind, ?actor.team, "actor destroyed");
    ctx.emit(SimEvent::Destroyed {
        target: entity_id(target),
        kind: actor.kind,
        team: actor.team,
        position,
    });
    let effect = if actor.category == Category::Structure {
        EffectKind::LargeExplosion
    } else {
        EffectKind::Wreck
    };
    ctx.effect(effect, position, EffectOptions::default());
}

/// Damage every actor hostile to `team` within the blast. Returns the number
/// of actors hit.
pub fn area_damage(
    ctx: &mut SimContext,
    center: Position,
    profile: &AreaProfile,
    damage: f64,
    team: Team,
) -> usize {
    let victims: Vec<_> = ctx
        .live_actors()
        .into_iter()
        .filter(|a| team.is_hostile_to(a.team) && !a.invulnerable)
        .filter_map(|a| {
            let falloff = profile.falloff(a.position.distance_to(&center));
            (falloff > 0.0).then_some((a, falloff))
        })
        .collect();

    let mut hits = 0;
    for (victim, falloff) in victims {
        if victim.evasive
            && profile.evasive_hit_chance < 1.0
            && !ctx.rng.gen_bool(profile.evasive_hit_chance.clamp(0.0, 1.0))
        {
            continue;
        }
        let scale = if victim.is_structure() {
            profile.structure_factor
        } else {
            1.0
        };
        if apply_damage(ctx, victim.entity, damage * falloff * scale) > 0.0 {
            hits += 1;
        }
    }
    hits
}

/// Fire along the line from `origin` toward `aim`. The nearest hostile actor
/// inside the corridor takes one hit roll. Returns the actor hit, if any.
pub fn direct_fire(
    ctx: &mut SimContext,
    origin: Position,
    aim: Position,
    damage: f64,
    team: Team,
    targets: TargetFilter,
) -> Option<Entity> {
    let line = aim.as_vec() - origin.as_vec();
    let length = line.length();
    if length <= f64::EPSILON {
        return None;
    }
    let dir = line / length;
    let reach = length + CORRIDOR_HALF_WIDTH;

    let victim = ctx
        .live_actors()
        .into_iter()
        .filter(|a| team.is_hostile_to(a.team) && targets.allows(a.category) && !a.invulnerable)
        .filter_map(|a| {
            let rel = a.position.as_vec() - origin.as_vec();
            let along = rel.dot(dir);
            let off = (rel - dir * along).length();
            (along >= 0.0 && along <= reach && off <= CORRIDOR_HALF_WIDTH).then_some((a, along))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(a, _)| a)?;

    let chance = if victim.evasive {
        DIRECT_FIRE_EVASIVE_HIT_CHANCE
    } else {
        DIRECT_FIRE_HIT_CHANCE
    };
    if !ctx.rng.gen_bool(chance) {
        return None;
    }
    apply_damage(ctx, victim.entity, damage);
    ctx.effect(EffectKind::Spark, victim.position, EffectOptions::default());
    Some(victim.entity)
}
