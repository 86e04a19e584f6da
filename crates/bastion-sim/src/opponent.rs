//! Opponent driver: feeds the decision engine from the world and carries out
//! what it decides.
//!
//! Per tick: accrue income, fire due follow-up production, run the production
//! cadence, then the special-weapon cadence.

use std::collections::HashMap;

use bastion_ai::policy::OpponentPolicy;
use bastion_ai::production::{choose_production, follow_ups, BattlefieldSnapshot, ProductionChoice};
use bastion_ai::specials::{evaluate_specials, SpecialPolicyInput, SpecialReason};
use bastion_core::components::Drone;
use bastion_core::constants::BUNKER_OFFSET;
use bastion_core::enums::*;
use bastion_core::events::SimEvent;
use bastion_core::types::{Battlefield, Position};

use crate::context::{ActorView, SimContext};
use crate::deferred::DeferredQueue;
use crate::factory;
use crate::specials::{self, SpecialLedger};

/// State of the scripted side.
#[derive(Debug, Clone)]
pub struct Opponent {
    pub team: Team,
    pub policy: OpponentPolicy,
    pub resources: u32,
    pub income_per_tick: u32,
    follow_ups: DeferredQueue<ProductionChoice>,
    last_built: HashMap<ActorKind, u64>,
}

impl Opponent {
    pub fn new(difficulty: Difficulty, grace_ticks: u64, resources: u32, income_per_tick: u32) -> Self {
        Self {
            team: Team::Opponent,
            policy: OpponentPolicy::new(difficulty, grace_ticks),
            resources,
            income_per_tick,
            follow_ups: DeferredQueue::new(),
            last_built: HashMap::new(),
        }
    }

    pub fn pending_follow_ups(&self) -> usize {
        self.follow_ups.len()
    }

    pub fn enemy(&self) -> Team {
        self.team.enemy().unwrap_or(Team::Player)
    }
}

/// Count the opposing force by category.
///
/// Every side starts with a fortified command post and bunker line, so only a
/// fortified structure standing forward of the bunker line counts as a
/// fortification worth countering.
pub fn snapshot(actors: &[ActorView], enemy: Team, field: &Battlefield) -> BattlefieldSnapshot {
    let home = field.home_x(enemy);
    let bunker_line = field.width * BUNKER_OFFSET;
    let mut snap = BattlefieldSnapshot::default();
    for a in actors.iter().filter(|a| a.team == enemy) {
        match a.category {
            Category::Air => snap.air += 1,
            Category::Armor => snap.armor += 1,
            Category::Infantry => snap.infantry += 1,
            Category::Structure | Category::Drone => {}
        }
        if a.category != Category::Structure {
            snap.enemy_units += 1;
        }
        if a.fortified && (a.position.x - home).abs() > bunker_line + 1.0 {
            snap.fortified = true;
        }
    }
    snap
}

pub fn run(ctx: &mut SimContext, opponent: &mut Opponent, ledger: &mut SpecialLedger) {
    let tick = ctx.tick();
    opponent.resources = opponent.resources.saturating_add(opponent.income_per_tick);

    for choice in opponent.follow_ups.drain_due(tick) {
        tracing::debug!(?choice, "follow-up production due");
        attempt_production(ctx, opponent, choice, true);
    }

    let actors = ctx.live_actors();
    let snap = snapshot(&actors, opponent.enemy(), &ctx.battlefield);
    if opponent.policy.production_due(tick, snap.enemy_units) {
        opponent.policy.mark_production(tick);
        let decision = choose_production(&snap, opponent.policy.difficulty, &mut ctx.rng);
        tracing::debug!(choice = ?decision.choice, reason = ?decision.reason, "production decision");
        if let Some(cost) = attempt_production(ctx, opponent, decision.choice, false) {
            for follow_up in follow_ups(
                decision.choice,
                opponent.policy.difficulty,
                opponent.resources,
                cost,
            ) {
                opponent
                    .follow_ups
                    .push(tick + follow_up.delay_ticks, follow_up.choice);
            }
        }
    }

    if opponent.policy.special_due(tick) {
        opponent.policy.mark_special(tick);
        evaluate_special_weapons(ctx, opponent, ledger, &actors);
    }
}

/// Pay for and spawn `choice`. Returns the amount paid, or `None` when the
/// stock, the build cooldown or the stock cap refuses it. Follow-ups belong
/// to the order that scheduled them and skip the build cooldown.
pub fn attempt_production(
    ctx: &mut SimContext,
    opponent: &mut Opponent,
    choice: ProductionChoice,
    follow_up: bool,
) -> Option<u32> {
    let tick = ctx.tick();
    let team = opponent.team;
    let kind = choice.kind();
    let spec = ctx.catalog.spec_or_fallback(kind);
    let count = choice.count();
    let cost = spec.cost.saturating_mul(count);

    let cooling = !follow_up
        && opponent
            .last_built
            .get(&kind)
            .is_some_and(|last| tick < last + spec.build_cooldown_ticks);
    let live = live_count(ctx, team, kind);
    let capped = live + count > spec.stock_cap;
    let broke = opponent.resources < cost;

    if cooling || capped || broke {
        tracing::debug!(?kind, cooling, capped, broke, resources = opponent.resources, "production denied");
        ctx.emit(SimEvent::ProductionDenied { team, kind });
        return None;
    }

    opponent.resources -= cost;
    opponent.last_built.insert(kind, tick);
    for i in 0..count {
        let entity = factory::spawn_at_edge(ctx, team, kind);
        if count > 1 {
            // Spread a raid out so the wing does not stack on one point.
            if let Ok(mut pos) = ctx.world.get::<&mut Position>(entity) {
                pos.x += team.facing() * -(i as f64) * 40.0;
            }
        }
        ctx.emit(SimEvent::Produced { team, kind });
    }
    Some(cost)
}

fn live_count(ctx: &SimContext, team: Team, kind: ActorKind) -> u32 {
    if kind.is_drone() {
        ctx.world
            .query::<&Drone>()
            .iter()
            .filter(|(_, d)| d.team == team && d.kind == kind)
            .count() as u32
    } else {
        ctx.live_actors()
            .iter()
            .filter(|a| a.team == team && a.kind == kind)
            .count() as u32
    }
}

fn evaluate_special_weapons(
    ctx: &mut SimContext,
    opponent: &mut Opponent,
    ledger: &mut SpecialLedger,
    actors: &[ActorView],
) {
    let enemy = opponent.enemy();
    let outpost_present = actors
        .iter()
        .any(|a| a.team == enemy && a.kind == ActorKind::Outpost);
    let react = opponent.policy.observe_outpost(outpost_present);

    let units: Vec<Position> = actors
        .iter()
        .filter(|a| a.team == enemy && !a.is_structure())
        .map(|a| a.position)
        .collect();
    let structures: Vec<Position> = actors
        .iter()
        .filter(|a| a.team == enemy && a.is_structure())
        .map(|a| a.position)
        .collect();
    let rear_structure = actors
        .iter()
        .find(|a| a.team == enemy && a.kind == ActorKind::CommandPost)
        .map(|a| a.position);

    let input = SpecialPolicyInput {
        tick: ctx.tick(),
        ground_y: ctx.battlefield.ground_y,
        enemy_units: &units,
        enemy_structures: &structures,
        react_to_outpost_loss: react,
        rear_structure,
        facing: opponent.team.facing(),
        available: ledger.availability(),
    };
    let Some(decision) = evaluate_specials(&input) else {
        return;
    };
    tracing::debug!(kind = ?decision.kind, reason = ?decision.reason, "special weapon decision");
    if specials::cast(ctx, ledger, decision.kind, decision.target)
        && decision.reason == SpecialReason::OutpostLoss
    {
        opponent.policy.record_outpost_reaction();
    }
}
