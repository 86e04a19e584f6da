//! Special-weapons controller.
//!
//! One ledger per side holds a charge count and cooldown for each weapon kind
//! and the queue of precision strikes still in the air. Casting is a plain
//! boolean outcome: no charges or a running cooldown refuse the cast and
//! leave the ledger untouched.

use hecs::Entity;

use bastion_core::components::{Disabled, Weapon};
use bastion_core::enums::*;
use bastion_core::events::{EffectOptions, SimEvent};
use bastion_core::profiles::{special_profile, AreaProfile};
use bastion_core::types::Position;

use crate::context::SimContext;
use crate::deferred::DeferredQueue;
use crate::factory;
use crate::systems::{damage, drones};

/// Charges and cooldown for one weapon kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponStock {
    pub charges: u32,
    pub cooldown_ticks: u32,
}

impl WeaponStock {
    pub fn is_ready(&self) -> bool {
        self.charges > 0 && self.cooldown_ticks == 0
    }
}

/// Damage already in the air, applied when its tick arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingStrike {
    pub target: Position,
    pub radius: f64,
    pub damage: f64,
}

#[derive(Debug, Clone)]
pub struct SpecialLedger {
    pub team: Team,
    stocks: [WeaponStock; 3],
    pending: DeferredQueue<PendingStrike>,
    /// Precision strikes fly as visible projectiles; without this they land
    /// immediately at reduced strength.
    pub ballistic_strikes: bool,
}

impl SpecialLedger {
    pub fn new(team: Team, ballistic_strikes: bool) -> Self {
        let stocks = SpecialKind::ALL.map(|kind| WeaponStock {
            charges: special_profile(kind).charges,
            cooldown_ticks: 0,
        });
        Self {
            team,
            stocks,
            pending: DeferredQueue::new(),
            ballistic_strikes,
        }
    }

    pub fn stock(&self, kind: SpecialKind) -> WeaponStock {
        self.stocks[kind.index()]
    }

    pub fn stock_mut(&mut self, kind: SpecialKind) -> &mut WeaponStock {
        &mut self.stocks[kind.index()]
    }

    pub fn is_ready(&self, kind: SpecialKind) -> bool {
        self.stock(kind).is_ready()
    }

    /// Availability indexed by `SpecialKind::index`.
    pub fn availability(&self) -> [bool; 3] {
        SpecialKind::ALL.map(|kind| self.is_ready(kind))
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Scheduled strikes as (resolve tick, strike).
    pub fn pending(&self) -> impl Iterator<Item = (u64, &PendingStrike)> {
        self.pending.iter()
    }

    /// Count every running cooldown down by one tick.
    pub fn tick_cooldowns(&mut self) {
        for stock in &mut self.stocks {
            stock.cooldown_ticks = stock.cooldown_ticks.saturating_sub(1);
        }
    }
}

/// Try to fire `kind` at `target`. Returns whether the cast happened.
pub fn cast(ctx: &mut SimContext, ledger: &mut SpecialLedger, kind: SpecialKind, target: Position) -> bool {
    if !target.is_finite() || !ledger.is_ready(kind) {
        tracing::debug!(team = ?ledger.team, ?kind, "special cast refused");
        return false;
    }
    let profile = special_profile(kind);
    {
        let stock = ledger.stock_mut(kind);
        stock.charges -= 1;
        stock.cooldown_ticks = profile.cooldown_ticks;
    }

    let team = ledger.team;
    tracing::info!(?team, ?kind, x = target.x, y = target.y, "special weapon cast");
    ctx.emit(SimEvent::SpecialCast { team, kind, target });

    match kind {
        SpecialKind::Nuke => {
            let area = AreaProfile::new(profile.radius);
            damage::area_damage(ctx, target, &area, profile.damage, team);
            ctx.effect(
                EffectKind::NukeBlast,
                target,
                EffectOptions {
                    radius: profile.radius,
                    team: Some(team),
                },
            );
            ctx.audio(AudioCue::Nuke);
        }
        SpecialKind::Emp => {
            let disabled = disable_in_radius(ctx, team, target, profile.radius);
            let confused = drones::confuse_in_radius(
                ctx,
                team,
                target,
                profile.radius,
                profile.drone_confuse_ticks,
            );
            tracing::debug!(disabled, confused, "emp pulse");
            ctx.effect(
                EffectKind::EmpPulse,
                target,
                EffectOptions {
                    radius: profile.radius,
                    team: Some(team),
                },
            );
            ctx.audio(AudioCue::Emp);
        }
        SpecialKind::Tactical => launch_precision(ctx, ledger, target),
    }
    true
}

fn disable_in_radius(ctx: &mut SimContext, team: Team, center: Position, radius: f64) -> usize {
    let profile = special_profile(SpecialKind::Emp);
    let tick = ctx.tick();
    let victims: Vec<(Entity, bool)> = ctx
        .live_actors()
        .into_iter()
        .filter(|a| team.is_hostile_to(a.team) && a.position.distance_to(&center) <= radius)
        .map(|a| (a.entity, a.is_structure()))
        .collect();

    for &(entity, structure) in &victims {
        let duration = if structure {
            profile.structure_disable_ticks
        } else {
            profile.unit_disable_ticks
        };
        let until_tick = tick + duration;
        // A longer disable already in place wins.
        let current = ctx.world.get::<&Disabled>(entity).map(|d| d.until_tick).ok();
        if current.map_or(true, |c| c < until_tick) {
            let _ = ctx.world.insert_one(entity, Disabled { until_tick });
        }
        if let Ok(mut weapon) = ctx.world.get::<&mut Weapon>(entity) {
            weapon.target = None;
        }
    }
    victims.len()
}

fn launch_precision(ctx: &mut SimContext, ledger: &mut SpecialLedger, target: Position) {
    let profile = special_profile(SpecialKind::Tactical);
    let team = ledger.team;

    if !ledger.ballistic_strikes {
        let area = AreaProfile::new(profile.fallback_radius);
        damage::area_damage(ctx, target, &area, profile.fallback_damage, team);
        ctx.effect(EffectKind::Explosion, target, EffectOptions::radius(profile.fallback_radius));
        ctx.audio(AudioCue::Explosion);
        return;
    }

    let launch = ctx.command_post(team).unwrap_or_else(|| {
        Position::new(ctx.battlefield.home_x(team), ctx.battlefield.ground_y)
    });
    factory::spawn_timed_arc(
        ctx,
        launch,
        target,
        team,
        MunitionKind::StrikeMissile,
        profile.flight_ticks,
    );
    ctx.audio(AudioCue::Siren);

    let resolve_tick = ctx.tick() + profile.flight_ticks;
    ledger.pending.push(
        resolve_tick,
        PendingStrike {
            target,
            radius: profile.radius,
            damage: profile.damage,
        },
    );
    ctx.emit(SimEvent::StrikeScheduled {
        team,
        target,
        resolve_tick,
    });
}

/// Apply every pending strike whose tick has arrived, exactly once each.
pub fn resolve_pending(ctx: &mut SimContext, ledger: &mut SpecialLedger) {
    let team = ledger.team;
    for strike in ledger.pending.drain_due(ctx.tick()) {
        let area = AreaProfile::new(strike.radius);
        let hits = damage::area_damage(ctx, strike.target, &area, strike.damage, team);
        tracing::info!(?team, x = strike.target.x, hits, "precision strike resolved");
        ctx.effect(
            EffectKind::LargeExplosion,
            strike.target,
            EffectOptions {
                radius: strike.radius,
                team: Some(team),
            },
        );
        ctx.audio(AudioCue::Explosion);
        ctx.emit(SimEvent::StrikeResolved {
            team,
            target: strike.target,
        });
    }
}

