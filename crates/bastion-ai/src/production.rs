//! Opponent production policy.
//!
//! A fixed decision tree over a battlefield snapshot: counter air, then armor,
//! then infantry, then fortifications, otherwise a weighted pick from the
//! difficulty's default pool. Higher tiers unlock stronger counters and the
//! elite-only bombing raid.

use bastion_core::constants::*;
use bastion_core::enums::{ActorKind, Difficulty};
use rand::Rng;

/// Composition of the opposing force as seen by the opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattlefieldSnapshot {
    pub air: u32,
    pub armor: u32,
    pub infantry: u32,
    /// Whether any live opposing structure counts as fortified.
    pub fortified: bool,
    /// Live opposing mobile units (shrinks the production interval).
    pub enemy_units: u32,
}

/// What the opponent decided to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionChoice {
    Unit(ActorKind),
    /// A wing of bombers launched together.
    BombingRaid,
}

impl ProductionChoice {
    /// The catalog kind this choice spawns.
    pub fn kind(self) -> ActorKind {
        match self {
            ProductionChoice::Unit(kind) => kind,
            ProductionChoice::BombingRaid => ActorKind::Bomber,
        }
    }

    /// Number of actors spawned (and paid for).
    pub fn count(self) -> u32 {
        match self {
            ProductionChoice::Unit(_) => 1,
            ProductionChoice::BombingRaid => BOMBING_RAID_SIZE,
        }
    }
}

/// Which branch of the decision tree produced a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductionReason {
    CounterAir,
    CounterArmor,
    CounterInfantry,
    CounterFortification,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionDecision {
    pub choice: ProductionChoice,
    pub reason: ProductionReason,
}

/// A production call scheduled to fire after the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp {
    pub delay_ticks: u64,
    pub choice: ProductionChoice,
}

/// Ticks between production decisions with no enemy units on the field.
pub fn base_interval(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 600,
        Difficulty::Medium => 450,
        Difficulty::Hard => 330,
        Difficulty::Elite => 240,
    }
}

/// Production interval, shortened by the observed enemy unit count down to a
/// floor fraction of the base interval.
pub fn production_interval(difficulty: Difficulty, enemy_units: u32) -> u64 {
    let base = base_interval(difficulty);
    let floor = (base as f64 * PRODUCTION_INTERVAL_FLOOR).round() as u64;
    base.saturating_sub(PRODUCTION_INTERVAL_PER_UNIT * enemy_units as u64)
        .max(floor)
}

/// Run the decision tree. `rng` is only consulted for the default pick.
pub fn choose_production<R: Rng + ?Sized>(
    snapshot: &BattlefieldSnapshot,
    difficulty: Difficulty,
    rng: &mut R,
) -> ProductionDecision {
    let (choice, reason) = if snapshot.air >= COUNTER_AIR_THRESHOLD {
        (counter_air(difficulty), ProductionReason::CounterAir)
    } else if snapshot.armor >= COUNTER_ARMOR_THRESHOLD {
        (counter_armor(difficulty), ProductionReason::CounterArmor)
    } else if snapshot.infantry >= COUNTER_INFANTRY_THRESHOLD {
        (counter_infantry(difficulty), ProductionReason::CounterInfantry)
    } else if snapshot.fortified {
        (
            counter_fortification(difficulty),
            ProductionReason::CounterFortification,
        )
    } else {
        (
            weighted_pick(default_pool(difficulty), rng),
            ProductionReason::Default,
        )
    };
    ProductionDecision { choice, reason }
}

pub fn counter_air(difficulty: Difficulty) -> ProductionChoice {
    match difficulty {
        Difficulty::Easy => ProductionChoice::Unit(ActorKind::Stinger),
        _ => ProductionChoice::Unit(ActorKind::FlakTrack),
    }
}

pub fn counter_armor(difficulty: Difficulty) -> ProductionChoice {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium => ProductionChoice::Unit(ActorKind::Rocketeer),
        _ => ProductionChoice::Unit(ActorKind::Tank),
    }
}

pub fn counter_infantry(difficulty: Difficulty) -> ProductionChoice {
    match difficulty {
        Difficulty::Easy => ProductionChoice::Unit(ActorKind::Rifleman),
        _ => ProductionChoice::Unit(ActorKind::Gunship),
    }
}

pub fn counter_fortification(difficulty: Difficulty) -> ProductionChoice {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium => ProductionChoice::Unit(ActorKind::Artillery),
        Difficulty::Hard => ProductionChoice::Unit(ActorKind::StrikeDrone),
        Difficulty::Elite => ProductionChoice::BombingRaid,
    }
}

/// Default pool with integer weights, per difficulty.
pub fn default_pool(difficulty: Difficulty) -> &'static [(ProductionChoice, u32)] {
    use ActorKind::*;
    use ProductionChoice::Unit;
    match difficulty {
        Difficulty::Easy => &[(Unit(Rifleman), 5), (Unit(Rocketeer), 3), (Unit(Tank), 1)],
        Difficulty::Medium => &[
            (Unit(Rifleman), 4),
            (Unit(Rocketeer), 3),
            (Unit(Tank), 2),
            (Unit(Stinger), 1),
            (Unit(Gunship), 1),
        ],
        Difficulty::Hard => &[
            (Unit(Rifleman), 3),
            (Unit(Rocketeer), 2),
            (Unit(Tank), 3),
            (Unit(Artillery), 2),
            (Unit(Gunship), 2),
            (Unit(DroneCarrier), 1),
            (Unit(KamikazeDrone), 1),
        ],
        Difficulty::Elite => &[
            (Unit(Rifleman), 2),
            (Unit(Tank), 3),
            (Unit(Artillery), 2),
            (Unit(Gunship), 3),
            (Unit(DroneCarrier), 2),
            (Unit(StrikeDrone), 1),
            (ProductionChoice::BombingRaid, 2),
        ],
    }
}

/// Weighted random selection. An empty or zero-weight pool yields a rifleman.
pub fn weighted_pick<R: Rng + ?Sized>(
    pool: &[(ProductionChoice, u32)],
    rng: &mut R,
) -> ProductionChoice {
    let fallback = ProductionChoice::Unit(ActorKind::Rifleman);
    let total: u32 = pool.iter().map(|(_, w)| *w).sum();
    if total == 0 {
        return fallback;
    }
    let roll = rng.gen_range(0..total);
    let mut acc = 0;
    for &(choice, weight) in pool {
        acc += weight;
        if roll < acc {
            return choice;
        }
    }
    pool.last().map_or(fallback, |(c, _)| *c)
}

/// Cheap unit sent alongside a primary choice.
pub fn support_unit(choice: ProductionChoice) -> ActorKind {
    match choice.kind() {
        ActorKind::Gunship | ActorKind::Bomber => ActorKind::FlakTrack,
        ActorKind::Rifleman => ActorKind::Rocketeer,
        _ => ActorKind::Rifleman,
    }
}

/// Follow-up production calls earned by a surplus. `remaining` is the stock
/// left after paying for `choice`, `primary_cost` what `choice` cost.
pub fn follow_ups(
    choice: ProductionChoice,
    difficulty: Difficulty,
    remaining: u32,
    primary_cost: u32,
) -> Vec<FollowUp> {
    let mut out = Vec::new();
    if primary_cost == 0 || remaining < primary_cost.saturating_mul(ABUNDANT_RESOURCE_FACTOR) {
        return out;
    }
    out.push(FollowUp {
        delay_ticks: FOLLOW_UP_SUPPORT_DELAY_TICKS,
        choice: ProductionChoice::Unit(support_unit(choice)),
    });
    if difficulty.is_top_tier() {
        out.push(FollowUp {
            delay_ticks: FOLLOW_UP_DUPLICATE_DELAY_TICKS,
            choice,
        });
    }
    out
}
