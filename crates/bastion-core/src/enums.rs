//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Combatant side. Neutral actors can be caught in area damage but never act.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// The directly-commanded side.
    #[default]
    Player,
    /// The scripted opponent.
    Opponent,
    Neutral,
}

impl Team {
    /// The opposing combatant. Neutral has no enemy.
    pub fn enemy(self) -> Option<Team> {
        match self {
            Team::Player => Some(Team::Opponent),
            Team::Opponent => Some(Team::Player),
            Team::Neutral => None,
        }
    }

    /// Whether an actor of team `other` may be hit by this team's weapons.
    /// Neutral actors are fair game for both combatants.
    pub fn is_hostile_to(self, other: Team) -> bool {
        match self {
            Team::Neutral => false,
            _ => other != self,
        }
    }

    /// Direction of advance along x (+1 for the player, -1 for the opponent).
    pub fn facing(self) -> f64 {
        match self {
            Team::Opponent => -1.0,
            _ => 1.0,
        }
    }
}

/// Broad actor category used by counters, targeting and damage scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Infantry,
    Armor,
    Air,
    Structure,
    Drone,
}

/// Every unit, drone and structure type known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Rifleman,
    Rocketeer,
    Stinger,
    Tank,
    FlakTrack,
    Artillery,
    Gunship,
    Bomber,
    DroneCarrier,
    /// Homing one-shot drone with no owner.
    KamikazeDrone,
    /// Cruise-then-dive drone aimed at a designated point.
    StrikeDrone,
    /// Homing drone launched by a carrier; can be recalled and redocked.
    HunterDrone,
    /// Forward sensor/defense structure.
    Outpost,
    /// Secondary defensive line.
    Bunker,
    /// Rear command structure.
    CommandPost,
}

impl ActorKind {
    /// Structure classes in the order a homing drone falls back to them.
    pub const STRUCTURE_PRIORITY: [ActorKind; 3] =
        [ActorKind::Outpost, ActorKind::Bunker, ActorKind::CommandPost];

    pub fn is_drone(self) -> bool {
        matches!(
            self,
            ActorKind::KamikazeDrone | ActorKind::StrikeDrone | ActorKind::HunterDrone
        )
    }

    pub fn is_structure(self) -> bool {
        matches!(
            self,
            ActorKind::Outpost | ActorKind::Bunker | ActorKind::CommandPost
        )
    }
}

/// Which target layers a weapon can engage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFilter {
    #[default]
    Ground,
    Air,
    Any,
}

impl TargetFilter {
    pub fn allows(self, category: Category) -> bool {
        match self {
            TargetFilter::Ground => category != Category::Air,
            TargetFilter::Air => category == Category::Air,
            TargetFilter::Any => true,
        }
    }
}

/// Munition type tag. Each tag fixes a motion model and an impact rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MunitionKind {
    /// Machine-gun/rifle fire, resolved against a firing corridor.
    Bullet,
    Rocket,
    /// Anti-air burst; not guaranteed against evasive targets.
    Flak,
    Shell,
    Bomb,
    CruiseMissile,
    /// Visual carrier of a precision strike; its damage is deferred.
    StrikeMissile,
}

/// Motion model selected by a munition kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionModel {
    /// Resolved the tick it is processed.
    Hitscan,
    /// Unit velocity toward the (possibly moving) target each tick.
    Homing,
    /// Constant horizontal velocity, gravity on the vertical component.
    Arc,
    /// Falls straight down onto a fixed x.
    Drop,
    /// Fixed heading toward a precomputed point.
    Cruise,
}

impl MunitionKind {
    pub fn motion(self) -> MotionModel {
        match self {
            MunitionKind::Bullet => MotionModel::Hitscan,
            MunitionKind::Rocket | MunitionKind::Flak => MotionModel::Homing,
            MunitionKind::Shell | MunitionKind::StrikeMissile => MotionModel::Arc,
            MunitionKind::Bomb => MotionModel::Drop,
            MunitionKind::CruiseMissile => MotionModel::Cruise,
        }
    }
}

/// Actor lifecycle. Removed actors are despawned from the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Alive,
    /// Visual-only countdown before removal. No logic, not targetable.
    Destroying { remaining_ticks: u32 },
}

/// Recall sub-phase for recall-capable drones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecallPhase {
    /// Flying to the hover point above the owner.
    Approach,
    /// Holding over the owner.
    Land { held_ticks: u32 },
    /// Being taken aboard; consumed this tick.
    Pickup,
}

/// Drone behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneState {
    /// High-altitude approach toward a designated point.
    Cruising,
    /// Terminal dive onto the designated point.
    Diving,
    Homing,
    /// Guidance disabled after a countermeasure; no target acquisition.
    Confused { since_tick: u64, duration_ticks: u64 },
    Recalling(RecallPhase),
}

/// Special weapon kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    /// Area denial.
    Nuke,
    /// Disable.
    Emp,
    /// Precision, delayed impact.
    Tactical,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 3] = [SpecialKind::Nuke, SpecialKind::Emp, SpecialKind::Tactical];

    pub fn index(self) -> usize {
        match self {
            SpecialKind::Nuke => 0,
            SpecialKind::Emp => 1,
            SpecialKind::Tactical => 2,
        }
    }
}

/// Opponent difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Elite,
}

impl Difficulty {
    pub fn is_top_tier(self) -> bool {
        self == Difficulty::Elite
    }
}

/// Top-level battle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    Over { winner: Team },
}

/// Visual effect kinds for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    MuzzleFlash,
    Explosion,
    LargeExplosion,
    NukeBlast,
    EmpPulse,
    Trail,
    Wreck,
    StrikeLaunch,
    Spark,
}

/// Audio cues for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    Gunfire,
    Launch,
    Explosion,
    Nuke,
    Emp,
    Siren,
    Dock,
}
