//! Drone-kind behavioral profiles.
//!
//! Consolidates per-kind parameters for the drone FSM.

use bastion_core::constants::*;
use bastion_core::enums::{ActorKind, DroneState};
use bastion_core::profiles::AreaProfile;

/// How a drone finds its way to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guidance {
    /// Lock onto the nearest opposing actor and chase it.
    Homing,
    /// Cruise high toward a designated point, then dive onto it.
    CruiseDive,
}

/// Behavioral profile for a drone kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneProfile {
    pub guidance: Guidance,
    /// Detonation distance.
    pub proximity: f64,
    /// Warhead blast.
    pub blast: AreaProfile,
    /// Whether the drone answers a recall and redocks on a carrier.
    pub recallable: bool,
}

impl DroneProfile {
    /// State a freshly launched drone starts in.
    pub fn initial_state(&self) -> DroneState {
        match self.guidance {
            Guidance::Homing => DroneState::Homing,
            Guidance::CruiseDive => DroneState::Cruising,
        }
    }
}

/// Get the behavioral profile for a drone kind. Non-drone kinds get the
/// plain homing profile.
pub fn get_profile(kind: ActorKind) -> DroneProfile {
    match kind {
        ActorKind::StrikeDrone => DroneProfile {
            guidance: Guidance::CruiseDive,
            proximity: IMPACT_PROXIMITY,
            blast: AreaProfile::new(70.0),
            recallable: false,
        },
        ActorKind::HunterDrone => DroneProfile {
            guidance: Guidance::Homing,
            proximity: DRONE_DETONATE_PROXIMITY,
            blast: AreaProfile::new(28.0),
            recallable: true,
        },
        _ => DroneProfile {
            guidance: Guidance::Homing,
            proximity: DRONE_DETONATE_PROXIMITY,
            blast: AreaProfile::new(40.0),
            recallable: false,
        },
    }
}
