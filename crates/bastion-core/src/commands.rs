//! Commands for the directly-commanded side (or a test harness).
//!
//! Commands are queued and processed at the orders stage of the next tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Fire a special weapon at a point. Refused silently if unavailable.
    CastSpecial {
        team: Team,
        kind: SpecialKind,
        x: f64,
        y: f64,
    },
    /// Send every recall-capable drone of `team` back to its carrier.
    RecallDrones { team: Team },
    /// Deploy a unit at the team's spawn edge (no resource cost).
    SpawnUnit { team: Team, kind: ActorKind },
    Pause,
    Resume,
}
