//! Opponent special-weapon policy.
//!
//! Evaluated in priority order with at most one cast per evaluation:
//! the one-shot reaction to the loss of the forward outpost, then the
//! cluster thresholds in descending severity (nuke, EMP, tactical).
//! A rule whose weapon is out of charges or cooling down is skipped.

use bastion_core::constants::*;
use bastion_core::enums::SpecialKind;
use bastion_core::types::Position;

use crate::cluster::{best_cluster, count_within};

/// Everything the special policy looks at. Positions are of the side being
/// struck (the opponent's enemy).
#[derive(Debug, Clone, Copy)]
pub struct SpecialPolicyInput<'a> {
    pub tick: u64,
    pub ground_y: f64,
    /// Live opposing mobile units.
    pub enemy_units: &'a [Position],
    /// Live opposing structures.
    pub enemy_structures: &'a [Position],
    /// The forward outpost just disappeared and the reaction has not fired yet.
    pub react_to_outpost_loss: bool,
    /// The opposing command post, if it still stands.
    pub rear_structure: Option<Position>,
    /// Direction the casting side advances along x.
    pub facing: f64,
    /// Per-kind availability (charges left and cooldown at zero), indexed by
    /// `SpecialKind::index`.
    pub available: [bool; 3],
}

impl SpecialPolicyInput<'_> {
    fn can_cast(&self, kind: SpecialKind) -> bool {
        self.available[kind.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialReason {
    OutpostLoss,
    /// Cluster of `units` mobile units with `structures` structures nearby.
    Cluster { units: usize, structures: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialDecision {
    pub kind: SpecialKind,
    pub target: Position,
    pub reason: SpecialReason,
}

/// Pick at most one special weapon to cast this evaluation.
pub fn evaluate_specials(input: &SpecialPolicyInput<'_>) -> Option<SpecialDecision> {
    if input.react_to_outpost_loss && input.can_cast(SpecialKind::Nuke) {
        if let Some(rear) = input.rear_structure {
            // Just in front of the command post, where the defenders gather.
            let target = Position::new(
                rear.x - input.facing * OUTPOST_LOSS_STRIKE_OFFSET,
                input.ground_y,
            );
            return Some(SpecialDecision {
                kind: SpecialKind::Nuke,
                target,
                reason: SpecialReason::OutpostLoss,
            });
        }
    }

    let (center, units, structures) = match best_cluster(input.enemy_units, CLUSTER_RADIUS) {
        Some(cluster) => (
            cluster.center,
            cluster.count,
            count_within(input.enemy_structures, &cluster.center, NEARBY_STRUCTURE_RADIUS),
        ),
        None => {
            let cluster = best_cluster(input.enemy_structures, NEARBY_STRUCTURE_RADIUS)?;
            (cluster.center, 0, cluster.count)
        }
    };

    let rules = [
        (
            SpecialKind::Nuke,
            units >= NUKE_CLUSTER_MIN && input.tick >= NUKE_MIN_TICK,
        ),
        (
            SpecialKind::Emp,
            units >= EMP_CLUSTER_MIN || structures >= EMP_STRUCTURES_MIN,
        ),
        (
            SpecialKind::Tactical,
            units >= TACTICAL_CLUSTER_MIN || structures >= TACTICAL_STRUCTURES_MIN,
        ),
    ];
    rules
        .iter()
        .find(|(kind, wanted)| *wanted && input.can_cast(*kind))
        .map(|(kind, _)| SpecialDecision {
            kind: *kind,
            target: center,
            reason: SpecialReason::Cluster { units, structures },
        })
}
