//! Cluster search for aiming area-effect strikes.

use bastion_core::types::Position;

/// A circle center and how many points it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub center: Position,
    pub count: usize,
}

/// Find the point that, used as the center of a circle of `radius`, contains
/// the most of `points`. Candidate centers are the points themselves; ties keep
/// the earliest candidate. `None` when `points` is empty.
pub fn best_cluster(points: &[Position], radius: f64) -> Option<Cluster> {
    let mut best: Option<Cluster> = None;
    for center in points {
        let count = count_within(points, center, radius);
        if best.map_or(true, |b| count > b.count) {
            best = Some(Cluster {
                center: *center,
                count,
            });
        }
    }
    best
}

/// Number of `points` within `radius` of `center` (inclusive).
pub fn count_within(points: &[Position], center: &Position, radius: f64) -> usize {
    points
        .iter()
        .filter(|p| p.distance_to(center) <= radius)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_cluster() {
        assert_eq!(best_cluster(&[], 100.0), None);
    }

    #[test]
    fn picks_dense_group_over_stragglers() {
        let mut points: Vec<Position> = (0..5).map(|i| Position::new(1000.0 + i as f64 * 10.0, 0.0)).collect();
        points.push(Position::new(0.0, 0.0));
        points.push(Position::new(2000.0, 0.0));
        let cluster = best_cluster(&points, 50.0).unwrap();
        assert_eq!(cluster.count, 5);
        assert!((cluster.center.x - 1000.0).abs() <= 40.0);
    }
}
