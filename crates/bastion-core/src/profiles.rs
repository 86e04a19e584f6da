//! Per-kind tuning tables for munitions and special weapons.

use crate::constants::AREA_FALLOFF_FLOOR;
use crate::enums::{MunitionKind, SpecialKind};

/// Impact behavior of a munition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactRule {
    /// Single target chosen along the firing corridor.
    DirectFire,
    /// Every qualifying actor within the radius.
    Area(AreaProfile),
    /// No damage on arrival (damage is applied elsewhere).
    Cosmetic,
}

/// Area blast parameters shared by munitions, drones and special weapons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaProfile {
    pub radius: f64,
    /// Damage multiplier against structures.
    pub structure_factor: f64,
    /// Chance to hit an evasive target (1.0 = always hits).
    pub evasive_hit_chance: f64,
    /// Fraction of damage still applied at the edge of the radius.
    pub falloff_floor: f64,
}

impl AreaProfile {
    pub const fn new(radius: f64) -> Self {
        Self {
            radius,
            structure_factor: 1.0,
            evasive_hit_chance: 1.0,
            falloff_floor: AREA_FALLOFF_FLOOR,
        }
    }

    /// Damage multiplier at `distance` from the blast center.
    /// Linear from 1.0 at the center to `falloff_floor` at the edge, zero beyond.
    pub fn falloff(&self, distance: f64) -> f64 {
        if distance.is_nan() || distance < 0.0 || distance > self.radius {
            return 0.0;
        }
        if self.radius <= 0.0 {
            return 1.0;
        }
        let t = distance / self.radius;
        1.0 - (1.0 - self.falloff_floor) * t
    }
}

/// Flight and impact parameters for a munition kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MunitionProfile {
    /// Speed in units per tick (horizontal speed for arcs).
    pub speed: f64,
    pub impact: ImpactRule,
}

/// Get the profile for a munition kind.
pub fn munition_profile(kind: MunitionKind) -> MunitionProfile {
    match kind {
        MunitionKind::Bullet => MunitionProfile {
            speed: 0.0,
            impact: ImpactRule::DirectFire,
        },
        MunitionKind::Rocket => MunitionProfile {
            speed: 9.0,
            impact: ImpactRule::Area(AreaProfile::new(24.0)),
        },
        MunitionKind::Flak => MunitionProfile {
            speed: 12.0,
            impact: ImpactRule::Area(AreaProfile {
                evasive_hit_chance: 0.5,
                ..AreaProfile::new(30.0)
            }),
        },
        MunitionKind::Shell => MunitionProfile {
            speed: 7.0,
            impact: ImpactRule::Area(AreaProfile {
                structure_factor: 0.5,
                ..AreaProfile::new(36.0)
            }),
        },
        MunitionKind::Bomb => MunitionProfile {
            speed: 0.0,
            impact: ImpactRule::Area(AreaProfile::new(55.0)),
        },
        MunitionKind::CruiseMissile => MunitionProfile {
            speed: 6.0,
            impact: ImpactRule::Area(AreaProfile::new(48.0)),
        },
        MunitionKind::StrikeMissile => MunitionProfile {
            speed: 10.0,
            impact: ImpactRule::Cosmetic,
        },
    }
}

/// Tuning for one special weapon kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialProfile {
    pub charges: u32,
    pub cooldown_ticks: u32,
    pub radius: f64,
    pub damage: f64,
    /// Disable duration against mobile units (disable strike only).
    pub unit_disable_ticks: u64,
    /// Disable duration against structures (disable strike only).
    pub structure_disable_ticks: u64,
    /// Drone confusion duration (disable strike only).
    pub drone_confuse_ticks: u64,
    /// Ticks between launch and impact (precision strike only).
    pub flight_ticks: u64,
    /// Immediate-impact fallback when no ballistic subsystem exists.
    pub fallback_radius: f64,
    pub fallback_damage: f64,
}

/// Get the profile for a special weapon kind.
pub fn special_profile(kind: SpecialKind) -> SpecialProfile {
    let base = SpecialProfile {
        charges: 0,
        cooldown_ticks: 0,
        radius: 0.0,
        damage: 0.0,
        unit_disable_ticks: 0,
        structure_disable_ticks: 0,
        drone_confuse_ticks: 0,
        flight_ticks: 0,
        fallback_radius: 0.0,
        fallback_damage: 0.0,
    };
    match kind {
        SpecialKind::Nuke => SpecialProfile {
            charges: 1,
            cooldown_ticks: 1800,
            radius: 220.0,
            damage: 600.0,
            ..base
        },
        SpecialKind::Emp => SpecialProfile {
            charges: 2,
            cooldown_ticks: 900,
            radius: 180.0,
            unit_disable_ticks: 240,
            structure_disable_ticks: 150,
            drone_confuse_ticks: 120,
            ..base
        },
        SpecialKind::Tactical => SpecialProfile {
            charges: 3,
            cooldown_ticks: 600,
            radius: 90.0,
            damage: 250.0,
            flight_ticks: 45,
            fallback_radius: 60.0,
            fallback_damage: 150.0,
            ..base
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falloff_full_at_center_floor_at_edge() {
        let p = AreaProfile::new(100.0);
        assert!((p.falloff(0.0) - 1.0).abs() < 1e-12);
        assert!((p.falloff(100.0) - AREA_FALLOFF_FLOOR).abs() < 1e-12);
        assert_eq!(p.falloff(100.01), 0.0);
        assert_eq!(p.falloff(f64::NAN), 0.0);
    }

    #[test]
    fn shell_halves_structure_damage() {
        match munition_profile(MunitionKind::Shell).impact {
            ImpactRule::Area(area) => assert_eq!(area.structure_factor, 0.5),
            other => panic!("shell should be an area munition, got {other:?}"),
        }
    }

    #[test]
    fn only_tactical_has_flight_time() {
        for kind in SpecialKind::ALL {
            let p = special_profile(kind);
            assert_eq!(p.flight_ticks > 0, kind == SpecialKind::Tactical);
        }
    }
}
