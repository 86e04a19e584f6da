use proptest::prelude::*;

use crate::commands::Command;
use crate::enums::*;
use crate::profiles::AreaProfile;
use crate::types::{Battlefield, Position, SimTime, Velocity};

#[test]
fn test_team_hostility() {
    assert!(Team::Player.is_hostile_to(Team::Opponent));
    assert!(Team::Opponent.is_hostile_to(Team::Neutral));
    assert!(!Team::Player.is_hostile_to(Team::Player));
    assert!(!Team::Neutral.is_hostile_to(Team::Player));
    assert_eq!(Team::Player.enemy(), Some(Team::Opponent));
    assert_eq!(Team::Neutral.enemy(), None);
}

#[test]
fn test_target_filter() {
    assert!(TargetFilter::Ground.allows(Category::Armor));
    assert!(TargetFilter::Ground.allows(Category::Structure));
    assert!(!TargetFilter::Ground.allows(Category::Air));
    assert!(TargetFilter::Air.allows(Category::Air));
    assert!(!TargetFilter::Air.allows(Category::Infantry));
    assert!(TargetFilter::Any.allows(Category::Air));
}

#[test]
fn test_munition_motion_models() {
    assert_eq!(MunitionKind::Bullet.motion(), MotionModel::Hitscan);
    assert_eq!(MunitionKind::Flak.motion(), MotionModel::Homing);
    assert_eq!(MunitionKind::Shell.motion(), MotionModel::Arc);
    assert_eq!(MunitionKind::Bomb.motion(), MotionModel::Drop);
    assert_eq!(MunitionKind::CruiseMissile.motion(), MotionModel::Cruise);
}

#[test]
fn test_structure_priority_order() {
    assert_eq!(
        ActorKind::STRUCTURE_PRIORITY,
        [ActorKind::Outpost, ActorKind::Bunker, ActorKind::CommandPost]
    );
    assert!(ActorKind::STRUCTURE_PRIORITY.iter().all(|k| k.is_structure()));
}

#[test]
fn test_velocity_toward() {
    let v = Velocity::toward(&Position::new(0.0, 0.0), &Position::new(3.0, 4.0), 10.0);
    assert!((v.x - 6.0).abs() < 1e-9);
    assert!((v.y - 8.0).abs() < 1e-9);

    let same = Velocity::toward(&Position::new(1.0, 1.0), &Position::new(1.0, 1.0), 10.0);
    assert_eq!(same, Velocity::zero());
}

#[test]
fn test_battlefield_bounds() {
    let field = Battlefield {
        width: 1000.0,
        ground_y: 0.0,
    };
    assert!(field.contains(&Position::new(500.0, 300.0), 0.0));
    assert!(field.contains(&Position::new(-10.0, 0.0), 20.0));
    assert!(!field.contains(&Position::new(1100.0, 0.0), 20.0));
    assert!(!field.contains(&Position::new(500.0, -50.0), 20.0));
    assert_eq!(field.home_x(Team::Opponent), 1000.0);
    assert_eq!(field.home_x(Team::Player), 0.0);
}

#[test]
fn test_tick_timing() {
    let mut time = SimTime::default();
    for _ in 0..30 {
        time.advance();
    }
    assert_eq!(time.tick, 30);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
}

#[test]
fn test_command_wire_format() {
    let json = serde_json::to_string(&Command::CastSpecial {
        team: Team::Player,
        kind: SpecialKind::Emp,
        x: 10.0,
        y: 0.0,
    })
    .unwrap();
    assert!(json.contains(r#""type":"CastSpecial""#));
    assert!(json.contains(r#""kind":"emp""#));
}

proptest! {
    #[test]
    fn falloff_is_non_increasing(radius in 1.0f64..500.0, a in 0.0f64..600.0, b in 0.0f64..600.0) {
        let profile = AreaProfile::new(radius);
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(profile.falloff(near) >= profile.falloff(far));
    }

    #[test]
    fn falloff_zero_beyond_radius(radius in 1.0f64..500.0, extra in 0.001f64..1000.0) {
        let profile = AreaProfile::new(radius);
        prop_assert_eq!(profile.falloff(radius + extra), 0.0);
    }
}
