#[cfg(test)]
mod tests {
    use bastion_core::constants::*;
    use bastion_core::enums::{ActorKind, Difficulty, DroneState, RecallPhase, SpecialKind};
    use bastion_core::types::{Position, Velocity};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::cluster::{best_cluster, count_within};
    use crate::fsm::{cruise_altitude, evaluate, Candidate, DroneContext, DroneOutcome};
    use crate::policy::OpponentPolicy;
    use crate::production::*;
    use crate::specials::{evaluate_specials, SpecialPolicyInput, SpecialReason};

    fn make_context(kind: ActorKind, state: DroneState, position: Position) -> DroneContext<u32> {
        DroneContext {
            kind,
            state,
            position,
            velocity: Velocity::zero(),
            speed: 5.0,
            facing: 1.0,
            tick: 100,
            ground_y: 0.0,
            locked: None,
            nearest_unit: None,
            fallback_structure: None,
            owner: None,
            designated: None,
        }
    }

    fn candidate(handle: u32, x: f64, y: f64) -> Option<Candidate<u32>> {
        Some(Candidate {
            handle,
            position: Position::new(x, y),
        })
    }

    // --- Homing ---

    #[test]
    fn test_homing_locks_nearest_unit() {
        let mut ctx = make_context(ActorKind::KamikazeDrone, DroneState::Homing, Position::new(0.0, 100.0));
        ctx.nearest_unit = candidate(7, 300.0, 0.0);
        ctx.fallback_structure = candidate(9, 1000.0, 0.0);
        let update = evaluate(&ctx);
        assert_eq!(update.locked, Some(7));
        assert_eq!(update.outcome, DroneOutcome::Continue);
        assert!(update.new_velocity.x > 0.0 && update.new_velocity.y < 0.0);
        assert!((update.new_velocity.speed() - 5.0).abs() < 1e-9);
        assert!(!update.state_changed);
    }

    #[test]
    fn test_homing_dead_lock_reacquires_same_tick() {
        // The caller drops a dead lock before evaluation; the drone must pick
        // a fresh target rather than keep flying at nothing.
        let mut ctx = make_context(ActorKind::KamikazeDrone, DroneState::Homing, Position::new(0.0, 50.0));
        ctx.locked = None;
        ctx.nearest_unit = candidate(3, -200.0, 0.0);
        let update = evaluate(&ctx);
        assert_eq!(update.locked, Some(3));
        assert!(update.new_velocity.x < 0.0);
    }

    #[test]
    fn test_homing_prefers_existing_lock() {
        let mut ctx = make_context(ActorKind::HunterDrone, DroneState::Homing, Position::new(0.0, 50.0));
        ctx.locked = candidate(1, 500.0, 0.0);
        ctx.nearest_unit = candidate(2, 50.0, 0.0);
        assert_eq!(evaluate(&ctx).locked, Some(1));
    }

    #[test]
    fn test_homing_falls_back_to_structure() {
        let mut ctx = make_context(ActorKind::KamikazeDrone, DroneState::Homing, Position::new(0.0, 50.0));
        ctx.fallback_structure = candidate(11, 800.0, 0.0);
        let update = evaluate(&ctx);
        assert_eq!(update.locked, Some(11));
        assert_eq!(update.outcome, DroneOutcome::Continue);
    }

    #[test]
    fn test_homing_detonates_in_proximity() {
        let mut ctx = make_context(ActorKind::KamikazeDrone, DroneState::Homing, Position::new(100.0, 5.0));
        ctx.locked = candidate(4, 104.0, 0.0);
        let update = evaluate(&ctx);
        assert_eq!(update.outcome, DroneOutcome::Detonate(Position::new(104.0, 0.0)));
        assert_eq!(update.locked, None);
    }

    #[test]
    fn test_homing_without_targets_drifts_off_map() {
        let mut ctx = make_context(ActorKind::KamikazeDrone, DroneState::Homing, Position::new(100.0, 50.0));
        ctx.facing = -1.0;
        let update = evaluate(&ctx);
        assert_eq!(update.locked, None);
        assert_eq!(update.new_velocity, Velocity::new(-5.0, 0.0));
        assert_eq!(update.outcome, DroneOutcome::Continue);
    }

    // --- Confused ---

    #[test]
    fn test_confused_ignores_targets_in_range() {
        let state = DroneState::Confused {
            since_tick: 100,
            duration_ticks: 120,
        };
        let mut ctx = make_context(ActorKind::KamikazeDrone, state, Position::new(0.0, 50.0));
        ctx.nearest_unit = candidate(5, -50.0, 0.0);
        for tick in 100..220 {
            ctx.tick = tick;
            let update = evaluate(&ctx);
            assert_eq!(update.new_state, state, "still confused at tick {tick}");
            assert_eq!(update.locked, None, "no lock while confused at tick {tick}");
            assert!(update.new_velocity.x > 0.0, "keeps its own heading at tick {tick}");
            assert_eq!(update.outcome, DroneOutcome::Continue);
        }
    }

    #[test]
    fn test_confused_expires_into_homing() {
        let state = DroneState::Confused {
            since_tick: 100,
            duration_ticks: 120,
        };
        let mut ctx = make_context(ActorKind::KamikazeDrone, state, Position::new(0.0, 50.0));
        ctx.nearest_unit = candidate(5, -50.0, 0.0);
        ctx.tick = 220;
        let update = evaluate(&ctx);
        assert!(update.state_changed);
        assert_eq!(update.new_state, DroneState::Homing);
        assert_eq!(update.locked, Some(5));
        assert!(update.new_velocity.x < 0.0);
    }

    // --- Cruise / dive ---

    #[test]
    fn test_cruise_without_point_is_discarded() {
        let ctx = make_context(ActorKind::StrikeDrone, DroneState::Cruising, Position::new(0.0, 300.0));
        assert_eq!(evaluate(&ctx).outcome, DroneOutcome::Discard);
    }

    #[test]
    fn test_cruise_climbs_to_altitude_far_out() {
        let mut ctx = make_context(ActorKind::StrikeDrone, DroneState::Cruising, Position::new(0.0, 40.0));
        ctx.designated = Some(Position::new(1500.0, 0.0));
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, DroneState::Cruising);
        assert!(update.new_velocity.y > 0.0, "should climb toward cruise altitude");
        assert!((update.new_velocity.y - 2.5).abs() < 1e-9, "climb is rate-limited");
        assert_eq!(update.new_velocity.x, 5.0);
    }

    #[test]
    fn test_cruise_switches_to_dive_inside_band() {
        let mut ctx = make_context(
            ActorKind::StrikeDrone,
            DroneState::Cruising,
            Position::new(1000.0, STRIKE_DIVE_ENTRY_ALTITUDE),
        );
        ctx.designated = Some(Position::new(1000.0 + STRIKE_DIVE_BAND - 1.0, 0.0));
        let update = evaluate(&ctx);
        assert!(update.state_changed);
        assert_eq!(update.new_state, DroneState::Diving);
        assert!(update.new_velocity.y < 0.0 && update.new_velocity.x > 0.0);
    }

    #[test]
    fn test_dive_accelerates_and_detonates_on_ground() {
        let mut ctx = make_context(ActorKind::StrikeDrone, DroneState::Diving, Position::new(0.0, 100.0));
        ctx.designated = Some(Position::new(100.0, 0.0));
        ctx.velocity = Velocity::new(5.0, 0.0);
        let update = evaluate(&ctx);
        assert!((update.new_velocity.speed() - (5.0 + STRIKE_DIVE_ACCEL)).abs() < 1e-9);

        ctx.position = Position::new(60.0, -1.0);
        let update = evaluate(&ctx);
        assert_eq!(update.outcome, DroneOutcome::Detonate(Position::new(100.0, 0.0)));
    }

    #[test]
    fn test_cruise_altitude_eases_down() {
        assert_eq!(cruise_altitude(STRIKE_DESCENT_START + 10.0), STRIKE_CRUISE_ALTITUDE);
        assert_eq!(cruise_altitude(STRIKE_DIVE_BAND), STRIKE_DIVE_ENTRY_ALTITUDE);
        let mid = cruise_altitude((STRIKE_DESCENT_START + STRIKE_DIVE_BAND) / 2.0);
        assert!(mid > STRIKE_DIVE_ENTRY_ALTITUDE && mid < STRIKE_CRUISE_ALTITUDE);
    }

    // --- Recall ---

    #[test]
    fn test_recall_without_owner_holds_station() {
        let state = DroneState::Recalling(RecallPhase::Approach);
        let ctx = make_context(ActorKind::HunterDrone, state, Position::new(0.0, 50.0));
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, state);
        assert_eq!(update.new_velocity, Velocity::zero());
        assert_eq!(update.outcome, DroneOutcome::Continue);
    }

    #[test]
    fn test_recall_full_sequence_docks() {
        let hover = Position::new(200.0, RECALL_HOVER_OFFSET);
        let mut ctx = make_context(
            ActorKind::HunterDrone,
            DroneState::Recalling(RecallPhase::Approach),
            Position::new(150.0, 120.0),
        );
        ctx.owner = candidate(42, 200.0, 0.0);

        // Approach until at the hover point.
        let mut ticks = 0;
        while ctx.state == DroneState::Recalling(RecallPhase::Approach) {
            let update = evaluate(&ctx);
            ctx.position.step(&update.new_velocity);
            ctx.state = update.new_state;
            ticks += 1;
            assert!(ticks < 100, "approach never converged");
        }
        assert!(ctx.position.distance_to(&hover) <= RECALL_ARRIVE_DISTANCE + 5.0);
        assert_eq!(ctx.state, DroneState::Recalling(RecallPhase::Land { held_ticks: 0 }));

        for _ in 0..RECALL_HOLD_TICKS {
            let update = evaluate(&ctx);
            assert_eq!(update.outcome, DroneOutcome::Continue);
            ctx.state = update.new_state;
        }
        assert_eq!(ctx.state, DroneState::Recalling(RecallPhase::Pickup));

        let update = evaluate(&ctx);
        assert_eq!(update.outcome, DroneOutcome::Dock(42));
    }

    // --- Cluster ---

    #[test]
    fn test_count_within_is_inclusive() {
        let points = [Position::new(0.0, 0.0), Position::new(160.0, 0.0)];
        assert_eq!(count_within(&points, &Position::new(0.0, 0.0), 160.0), 2);
    }

    // --- Production ---

    #[test]
    fn test_production_interval_shrinks_to_floor() {
        assert_eq!(production_interval(Difficulty::Easy, 0), 600);
        assert_eq!(production_interval(Difficulty::Easy, 10), 480);
        assert_eq!(production_interval(Difficulty::Easy, 100), 240);
        assert_eq!(production_interval(Difficulty::Elite, 100), 96);
    }

    #[test]
    fn test_counter_air_takes_priority() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let snapshot = BattlefieldSnapshot {
            air: 3,
            armor: 10,
            infantry: 10,
            fortified: true,
            enemy_units: 23,
        };
        let decision = choose_production(&snapshot, Difficulty::Medium, &mut rng);
        assert_eq!(decision.reason, ProductionReason::CounterAir);
        assert_eq!(decision.choice, ProductionChoice::Unit(ActorKind::FlakTrack));

        let decision = choose_production(&snapshot, Difficulty::Easy, &mut rng);
        assert_eq!(decision.choice, ProductionChoice::Unit(ActorKind::Stinger));
    }

    #[test]
    fn test_counter_chain_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let armor = BattlefieldSnapshot {
            armor: 4,
            infantry: 9,
            ..Default::default()
        };
        let decision = choose_production(&armor, Difficulty::Hard, &mut rng);
        assert_eq!(decision.reason, ProductionReason::CounterArmor);
        assert_eq!(decision.choice, ProductionChoice::Unit(ActorKind::Tank));

        let infantry = BattlefieldSnapshot {
            infantry: 6,
            fortified: true,
            ..Default::default()
        };
        let decision = choose_production(&infantry, Difficulty::Medium, &mut rng);
        assert_eq!(decision.reason, ProductionReason::CounterInfantry);
        assert_eq!(decision.choice, ProductionChoice::Unit(ActorKind::Gunship));

        let fort = BattlefieldSnapshot {
            fortified: true,
            ..Default::default()
        };
        let decision = choose_production(&fort, Difficulty::Elite, &mut rng);
        assert_eq!(decision.reason, ProductionReason::CounterFortification);
        assert_eq!(decision.choice, ProductionChoice::BombingRaid);
    }

    #[test]
    fn test_default_pick_comes_from_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let snapshot = BattlefieldSnapshot::default();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Elite] {
            for _ in 0..50 {
                let decision = choose_production(&snapshot, difficulty, &mut rng);
                assert_eq!(decision.reason, ProductionReason::Default);
                assert!(default_pool(difficulty).iter().any(|(c, _)| *c == decision.choice));
            }
        }
    }

    #[test]
    fn test_bombing_raid_is_elite_only() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert!(!default_pool(difficulty)
                .iter()
                .any(|(c, _)| *c == ProductionChoice::BombingRaid));
            assert_ne!(counter_fortification(difficulty), ProductionChoice::BombingRaid);
        }
        assert!(default_pool(Difficulty::Elite)
            .iter()
            .any(|(c, _)| *c == ProductionChoice::BombingRaid));
        assert_eq!(ProductionChoice::BombingRaid.kind(), ActorKind::Bomber);
        assert_eq!(ProductionChoice::BombingRaid.count(), BOMBING_RAID_SIZE);
    }

    #[test]
    fn test_weighted_pick_empty_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(weighted_pick(&[], &mut rng), ProductionChoice::Unit(ActorKind::Rifleman));
        let only = [(ProductionChoice::Unit(ActorKind::Tank), 1)];
        assert_eq!(weighted_pick(&only, &mut rng), ProductionChoice::Unit(ActorKind::Tank));
    }

    #[test]
    fn test_follow_ups_need_abundant_resources() {
        let tank = ProductionChoice::Unit(ActorKind::Tank);
        assert!(follow_ups(tank, Difficulty::Elite, 659, 220).is_empty());

        let medium = follow_ups(tank, Difficulty::Medium, 660, 220);
        assert_eq!(
            medium,
            vec![FollowUp {
                delay_ticks: FOLLOW_UP_SUPPORT_DELAY_TICKS,
                choice: ProductionChoice::Unit(ActorKind::Rifleman),
            }]
        );

        let elite = follow_ups(tank, Difficulty::Elite, 1000, 220);
        assert_eq!(elite.len(), 2);
        assert_eq!(elite[1].delay_ticks, FOLLOW_UP_DUPLICATE_DELAY_TICKS);
        assert_eq!(elite[1].choice, tank);
    }

    // --- Special policy ---

    fn spread(n: usize, x: f64) -> Vec<Position> {
        (0..n).map(|i| Position::new(x + i as f64 * 10.0, 0.0)).collect()
    }

    fn special_input<'a>(tick: u64, units: &'a [Position], structures: &'a [Position]) -> SpecialPolicyInput<'a> {
        SpecialPolicyInput {
            tick,
            ground_y: 0.0,
            enemy_units: units,
            enemy_structures: structures,
            react_to_outpost_loss: false,
            rear_structure: Some(Position::new(96.0, 0.0)),
            facing: -1.0,
            available: [true; 3],
        }
    }

    #[test]
    fn test_large_late_cluster_selects_nuke() {
        let units = spread(12, 1000.0);
        let decision = evaluate_specials(&special_input(NUKE_MIN_TICK + 1, &units, &[])).unwrap();
        assert_eq!(decision.kind, SpecialKind::Nuke);
        assert_eq!(
            decision.reason,
            SpecialReason::Cluster {
                units: 12,
                structures: 0
            }
        );
    }

    #[test]
    fn test_large_early_cluster_selects_emp() {
        let units = spread(12, 1000.0);
        let decision = evaluate_specials(&special_input(NUKE_MIN_TICK - 1, &units, &[])).unwrap();
        assert_eq!(decision.kind, SpecialKind::Emp);
    }

    #[test]
    fn test_unavailable_weapon_falls_through() {
        let units = spread(12, 1000.0);
        let mut input = special_input(NUKE_MIN_TICK + 1, &units, &[]);
        input.available[SpecialKind::Nuke.index()] = false;
        input.available[SpecialKind::Emp.index()] = false;
        assert_eq!(evaluate_specials(&input).unwrap().kind, SpecialKind::Tactical);

        input.available = [false; 3];
        assert_eq!(evaluate_specials(&input), None);
    }

    #[test]
    fn test_small_cluster_thresholds() {
        let three = spread(3, 500.0);
        let decision = evaluate_specials(&special_input(5000, &three, &[])).unwrap();
        assert_eq!(decision.kind, SpecialKind::Tactical);

        let two = spread(2, 500.0);
        assert_eq!(evaluate_specials(&special_input(5000, &two, &[])), None);
    }

    #[test]
    fn test_structures_alone_draw_strikes() {
        let structures = [Position::new(300.0, 0.0), Position::new(450.0, 0.0)];
        let decision = evaluate_specials(&special_input(5000, &[], &structures)).unwrap();
        assert_eq!(decision.kind, SpecialKind::Tactical);
        assert_eq!(
            decision.reason,
            SpecialReason::Cluster {
                units: 0,
                structures: 2
            }
        );
    }

    #[test]
    fn test_outpost_loss_reaction_targets_command_post() {
        let mut input = special_input(2000, &[], &[]);
        input.react_to_outpost_loss = true;
        let decision = evaluate_specials(&input).unwrap();
        assert_eq!(decision.kind, SpecialKind::Nuke);
        assert_eq!(decision.reason, SpecialReason::OutpostLoss);
        assert_eq!(decision.target, Position::new(96.0 + OUTPOST_LOSS_STRIKE_OFFSET, 0.0));
    }

    // --- Policy cadence ---

    #[test]
    fn test_special_policy_gating() {
        let hard = OpponentPolicy::new(Difficulty::Hard, 0);
        assert!(!hard.special_due(10_000), "below top tier never evaluates");

        let mut elite = OpponentPolicy::new(Difficulty::Elite, DEFAULT_GRACE_TICKS);
        assert!(!elite.special_due(DEFAULT_GRACE_TICKS - 1));
        assert!(elite.special_due(DEFAULT_GRACE_TICKS));
        elite.mark_special(DEFAULT_GRACE_TICKS);
        assert!(!elite.special_due(DEFAULT_GRACE_TICKS + SPECIAL_EVAL_INTERVAL_TICKS - 1));
        assert!(elite.special_due(DEFAULT_GRACE_TICKS + SPECIAL_EVAL_INTERVAL_TICKS));
    }

    #[test]
    fn test_outpost_transition_detected_once() {
        let mut policy = OpponentPolicy::new(Difficulty::Elite, 0);
        assert!(!policy.observe_outpost(false), "never seen, nothing lost");
        assert!(!policy.observe_outpost(true));
        assert!(policy.observe_outpost(false));
        policy.record_outpost_reaction();
        assert!(!policy.observe_outpost(true));
        assert!(!policy.observe_outpost(false), "one-shot");
    }

    #[test]
    fn test_production_due_after_interval() {
        let mut policy = OpponentPolicy::new(Difficulty::Medium, 0);
        policy.mark_production(100);
        assert!(!policy.production_due(550, 0));
        assert!(policy.production_due(551, 0));
        assert!(policy.production_due(500, 10));
    }

    proptest! {
        #[test]
        fn cluster_is_at_least_as_good_as_any_candidate(
            xs in proptest::collection::vec((0.0f64..2000.0, 0.0f64..400.0), 1..40),
        ) {
            let points: Vec<Position> = xs.iter().map(|(x, y)| Position::new(*x, *y)).collect();
            let cluster = best_cluster(&points, CLUSTER_RADIUS).unwrap();
            for p in &points {
                prop_assert!(cluster.count >= count_within(&points, p, CLUSTER_RADIUS));
            }
            prop_assert!(cluster.count >= 1);
        }

        #[test]
        fn production_interval_within_bounds(units in 0u32..1000) {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Elite] {
                let base = base_interval(difficulty);
                let interval = production_interval(difficulty, units);
                prop_assert!(interval <= base);
                prop_assert!(interval as f64 >= (base as f64 * PRODUCTION_INTERVAL_FLOOR).round());
            }
        }
    }
}
