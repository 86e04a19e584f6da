//! Simulation constants and tuning parameters.
//!
//! Distances are battlefield units, speeds are units per tick, durations are ticks.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// Default battlefield width.
pub const DEFAULT_BATTLEFIELD_WIDTH: f64 = 2400.0;

/// Distance beyond the side edges (and below ground) before an entity is out of bounds.
pub const OUT_OF_BOUNDS_MARGIN: f64 = 60.0;

/// Cruising altitude of air units above the ground plane.
pub const AIR_UNIT_ALTITUDE: f64 = 180.0;

/// Ticks an actor spends in the destroying state before removal.
pub const DESTROY_TICKS: u32 = 30;

/// Spawn offset from a side's home edge for produced units.
pub const SPAWN_EDGE_OFFSET: f64 = 80.0;

/// Structure placement as a fraction of the battlefield width, measured from
/// the side's home edge: command post, bunker line, forward outpost.
pub const COMMAND_POST_OFFSET: f64 = 0.04;
pub const BUNKER_OFFSET: f64 = 0.16;
pub const OUTPOST_OFFSET: f64 = 0.30;

// --- Ballistics ---

/// Gravity applied to arcing projectiles (units/tick²).
pub const GRAVITY: f64 = 0.35;

/// Minimum flight time for arcing shells (ticks).
pub const ARC_MIN_FLIGHT_TICKS: f64 = 20.0;

/// Altitude above the ground at which dropped bombs spawn.
pub const DROP_SPAWN_ALTITUDE: f64 = 900.0;

/// Initial downward speed of a dropped bomb.
pub const DROP_INITIAL_SPEED: f64 = 4.0;

/// Homing/cruise impact proximity.
pub const IMPACT_PROXIMITY: f64 = 8.0;

/// Cruise missiles emit a trail effect every N ticks.
pub const TRAIL_INTERVAL_TICKS: u32 = 4;

/// Half-width of the direct-fire corridor around the firing line.
pub const CORRIDOR_HALF_WIDTH: f64 = 14.0;

/// Direct-fire hit chance against ordinary targets.
pub const DIRECT_FIRE_HIT_CHANCE: f64 = 0.85;

/// Direct-fire hit chance against evasive targets.
pub const DIRECT_FIRE_EVASIVE_HIT_CHANCE: f64 = 0.3;

/// Fraction of full area damage still applied at the blast edge.
pub const AREA_FALLOFF_FLOOR: f64 = 0.35;

/// Projectiles older than this are removed regardless of state.
pub const PROJECTILE_MAX_AGE_TICKS: u32 = 900;

// --- Units ---

/// How far ahead of a unit the movement system looks for enemies before halting.
pub const ENGAGE_RANGE_FACTOR: f64 = 1.0;

/// Carrier drone launch range.
pub const DRONE_LAUNCH_RANGE: f64 = 700.0;

/// Ticks between carrier drone launches.
pub const DRONE_LAUNCH_INTERVAL_TICKS: u32 = 90;

// --- Drones ---

/// Homing drones detonate within this distance of their target.
pub const DRONE_DETONATE_PROXIMITY: f64 = 12.0;

/// Wobble amplitude (radians) while confused.
pub const DRONE_CONFUSED_WOBBLE: f64 = 0.35;

/// Strike drone cruise altitude above ground.
pub const STRIKE_CRUISE_ALTITUDE: f64 = 320.0;

/// Horizontal distance at which a strike drone starts easing its altitude down.
pub const STRIKE_DESCENT_START: f64 = 500.0;

/// Altitude a strike drone has eased down to when it reaches the dive band.
pub const STRIKE_DIVE_ENTRY_ALTITUDE: f64 = 180.0;

/// Horizontal distance at which a strike drone begins its dive.
pub const STRIKE_DIVE_BAND: f64 = 140.0;

/// Per-tick speed gain while diving.
pub const STRIKE_DIVE_ACCEL: f64 = 0.4;

/// Maximum dive speed.
pub const STRIKE_MAX_DIVE_SPEED: f64 = 14.0;

/// Hover offset above the owner while recalling.
pub const RECALL_HOVER_OFFSET: f64 = 40.0;

/// Distance to the hover point that counts as arrived.
pub const RECALL_ARRIVE_DISTANCE: f64 = 10.0;

/// Ticks spent holding over the owner before pickup.
pub const RECALL_HOLD_TICKS: u32 = 15;

// --- Special weapons ---

/// Maximum cluster-eval radius used to aim area strikes.
pub const CLUSTER_RADIUS: f64 = 160.0;

/// Nearby-structure radius around the cluster center.
pub const NEARBY_STRUCTURE_RADIUS: f64 = 260.0;

/// Special-weapon policy cadence (ticks).
pub const SPECIAL_EVAL_INTERVAL_TICKS: u64 = 60;

/// Default grace period before the opponent may use special weapons.
pub const DEFAULT_GRACE_TICKS: u64 = 1800;

/// Earliest tick at which the opponent considers the area-denial strike.
pub const NUKE_MIN_TICK: u64 = 3600;

/// Cluster thresholds per weapon.
pub const NUKE_CLUSTER_MIN: usize = 10;
pub const EMP_CLUSTER_MIN: usize = 6;
pub const EMP_STRUCTURES_MIN: usize = 3;
pub const TACTICAL_CLUSTER_MIN: usize = 3;
pub const TACTICAL_STRUCTURES_MIN: usize = 2;

/// Offset from the command post toward the front when reacting to an outpost loss.
pub const OUTPOST_LOSS_STRIKE_OFFSET: f64 = 80.0;

// --- Production ---

/// Production interval shrink per observed enemy unit.
pub const PRODUCTION_INTERVAL_PER_UNIT: u64 = 12;

/// Production interval floor as a fraction of the difficulty base interval.
pub const PRODUCTION_INTERVAL_FLOOR: f64 = 0.4;

/// Counter thresholds on the opposing composition.
pub const COUNTER_AIR_THRESHOLD: u32 = 3;
pub const COUNTER_ARMOR_THRESHOLD: u32 = 4;
pub const COUNTER_INFANTRY_THRESHOLD: u32 = 6;

/// Remaining stock (as a multiple of the primary cost) that counts as abundant.
pub const ABUNDANT_RESOURCE_FACTOR: u32 = 3;

/// Delay before the support follow-up production fires.
pub const FOLLOW_UP_SUPPORT_DELAY_TICKS: u64 = 20;

/// Delay before the elite duplicate follow-up fires.
pub const FOLLOW_UP_DUPLICATE_DELAY_TICKS: u64 = 40;

/// Number of bombers in an elite bombing raid.
pub const BOMBING_RAID_SIZE: u32 = 3;

/// Default opponent income per tick.
pub const DEFAULT_OPPONENT_INCOME: u32 = 2;

/// Default opponent starting resources.
pub const DEFAULT_OPPONENT_RESOURCES: u32 = 400;
