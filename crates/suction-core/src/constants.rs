//! Simulation constants and tuning defaults.
//!
//! These are the authoritative defaults used by `SuctionConfig::default()`.

/// Fixed simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Gravity along -y (m/s²).
pub const GRAVITY: f64 = 9.81;

// --- Suction geometry ---

/// Maximum suction range from the nozzle (meters).
pub const RANGE_MAX: f64 = 3.0;

/// Total cone angle (degrees, not the half angle).
pub const CONE_ANGLE_DEG: f64 = 30.0;

/// Distance from the capture center below which a target is captured (meters).
pub const CAPTURE_RADIUS: f64 = 0.35;

/// Forward offset of the capture center from the nozzle (meters).
pub const CAPTURE_OFFSET: f64 = 0.05;

// --- Spring-damper ---

/// Base spring stiffness.
pub const BASE_STIFFNESS: f64 = 40.0;

/// Stiffness curve value at the range boundary (t = 1).
pub const STIFFNESS_CURVE_END: f64 = 0.35;

/// Lowest value the stiffness curve may contribute. Keeps targets at the
/// range boundary from stalling.
pub const STIFFNESS_CURVE_FLOOR: f64 = 0.05;

/// Multiplier over critical damping.
pub const DAMPING_FACTOR: f64 = 1.0;

/// Acceleration clamp (m/s²).
pub const ACCELERATION_LIMIT: f64 = 50.0;

/// Guard for divisions by mass and the damping square root.
pub const MASS_EPSILON: f64 = 1e-4;

// --- Near-field snap ---

pub const SNAP_DISTANCE: f64 = 0.5;
pub const SNAP_BLEND: f64 = 0.4;
pub const SNAP_SPEED: f64 = 12.0;

// --- Capture ---

pub const CONTAINER_CAPACITY: usize = 10;

/// Per-body capture cooldown (seconds).
pub const CAPTURE_COOLDOWN_SECS: f64 = 0.1;

/// Heaviest effective mass the nozzle can pull (virtual kg).
pub const MASS_MAX_SUCKABLE: f64 = 8.0;

/// Delay between deactivating a destroyed root and despawning it (seconds).
pub const DESTROY_DELAY_SECS: f64 = 0.1;

/// Floor applied to a descriptor's extra suction multiplier.
pub const MIN_SUCTION_MULTIPLIER: f64 = 0.01;

// --- Frame budget ---

pub const MAX_OBJECTS_PER_TICK: usize = 8;
pub const MAX_RAYCASTS_PER_TICK: usize = 6;

/// Line-of-sight cache entry lifetime (seconds).
pub const LOS_CACHE_LIFETIME_SECS: f64 = 0.15;

/// Distance change (meters) that invalidates a cached line-of-sight result.
pub const LOS_CACHE_DISTANCE_TOLERANCE: f64 = 0.1;

// --- Energy ---

pub const ENERGY_MAX: f64 = 100.0;
pub const ENERGY_INITIAL: f64 = 100.0;
pub const ENERGY_MIN_TO_ACTIVATE: f64 = 1.0;
pub const ENERGY_BASE_RECHARGE_PER_SEC: f64 = 10.0;
pub const ENERGY_COST_PER_SEC: f64 = 5.0;

// --- Resistance ---

pub const RESISTANCE_CAPACITY: f64 = 3.0;
pub const RESISTANCE_REGEN_PER_SEC: f64 = 1.0;
pub const RESISTANCE_MULTIPLIER: f64 = 1.0;

/// Struggle progress gained per second at full closeness.
pub const STRUGGLE_GAIN_PER_SEC: f64 = 1.0;

/// Distance from the capture center inside which struggling begins (meters).
pub const STRUGGLE_ACTIVATION_DISTANCE: f64 = 0.8;

/// Downward adherence force while a grounded target struggles (newtons).
pub const ADHERENCE_FORCE: f64 = 15.0;

/// Length of the downward ground probes (meters).
pub const GROUND_PROBE_DISTANCE: f64 = 0.15;

/// Probe origins are lifted this far above the collider's bottom face (meters).
pub const GROUND_PROBE_LIFT: f64 = 0.02;

// --- Feedback ---

/// Attracted-object count at which load saturates to 1.
pub const FEEDBACK_SATURATION_COUNT: u32 = 8;

pub const FOV_KICK: f64 = 1.2;
pub const SHAKE_AMPLITUDE: f64 = 0.015;

// --- Suction link ---

/// Seconds without suction before a linked body returns to agent control.
pub const SUCTION_LINK_RETURN_SECS: f64 = 0.35;

// --- Spatial grid ---

/// Grid cell size for the spatial-grid scene query (meters).
pub const GRID_CELL_SIZE: f64 = 1.0;
