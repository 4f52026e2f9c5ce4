//! Simulation constants and tuning parameters.

// --- Defaults ---

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u32 = 42;

/// Real-time interval between scheduler ticks (milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Simulated time per real time (30x: one 500 ms tick advances 15 s).
pub const DEFAULT_TIME_COMPRESSION: f64 = 30.0;

/// Upper bound on simulation ticks executed within one real frame.
/// Backlog beyond this is discarded.
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 64;

/// Largest simulated time one engine step may cover (one day, in ms).
pub const MAX_SIM_STEP_MS: f64 = 86_400_000.0;

// --- Movement ---

/// Units closer than this to their move target are treated as arrived (meters).
pub const ARRIVAL_EPSILON_M: f64 = 0.1;

// --- Ballistics ---

/// CEP = 1.1774 sigma for a circular normal distribution.
pub const CEP_TO_SIGMA: f64 = 1.177;

// --- Morale ---

/// Units below this HP fraction roll for rout every tick.
pub const ROUT_HP_FRACTION: f64 = 0.3;

/// Chance per tick that a badly damaged unit routs.
pub const ROUT_PROBABILITY: f64 = 0.5;

// --- Armor classes ---

pub const ARMOR_NONE: u8 = 0;
pub const ARMOR_LIGHT: u8 = 1;
pub const ARMOR_MEDIUM: u8 = 2;
pub const ARMOR_HEAVY: u8 = 3;
