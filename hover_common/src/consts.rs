//! System-wide constants for the hover workspace.
//!
//! Single source of truth for tick timing and parameter bounds.

/// Default tick period in microseconds (250 Hz = 4000 µs).
pub const TICK_US: u32 = 4000;

/// Shortest accepted tick period [µs].
pub const TICK_US_MIN: u32 = 500;

/// Longest accepted tick period [µs].
pub const TICK_US_MAX: u32 = 100_000;

/// Acceleration limit bounds [m/s²].
pub const ACC_MAX_MIN: f32 = 0.5;
pub const ACC_MAX_MAX: f32 = 15.0;

/// Jerk limit bounds [m/s³].
pub const JERK_MAX_MIN: f32 = 0.5;
pub const JERK_MAX_MAX: f32 = 500.0;

/// Vertical speed limit bounds [m/s].
pub const VEL_MAX_MIN: f32 = 0.5;
pub const VEL_MAX_MAX: f32 = 8.0;

/// Default maximum upward acceleration [m/s²].
pub const ACC_UP_MAX_DEFAULT: f32 = 4.0;

/// Default maximum downward acceleration [m/s²].
pub const ACC_DOWN_MAX_DEFAULT: f32 = 3.0;

/// Default maximum jerk [m/s³].
pub const JERK_MAX_DEFAULT: f32 = 8.0;

/// Default maximum climb rate [m/s].
pub const VEL_UP_MAX_DEFAULT: f32 = 3.0;

/// Default maximum descent rate [m/s].
pub const VEL_DOWN_MAX_DEFAULT: f32 = 1.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/hover/altitude.toml";
