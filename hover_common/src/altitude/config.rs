//! Tunable parameters of the smooth-velocity altitude task.
//!
//! All fields use `#[serde(default)]` so a partial `[smooth_vel]` table is
//! valid. Bounds are the `*_MIN`/`*_MAX` constants in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::{
    ACC_DOWN_MAX_DEFAULT, ACC_MAX_MAX, ACC_MAX_MIN, ACC_UP_MAX_DEFAULT, JERK_MAX_DEFAULT,
    JERK_MAX_MAX, JERK_MAX_MIN, TICK_US, TICK_US_MAX, TICK_US_MIN, VEL_DOWN_MAX_DEFAULT,
    VEL_MAX_MAX, VEL_MAX_MIN, VEL_UP_MAX_DEFAULT,
};

use super::input::AxisConstraints;

/// Smooth-velocity trajectory limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmoothVelParams {
    /// Maximum upward acceleration [m/s²].
    #[serde(default = "default_acc_up_max")]
    pub acc_up_max: f32,

    /// Maximum downward acceleration [m/s²].
    #[serde(default = "default_acc_down_max")]
    pub acc_down_max: f32,

    /// Maximum jerk while tracking the stick [m/s³].
    #[serde(default = "default_jerk_max")]
    pub jerk_max: f32,

    /// Maximum climb rate [m/s]. Feeds the base task's `speed_up` constraint.
    #[serde(default = "default_vel_up_max")]
    pub vel_up_max: f32,

    /// Maximum descent rate [m/s]. Feeds the base task's `speed_down` constraint.
    #[serde(default = "default_vel_down_max")]
    pub vel_down_max: f32,

    /// Tick period [µs].
    #[serde(default = "default_tick_us")]
    pub tick_us: u32,
}

fn default_acc_up_max() -> f32 {
    ACC_UP_MAX_DEFAULT
}
fn default_acc_down_max() -> f32 {
    ACC_DOWN_MAX_DEFAULT
}
fn default_jerk_max() -> f32 {
    JERK_MAX_DEFAULT
}
fn default_vel_up_max() -> f32 {
    VEL_UP_MAX_DEFAULT
}
fn default_vel_down_max() -> f32 {
    VEL_DOWN_MAX_DEFAULT
}
fn default_tick_us() -> u32 {
    TICK_US
}

impl Default for SmoothVelParams {
    fn default() -> Self {
        Self {
            acc_up_max: ACC_UP_MAX_DEFAULT,
            acc_down_max: ACC_DOWN_MAX_DEFAULT,
            jerk_max: JERK_MAX_DEFAULT,
            vel_up_max: VEL_UP_MAX_DEFAULT,
            vel_down_max: VEL_DOWN_MAX_DEFAULT,
            tick_us: TICK_US,
        }
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<(), String> {
    // NaN fails both comparisons, so test for containment instead of exclusion.
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} {value} out of range [{min}, {max}]"))
    }
}

impl SmoothVelParams {
    /// Validate parameter bounds.
    pub fn validate(&self) -> Result<(), String> {
        check_range("acc_up_max", self.acc_up_max, ACC_MAX_MIN, ACC_MAX_MAX)?;
        check_range("acc_down_max", self.acc_down_max, ACC_MAX_MIN, ACC_MAX_MAX)?;
        check_range("jerk_max", self.jerk_max, JERK_MAX_MIN, JERK_MAX_MAX)?;
        check_range("vel_up_max", self.vel_up_max, VEL_MAX_MIN, VEL_MAX_MAX)?;
        check_range("vel_down_max", self.vel_down_max, VEL_MAX_MIN, VEL_MAX_MAX)?;
        if self.tick_us < TICK_US_MIN || self.tick_us > TICK_US_MAX {
            return Err(format!(
                "tick_us {} out of range [{}, {}]",
                self.tick_us, TICK_US_MIN, TICK_US_MAX
            ));
        }
        Ok(())
    }

    /// Tick period [s].
    #[inline]
    pub fn dt(&self) -> f32 {
        self.tick_us as f32 / 1_000_000.0
    }

    /// Speed constraints the base task applies for these limits.
    #[inline]
    pub fn constraints(&self) -> AxisConstraints {
        AxisConstraints {
            speed_up: self.vel_up_max,
            speed_down: self.vel_down_max,
        }
    }
}
