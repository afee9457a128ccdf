//! Position-lock state machine.
//!
//! ```text
//!             |v| < 0.1 ∧ |a| < 0.2 ∧ |stick| ≤ ε
//!   Unlocked ─────────────────────────────────────▶ Locked{position}
//!      ▲                                                  │
//!      └────────────────── |stick| > ε ───────────────────┘
//! ```
//!
//! The held position only exists in the `Locked` variant, so an unlocked
//! controller cannot leak a stale position setpoint downstream.

use static_assertions::const_assert;

use hover_common::altitude::config::SmoothVelParams;
use hover_common::altitude::input::AxisConstraints;

use crate::trajectory::KinematicState;

/// Stick magnitude above which the pilot is considered to be commanding.
pub const STICK_DEADZONE: f32 = f32::EPSILON;

/// Velocity [m/s] below which the lock may engage.
pub const LOCK_VELOCITY_THRESHOLD: f32 = 0.1;

/// Acceleration [m/s²] below which the lock may engage.
pub const LOCK_ACCELERATION_THRESHOLD: f32 = 0.2;

/// Jerk limit [m/s³] while locked. Small to damp the final convergence to rest.
pub const LOCKED_MAX_JERK: f32 = 1.0;

/// Velocity [m/s] under which a locked hold is snapped to exact rest.
pub const HOLD_SNAP_VELOCITY: f32 = 1e-3;

/// Acceleration [m/s²] under which a locked hold is snapped to exact rest.
pub const HOLD_SNAP_ACCELERATION: f32 = f32::EPSILON;

const_assert!(HOLD_SNAP_VELOCITY < LOCK_VELOCITY_THRESHOLD);
const_assert!(HOLD_SNAP_ACCELERATION < LOCK_ACCELERATION_THRESHOLD);
const_assert!(LOCKED_MAX_JERK > 0.0);

// ─── State ──────────────────────────────────────────────────────────

/// Lock state of the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionLock {
    /// Free tracking of the pilot's velocity target.
    #[default]
    Unlocked,
    /// Holding `position` [m].
    Locked { position: f32 },
}

impl PositionLock {
    #[inline]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    /// Held position, `None` while unlocked.
    #[inline]
    pub const fn position(&self) -> Option<f32> {
        match *self {
            Self::Locked { position } => Some(position),
            Self::Unlocked => None,
        }
    }

    /// Unlock on pilot input. Returns `true` only on the locked → unlocked edge.
    pub fn release_on_stick(&mut self, stick: f32) -> bool {
        if self.is_locked() && stick.abs() > STICK_DEADZONE {
            *self = Self::Unlocked;
            true
        } else {
            false
        }
    }

    /// Engage when motion has settled and the stick is centred.
    ///
    /// Returns `true` only on the unlocked → locked edge. The held position is
    /// taken from `out`; an already-locked controller is left to [`hold`](Self::hold).
    pub fn engage_if_settled(&mut self, out: &KinematicState, stick: f32) -> bool {
        if self.is_locked() {
            return false;
        }
        if out.velocity.abs() < LOCK_VELOCITY_THRESHOLD
            && out.acceleration.abs() < LOCK_ACCELERATION_THRESHOLD
            && stick.abs() <= STICK_DEADZONE
        {
            *self = Self::Locked {
                position: out.position,
            };
            true
        } else {
            false
        }
    }

    /// Refresh the held position. No effect while unlocked.
    pub fn hold(&mut self, position: f32) {
        if let Self::Locked { position: held } = self {
            *held = position;
        }
    }

    /// Jerk limit for the generator in this state.
    #[inline]
    pub const fn jerk_limit(&self, configured: f32) -> f32 {
        match self {
            Self::Locked { .. } => LOCKED_MAX_JERK,
            Self::Unlocked => configured,
        }
    }
}

// ─── Limit Selection ────────────────────────────────────────────────

/// Acceleration and velocity magnitudes applied to both directions for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitPair {
    pub max_accel: f32,
    pub max_vel: f32,
}

/// Pick the climb or descent limits from the sign of the raw velocity target.
///
/// Climb (negative target) uses the up limits; descent and hover use the
/// down limits.
pub fn select_limits(
    velocity_target: f32,
    params: &SmoothVelParams,
    constraints: &AxisConstraints,
) -> LimitPair {
    if velocity_target < 0.0 {
        LimitPair {
            max_accel: params.acc_up_max,
            max_vel: constraints.speed_up,
        }
    } else {
        LimitPair {
            max_accel: params.acc_down_max,
            max_vel: constraints.speed_down,
        }
    }
}

/// Whether a locked hold is close enough to rest to be forced to it.
#[inline]
pub fn hold_snap(out: &KinematicState) -> bool {
    out.velocity.abs() < HOLD_SNAP_VELOCITY && out.acceleration.abs() < HOLD_SNAP_ACCELERATION
}

// ─── Tests ──────────────────────────────────────────────────────────
