//! Closed-form jerk-limited velocity profile.
//!
//! A velocity change is realised with at most three phases:
//!
//! ```text
//!  jerk   +d·J ┌────┐
//!              │ T1 │  T2 (0)  ┌────┐
//!           0 ─┘    └──────────┤ T3 │───── (hold target)
//!                              └────┘ −d·J
//! ```
//!
//! `d` is the direction of the change. T1 ramps acceleration toward its
//! peak, T2 holds the peak (only when the acceleration limit binds), T3 ramps
//! acceleration back to zero exactly when the target velocity is reached.
//! Every duration is computed in O(1) from the current acceleration `a0`,
//! the velocity error `Δv` and the limits.

/// Smallest value any limit may take. Non-positive or NaN limits are clamped here.
pub const LIMIT_EPSILON: f32 = 1e-4;

/// Trajectory limits along the down-positive axis.
///
/// "Up" bounds negative velocity/acceleration, "down" bounds positive values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub max_vel_up: f32,
    pub max_vel_down: f32,
    pub max_accel_up: f32,
    pub max_accel_down: f32,
    pub max_jerk: f32,
}

#[inline]
pub(crate) fn sanitize_limit(value: f32) -> f32 {
    // f32::max returns the other operand for NaN.
    value.max(LIMIT_EPSILON)
}

impl Limits {
    /// Symmetric limits.
    pub fn symmetric(max_vel: f32, max_accel: f32, max_jerk: f32) -> Self {
        Self {
            max_vel_up: max_vel,
            max_vel_down: max_vel,
            max_accel_up: max_accel,
            max_accel_down: max_accel,
            max_jerk,
        }
        .sanitized()
    }

    /// Copy with every limit clamped to at least [`LIMIT_EPSILON`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            max_vel_up: sanitize_limit(self.max_vel_up),
            max_vel_down: sanitize_limit(self.max_vel_down),
            max_accel_up: sanitize_limit(self.max_accel_up),
            max_accel_down: sanitize_limit(self.max_accel_down),
            max_jerk: sanitize_limit(self.max_jerk),
        }
    }

    /// Clamp a velocity into `[-max_vel_up, max_vel_down]`.
    #[inline]
    pub fn clamp_velocity(&self, velocity: f32) -> f32 {
        velocity.clamp(-self.max_vel_up, self.max_vel_down)
    }

    /// Clamp an acceleration into `[-max_accel_up, max_accel_down]`.
    #[inline]
    pub fn clamp_acceleration(&self, acceleration: f32) -> f32 {
        acceleration.clamp(-self.max_accel_up, self.max_accel_down)
    }
}

/// Sign of the velocity change a profile performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Acceleration first increases toward the down limit.
    Down,
    /// Target reached with zero acceleration; nothing to do.
    #[default]
    None,
    /// Acceleration first decreases toward the up limit.
    Up,
}

impl Direction {
    #[inline]
    fn of(value: f32) -> Self {
        if value > 0.0 {
            Self::Down
        } else if value < 0.0 {
            Self::Up
        } else {
            Self::None
        }
    }

    /// `+1`, `0` or `-1`.
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Down => 1.0,
            Self::None => 0.0,
            Self::Up => -1.0,
        }
    }
}

/// Remaining phase durations of the current profile [s].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileSegments {
    pub direction: Direction,
    /// Jerk `+d·J` phase.
    pub t1: f32,
    /// Zero-jerk phase at peak acceleration.
    pub t2: f32,
    /// Jerk `−d·J` phase.
    pub t3: f32,
}

impl ProfileSegments {
    /// Total remaining duration [s].
    #[inline]
    pub fn total(&self) -> f32 {
        self.t1 + self.t2 + self.t3
    }

    /// True when no phase time remains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.t1 <= 0.0 && self.t2 <= 0.0 && self.t3 <= 0.0
    }

    /// Compute the minimum-time profile from `(acceleration, velocity)` to
    /// `target_velocity` with zero final acceleration.
    ///
    /// `target_velocity` must already be inside the velocity limits and
    /// `acceleration` inside the acceleration limits.
    pub fn compute(acceleration: f32, velocity: f32, target_velocity: f32, limits: &Limits) -> Self {
        let direction = direction_to(acceleration, velocity, target_velocity, limits.max_jerk);
        if direction == Direction::None {
            return Self::default();
        }

        let jerk = direction.sign() * limits.max_jerk;
        let delta_v = target_velocity - velocity;

        let t1 = compute_t1(acceleration, delta_v, jerk, limits);
        let t3 = compute_t3(t1, acceleration, jerk);
        let t2 = compute_t2(t1, t3, acceleration, delta_v, jerk);

        Self {
            direction,
            t1,
            t2,
            t3,
        }
    }
}

/// Velocity reached if the current acceleration is braked to zero at full jerk.
#[inline]
pub fn velocity_at_zero_acceleration(acceleration: f32, velocity: f32, max_jerk: f32) -> f32 {
    velocity + 0.5 * acceleration * acceleration.abs() / max_jerk
}

/// Direction of the first jerk phase.
///
/// Braking alone would land on `velocity_at_zero_acceleration`; if that is
/// short of the target, push further, otherwise go the other way. Landing
/// exactly on the target means "just brake", i.e. follow the sign of the
/// current acceleration.
fn direction_to(acceleration: f32, velocity: f32, target_velocity: f32, max_jerk: f32) -> Direction {
    let braked = velocity_at_zero_acceleration(acceleration, velocity, max_jerk);
    match Direction::of(target_velocity - braked) {
        Direction::None => Direction::of(acceleration),
        direction => direction,
    }
}

/// Duration of the first phase.
///
/// Solves `J·T1² + 2·a0·T1 + a0²/(2J) − Δv = 0` (T1 then T3 with
/// `T3 = a0/J + T1`, no T2) and picks the root where both phases are
/// non-negative, then shortens it if the peak acceleration would exceed the
/// acceleration limit of its sign.
fn compute_t1(a0: f32, delta_v: f32, jerk: f32, limits: &Limits) -> f32 {
    // Non-negative for any direction picked by `direction_to`; only rounding
    // pushes it below zero near the end of a profile.
    let delta = (2.0 * a0 * a0 + 4.0 * jerk * delta_v).max(0.0);
    let sqrt_delta = delta.sqrt();

    let t1_plus = (-a0 + 0.5 * sqrt_delta) / jerk;
    let t1_minus = (-a0 - 0.5 * sqrt_delta) / jerk;
    let t3_plus = a0 / jerk + t1_plus;
    let t3_minus = a0 / jerk + t1_minus;

    let t1 = if t1_plus >= 0.0 && t3_plus >= 0.0 {
        t1_plus
    } else if t1_minus >= 0.0 && t3_minus >= 0.0 {
        t1_minus
    } else {
        0.0
    };

    saturate_t1(a0, jerk, t1, limits).max(0.0)
}

fn saturate_t1(a0: f32, jerk: f32, t1: f32, limits: &Limits) -> f32 {
    let peak = a0 + jerk * t1;
    if peak > limits.max_accel_down {
        (limits.max_accel_down - a0) / jerk
    } else if peak < -limits.max_accel_up {
        (-limits.max_accel_up - a0) / jerk
    } else {
        t1
    }
}

/// Duration of the last phase: bring the peak acceleration back to zero.
#[inline]
fn compute_t3(t1: f32, a0: f32, jerk: f32) -> f32 {
    (a0 / jerk + t1).max(0.0)
}

/// Duration at peak acceleration covering whatever Δv T1 and T3 leave.
fn compute_t2(t1: f32, t3: f32, a0: f32, delta_v: f32, jerk: f32) -> f32 {
    let peak = a0 + jerk * t1;
    if peak.abs() <= f32::EPSILON {
        return 0.0;
    }
    let covered = a0 * t1 + 0.5 * jerk * t1 * t1 + peak * t3 - 0.5 * jerk * t3 * t3;
    ((delta_v - covered) / peak).max(0.0)
}
