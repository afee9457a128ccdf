//! Jerk-limited single-axis trajectory generator.
//!
//! `JerkLimitedTrajectory` is a `Copy` value: every operation returns the
//! updated generator and the caller threads it through the control loop.
//! Per tick the caller sets limits, calls [`JerkLimitedTrajectory::update_durations`]
//! with the target velocity, then [`JerkLimitedTrajectory::integrate`].
//!
//! Integration evaluates the piecewise-cubic profile exactly over `dt`, so
//! the velocity never overshoots the target; when the last phase ends inside
//! a tick the state lands on the target velocity with zero acceleration.

use static_assertions::assert_impl_all;

use super::profile::{Limits, ProfileSegments, sanitize_limit};

/// Kinematic state along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub position: f32,
    pub velocity: f32,
    pub acceleration: f32,
    pub jerk: f32,
}

impl KinematicState {
    /// State after `t` seconds at constant `jerk`.
    #[inline]
    #[must_use]
    pub fn advanced(self, jerk: f32, t: f32) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        Self {
            position: self.position
                + self.velocity * t
                + 0.5 * self.acceleration * t2
                + jerk * t3 / 6.0,
            velocity: self.velocity + self.acceleration * t + 0.5 * jerk * t2,
            acceleration: self.acceleration + jerk * t,
            jerk,
        }
    }
}

/// Jerk-limited velocity tracker with integrated position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JerkLimitedTrajectory {
    state: KinematicState,
    limits: Limits,
    segments: ProfileSegments,
    /// Target of the current profile, already clamped to the velocity limits.
    target_velocity: f32,
}

assert_impl_all!(JerkLimitedTrajectory: Copy, Send, Sync);
assert_impl_all!(KinematicState: Copy, Send, Sync);

impl JerkLimitedTrajectory {
    /// Generator at rest at the origin.
    pub fn new(limits: Limits) -> Self {
        Self {
            state: KinematicState::default(),
            limits: limits.sanitized(),
            segments: ProfileSegments::default(),
            target_velocity: 0.0,
        }
    }

    /// Overwrite the whole state. Acceleration restarts at zero and any
    /// pending profile is dropped.
    #[must_use]
    pub fn reset(self, jerk: f32, velocity: f32, position: f32) -> Self {
        Self {
            state: KinematicState {
                position,
                velocity,
                acceleration: 0.0,
                jerk,
            },
            segments: ProfileSegments::default(),
            target_velocity: velocity,
            ..self
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: f32) -> Self {
        self.state.position = position;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.state.velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.state.acceleration = acceleration;
        self
    }

    /// Velocity limits [m/s] for climbing (`up`) and descending (`down`), as magnitudes.
    #[must_use]
    pub fn with_max_vel(mut self, up: f32, down: f32) -> Self {
        self.limits.max_vel_up = sanitize_limit(up);
        self.limits.max_vel_down = sanitize_limit(down);
        self
    }

    /// Acceleration limits [m/s²] toward up and down, as magnitudes.
    #[must_use]
    pub fn with_max_accel(mut self, up: f32, down: f32) -> Self {
        self.limits.max_accel_up = sanitize_limit(up);
        self.limits.max_accel_down = sanitize_limit(down);
        self
    }

    #[must_use]
    pub fn with_max_jerk(mut self, jerk: f32) -> Self {
        self.limits.max_jerk = sanitize_limit(jerk);
        self
    }

    /// Plan the minimum-time profile from the current state to `target_velocity`.
    ///
    /// The target is clamped into the velocity limits and the current
    /// acceleration into the acceleration limits (limits may have shrunk since
    /// the last tick). A non-positive or NaN `dt` leaves the generator untouched.
    #[must_use]
    pub fn update_durations(self, dt: f32, target_velocity: f32) -> Self {
        if !(dt > 0.0) {
            return self;
        }
        let target = self.limits.clamp_velocity(target_velocity);
        let acceleration = self.limits.clamp_acceleration(self.state.acceleration);
        let segments =
            ProfileSegments::compute(acceleration, self.state.velocity, target, &self.limits);

        Self {
            state: KinematicState {
                acceleration,
                ..self.state
            },
            segments,
            target_velocity: target,
            ..self
        }
    }

    /// Advance the state by `dt` along the planned profile.
    ///
    /// Returns the advanced generator and its new state. The reported jerk is
    /// the mean jerk over the step, so `|jerk| <= max_jerk`. A non-positive or
    /// NaN `dt` returns the generator unchanged.
    #[must_use]
    pub fn integrate(self, dt: f32) -> (Self, KinematicState) {
        if !(dt > 0.0) {
            return (self, self.state);
        }

        let jerk = self.segments.direction.sign() * self.limits.max_jerk;
        let start_acceleration = self.state.acceleration;
        let had_profile = !self.segments.is_empty();

        let mut segments = self.segments;
        let mut state = self.state;
        let mut remaining = dt;

        for (duration, phase_jerk) in [
            (&mut segments.t1, jerk),
            (&mut segments.t2, 0.0),
            (&mut segments.t3, -jerk),
        ] {
            let t = duration.min(remaining);
            if t > 0.0 {
                state = state.advanced(phase_jerk, t);
                *duration -= t;
                remaining -= t;
            }
        }

        if had_profile && segments.is_empty() {
            // Analytically exact; removes rounding left by the cubic evaluation.
            state.acceleration = 0.0;
            state.velocity = self.target_velocity;
        }
        if remaining > 0.0 {
            state = state.advanced(0.0, remaining);
        }
        state.jerk = (state.acceleration - start_acceleration) / dt;

        (
            Self {
                state,
                segments,
                ..self
            },
            state,
        )
    }

    #[inline]
    pub fn state(&self) -> KinematicState {
        self.state
    }

    #[inline]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    #[inline]
    pub fn segments(&self) -> ProfileSegments {
        self.segments
    }

    /// Clamped target of the current profile.
    #[inline]
    pub fn target_velocity(&self) -> f32 {
        self.target_velocity
    }

    #[inline]
    pub fn current_position(&self) -> f32 {
        self.state.position
    }

    #[inline]
    pub fn current_velocity(&self) -> f32 {
        self.state.velocity
    }

    #[inline]
    pub fn current_acceleration(&self) -> f32 {
        self.state.acceleration
    }

    /// Jerk applied during the most recent [`integrate`](Self::integrate).
    #[inline]
    pub fn current_jerk(&self) -> f32 {
        self.state.jerk
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
