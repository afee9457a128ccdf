//! Manual altitude flight task with smoothed velocity and automatic hold.
//!
//! The task is driven once per control tick. It owns the jerk-limited
//! generator, the estimator-reset shadow and the position lock, and turns
//! the base task's velocity target into a continuous vertical setpoint.

use tracing::debug;

use hover_common::altitude::config::SmoothVelParams;
use hover_common::altitude::estimator::LocalPositionEstimate;
use hover_common::altitude::input::{AxisConstraints, ManualInput};
use hover_common::altitude::setpoint::VerticalSetpoint;

use crate::lock::{PositionLock, hold_snap, select_limits};
use crate::setpoint::assemble;
use crate::sync::ResetSynchronizer;
use crate::trajectory::{JerkLimitedTrajectory, Limits};

/// Everything the task samples at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub manual: ManualInput,
    pub estimate: LocalPositionEstimate,
    /// Velocity setpoint the downstream controller actually applied last tick.
    pub feedback_velocity: f32,
    pub constraints: AxisConstraints,
    /// Tick period [s].
    pub dt: f32,
}

/// Vertical smooth-velocity task.
#[derive(Debug, Clone)]
pub struct AltitudeSmoothVelTask {
    params: SmoothVelParams,
    trajectory: JerkLimitedTrajectory,
    sync: ResetSynchronizer,
    lock: PositionLock,
}

impl AltitudeSmoothVelTask {
    pub fn new(params: SmoothVelParams) -> Self {
        let limits = Limits {
            max_vel_up: params.vel_up_max,
            max_vel_down: params.vel_down_max,
            max_accel_up: params.acc_up_max,
            max_accel_down: params.acc_down_max,
            max_jerk: params.jerk_max,
        };
        Self {
            params,
            trajectory: JerkLimitedTrajectory::new(limits),
            sync: ResetSynchronizer::default(),
            lock: PositionLock::Unlocked,
        }
    }

    /// Start from the measured state, in flight.
    pub fn activate(&mut self, estimate: &LocalPositionEstimate) {
        self.start(estimate, estimate.vz);
        debug!(z = estimate.z, vz = estimate.vz, "Smooth-velocity task activated");
    }

    /// Start at rest at the measured position, e.g. while landed.
    pub fn reactivate(&mut self, estimate: &LocalPositionEstimate) {
        self.start(estimate, 0.0);
        debug!(z = estimate.z, "Smooth-velocity task reactivated at rest");
    }

    fn start(&mut self, estimate: &LocalPositionEstimate, velocity: f32) {
        self.trajectory = self.trajectory.reset(0.0, velocity, estimate.z);
        self.sync = ResetSynchronizer::seeded(estimate.reset_counters());
        self.lock = PositionLock::Unlocked;
    }

    /// Run one tick and return the setpoint for the downstream controller.
    pub fn update(&mut self, input: &TickInput) -> VerticalSetpoint {
        let stick = input.manual.stick;
        let target = input.manual.velocity_target;

        let pair = select_limits(target, &self.params, &input.constraints);
        let trajectory = self
            .trajectory
            .with_max_accel(pair.max_accel, pair.max_accel)
            .with_max_vel(pair.max_vel, pair.max_vel);

        let (mut trajectory, resets) = self.sync.synchronize(
            trajectory,
            &input.estimate,
            JerkLimitedTrajectory::with_position,
            JerkLimitedTrajectory::with_velocity,
        );
        if resets.position {
            debug!(z = input.estimate.z, "Estimator position reset absorbed");
        }
        if resets.velocity {
            debug!(vz = input.estimate.vz, "Estimator velocity reset absorbed");
        }

        if self.lock.release_on_stick(stick) {
            // A missing feedback sample must not poison the generator.
            if input.feedback_velocity.is_finite() {
                trajectory = trajectory.with_velocity(input.feedback_velocity);
            }
            debug!(
                stick,
                feedback_velocity = input.feedback_velocity,
                "Position lock released"
            );
        }

        trajectory = trajectory
            .with_max_jerk(self.lock.jerk_limit(self.params.jerk_max))
            .update_durations(input.dt, target);

        if !self.lock.is_locked() {
            trajectory = trajectory.with_position(input.estimate.z);
        }

        let (mut trajectory, mut out) = trajectory.integrate(input.dt);

        if self.lock.engage_if_settled(&out, stick) {
            debug!(position = out.position, "Position lock engaged");
        }

        if self.lock.is_locked() {
            self.lock.hold(out.position);
            if hold_snap(&out) {
                out.velocity = 0.0;
                out.acceleration = 0.0;
                trajectory = trajectory.with_velocity(0.0).with_acceleration(0.0);
            }
        }

        self.trajectory = trajectory;
        assemble(&self.lock, &out)
    }

    #[inline]
    pub fn params(&self) -> &SmoothVelParams {
        &self.params
    }

    #[inline]
    pub fn trajectory(&self) -> &JerkLimitedTrajectory {
        &self.trajectory
    }

    #[inline]
    pub fn lock(&self) -> PositionLock {
        self.lock
    }

    #[inline]
    pub fn reset_synchronizer(&self) -> &ResetSynchronizer {
        &self.sync
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
