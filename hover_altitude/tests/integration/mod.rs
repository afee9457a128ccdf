//! Shared harness for the integration tests.

pub mod estimator_resets;
pub mod hold_convergence;
pub mod simulation;
pub mod transitions;

use hover_altitude::task::{AltitudeSmoothVelTask, TickInput};
use hover_common::prelude::*;

/// Default 250 Hz tick [s].
pub const DT: f32 = DEFAULT_TICK.as_secs_f32();

/// Largest velocity change one tick may produce with the default limits.
pub fn max_velocity_step() -> f32 {
    let params = SmoothVelParams::default();
    params.acc_up_max.max(params.acc_down_max) * DT
}

/// Task plus an estimator sample the test steers by hand.
///
/// The downstream controller is assumed ideal: the feedback velocity is the
/// previous setpoint velocity.
pub struct Harness {
    pub task: AltitudeSmoothVelTask,
    pub estimate: LocalPositionEstimate,
    pub feedback_velocity: f32,
    pub last: VerticalSetpoint,
}

impl Harness {
    pub fn activated(z: f32, vz: f32) -> Self {
        let estimate = LocalPositionEstimate {
            z,
            vz,
            ..Default::default()
        };
        let mut task = AltitudeSmoothVelTask::new(SmoothVelParams::default());
        task.activate(&estimate);
        Self {
            task,
            estimate,
            feedback_velocity: vz,
            last: VerticalSetpoint {
                velocity: vz,
                ..Default::default()
            },
        }
    }

    pub fn tick(&mut self, stick: f32) -> VerticalSetpoint {
        let constraints = self.task.params().constraints();
        let input = TickInput {
            manual: ManualInput::from_stick(stick, &constraints),
            estimate: self.estimate,
            feedback_velocity: self.feedback_velocity,
            constraints,
            dt: DT,
        };
        self.last = self.task.update(&input);
        self.feedback_velocity = self.last.velocity;
        self.last
    }

    /// Tick with a constant stick for `seconds`, returning the last setpoint.
    pub fn hold_stick(&mut self, stick: f32, seconds: f32) -> VerticalSetpoint {
        let ticks = (seconds / DT).round() as usize;
        for _ in 0..ticks {
            self.tick(stick);
        }
        self.last
    }

    pub fn bump_position(&mut self, z: f32) {
        self.estimate.z = z;
        self.estimate.z_reset_counter = self.estimate.z_reset_counter.wrapping_add(1);
    }

    pub fn bump_velocity(&mut self, vz: f32) {
        self.estimate.vz = vz;
        self.estimate.vz_reset_counter = self.estimate.vz_reset_counter.wrapping_add(1);
    }
}
