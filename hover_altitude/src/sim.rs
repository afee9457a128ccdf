//! Simulated vertical vehicle and scripted pilot input.
//!
//! The plant stands in for the downstream controller, the airframe and the
//! state estimator at once: it tracks the emitted setpoint with a
//! first-order velocity response, closes a proportional position loop while
//! a position is held, and publishes an estimate whose reset counters can be
//! bumped on demand to exercise the reset path.

use hover_common::altitude::estimator::LocalPositionEstimate;
use hover_common::altitude::setpoint::VerticalSetpoint;

/// Velocity response time constant [s].
pub const VELOCITY_TIME_CONSTANT: f32 = 0.15;

/// Position loop gain [1/s] applied while a position setpoint is present.
pub const POSITION_GAIN: f32 = 1.0;

// ─── Plant ──────────────────────────────────────────────────────────

/// One-axis vehicle plus estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalPlant {
    z: f32,
    vz: f32,
    z_reset_counter: u32,
    vz_reset_counter: u32,
    /// Velocity setpoint applied by the simulated controller on the last step.
    applied_velocity: f32,
}

impl VerticalPlant {
    /// Vehicle at rest at `z` [m].
    pub const fn at_rest(z: f32) -> Self {
        Self {
            z,
            vz: 0.0,
            z_reset_counter: 0,
            vz_reset_counter: 0,
            applied_velocity: 0.0,
        }
    }

    /// Apply one setpoint for `dt` seconds.
    pub fn step(&mut self, setpoint: &VerticalSetpoint, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        let correction = setpoint
            .position
            .map_or(0.0, |held| POSITION_GAIN * (held - self.z));
        let command = setpoint.velocity + correction;

        let alpha = (dt / VELOCITY_TIME_CONSTANT).min(1.0);
        self.vz += (command - self.vz) * alpha;
        self.z += self.vz * dt;
        self.applied_velocity = command;
    }

    /// Step correction of the position estimate by `dz` [m].
    pub fn inject_position_reset(&mut self, dz: f32) {
        self.z += dz;
        self.z_reset_counter = self.z_reset_counter.wrapping_add(1);
    }

    /// Step correction of the velocity estimate by `dvz` [m/s].
    pub fn inject_velocity_reset(&mut self, dvz: f32) {
        self.vz += dvz;
        self.vz_reset_counter = self.vz_reset_counter.wrapping_add(1);
    }

    pub fn estimate(&self) -> LocalPositionEstimate {
        LocalPositionEstimate {
            z: self.z,
            vz: self.vz,
            z_reset_counter: self.z_reset_counter,
            vz_reset_counter: self.vz_reset_counter,
        }
    }

    /// Last velocity setpoint the simulated controller applied.
    #[inline]
    pub fn feedback_velocity(&self) -> f32 {
        self.applied_velocity
    }
}

// ─── Scenarios ──────────────────────────────────────────────────────

/// Estimator discontinuity injected at a scripted time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioEvent {
    PositionReset(f32),
    VelocityReset(f32),
}

/// Scripted flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Scenario {
    /// Stick centred the whole time.
    #[default]
    Hover,
    /// Climb, release into hold, short descent, release again.
    ClimbRelease,
    /// Hover and climb with estimator position/velocity resets injected.
    StepReset,
}

const NO_EVENTS: &[(f32, ScenarioEvent)] = &[];

const STEP_RESET_EVENTS: &[(f32, ScenarioEvent)] = &[
    (1.0, ScenarioEvent::PositionReset(0.5)),
    (2.0, ScenarioEvent::VelocityReset(0.3)),
    (4.0, ScenarioEvent::PositionReset(-1.0)),
];

impl Scenario {
    /// Scripted length [s].
    pub const fn duration_s(self) -> f32 {
        match self {
            Self::Hover => 2.0,
            Self::ClimbRelease => 10.0,
            Self::StepReset => 8.0,
        }
    }

    /// Stick deflection at time `t` [s], down-positive.
    pub fn stick_at(self, t: f32) -> f32 {
        match self {
            Self::Hover => 0.0,
            Self::ClimbRelease => match t {
                t if t < 0.5 => 0.0,
                t if t < 3.0 => -0.8,
                t if t < 6.0 => 0.0,
                t if t < 7.5 => 0.5,
                _ => 0.0,
            },
            Self::StepReset => match t {
                t if t < 3.0 => 0.0,
                t if t < 5.0 => -0.5,
                _ => 0.0,
            },
        }
    }

    /// Events scheduled in `[from, to)` [s].
    pub fn events_between(self, from: f32, to: f32) -> impl Iterator<Item = ScenarioEvent> {
        let events = match self {
            Self::StepReset => STEP_RESET_EVENTS,
            Self::Hover | Self::ClimbRelease => NO_EVENTS,
        };
        events
            .iter()
            .filter(move |(at, _)| *at >= from && *at < to)
            .map(|(_, event)| *event)
    }
}
