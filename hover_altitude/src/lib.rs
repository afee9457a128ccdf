//! # Hover Altitude
//!
//! Manual altitude control for a multicopter's vertical axis. The pilot's
//! stick sets a velocity target; this crate turns it into position, velocity,
//! acceleration and jerk setpoints that are continuous up to bounded jerk,
//! and holds position automatically once the stick is released and the
//! vehicle has settled.
//!
//! ## Per-Tick Pipeline
//!
//! 1. **Limit selection** ([`lock::select_limits`]): climb or descent limits
//!    from the sign of the raw target.
//! 2. **Reset synchronization** ([`sync`]): absorb estimator step corrections.
//! 3. **Lock release** ([`lock::PositionLock`]): pilot input unlocks and
//!    reseeds velocity from the downstream feedback.
//! 4. **Trajectory** ([`trajectory`]): plan and integrate one jerk-limited step.
//! 5. **Lock engage / hold**: freeze the integrated position when settled.
//! 6. **Assembly** ([`setpoint`]): emit the [`VerticalSetpoint`].
//!
//! [`task::AltitudeSmoothVelTask`] runs the pipeline. [`cycle`] and [`sim`]
//! provide a fixed-period runner and a simulated vehicle for exercising it.
//!
//! ## Axis Convention
//!
//! Down-positive (NED). "Up" limits bound negative velocity and acceleration.
//!
//! ## Real-Time Constraints
//!
//! `AltitudeSmoothVelTask::update` performs no allocation, no locking and a
//! fixed amount of work per call.
//!
//! [`VerticalSetpoint`]: hover_common::altitude::setpoint::VerticalSetpoint

pub mod cycle;
pub mod lock;
pub mod setpoint;
pub mod sim;
pub mod sync;
pub mod task;
pub mod trajectory;
