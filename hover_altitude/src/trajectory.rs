//! Jerk-limited trajectory generation.
//!
//! [`profile`] holds the closed-form phase durations, [`generator`] the
//! value-type generator that owns the kinematic state and integrates it.

pub mod generator;
pub mod profile;

pub use generator::{JerkLimitedTrajectory, KinematicState};
pub use profile::{Direction, LIMIT_EPSILON, Limits, ProfileSegments};
