//! Vertical-axis types shared between the altitude task and its collaborators.
//!
//! Axis convention: positive = down (NED), so climbing is a negative velocity.

pub mod config;
pub mod estimator;
pub mod input;
pub mod setpoint;
