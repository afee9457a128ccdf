//! Prelude module for common re-exports.
//!
//! ```rust
//! use hover_common::prelude::*;
//! ```

use std::time::Duration;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, HoverConfig, LogLevel, SharedConfig};
pub use crate::altitude::config::SmoothVelParams;

// ─── Tick Interface ─────────────────────────────────────────────────
pub use crate::altitude::estimator::{LocalPositionEstimate, ResetCounters};
pub use crate::altitude::input::{AxisConstraints, ManualInput};
pub use crate::altitude::setpoint::VerticalSetpoint;

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::TICK_US;

/// Default tick period as Duration.
pub const DEFAULT_TICK: Duration = Duration::from_micros(TICK_US as u64);
