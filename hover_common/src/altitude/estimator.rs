//! Vertical state-estimate sample consumed once per tick.

/// Vertical slice of the estimator's local position output.
///
/// The reset counters increment every time the estimator applies a step
/// correction to the corresponding estimate. Consumers compare them against
/// a local shadow to detect and absorb the jump.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalPositionEstimate {
    /// Position [m], down-positive.
    pub z: f32,
    /// Velocity [m/s], down-positive.
    pub vz: f32,
    /// Position reset counter.
    pub z_reset_counter: u32,
    /// Velocity reset counter.
    pub vz_reset_counter: u32,
}

impl LocalPositionEstimate {
    /// Counter pair in the order `(position, velocity)`.
    #[inline]
    pub const fn reset_counters(&self) -> ResetCounters {
        ResetCounters {
            position: self.z_reset_counter,
            velocity: self.vz_reset_counter,
        }
    }
}

/// Snapshot of the estimator's discontinuity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetCounters {
    pub position: u32,
    pub velocity: u32,
}
