//! Estimator reset synchronization.
//!
//! The estimator bumps a counter each time it applies a step correction to
//! its position or velocity estimate. A shadow copy of both counters is kept
//! here; on mismatch the matching trajectory component is overwritten with
//! the newly measured value so the step is absorbed instead of being
//! integrated as a high-jerk event. The two channels never touch each other.

use hover_common::altitude::estimator::{LocalPositionEstimate, ResetCounters};

/// Channels that were resynchronized on this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetEvents {
    pub position: bool,
    pub velocity: bool,
}

impl ResetEvents {
    #[inline]
    pub const fn any(&self) -> bool {
        self.position || self.velocity
    }
}

/// Shadow of the estimator's reset counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetSynchronizer {
    shadow: ResetCounters,
}

impl ResetSynchronizer {
    /// Synchronizer that treats the current counters as already absorbed.
    pub const fn seeded(counters: ResetCounters) -> Self {
        Self { shadow: counters }
    }

    #[inline]
    pub const fn shadow(&self) -> ResetCounters {
        self.shadow
    }

    /// Compare counters and reseed the trajectory where they moved.
    ///
    /// Generic over the trajectory value so the caller's setter chain stays
    /// a pure function: `position` and `velocity` map a trajectory plus the
    /// measured value to the updated trajectory.
    pub fn synchronize<T>(
        &mut self,
        trajectory: T,
        estimate: &LocalPositionEstimate,
        position: impl FnOnce(T, f32) -> T,
        velocity: impl FnOnce(T, f32) -> T,
    ) -> (T, ResetEvents) {
        let counters = estimate.reset_counters();
        let mut events = ResetEvents::default();
        let mut trajectory = trajectory;

        if counters.position != self.shadow.position {
            trajectory = position(trajectory, estimate.z);
            self.shadow.position = counters.position;
            events.position = true;
        }

        if counters.velocity != self.shadow.velocity {
            trajectory = velocity(trajectory, estimate.vz);
            self.shadow.velocity = counters.velocity;
            events.velocity = true;
        }

        (trajectory, events)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
