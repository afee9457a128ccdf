//! Setpoint assembly.

use hover_common::altitude::setpoint::VerticalSetpoint;

use crate::lock::PositionLock;
use crate::trajectory::KinematicState;

/// Package the generator output and lock state into the outward setpoint.
///
/// Position is constrained only while locked; velocity, acceleration and
/// jerk pass through unchanged.
#[inline]
pub fn assemble(lock: &PositionLock, out: &KinematicState) -> VerticalSetpoint {
    VerticalSetpoint {
        position: lock.position(),
        velocity: out.velocity,
        acceleration: out.acceleration,
        jerk: out.jerk,
    }
}
