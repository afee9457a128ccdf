//! Vertical setpoint record handed to the downstream position/velocity controller.

use static_assertions::assert_impl_all;

/// One tick of vertical setpoints.
///
/// `position == None` means "no position constraint": the downstream
/// controller runs on the velocity/acceleration feedforward only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalSetpoint {
    /// Held position [m], present only while the position lock is engaged.
    pub position: Option<f32>,
    /// Velocity feedforward [m/s].
    pub velocity: f32,
    /// Acceleration feedforward [m/s²].
    pub acceleration: f32,
    /// Jerk applied by the trajectory over the last tick [m/s³]. Diagnostic.
    pub jerk: f32,
}

assert_impl_all!(VerticalSetpoint: Copy, Send, Sync);

impl VerticalSetpoint {
    /// Position with the NaN "unconstrained" convention.
    #[inline]
    pub fn position_or_nan(&self) -> f32 {
        self.position.unwrap_or(f32::NAN)
    }

    /// Whether a position constraint is active.
    #[inline]
    pub const fn is_position_held(&self) -> bool {
        self.position.is_some()
    }

    /// Returns true if all present fields are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_none_or(f32::is_finite)
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.jerk.is_finite()
    }
}
