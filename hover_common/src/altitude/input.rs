//! Inputs produced by the base manual-control task.

/// Speed constraints applied by the base task when shaping the stick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConstraints {
    /// Maximum climb rate [m/s] (magnitude).
    pub speed_up: f32,
    /// Maximum descent rate [m/s] (magnitude).
    pub speed_down: f32,
}

/// Manual input for the vertical axis, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManualInput {
    /// Expo-shaped stick deflection in `[-1, 1]`, down-positive.
    pub stick: f32,
    /// Unsmoothed velocity target [m/s] derived from the stick and constraints.
    pub velocity_target: f32,
}

impl ManualInput {
    /// Neutral stick, zero velocity target.
    pub const CENTERED: Self = Self {
        stick: 0.0,
        velocity_target: 0.0,
    };

    /// Map a stick deflection to a velocity target the way the base task does:
    /// negative deflection scales the climb limit, positive the descent limit.
    pub fn from_stick(stick: f32, constraints: &AxisConstraints) -> Self {
        let stick = stick.clamp(-1.0, 1.0);
        let velocity_target = if stick < 0.0 {
            stick * constraints.speed_up
        } else {
            stick * constraints.speed_down
        };
        Self {
            stick,
            velocity_target,
        }
    }
}
