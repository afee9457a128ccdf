//! Estimator reset absorption while holding and while tracking.

use super::{DT, Harness, max_velocity_step};

/// Harness locked at rest at `z`.
fn locked_at(z: f32) -> Harness {
    let mut h = Harness::activated(z, 0.0);
    let sp = h.tick(0.0);
    assert_eq!(sp.position, Some(z));
    h
}

#[test]
fn position_reset_moves_hold_without_velocity_step() {
    let mut h = locked_at(-5.0);
    h.bump_position(-7.0);

    let sp = h.tick(0.0);
    assert_eq!(sp.position, Some(-7.0));
    assert_eq!(sp.velocity, 0.0);
    assert_eq!(sp.acceleration, 0.0);

    // Absorbed once: the next tick keeps the new hold.
    let sp = h.tick(0.0);
    assert_eq!(sp.position, Some(-7.0));
}

#[test]
fn position_reset_while_climbing_keeps_velocity_continuous() {
    let mut h = Harness::activated(-5.0, 0.0);
    h.hold_stick(-0.5, 0.3);
    let before = h.last.velocity;

    h.bump_position(-3.0);
    let sp = h.tick(-0.5);
    assert!((sp.velocity - before).abs() <= max_velocity_step() + 1e-5);
    assert!((h.task.trajectory().current_position() - (-3.0)).abs() < 0.01);
}

#[test]
fn velocity_reset_snaps_velocity_keeps_position() {
    let mut h = locked_at(-5.0);
    h.bump_velocity(0.4);

    let sp = h.tick(0.0);
    // Velocity restarts from the measurement; locked jerk barely moves it.
    assert!((sp.velocity - 0.4).abs() < 1e-4, "velocity {}", sp.velocity);
    let held = sp.position.expect("hold dropped on velocity reset");
    assert!((held - (-5.0 + 0.4 * DT)).abs() < 1e-5, "held {held}");
}

#[test]
fn both_resets_on_same_tick() {
    let mut h = locked_at(-5.0);
    h.bump_position(-6.0);
    h.bump_velocity(-0.2);

    let sp = h.tick(0.0);
    let held = sp.position.expect("hold dropped");
    assert!((held - (-6.0 - 0.2 * DT)).abs() < 1e-5, "held {held}");
    assert!((sp.velocity + 0.2).abs() < 1e-4);
}

#[test]
fn unchanged_counters_ignore_measured_jumps() {
    let mut h = locked_at(-5.0);
    // Measurement moves without a reset: a real displacement, not a correction.
    h.estimate.z = -9.0;
    h.estimate.vz = 2.0;
    let sp = h.tick(0.0);
    assert_eq!(sp.position, Some(-5.0));
    assert_eq!(sp.velocity, 0.0);
}

#[test]
fn counters_present_at_activation_are_not_replayed() {
    let mut h = Harness::activated(-5.0, 0.0);
    h.estimate.z_reset_counter = 3;
    h.estimate.vz_reset_counter = 3;
    h.task.activate(&h.estimate);

    h.estimate.vz = 1.0;
    let sp = h.tick(-0.5);
    assert!(sp.velocity.abs() < 0.01, "velocity {}", sp.velocity);
}
