//! Lock/unlock transitions and limit selection across full flights.

use hover_altitude::lock::PositionLock;
use hover_altitude::trajectory::{JerkLimitedTrajectory, Limits};
use hover_common::altitude::config::SmoothVelParams;

use super::{DT, Harness, max_velocity_step};

#[test]
fn lock_cycle_is_continuous() {
    let mut h = Harness::activated(-10.0, 0.0);
    let bound = max_velocity_step() + 1e-5;

    let script: [(f32, f32); 5] = [
        (0.0, 0.5),  // hover, locked
        (-0.6, 1.5), // climb
        (0.0, 2.0),  // release into hold
        (0.5, 1.0),  // descend
        (0.0, 2.0),  // release again
    ];

    let mut previous = h.last.velocity;
    let mut engagements = 0;
    let mut releases = 0;
    let mut was_held = false;

    for (stick, seconds) in script {
        let ticks = (seconds / DT).round() as usize;
        for _ in 0..ticks {
            let sp = h.tick(stick);
            let step = (sp.velocity - previous).abs();
            assert!(step <= bound, "velocity step {step} > {bound}");
            assert!(sp.acceleration.abs() <= 4.0 + 1e-4);
            previous = sp.velocity;

            match (was_held, sp.position.is_some()) {
                (false, true) => engagements += 1,
                (true, false) => releases += 1,
                _ => {}
            }
            was_held = sp.position.is_some();
        }
    }

    assert_eq!(engagements, 3);
    assert_eq!(releases, 2);
    assert!(h.last.position.is_some());
    assert_eq!(h.last.velocity, 0.0);
}

#[test]
fn stick_unlock_reseeds_from_feedback() {
    let mut h = Harness::activated(-5.0, 0.0);
    h.tick(0.0);
    assert_eq!(h.task.lock(), PositionLock::Locked { position: -5.0 });

    // Downstream applied 0.3 m/s while holding (its own position loop).
    h.feedback_velocity = 0.3;
    let sp = h.tick(0.6);

    assert_eq!(h.task.lock(), PositionLock::Unlocked);
    assert_eq!(sp.position, None);

    // Same step computed on a bare generator seeded with the feedback velocity.
    let params = SmoothVelParams::default();
    let (_, expected) = JerkLimitedTrajectory::new(Limits::symmetric(
        params.vel_down_max,
        params.acc_down_max,
        params.jerk_max,
    ))
    .reset(0.0, 0.3, -5.0)
    .update_durations(DT, 0.6 * params.vel_down_max)
    .integrate(DT);

    assert_eq!(sp.velocity, expected.velocity);
    assert_eq!(sp.acceleration, expected.acceleration);
}

#[test]
fn unlocked_jerk_is_configured_limit() {
    let mut h = Harness::activated(-5.0, 0.0);
    let sp = h.tick(-1.0);
    // First tick from rest: full configured jerk.
    assert!((sp.jerk + SmoothVelParams::default().jerk_max).abs() < 1e-3);
    assert_eq!(h.task.trajectory().limits().max_jerk, 8.0);
}

#[test]
fn locked_jerk_is_reduced() {
    let mut h = Harness::activated(-5.0, 0.5);
    // Release at 0.5 m/s: brake until the lock engages.
    while h.task.lock() == PositionLock::Unlocked {
        h.tick(0.0);
    }
    h.tick(0.0);
    assert_eq!(h.task.trajectory().limits().max_jerk, 1.0);
    assert!(h.last.jerk.abs() <= 1.0 + 1e-3);
}

#[test]
fn climb_uses_up_limits() {
    let mut h = Harness::activated(-5.0, 0.0);
    let params = SmoothVelParams::default();
    let mut peak_accel: f32 = 0.0;
    for _ in 0..1000 {
        let sp = h.tick(-1.0);
        peak_accel = peak_accel.max(-sp.acceleration);
    }
    assert_eq!(h.last.velocity, -params.vel_up_max);
    assert!((peak_accel - params.acc_up_max).abs() < 1e-3);
}

#[test]
fn descent_uses_down_limits() {
    let mut h = Harness::activated(-5.0, 0.0);
    let params = SmoothVelParams::default();
    let mut peak_accel: f32 = 0.0;
    for _ in 0..1000 {
        let sp = h.tick(1.0);
        peak_accel = peak_accel.max(sp.acceleration);
    }
    assert_eq!(h.last.velocity, params.vel_down_max);
    // 1 m/s at 8 m/s³ peaks at sqrt(8) m/s², under the 3 m/s² descent limit.
    assert!(peak_accel <= params.acc_down_max + 1e-4);
}

#[test]
fn reactivation_restarts_unlocked_at_rest() {
    let mut h = Harness::activated(-5.0, 0.0);
    h.tick(0.0);
    assert!(h.task.lock().is_locked());

    h.estimate.z = -1.0;
    h.estimate.vz = 0.4;
    h.task.reactivate(&h.estimate);
    assert_eq!(h.task.lock(), PositionLock::Unlocked);
    assert_eq!(h.task.trajectory().current_velocity(), 0.0);
    assert_eq!(h.task.trajectory().current_position(), -1.0);
}
