//! Position hold: lock entry and convergence to exact rest.

use hover_altitude::lock::PositionLock;

use super::{DT, Harness};

/// Ticks until the setpoint reaches exact rest with a held position.
fn ticks_to_rest(h: &mut Harness, limit: usize) -> Option<usize> {
    (1..=limit).find(|_| {
        let sp = h.tick(0.0);
        sp.position.is_some() && sp.velocity == 0.0 && sp.acceleration == 0.0
    })
}

#[test]
fn centred_stick_converges_to_exact_rest() {
    let mut h = Harness::activated(-3.0, 0.8);
    let settled = ticks_to_rest(&mut h, 1000).expect("never reached rest");
    // Braking 0.8 m/s at 8 m/s³ takes ~0.63 s, the locked tail well under 1 s.
    assert!(settled < 500, "took {settled} ticks");

    let held = h.last.position;
    for _ in 0..2000 {
        let sp = h.tick(0.0);
        assert_eq!(sp.velocity, 0.0);
        assert_eq!(sp.acceleration, 0.0);
        assert_eq!(sp.position, held);
    }
}

#[test]
fn lock_stays_engaged_once_entered() {
    let mut h = Harness::activated(-3.0, -1.2);
    let mut locked = false;
    for _ in 0..1500 {
        let sp = h.tick(0.0);
        if locked {
            assert!(sp.position.is_some(), "lock dropped without stick input");
        }
        locked |= sp.position.is_some();
    }
    assert!(locked);
}

#[test]
fn slow_drift_locks_on_first_tick() {
    let mut h = Harness::activated(-2.0, 0.05);
    let sp = h.tick(0.0);

    // |v| < 0.1 and |a| < 0.2 after one step: lock at the integrated position.
    let expected = -2.0 + 0.05 * DT;
    let held = sp.position.expect("lock not engaged");
    assert!((held - expected).abs() < 1e-5, "held {held}");
    assert_eq!(Some(held), h.task.lock().position());
    // Still above the snap threshold, so the feedforward is not forced yet.
    assert!(sp.velocity > 0.0 && sp.velocity < 0.05);

    let settled = ticks_to_rest(&mut h, 500).expect("never reached rest");
    // Locked jerk is 1 m/s³: a 0.05 m/s residual needs ~0.45 s.
    assert!(settled < 250, "took {settled} ticks");
}

#[test]
fn held_position_ignores_estimate_drift() {
    let mut h = Harness::activated(-4.0, 0.0);
    let sp = h.tick(0.0);
    assert_eq!(sp.position, Some(-4.0));

    // Vehicle sags below the hold; the setpoint must not chase it.
    for i in 0..250 {
        h.estimate.z = -4.0 + 0.001 * i as f32;
        let sp = h.tick(0.0);
        assert_eq!(sp.position, Some(-4.0));
    }
}

#[test]
fn sub_deadzone_stick_keeps_hold() {
    let mut h = Harness::activated(-1.0, 0.0);
    h.tick(0.0);
    for _ in 0..100 {
        let sp = h.tick(f32::EPSILON * 0.5);
        assert_eq!(sp.position, Some(-1.0));
    }
    assert_eq!(h.task.lock(), PositionLock::Locked { position: -1.0 });
}

#[test]
fn never_locks_with_stick_deflected() {
    let mut h = Harness::activated(-1.0, 0.0);
    // 0.01 stick → 0.01 m/s descent: settled but pilot still commanding.
    for _ in 0..1000 {
        let sp = h.tick(0.01);
        assert_eq!(sp.position, None);
    }
    assert!((h.last.velocity - 0.01).abs() < 1e-6);
}
