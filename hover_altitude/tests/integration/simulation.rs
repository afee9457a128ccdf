//! Closed-loop scenarios through the tick runner and simulated vehicle.

use hover_altitude::cycle::TickRunner;
use hover_altitude::sim::{Scenario, VerticalPlant};
use hover_common::config::load_config_from_str;

use super::max_velocity_step;

fn run(scenario: Scenario, start_z: f32) -> (TickRunner, hover_altitude::cycle::RunSummary) {
    let config = load_config_from_str("").expect("defaults must load");
    let mut runner = TickRunner::new(config.smooth_vel, scenario, VerticalPlant::at_rest(start_z));
    let ticks = runner.scenario_ticks();
    let summary = runner.run(ticks, false);
    (runner, summary)
}

#[test]
fn hover_holds_start_altitude() {
    let (runner, summary) = run(Scenario::Hover, -10.0);
    assert_eq!(summary.held_position, Some(-10.0));
    assert_eq!(summary.lock_engagements, 1);
    assert_eq!(summary.max_velocity_step, 0.0);
    assert!((runner.plant().estimate().z + 10.0).abs() < 1e-6);
}

#[test]
fn climb_release_cycles_lock_smoothly() {
    let (runner, summary) = run(Scenario::ClimbRelease, -10.0);

    assert!(summary.all_finite);
    assert_eq!(summary.lock_engagements, 3);
    assert_eq!(summary.lock_releases, 2);
    assert_eq!(summary.final_velocity, 0.0);
    assert_eq!(summary.final_acceleration, 0.0);
    assert!(summary.held_position.is_some());

    // Unlock reseeds from the plant's applied velocity, which includes its
    // position correction; that residual is small after a settled hold.
    assert!(
        summary.max_velocity_step < max_velocity_step() + 0.05,
        "max step {}",
        summary.max_velocity_step
    );
    assert!(summary.max_abs_jerk <= runner.task().params().jerk_max + 1e-2);

    // Net climb: 2.5 s at up to 2.4 m/s, then 1.5 s descent at 0.5 m/s.
    assert!(summary.final_z < -14.0, "final z {}", summary.final_z);
}

#[test]
fn step_reset_scenario_stays_bounded() {
    let (runner, summary) = run(Scenario::StepReset, -10.0);

    assert!(summary.all_finite);
    assert!(summary.held_position.is_some());
    // Velocity resets snap the setpoint by the injected 0.3 m/s at most.
    assert!(
        summary.max_velocity_step < 0.3 + max_velocity_step() + 0.05,
        "max step {}",
        summary.max_velocity_step
    );
    assert_eq!(runner.task().reset_synchronizer().shadow().position, 2);
    assert_eq!(runner.task().reset_synchronizer().shadow().velocity, 1);
}

#[test]
fn runner_history_tracks_latest_setpoint() {
    let (runner, summary) = run(Scenario::ClimbRelease, -10.0);
    let last = runner.history().last().copied().expect("history empty");
    assert_eq!(last.velocity, summary.final_velocity);
    assert_eq!(last.position, summary.held_position);
    assert_eq!(summary.recent_mean_velocity, 0.0);
}
