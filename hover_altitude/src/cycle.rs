//! Fixed-period tick loop.
//!
//! `TickRunner` drives an [`AltitudeSmoothVelTask`] against a
//! [`VerticalPlant`] following a [`Scenario`] script. Every tick it samples
//! the plant, runs the task, feeds the setpoint back into the plant and
//! records timing plus continuity statistics. In real-time mode ticks are
//! paced against absolute deadlines so sleep jitter does not accumulate.

use std::time::{Duration, Instant};

use heapless::Deque;
use serde::Serialize;
use tracing::warn;

use hover_common::altitude::config::SmoothVelParams;
use hover_common::altitude::input::ManualInput;
use hover_common::altitude::setpoint::VerticalSetpoint;

use crate::sim::{Scenario, ScenarioEvent, VerticalPlant};
use crate::task::{AltitudeSmoothVelTask, TickInput};

/// Number of recent setpoints kept by the runner.
pub const HISTORY_LEN: usize = 64;

// ─── Tick Statistics ────────────────────────────────────────────────

/// Tick timing statistics. O(1) update, no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    pub tick_count: u64,
    /// Last task update duration [ns].
    pub last_tick_ns: u64,
    pub min_tick_ns: u64,
    pub max_tick_ns: u64,
    pub sum_tick_ns: u64,
    /// Ticks whose body took longer than the tick period.
    pub overruns: u64,
    /// Maximum lateness of a real-time wake-up [ns].
    pub max_latency_ns: u64,
}

impl Default for TickStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TickStats {
    pub const fn new() -> Self {
        Self {
            tick_count: 0,
            last_tick_ns: 0,
            min_tick_ns: u64::MAX,
            max_tick_ns: 0,
            sum_tick_ns: 0,
            overruns: 0,
            max_latency_ns: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, duration_ns: u64, latency_ns: u64) {
        self.tick_count += 1;
        self.last_tick_ns = duration_ns;
        self.min_tick_ns = self.min_tick_ns.min(duration_ns);
        self.max_tick_ns = self.max_tick_ns.max(duration_ns);
        self.sum_tick_ns = self.sum_tick_ns.saturating_add(duration_ns);
        self.max_latency_ns = self.max_latency_ns.max(latency_ns);
    }

    /// Average tick time [ns] (0 if no ticks).
    #[inline]
    pub fn avg_tick_ns(&self) -> u64 {
        if self.tick_count == 0 {
            0
        } else {
            self.sum_tick_ns / self.tick_count
        }
    }
}

// ─── Run Summary ────────────────────────────────────────────────────

/// Outcome of [`TickRunner::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub final_z: f32,
    pub final_velocity: f32,
    pub final_acceleration: f32,
    /// Held position at the end of the run, if locked.
    pub held_position: Option<f32>,
    pub lock_engagements: u32,
    pub lock_releases: u32,
    /// Largest change of the velocity setpoint between consecutive ticks [m/s].
    pub max_velocity_step: f32,
    /// Largest reported jerk magnitude [m/s³].
    pub max_abs_jerk: f32,
    /// Mean velocity setpoint over the recent window [m/s].
    pub recent_mean_velocity: f32,
    /// Every emitted setpoint had finite components.
    pub all_finite: bool,
    pub avg_tick_ns: u64,
    pub max_tick_ns: u64,
    pub overruns: u64,
}

// ─── Runner ─────────────────────────────────────────────────────────

/// Scenario-driven tick loop.
#[derive(Debug)]
pub struct TickRunner {
    task: AltitudeSmoothVelTask,
    plant: VerticalPlant,
    scenario: Scenario,
    tick_period: Duration,
    dt: f32,
    tick: u64,
    history: Deque<VerticalSetpoint, HISTORY_LEN>,
    stats: TickStats,
    last_velocity: Option<f32>,
    max_velocity_step: f32,
    max_abs_jerk: f32,
    lock_engagements: u32,
    lock_releases: u32,
    all_finite: bool,
}

impl TickRunner {
    /// Runner with the task activated on the plant's initial state.
    pub fn new(params: SmoothVelParams, scenario: Scenario, plant: VerticalPlant) -> Self {
        let mut task = AltitudeSmoothVelTask::new(params);
        task.activate(&plant.estimate());
        Self {
            tick_period: Duration::from_micros(u64::from(params.tick_us)),
            dt: params.dt(),
            task,
            plant,
            scenario,
            tick: 0,
            history: Deque::new(),
            stats: TickStats::new(),
            last_velocity: None,
            max_velocity_step: 0.0,
            max_abs_jerk: 0.0,
            lock_engagements: 0,
            lock_releases: 0,
            all_finite: true,
        }
    }

    /// Number of ticks covering the whole scenario script.
    pub fn scenario_ticks(&self) -> u64 {
        (self.scenario.duration_s() / self.dt).ceil() as u64
    }

    /// Run one tick and return the emitted setpoint.
    pub fn step(&mut self) -> VerticalSetpoint {
        let t = self.tick as f32 * self.dt;
        // Windows share their bounds exactly, so every event fires once.
        let t_next = (self.tick + 1) as f32 * self.dt;
        for event in self.scenario.events_between(t, t_next) {
            match event {
                ScenarioEvent::PositionReset(dz) => self.plant.inject_position_reset(dz),
                ScenarioEvent::VelocityReset(dvz) => self.plant.inject_velocity_reset(dvz),
            }
        }

        let constraints = self.task.params().constraints();
        let input = TickInput {
            manual: ManualInput::from_stick(self.scenario.stick_at(t), &constraints),
            estimate: self.plant.estimate(),
            feedback_velocity: self.plant.feedback_velocity(),
            constraints,
            dt: self.dt,
        };

        let was_locked = self.task.lock().is_locked();
        let started = Instant::now();
        let setpoint = self.task.update(&input);
        let elapsed_ns = started.elapsed().as_nanos() as u64;

        self.stats.record(elapsed_ns, 0);
        if elapsed_ns > self.tick_period.as_nanos() as u64 {
            self.stats.overruns += 1;
        }

        self.plant.step(&setpoint, self.dt);
        self.observe(&setpoint, was_locked);
        self.tick += 1;
        setpoint
    }

    fn observe(&mut self, setpoint: &VerticalSetpoint, was_locked: bool) {
        match (was_locked, setpoint.is_position_held()) {
            (false, true) => self.lock_engagements += 1,
            (true, false) => self.lock_releases += 1,
            _ => {}
        }
        if let Some(previous) = self.last_velocity {
            self.max_velocity_step = self
                .max_velocity_step
                .max((setpoint.velocity - previous).abs());
        }
        self.last_velocity = Some(setpoint.velocity);
        self.max_abs_jerk = self.max_abs_jerk.max(setpoint.jerk.abs());
        self.all_finite &= setpoint.is_finite();

        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail: a slot was freed above.
        let _ = self.history.push_back(*setpoint);
    }

    /// Run `ticks` ticks, free-running or paced at the tick period.
    pub fn run(&mut self, ticks: u64, realtime: bool) -> RunSummary {
        let mut deadline = Instant::now();
        for _ in 0..ticks {
            self.step();

            if realtime {
                deadline += self.tick_period;
                let now = Instant::now();
                if now > deadline {
                    let late_ns = (now - deadline).as_nanos() as u64;
                    self.stats.max_latency_ns = self.stats.max_latency_ns.max(late_ns);
                    warn!(tick = self.tick, late_ns, "Tick deadline missed");
                } else {
                    std::thread::sleep(deadline - now);
                }
            }
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        let trajectory = self.task.trajectory();
        let last = self.history.back().copied().unwrap_or_default();
        let recent_mean_velocity = if self.history.is_empty() {
            0.0
        } else {
            self.history.iter().map(|sp| sp.velocity).sum::<f32>() / self.history.len() as f32
        };
        RunSummary {
            ticks: self.tick,
            final_z: self.plant.estimate().z,
            final_velocity: last.velocity,
            final_acceleration: last.acceleration,
            held_position: self.task.lock().position(),
            lock_engagements: self.lock_engagements,
            lock_releases: self.lock_releases,
            max_velocity_step: self.max_velocity_step,
            max_abs_jerk: self.max_abs_jerk.max(trajectory.current_jerk().abs()),
            recent_mean_velocity,
            all_finite: self.all_finite,
            avg_tick_ns: self.stats.avg_tick_ns(),
            max_tick_ns: self.stats.max_tick_ns,
            overruns: self.stats.overruns,
        }
    }

    #[inline]
    pub fn task(&self) -> &AltitudeSmoothVelTask {
        &self.task
    }

    #[inline]
    pub fn plant(&self) -> &VerticalPlant {
        &self.plant
    }

    #[inline]
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Most recent setpoints, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &VerticalSetpoint> {
        self.history.iter()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
