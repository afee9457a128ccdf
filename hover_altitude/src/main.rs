//! # Hover Altitude Simulator
//!
//! Runs the smooth-velocity altitude task against a simulated vehicle for a
//! scripted scenario and reports continuity and timing statistics.
//!
//! Parameters come from `--config`, the system config path, or built-in defaults.

use clap::Parser;
use hover_altitude::cycle::TickRunner;
use hover_altitude::sim::{Scenario, VerticalPlant};
use hover_common::config::{HoverConfig, LogLevel, load_config};
use hover_common::consts::DEFAULT_CONFIG_PATH;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, info_span, warn};
use tracing_subscriber::EnvFilter;

/// Hover Altitude — jerk-limited vertical manual control
#[derive(Parser, Debug)]
#[command(name = "hover_altitude")]
#[command(version)]
#[command(about = "Simulates the smooth-velocity altitude task with automatic position hold")]
struct Args {
    /// Path to the parameter TOML. Falls back to /etc/hover/altitude.toml,
    /// then to built-in defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scripted flight to run.
    #[arg(long, value_enum, default_value_t = Scenario::ClimbRelease)]
    scenario: Scenario,

    /// Number of ticks (default: the whole scenario).
    #[arg(long)]
    ticks: Option<u64>,

    /// Pace ticks at the configured period instead of free-running.
    #[arg(long)]
    realtime: bool,

    /// Starting altitude [m], down-positive.
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    start_z: f32,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let path = match args.config {
        Some(ref path) => Some(path.as_path()),
        None if default_path.exists() => Some(default_path),
        None => None,
    };
    let loaded = match path {
        Some(path) => load_config(path).map_err(|e| format!("{}: {e}", path.display())),
        None => Ok(HoverConfig::default()),
    };
    let level = loaded
        .as_ref()
        .map(|config| config.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, level);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("FATAL: {e}");
            process::exit(1);
        }
    };

    let _span = info_span!("service", name = %config.shared.service_name).entered();
    info!("Hover Altitude v{} starting...", env!("CARGO_PKG_VERSION"));
    if path.is_none() {
        info!("No config file, using built-in defaults");
    }

    if let Err(e) = run(&args, &config) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, config: &HoverConfig) -> Result<(), Box<dyn std::error::Error>> {
    let params = config.smooth_vel;
    info!(
        "Params OK: tick={}µs, jerk_max={}, acc_up/down={}/{}, vel_up/down={}/{}",
        params.tick_us,
        params.jerk_max,
        params.acc_up_max,
        params.acc_down_max,
        params.vel_up_max,
        params.vel_down_max,
    );

    let mut runner = TickRunner::new(params, args.scenario, VerticalPlant::at_rest(args.start_z));
    let ticks = args.ticks.unwrap_or_else(|| runner.scenario_ticks());
    info!(
        "Running scenario {:?} for {} ticks ({})",
        args.scenario,
        ticks,
        if args.realtime { "real-time" } else { "free-running" }
    );

    let summary = runner.run(ticks, args.realtime);

    if !summary.all_finite {
        return Err("non-finite setpoint emitted".into());
    }
    if summary.overruns > 0 {
        warn!("{} tick(s) exceeded the {}µs budget", summary.overruns, params.tick_us);
    }

    if args.json {
        let json = serde_json::to_string(&summary)?;
        info!(summary = %json, "Run complete");
    } else {
        info!(
            "Run complete: z={:.3} v={:.3} held={:?} locks={}/{} max_dv={:.4} max_jerk={:.2} avg_tick={}ns",
            summary.final_z,
            summary.final_velocity,
            summary.held_position,
            summary.lock_engagements,
            summary.lock_releases,
            summary.max_velocity_step,
            summary.max_abs_jerk,
            summary.avg_tick_ns,
        );
    }
    Ok(())
}

fn setup_tracing(args: &Args, level: LogLevel) {
    let directive = if args.verbose {
        LogLevel::Debug.as_directive()
    } else {
        level.as_directive()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
