//! Command-line trajectory playback driver.
//!
//! Loads a trajectory script, computes its waypoints and timeline, and
//! plays it back against the wall clock in a fixed-rate cycle, logging the
//! robot state as it goes. Each run gets a session directory holding the
//! log file, JSON snapshots of the computed trajectory and, if requested,
//! a CSV trace of the robot state over the run.
//!
//! With `--list` the trajectory is computed and printed without playback,
//! which is handy for checking a script before taking it to the mat.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use traj_engine::engine::TrajEngine;
use traj_engine::params::Params;
use traj_engine::pose::Pose;
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one playback cycle.
const CYCLE_PERIOD_S: f64 = 0.02;

/// Number of cycles between state log lines, giving roughly 1 Hz.
const CYCLES_PER_STATE_LOG: u64 = (1.0 / CYCLE_PERIOD_S) as u64;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options for the playback driver.
#[derive(Debug, StructOpt)]
#[structopt(name = "traj_exec", about = "Trajectory script playback driver")]
struct Opts {
    /// Path to the trajectory script to play
    #[structopt(parse(from_os_str))]
    script_path: PathBuf,

    /// Path to an engine parameter TOML file, defaults apply if omitted
    #[structopt(short, long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Start X position [cm]
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    start_x: f64,

    /// Start Y position [cm]
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    start_y: f64,

    /// Start heading, 0 = north, clockwise positive [deg]
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    start_heading: f64,

    /// Global speed multiplier applied to the whole timeline
    #[structopt(short, long, default_value = "1.0")]
    multiplier: f64,

    /// Print the computed waypoints and exit without playing
    #[structopt(short, long)]
    list: bool,

    /// Write a CSV trace of the robot state into the session directory
    #[structopt(short, long)]
    trace: bool,
}

/// One row of the state trace CSV.
#[derive(Serialize)]
struct TraceRecord {
    elapsed_ms: f64,
    x_cm: f64,
    y_cm: f64,
    heading_deg: f64,
    is_running: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    let opts = Opts::from_args();

    let session =
        Session::new("traj_exec", "sessions").wrap_err("Failed to create the session")?;

    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    info!("Trajectory Playback Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: Params = match opts.params {
        Some(ref path) => {
            let p = util::params::load(path)
                .wrap_err_with(|| format!("Could not load params from {:?}", path))?;
            info!("Engine parameters loaded from {:?}", path);
            p
        }
        None => {
            info!("No parameter file given, using defaults");
            Params::default()
        }
    };

    // ---- LOAD SCRIPT ----

    info!("Loading script from {:?}", opts.script_path);

    let script_text = fs::read_to_string(&opts.script_path)
        .wrap_err_with(|| format!("Failed to read the script {:?}", opts.script_path))?;

    // ---- BUILD TRAJECTORY ----

    let mut engine = TrajEngine::with_system_clock(params);
    engine.set_start_pose(Pose::new(opts.start_x, opts.start_y, opts.start_heading));
    engine.set_script(&script_text);
    engine.set_speed_multiplier(opts.multiplier);

    for warning in engine.warnings() {
        warn!(
            "Script line {} dropped: {}",
            warning.line_index + 1,
            warning.reason
        );
    }

    info!(
        "Script parsed, {} command(s) ({} line(s) dropped)",
        engine.commands().len(),
        engine.warnings().len()
    );
    info!(
        "Trajectory lasts {:.02} s at multiplier {} and turns {:.01} deg in total\n",
        engine.total_duration_ms() / 1000.0,
        opts.multiplier,
        engine.total_rotation_deg()
    );

    // ---- SAVE TRAJECTORY PRODUCTS ----

    session
        .save_json("waypoints.json", &engine.waypoints())
        .wrap_err("Failed to save the waypoints")?;
    session
        .save_json("segments.json", &engine.segments())
        .wrap_err("Failed to save the timeline")?;

    // ---- LIST MODE ----

    if opts.list {
        for (i, waypoint) in engine.waypoints().iter().enumerate() {
            let provenance = match waypoint.source {
                Some(ref source) => {
                    format!("{:?} at {} /s", source.kind, source.speed)
                }
                None => "start".into(),
            };

            info!(
                "  wp {:3}: ({:8.2}, {:8.2}) cm, heading {:8.2} deg  [{}]",
                i,
                waypoint.pose.x_cm(),
                waypoint.pose.y_cm(),
                waypoint.pose.heading_deg,
                provenance
            );
        }

        info!("List mode, not playing back");
        return Ok(());
    }

    // ---- PLAYBACK LOOP ----

    let mut trace_writer = match opts.trace {
        true => {
            let trace_path = session.session_root.join("state_trace.csv");
            let writer = csv::Writer::from_path(&trace_path)
                .wrap_err("Failed to create the state trace")?;
            info!("State trace: {:?}", trace_path);
            Some(writer)
        }
        false => None,
    };

    info!("Beginning playback\n");

    engine.play();

    let mut num_cycles: u64 = 0;

    while engine.is_playing() {
        let cycle_start_instant = Instant::now();

        let state = engine.step();

        if let Some(ref mut writer) = trace_writer {
            writer
                .serialize(TraceRecord {
                    elapsed_ms: engine.elapsed_ms(),
                    x_cm: state.x_cm,
                    y_cm: state.y_cm,
                    heading_deg: state.heading_deg,
                    is_running: state.is_running,
                })
                .wrap_err("Failed to write to the state trace")?;
        }

        if num_cycles % CYCLES_PER_STATE_LOG == 0 {
            info!(
                "t = {:7.2} s ({:5.1} %): ({:8.2}, {:8.2}) cm, heading {:8.2} deg",
                engine.elapsed_ms() / 1000.0,
                engine.progress() * 100.0,
                state.x_cm,
                state.y_cm,
                state.heading_deg
            );
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
            ),
        }

        num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    let final_state = engine.robot_state();

    info!(
        "\nPlayback complete: ({:.2}, {:.2}) cm, heading {:.2} deg ({:.2} deg displayed)",
        final_state.x_cm,
        final_state.y_cm,
        final_state.heading_deg,
        final_state.display_heading_deg()
    );

    session
        .save_json("final_state.json", &final_state)
        .wrap_err("Failed to save the final state")?;

    if let Some(mut writer) = trace_writer {
        writer.flush().wrap_err("Failed to flush the state trace")?;
    }

    info!("End of execution");

    Ok(())
}
