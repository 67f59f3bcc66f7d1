//! # Engine facade
//!
//! [`TrajEngine`] ties the pipeline together: script text and its undo
//! history, the parsed commands, the calculated waypoints and the
//! playback controller. Every edit recomputes the downstream state
//! wholesale, script to waypoints to timeline, and cancels any playback
//! in progress. This is the one object a frontend drives.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector2;

// Internal
use crate::editor;
use crate::params::Params;
use crate::playback::{PlaybackClock, PlaybackController, SystemClock};
use crate::pose::{Pose, RobotState};
use crate::script::{self, Command, LineWarning, ScriptHistory};
use crate::timeline::AnimationSegment;
use crate::traj_calc::{self, Waypoint};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The full trajectory engine.
///
/// Generic over the playback clock so tests can drive it
/// deterministically, production code uses
/// [`TrajEngine::with_system_clock`].
pub struct TrajEngine<C> {
    params: Params,

    /// Where trajectories start from
    start_pose: Pose,

    /// Current script text, the authoritative form of the trajectory
    script_text: String,

    /// Commands parsed out of `script_text`
    commands: Vec<Command>,

    /// Warnings from the last parse, one per flagged line
    warnings: Vec<LineWarning>,

    /// Undo/redo over the script text
    history: ScriptHistory,

    /// Playback over the calculated waypoints
    playback: PlaybackController<C>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: PlaybackClock> TrajEngine<C> {
    /// Create an engine with an empty script and the given clock driving
    /// playback.
    pub fn new(params: Params, clock: C) -> Self {
        let history = ScriptHistory::new("", params.history_capacity);
        let start_pose = Pose::default();

        let mut playback = PlaybackController::new(clock);
        playback.set_min_effective_speed(params.min_effective_speed);
        playback.load(traj_calc::calculate(&[], &start_pose));

        TrajEngine {
            params,
            start_pose,
            script_text: String::new(),
            commands: Vec::new(),
            warnings: Vec::new(),
            history,
            playback,
        }
    }

    // -- Editing ------------------------------------------------------------

    /// Replace the script, recompute the trajectory and record the edit
    /// in the undo history.
    pub fn set_script(&mut self, text: &str) {
        self.apply_script(text);
        self.history.commit(text);
    }

    /// Step the script back one edit. Returns false at the boundary,
    /// nothing changes.
    pub fn undo(&mut self) -> bool {
        let text = match self.history.undo() {
            Some(text) => text.to_string(),
            None => return false,
        };

        self.apply_script(&text);
        true
    }

    /// Step the script forward one edit. Returns false at the boundary,
    /// nothing changes.
    pub fn redo(&mut self) -> bool {
        let text = match self.history.redo() {
            Some(text) => text.to_string(),
            None => return false,
        };

        self.apply_script(&text);
        true
    }

    /// Append the commands that drive from the end of the current
    /// trajectory to the clicked point, then recompute and record the
    /// edit.
    ///
    /// A click inside both dead zones appends nothing and leaves the
    /// script and history untouched.
    pub fn click_target(&mut self, x_cm: f64, y_cm: f64) {
        let target = Vector2::new(x_cm, y_cm);

        // The clicked motion continues from wherever the script ends
        let end_pose = match self.playback.waypoints().last() {
            Some(waypoint) => waypoint.pose,
            None => self.start_pose,
        };

        let extended = editor::append_toward_point(
            &self.commands,
            &end_pose,
            &target,
            &self.params,
        );

        if extended.len() == self.commands.len() {
            return;
        }

        let text = script::serialize(&extended);
        self.set_script(&text);
    }

    /// Move the start pose and recompute the trajectory under the
    /// unchanged script.
    pub fn set_start_pose(&mut self, pose: Pose) {
        self.start_pose = pose;
        self.recompute();
    }

    // -- Playback -----------------------------------------------------------

    /// Start or resume playback.
    pub fn play(&mut self) {
        self.playback.play();
    }

    /// Suspend playback, keeping the position.
    pub fn pause(&mut self) {
        self.playback.pause();
    }

    /// Jump to a position on the timeline [ms].
    pub fn seek(&mut self, elapsed_ms: f64) {
        self.playback.seek(elapsed_ms);
    }

    /// Change the playback speed without moving the robot.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.playback.set_speed_multiplier(multiplier);
    }

    /// Advance playback one frame and get the state to show.
    pub fn step(&mut self) -> RobotState {
        self.playback.step()
    }

    // -- Snapshots ----------------------------------------------------------

    /// The current script text.
    pub fn script_text(&self) -> &str {
        &self.script_text
    }

    /// The commands parsed from the current script.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Warnings from the last parse, one per flagged line.
    pub fn warnings(&self) -> &[LineWarning] {
        &self.warnings
    }

    /// The calculated waypoint sequence.
    pub fn waypoints(&self) -> &[Waypoint] {
        self.playback.waypoints()
    }

    /// The animation timeline for the current trajectory.
    pub fn segments(&self) -> &[AnimationSegment] {
        self.playback.segments()
    }

    /// The state the robot is showing right now.
    pub fn robot_state(&self) -> RobotState {
        self.playback.robot_state()
    }

    /// The trajectory's start pose.
    pub fn start_pose(&self) -> Pose {
        self.start_pose
    }

    /// Signed cumulative rotation over the whole trajectory [deg].
    pub fn total_rotation_deg(&self) -> f64 {
        traj_calc::total_rotation_deg(self.playback.waypoints())
    }

    /// Current position on the timeline [ms].
    pub fn elapsed_ms(&self) -> f64 {
        self.playback.elapsed_ms()
    }

    /// Total duration of the timeline [ms].
    pub fn total_duration_ms(&self) -> f64 {
        self.playback.total_duration_ms()
    }

    /// Fraction of the run completed, in [0, 1].
    pub fn progress(&self) -> f64 {
        self.playback.progress()
    }

    /// True while a run is in progress.
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// True if an undo would change the script.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True if a redo would change the script.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The engine parameters in force.
    pub fn params(&self) -> &Params {
        &self.params
    }

    // -- Internals ----------------------------------------------------------

    /// Install new script text without touching the history.
    fn apply_script(&mut self, text: &str) {
        let report = script::parse_report_with_params(text, &self.params);

        if !report.warnings.is_empty() {
            debug!("Script has {} flagged line(s)", report.warnings.len());
        }

        self.script_text = text.to_string();
        self.commands = report.commands;
        self.warnings = report.warnings;

        self.recompute();
    }

    /// Rebuild waypoints and timeline from the current commands and
    /// start pose. Cancels any playback in progress.
    fn recompute(&mut self) {
        let waypoints = traj_calc::calculate(&self.commands, &self.start_pose);

        debug!(
            "Recomputed trajectory, {} command(s) -> {} waypoint(s)",
            self.commands.len(),
            waypoints.len()
        );

        self.playback.load(waypoints);
    }
}

impl TrajEngine<SystemClock> {
    /// Create an engine playing back against the system wall clock.
    pub fn with_system_clock(params: Params) -> Self {
        Self::new(params, SystemClock::new())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
