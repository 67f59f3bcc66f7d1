//! # Playback controller
//!
//! Drives the animation timeline against a clock to produce the robot
//! state shown each frame. The clock is an explicit injected object, not
//! ambient global time, so tests can crank playback forward
//! deterministically and two controllers never share hidden state.
//!
//! The controller is a small mode machine, idle, playing or paused, in
//! the style of a mode-per-variant module. Playing holds an anchor, the
//! clock time corresponding to timeline zero, so elapsed time is always
//! `now - anchor` and pause/resume cannot double-count.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use std::time::Instant;

// Internal
use crate::pose::{Pose, RobotState};
use crate::timeline::{self, AnimationSegment};
use crate::traj_calc::Waypoint;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Source of playback time in milliseconds.
///
/// Implementations only need to be monotonic. The controller anchors
/// itself against differences of `now_ms`, absolute values never matter.
pub trait PlaybackClock {
    /// The current time [ms]
    fn now_ms(&self) -> f64;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Monotonic wall-clock time for production use.
pub struct SystemClock {
    start: Instant,
}

/// Plays a waypoint sequence against the injected clock.
pub struct PlaybackController<C> {
    clock: C,

    /// The loaded waypoint sequence, kept so the timeline can be rebuilt
    /// on speed changes
    waypoints: Vec<Waypoint>,

    /// The timeline generated from `waypoints` at the current multiplier
    segments: Vec<AnimationSegment>,

    /// Playback speed multiplier applied to every command speed
    speed_multiplier: f64,

    /// Floor applied to effective speeds when generating the timeline
    min_effective_speed: f64,

    mode: PlaybackMode,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The possible playback modes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PlaybackMode {
    /// Not running. `rest_ms` is the timeline position shown while idle,
    /// zero after a load, the total after a finished run. Play starts a
    /// fresh run from zero
    Idle { rest_ms: f64 },

    /// Running. `anchor_ms` is the clock time corresponding to timeline
    /// zero
    Playing { anchor_ms: f64 },

    /// Suspended partway through. Play resumes from `elapsed_ms`
    Paused { elapsed_ms: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl<C: PlaybackClock> PlaybackController<C> {
    /// Create a controller with nothing loaded.
    pub fn new(clock: C) -> Self {
        PlaybackController {
            clock,
            waypoints: Vec::new(),
            segments: Vec::new(),
            speed_multiplier: 1.0,
            min_effective_speed: timeline::MIN_EFFECTIVE_SPEED,
            mode: PlaybackMode::Idle { rest_ms: 0.0 },
        }
    }

    /// Set the floor applied to effective speeds, from
    /// `Params::min_effective_speed`.
    ///
    /// Takes effect from the next timeline regeneration, set it before
    /// loading waypoints.
    pub fn set_min_effective_speed(&mut self, min_effective_speed: f64) {
        self.min_effective_speed = min_effective_speed;
    }

    /// Load a waypoint sequence, rebuilding the timeline and cancelling
    /// any playback in progress.
    pub fn load(&mut self, waypoints: Vec<Waypoint>) {
        self.waypoints = waypoints;
        self.segments = timeline::generate_segments(
            &self.waypoints,
            self.speed_multiplier,
            self.min_effective_speed,
        );
        self.mode = PlaybackMode::Idle { rest_ms: 0.0 };

        debug!(
            "Loaded {} waypoints, timeline runs for {} ms",
            self.waypoints.len(),
            self.total_duration_ms()
        );
    }

    /// Start or resume playback. No-op if already playing.
    pub fn play(&mut self) {
        match self.mode {
            PlaybackMode::Idle { .. } => {
                debug!("Playback started");
                self.mode = PlaybackMode::Playing {
                    anchor_ms: self.clock.now_ms(),
                };
            }
            PlaybackMode::Paused { elapsed_ms } => {
                debug!("Playback resumed at {} ms", elapsed_ms);
                // Anchor in the past by the already-played time, so the
                // resumed run neither replays nor skips anything
                self.mode = PlaybackMode::Playing {
                    anchor_ms: self.clock.now_ms() - elapsed_ms,
                };
            }
            PlaybackMode::Playing { .. } => (),
        }
    }

    /// Suspend playback, keeping the current position. No-op unless
    /// playing.
    pub fn pause(&mut self) {
        if let PlaybackMode::Playing { .. } = self.mode {
            let elapsed_ms = self.elapsed_ms();
            debug!("Playback paused at {} ms", elapsed_ms);
            self.mode = PlaybackMode::Paused { elapsed_ms };
        }
    }

    /// Jump to a position on the timeline [ms], clamped to its ends.
    ///
    /// Seeking while paused or idle moves the resume point, the next
    /// `play` continues from there. Seeking while playing re-anchors the
    /// running playback.
    pub fn seek(&mut self, elapsed_ms: f64) {
        let target = elapsed_ms.max(0.0).min(self.total_duration_ms());

        match self.mode {
            PlaybackMode::Playing { .. } => {
                self.mode = PlaybackMode::Playing {
                    anchor_ms: self.clock.now_ms() - target,
                };
            }
            _ => {
                self.mode = PlaybackMode::Paused { elapsed_ms: target };
            }
        }
    }

    /// Change the playback speed without moving the robot.
    ///
    /// The timeline is rebuilt with the new effective speeds and the
    /// position re-anchored at the same fraction of the run, so the pose
    /// immediately after the change equals the pose immediately before.
    /// Only the rate at which the remainder plays out changes.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        let old_total = self.total_duration_ms();
        let progress = if old_total > 0.0 {
            self.elapsed_ms() / old_total
        } else {
            0.0
        };

        self.speed_multiplier = multiplier;
        self.segments = timeline::generate_segments(
            &self.waypoints,
            multiplier,
            self.min_effective_speed,
        );

        let new_elapsed = progress * self.total_duration_ms();

        match self.mode {
            PlaybackMode::Playing { .. } => {
                self.mode = PlaybackMode::Playing {
                    anchor_ms: self.clock.now_ms() - new_elapsed,
                };
            }
            PlaybackMode::Paused { .. } => {
                self.mode = PlaybackMode::Paused {
                    elapsed_ms: new_elapsed,
                };
            }
            PlaybackMode::Idle { .. } => (),
        }
    }

    /// The per-frame read of the controller.
    ///
    /// Returns the state to show. A playing run whose clock has passed
    /// the end of the timeline snaps to the final pose and goes idle,
    /// that is how a run finishes.
    pub fn step(&mut self) -> RobotState {
        if let PlaybackMode::Playing { anchor_ms } = self.mode {
            let total_ms = self.total_duration_ms();

            if self.clock.now_ms() - anchor_ms > total_ms {
                info!("Playback finished after {} ms", total_ms);
                self.mode = PlaybackMode::Idle { rest_ms: total_ms };
            }
        }

        self.robot_state()
    }

    /// The state the robot is showing right now, without advancing the
    /// mode machine.
    pub fn robot_state(&self) -> RobotState {
        let pose = match timeline::interpolate(&self.segments, self.elapsed_ms())
        {
            Some(pose) => pose,
            // Nothing to animate, rest at the end of whatever is loaded
            None => self.rest_pose(),
        };

        RobotState::from_pose(&pose, self.is_playing())
    }

    /// Current position on the timeline [ms], clamped to its span.
    pub fn elapsed_ms(&self) -> f64 {
        match self.mode {
            PlaybackMode::Idle { rest_ms } => rest_ms,
            PlaybackMode::Paused { elapsed_ms } => elapsed_ms,
            PlaybackMode::Playing { anchor_ms } => (self.clock.now_ms()
                - anchor_ms)
                .max(0.0)
                .min(self.total_duration_ms()),
        }
    }

    /// Total duration of the loaded timeline [ms].
    pub fn total_duration_ms(&self) -> f64 {
        timeline::total_duration_ms(&self.segments)
    }

    /// Fraction of the run completed, in [0, 1]. Zero when nothing with a
    /// duration is loaded.
    pub fn progress(&self) -> f64 {
        let total_ms = self.total_duration_ms();

        if total_ms > 0.0 {
            self.elapsed_ms() / total_ms
        } else {
            0.0
        }
    }

    /// True while a run is in progress.
    pub fn is_playing(&self) -> bool {
        matches!(self.mode, PlaybackMode::Playing { .. })
    }

    /// The playback speed multiplier currently applied.
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// The loaded waypoint sequence.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The timeline generated for the loaded waypoints.
    pub fn segments(&self) -> &[AnimationSegment] {
        &self.segments
    }

    /// Where the robot rests when there is nothing to animate: the last
    /// waypoint if one is loaded, the origin otherwise.
    fn rest_pose(&self) -> Pose {
        match self.waypoints.last() {
            Some(waypoint) => waypoint.pose,
            None => Pose::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_support {
    use super::PlaybackClock;
    use std::{cell::Cell, rc::Rc};

    /// Hand-cranked clock for deterministic playback tests. Clones share
    /// the same time, keep one handle to advance and give one away.
    #[derive(Clone)]
    pub struct TestClock {
        now_ms: Rc<Cell<f64>>,
    }

    impl TestClock {
        pub fn new() -> Self {
            TestClock {
                now_ms: Rc::new(Cell::new(0.0)),
            }
        }

        pub fn advance(&self, ms: f64) {
            self.now_ms.set(self.now_ms.get() + ms);
        }
    }

    impl PlaybackClock for TestClock {
        fn now_ms(&self) -> f64 {
            self.now_ms.get()
        }
    }
}
