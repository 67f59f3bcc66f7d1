//! # Trajectory calculator
//!
//! Evaluates a command list into the sequence of waypoints the robot will
//! pass through. The evaluation is a pure function of the commands and the
//! start pose, a single O(n) pass with no caching, so callers rebuild the
//! whole waypoint list whenever anything changes.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::pose::Pose;
use crate::script::{Command, MotionKind};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A pose the robot passes through, tagged with the command that got it
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// The pose at this waypoint
    pub pose: Pose,

    /// The command that produced this waypoint, `None` for the start pose
    pub source: Option<WaypointSource>,
}

/// The command a waypoint came from.
///
/// Carried on the waypoint so the timeline can be rebuilt from waypoints
/// alone, without going back to the command list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaypointSource {
    /// Index of the producing command in the command list
    pub cmd_index: usize,

    /// Kind of the producing command
    pub kind: MotionKind,

    /// Speed of the producing command
    pub speed: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Evaluate commands into waypoints from the given start pose.
///
/// Always returns `commands.len() + 1` waypoints: the start pose is
/// waypoint 0 and every command contributes exactly one more, zero
/// magnitudes included. Straights move along the current heading, turns
/// add their magnitude to the heading without moving, and the heading is
/// never wrapped, so cumulative rotation can be read straight off the
/// last waypoint.
pub fn calculate(commands: &[Command], start_pose: &Pose) -> Vec<Waypoint> {
    let mut waypoints = Vec::with_capacity(commands.len() + 1);

    waypoints.push(Waypoint {
        pose: *start_pose,
        source: None,
    });

    let mut pose = *start_pose;

    for (cmd_index, command) in commands.iter().enumerate() {
        match command.kind {
            MotionKind::Straight => {
                pose.position_cm += command.magnitude * pose.heading_vector();
            }
            MotionKind::Turn => {
                pose.heading_deg += command.magnitude;
            }
        }

        waypoints.push(Waypoint {
            pose,
            source: Some(WaypointSource {
                cmd_index,
                kind: command.kind,
                speed: command.speed,
            }),
        });
    }

    waypoints
}

/// Signed cumulative rotation over the waypoints [deg], positive
/// clockwise.
///
/// Because headings are never wrapped this is just the heading difference
/// between the last and first waypoints. Empty input gives 0.
pub fn total_rotation_deg(waypoints: &[Waypoint]) -> f64 {
    match (waypoints.first(), waypoints.last()) {
        (Some(first), Some(last)) => {
            last.pose.heading_deg - first.pose.heading_deg
        }
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::script::parse;

    const TOLERANCE: f64 = 1e-9;

    fn assert_pose_close(pose: &Pose, x: f64, y: f64, heading: f64) {
        assert!(
            (pose.x_cm() - x).abs() < TOLERANCE,
            "x = {}, wanted {}",
            pose.x_cm(),
            x
        );
        assert!(
            (pose.y_cm() - y).abs() < TOLERANCE,
            "y = {}, wanted {}",
            pose.y_cm(),
            y
        );
        assert!(
            (pose.heading_deg - heading).abs() < TOLERANCE,
            "heading = {}, wanted {}",
            pose.heading_deg,
            heading
        );
    }

    #[test]
    fn drive_turn_drive() {
        let cmds = parse("reto 100 50\ngiro 90 90\nreto 50 50");
        let waypoints = calculate(&cmds, &Pose::default());

        assert_eq!(waypoints.len(), 4);
        assert_pose_close(&waypoints[0].pose, 0.0, 0.0, 0.0);
        assert_pose_close(&waypoints[1].pose, 0.0, 100.0, 0.0);
        assert_pose_close(&waypoints[2].pose, 0.0, 100.0, 90.0);
        assert_pose_close(&waypoints[3].pose, 50.0, 100.0, 90.0);
    }

    #[test]
    fn empty_script_yields_start_only() {
        let start = Pose::new(3.0, 4.0, 45.0);
        let waypoints = calculate(&[], &start);

        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].pose, start);
        assert!(waypoints[0].source.is_none());
    }

    #[test]
    fn zero_magnitudes_still_emit_waypoints() {
        let cmds = parse("reto 0\ngiro 0");
        let waypoints = calculate(&cmds, &Pose::default());

        assert_eq!(waypoints.len(), 3);
        for waypoint in &waypoints {
            assert_eq!(waypoint.pose, Pose::default());
        }
    }

    #[test]
    fn negative_straight_drives_backwards() {
        let cmds = parse("reto -100 20");
        let waypoints = calculate(&cmds, &Pose::default());

        assert_pose_close(&waypoints[1].pose, 0.0, -100.0, 0.0);
    }

    #[test]
    fn start_pose_seeds_the_evaluation() {
        let cmds = parse("reto 10 20");
        let start = Pose::new(5.0, -3.0, 180.0);
        let waypoints = calculate(&cmds, &start);

        assert_pose_close(&waypoints[1].pose, 5.0, -13.0, 180.0);
    }

    #[test]
    fn headings_accumulate_without_wrapping() {
        let cmds = parse("giro 270 90\ngiro 180 90");
        let waypoints = calculate(&cmds, &Pose::default());

        assert_eq!(waypoints[2].pose.heading_deg, 450.0);
        assert_eq!(total_rotation_deg(&waypoints), 450.0);
    }

    #[test]
    fn sources_tag_their_commands() {
        let cmds = parse("giro 90 45\nreto 10 20");
        let waypoints = calculate(&cmds, &Pose::default());

        let first = waypoints[1].source.unwrap();
        assert_eq!(first.cmd_index, 0);
        assert_eq!(first.kind, MotionKind::Turn);
        assert_eq!(first.speed, 45.0);

        let second = waypoints[2].source.unwrap();
        assert_eq!(second.cmd_index, 1);
        assert_eq!(second.kind, MotionKind::Straight);
        assert_eq!(second.speed, 20.0);
    }

    #[test]
    fn total_rotation_of_nothing_is_zero() {
        assert_eq!(total_rotation_deg(&[]), 0.0);
    }
}
