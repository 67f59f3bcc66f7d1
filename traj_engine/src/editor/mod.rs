//! # Visual editor adapter
//!
//! Turns "click a target point" into script commands: a turn onto the
//! bearing of the clicked point, then a straight to reach it. The adapter
//! only produces new command lists, the caller owns committing them to
//! history and recomputing the trajectory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector2;

// Internal
use crate::heading::{bearing_to_deg, signed_delta_deg};
use crate::params::Params;
use crate::pose::Pose;
use crate::script::{self, Command};
use crate::traj_calc;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Append the commands that take the robot from the current pose to the
/// target point.
///
/// Returns a new command list, the input is never modified in place. At
/// most two commands are appended: a turn through the signed shortest
/// rotation onto the target's bearing, then a straight covering the
/// distance, both at the default speeds from `params`.
///
/// Each command has its own dead zone and the two checks are independent.
/// A click close by but off to the side appends only the turn, a click
/// dead ahead appends only the straight, and a click where the robot
/// already stands appends nothing at all.
pub fn append_toward_point(
    commands: &[Command],
    current_pose: &Pose,
    target_cm: &Vector2<f64>,
    params: &Params,
) -> Vec<Command> {
    let mut extended = commands.to_vec();

    // Shortest signed rotation onto the bearing, in (-180, 180]
    let delta_deg = signed_delta_deg(
        current_pose.heading_deg,
        bearing_to_deg(&current_pose.position_cm, target_cm),
    );

    if delta_deg.abs() > params.turn_dead_zone_deg {
        extended.push(Command::turn(delta_deg, params.default_turn_speed_degs));
    }

    let distance_cm = (target_cm - current_pose.position_cm).norm();

    if distance_cm > params.straight_dead_zone_cm {
        extended.push(Command::straight(
            distance_cm,
            params.default_straight_speed_cms,
        ));
    }

    debug!(
        "Click at ({}, {}) appended {} command(s)",
        target_cm.x,
        target_cm.y,
        extended.len() - commands.len()
    );

    extended
}

/// The full click-to-script seam: parse the script, find where it leaves
/// the robot, append the commands toward the click and serialize back to
/// text.
///
/// Malformed lines drop out of the returned text, the same lenient
/// parsing as everywhere else, and omitted speed tokens come back written
/// out explicitly.
pub fn extend_script_toward_point(
    script_text: &str,
    start_pose: &Pose,
    target_cm: &Vector2<f64>,
    params: &Params,
) -> String {
    let commands =
        script::parse_report_with_params(script_text, params).commands;
    let waypoints = traj_calc::calculate(&commands, start_pose);

    // The clicked motion continues from wherever the script ends
    let end_pose = match waypoints.last() {
        Some(waypoint) => waypoint.pose,
        None => *start_pose,
    };

    let extended = append_toward_point(&commands, &end_pose, target_cm, params);

    script::serialize(&extended)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
