//! Pose and robot state types

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use crate::heading;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A position and heading in the plane.
///
/// Positions are in centimetres. The heading follows the convention in
/// [`crate::heading`]: 0 degrees = north (+Y), clockwise positive, and it
/// is not wrapped, so poses produced by long scripts can carry headings
/// well outside [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in the plane [cm]
    pub position_cm: Vector2<f64>,

    /// Unwrapped heading [deg]
    pub heading_deg: f64,
}

/// The externally observed state of the robot.
///
/// This is the flat view handed to frontends and trace writers. It keeps
/// the unwrapped heading so consumers that care about cumulative rotation
/// are not lied to, with [`RobotState::display_heading_deg`] for dials
/// that want [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    /// X position [cm]
    pub x_cm: f64,

    /// Y position [cm]
    pub y_cm: f64,

    /// Unwrapped heading [deg]
    pub heading_deg: f64,

    /// True while a playback run is in progress
    pub is_running: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Create a pose from flat components.
    pub fn new(x_cm: f64, y_cm: f64, heading_deg: f64) -> Self {
        Pose {
            position_cm: Vector2::new(x_cm, y_cm),
            heading_deg,
        }
    }

    /// X position [cm]
    pub fn x_cm(&self) -> f64 {
        self.position_cm.x
    }

    /// Y position [cm]
    pub fn y_cm(&self) -> f64 {
        self.position_cm.y
    }

    /// Get the unit vector the pose is facing along.
    pub fn heading_vector(&self) -> Vector2<f64> {
        heading::heading_to_vector(self.heading_deg)
    }
}

impl Default for Pose {
    /// The origin facing north.
    fn default() -> Self {
        Pose::new(0.0, 0.0, 0.0)
    }
}

impl RobotState {
    /// Build the state seen by the outside world from a pose.
    pub fn from_pose(pose: &Pose, is_running: bool) -> Self {
        RobotState {
            x_cm: pose.x_cm(),
            y_cm: pose.y_cm(),
            heading_deg: pose.heading_deg,
            is_running,
        }
    }

    /// The heading wrapped into [0, 360) for display.
    pub fn display_heading_deg(&self) -> f64 {
        heading::wrap_deg_360(self.heading_deg)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn heading_vector_matches_convention() {
        let pose = Pose::new(10.0, -5.0, 90.0);
        let v = pose.heading_vector();

        assert!((v.x - 1.0).abs() < 1e-10);
        assert!(v.y.abs() < 1e-10);
    }

    #[test]
    fn state_keeps_unwrapped_heading() {
        let pose = Pose::new(1.0, 2.0, 450.0);
        let state = RobotState::from_pose(&pose, true);

        assert_eq!(state.x_cm, 1.0);
        assert_eq!(state.y_cm, 2.0);
        assert_eq!(state.heading_deg, 450.0);
        assert!(state.is_running);
        assert_eq!(state.display_heading_deg(), 90.0);
    }

    #[test]
    fn negative_heading_displays_wrapped() {
        let state = RobotState::from_pose(&Pose::new(0.0, 0.0, -90.0), false);

        assert_eq!(state.heading_deg, -90.0);
        assert_eq!(state.display_heading_deg(), 270.0);
    }
}
