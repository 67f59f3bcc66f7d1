//! Motion command types

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{KEYWORD_STRAIGHT, KEYWORD_TURN};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The kind of motion a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// Drive along the current heading
    Straight,

    /// Rotate in place
    Turn
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single motion command, the unit of the script language.
///
/// Commands are immutable values. The magnitude is signed: a negative
/// straight drives backwards and a negative turn rotates anticlockwise.
/// The speed is expected to be positive but is not enforced here, the
/// timeline clamps degenerate speeds when it divides by them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// What kind of motion to perform
    pub kind: MotionKind,

    /// How far: [cm] for straights, [deg] clockwise for turns
    pub magnitude: f64,

    /// How fast: [cm/s] for straights, [deg/s] for turns
    pub speed: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotionKind {
    /// The script keyword for this kind of motion.
    pub fn keyword(&self) -> &'static str {
        match self {
            MotionKind::Straight => KEYWORD_STRAIGHT,
            MotionKind::Turn => KEYWORD_TURN
        }
    }
}

impl Command {
    /// Build a straight command.
    pub fn straight(magnitude_cm: f64, speed_cms: f64) -> Self {
        Command {
            kind: MotionKind::Straight,
            magnitude: magnitude_cm,
            speed: speed_cms,
        }
    }

    /// Build a turn command.
    pub fn turn(magnitude_deg: f64, speed_degs: f64) -> Self {
        Command {
            kind: MotionKind::Turn,
            magnitude: magnitude_deg,
            speed: speed_degs,
        }
    }
}
