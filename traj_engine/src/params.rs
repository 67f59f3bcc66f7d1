//! Engine parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use crate::script;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tunable parameters for the trajectory engine.
///
/// All parameters have sensible defaults so the engine can run without a
/// parameter file, and a TOML file loaded through `util::params::load` can
/// override them for a particular robot.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Params {

    /// Speed given to straight commands appended by the visual editor [cm/s]
    pub default_straight_speed_cms: f64,

    /// Speed given to turn commands appended by the visual editor [deg/s]
    pub default_turn_speed_degs: f64,

    /// Turns smaller than this are not worth emitting from the visual
    /// editor [deg]
    pub turn_dead_zone_deg: f64,

    /// Straights shorter than this are not worth emitting from the visual
    /// editor [cm]
    pub straight_dead_zone_cm: f64,

    /// Floor applied to effective speeds before dividing by them, so
    /// degenerate scripts produce long segments rather than infinite ones
    pub min_effective_speed: f64,

    /// Maximum number of script snapshots kept for undo/redo
    pub history_capacity: usize
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            default_straight_speed_cms: script::DEFAULT_STRAIGHT_SPEED_CMS,
            default_turn_speed_degs: script::DEFAULT_TURN_SPEED_DEGS,
            turn_dead_zone_deg: 1.0,
            straight_dead_zone_cm: 0.5,
            min_effective_speed: 1e-6,
            history_capacity: 50
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
