//! # Script module
//!
//! Handles the two-keyword motion command language: the command value
//! types, the lenient line parser, the serializer which is its exact
//! inverse, and the bounded undo/redo history over script text.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod history;
mod parser;
mod ser;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use history::*;
pub use parser::*;
pub use ser::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Keyword for a straight-line motion, magnitude in centimetres.
pub const KEYWORD_STRAIGHT: &str = "reto";

/// Keyword for an in-place turn, magnitude in degrees clockwise.
pub const KEYWORD_TURN: &str = "giro";

/// Speed given to straight commands whose script line omits the speed
/// token [cm/s].
pub const DEFAULT_STRAIGHT_SPEED_CMS: f64 = 20.0;

/// Speed given to turn commands whose script line omits the speed
/// token [deg/s].
pub const DEFAULT_TURN_SPEED_DEGS: f64 = 90.0;
