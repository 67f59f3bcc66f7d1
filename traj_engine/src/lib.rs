//! # Trajectory engine library.
//!
//! The engine turns motion scripts written in the two-keyword command
//! language into geometric waypoints, into wall-clock animation segments,
//! and finally into interpolated robot poses for playback and scrubbing.
//! Everything in here is deterministic and free of fatal errors, so a
//! frontend can call it every frame without guarding against panics.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Heading convention helpers - the single home of the direction trig
pub mod heading;

/// Pose and robot state types
pub mod pose;

/// Engine tunables, loadable from TOML
pub mod params;

/// Script handling - command types, parser, serializer and undo history
pub mod script;

/// Trajectory calculator - evaluates a command list into waypoints
pub mod traj_calc;

/// Timeline - animation segment generation and pose interpolation
pub mod timeline;

/// Playback controller - play/pause/seek over a segment timeline
pub mod playback;

/// Visual editor adapter - click-a-point script authoring
pub mod editor;

/// Engine facade - owns the full pipeline plus history and playback
pub mod engine;
