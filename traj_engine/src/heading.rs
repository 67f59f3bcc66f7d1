//! # Heading convention
//!
//! Single home of the direction convention used throughout the engine:
//! a heading of 0 degrees points north (+Y) and headings increase
//! clockwise, so 90 degrees points east (+X). All trig that derives
//! direction vectors or bearings from headings lives here, never at the
//! call sites, so the convention cannot drift between modules.
//!
//! Headings are stored unwrapped. A script that turns through 720 degrees
//! produces a heading of 720, not 0, which keeps cumulative rotation
//! recoverable. Wrapping into [0, 360) is a display concern only.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;

// Re-exports
pub use util::maths::{signed_delta_deg, wrap_deg_360};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the unit direction vector for the given heading.
///
/// With 0 degrees = north = +Y and clockwise-positive headings the
/// components are (sin h, cos h), not the usual (cos, sin).
pub fn heading_to_vector(heading_deg: f64) -> Vector2<f64> {
    let heading_rad = heading_deg.to_radians();

    Vector2::new(heading_rad.sin(), heading_rad.cos())
}

/// Get the bearing in degrees from one point to another.
///
/// The bearing follows the same convention as headings, so a robot whose
/// heading equals `bearing_to_deg(&pos, &target)` is facing the target.
/// The result is in (-180, 180]. Coincident points give a bearing of 0.
pub fn bearing_to_deg(from: &Vector2<f64>, to: &Vector2<f64>) -> f64 {
    let delta = to - from;

    // atan2(dx, dy), not (dy, dx), puts zero at north
    delta.x.atan2(delta.y).to_degrees()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
