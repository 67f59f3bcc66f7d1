//! # Timeline module
//!
//! Turns a waypoint sequence into wall-clock animation segments and
//! samples poses along them. Segment generation is wholesale: any change
//! to the script, start pose or playback speed rebuilds the entire
//! timeline rather than patching it, which keeps the times trivially
//! consistent.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod interp;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use serde::{Deserialize, Serialize};

// Internal
use crate::pose::Pose;
use crate::script::MotionKind;
use crate::traj_calc::Waypoint;

pub use interp::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default floor applied to effective speeds before dividing by them.
///
/// Keeps zero and negative speeds from producing infinite or
/// time-reversing segments, they come out very slow instead. Seeds
/// `Params::min_effective_speed`, which is what callers actually pass
/// to [`generate_segments`].
pub const MIN_EFFECTIVE_SPEED: f64 = 1e-6;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A span of playback time animating the robot between two poses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSegment {
    /// When the segment starts [ms from playback start]
    pub start_time_ms: f64,

    /// When the segment ends [ms from playback start]
    pub end_time_ms: f64,

    /// Pose at the start of the segment
    pub start_pose: Pose,

    /// Pose at the end of the segment
    pub end_pose: Pose,

    /// The kind of motion animated over the segment
    pub kind: MotionKind,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AnimationSegment {
    /// Length of the segment [ms].
    pub fn duration_ms(&self) -> f64 {
        self.end_time_ms - self.start_time_ms
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate the animation timeline for a waypoint sequence.
///
/// One segment per consecutive waypoint pair. Durations come from the
/// motion magnitude between the pair divided by the producing command's
/// speed scaled by the playback multiplier, with the product floored at
/// `min_effective_speed` (`Params::min_effective_speed`,
/// [`MIN_EFFECTIVE_SPEED`] by default). Times are cumulative
/// milliseconds from zero, exactly contiguous by construction.
/// Zero-magnitude motions give zero-duration segments rather than
/// disappearing, so there is always one segment per command.
pub fn generate_segments(
    waypoints: &[Waypoint],
    speed_multiplier: f64,
    min_effective_speed: f64,
) -> Vec<AnimationSegment> {
    let mut segments = Vec::with_capacity(waypoints.len().saturating_sub(1));
    let mut cursor_ms = 0.0;

    for pair in waypoints.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);

        // Waypoints after the first always carry a source, a pair without
        // one cannot have come from the calculator
        let source = match end.source {
            Some(s) => s,
            None => {
                warn!("Waypoint without a source command, skipping segment");
                continue;
            }
        };

        let magnitude = match source.kind {
            MotionKind::Straight => {
                (end.pose.position_cm - start.pose.position_cm).norm()
            }
            MotionKind::Turn => {
                (end.pose.heading_deg - start.pose.heading_deg).abs()
            }
        };

        let effective_speed =
            (source.speed * speed_multiplier).max(min_effective_speed);
        let duration_ms = magnitude / effective_speed * 1000.0;

        segments.push(AnimationSegment {
            start_time_ms: cursor_ms,
            end_time_ms: cursor_ms + duration_ms,
            start_pose: start.pose,
            end_pose: end.pose,
            kind: source.kind,
        });

        cursor_ms += duration_ms;
    }

    segments
}

/// Total duration of a segment timeline [ms], 0 for an empty one.
pub fn total_duration_ms(segments: &[AnimationSegment]) -> f64 {
    match segments.last() {
        Some(segment) => segment.end_time_ms,
        None => 0.0,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::script::parse;
    use crate::traj_calc::calculate;

    fn timeline(script: &str, multiplier: f64) -> Vec<AnimationSegment> {
        let waypoints = calculate(&parse(script), &Pose::default());
        generate_segments(&waypoints, multiplier, MIN_EFFECTIVE_SPEED)
    }

    #[test]
    fn durations_follow_distance_over_speed() {
        let segments = timeline("reto 100 50\ngiro 90 90\nreto 50 50", 1.0);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].start_time_ms, 0.0);
        assert_eq!(segments[0].end_time_ms, 2000.0);
        assert_eq!(segments[1].end_time_ms, 3000.0);
        assert_eq!(segments[2].end_time_ms, 4000.0);
        assert_eq!(total_duration_ms(&segments), 4000.0);
    }

    #[test]
    fn multiplier_scales_every_duration() {
        let segments = timeline("reto 100 50\ngiro 90 90", 2.0);

        assert_eq!(segments[0].end_time_ms, 1000.0);
        assert_eq!(segments[1].end_time_ms, 1500.0);
    }

    #[test]
    fn no_waypoint_pairs_no_segments() {
        let waypoints = calculate(&[], &Pose::default());

        assert!(
            generate_segments(&waypoints, 1.0, MIN_EFFECTIVE_SPEED).is_empty()
        );
        assert_eq!(total_duration_ms(&[]), 0.0);
    }

    #[test]
    fn zero_speed_is_slow_not_infinite() {
        let segments = timeline("reto 100 0", 1.0);

        assert!(segments[0].duration_ms().is_finite());
        assert!(segments[0].duration_ms() > 0.0);
    }

    #[test]
    fn negative_speed_is_clamped_too() {
        let segments = timeline("giro 90 -45", 1.0);

        assert!(segments[0].duration_ms().is_finite());
        assert!(segments[0].duration_ms() > 0.0);
    }

    #[test]
    fn speed_floor_bounds_degenerate_durations() {
        // With a floor of 50 cm/s a zero-speed 100 cm straight takes
        // exactly 100 / 50 seconds
        let waypoints = calculate(&parse("reto 100 0"), &Pose::default());
        let segments = generate_segments(&waypoints, 1.0, 50.0);

        assert_eq!(segments[0].duration_ms(), 2000.0);
    }

    #[test]
    fn zero_magnitude_keeps_its_segment() {
        let segments = timeline("reto 100 50\ngiro 0\nreto 50 50", 1.0);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].duration_ms(), 0.0);
        assert_eq!(segments[1].start_time_ms, segments[2].start_time_ms);
    }

    #[test]
    fn reverse_motions_take_positive_time() {
        let segments = timeline("reto -100 50\ngiro -90 90", 1.0);

        assert_eq!(segments[0].duration_ms(), 2000.0);
        assert_eq!(segments[1].duration_ms(), 1000.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::script::{Command, MotionKind};
    use crate::traj_calc::calculate;
    use proptest::prelude::*;

    // -- Strategy helpers --

    fn arb_kind() -> impl Strategy<Value = MotionKind> {
        prop_oneof![Just(MotionKind::Straight), Just(MotionKind::Turn)]
    }

    fn arb_command() -> impl Strategy<Value = Command> {
        (arb_kind(), -1000.0..1000.0f64, 0.1..500.0f64).prop_map(
            |(kind, magnitude, speed)| Command {
                kind,
                magnitude,
                speed,
            },
        )
    }

    proptest! {
        /// The timeline starts at zero and every segment starts exactly
        /// where the previous one ends.
        #[test]
        fn timeline_is_contiguous_from_zero(
            cmds in prop::collection::vec(arb_command(), 1..32),
            multiplier in 0.25..4.0f64
        ) {
            let waypoints = calculate(&cmds, &Pose::default());
            let segments =
                generate_segments(&waypoints, multiplier, MIN_EFFECTIVE_SPEED);

            prop_assert_eq!(segments.len(), cmds.len());
            prop_assert_eq!(segments[0].start_time_ms, 0.0);

            for pair in segments.windows(2) {
                prop_assert_eq!(pair[1].start_time_ms, pair[0].end_time_ms);
            }
        }

        /// Durations are never negative, whatever the magnitudes.
        #[test]
        fn durations_are_non_negative(
            cmds in prop::collection::vec(arb_command(), 1..32),
            multiplier in 0.25..4.0f64
        ) {
            let waypoints = calculate(&cmds, &Pose::default());
            let segments =
                generate_segments(&waypoints, multiplier, MIN_EFFECTIVE_SPEED);

            for segment in segments {
                prop_assert!(segment.duration_ms() >= 0.0);
            }
        }
    }
}
