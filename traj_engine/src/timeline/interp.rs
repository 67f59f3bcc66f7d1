//! Pose interpolation over the animation timeline

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use util::maths::lerp;

// Internal
use super::AnimationSegment;
use crate::pose::Pose;
use crate::script::MotionKind;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Interpolate the robot pose at a time on the segment timeline.
///
/// Each segment owns its time span half-open, `[start, end)`, with the
/// final segment also owning its end point, so an elapsed time equal to
/// the total duration gives the final pose. Negative times clamp to
/// zero. Past the end of the timeline there is nothing left to animate
/// and `None` is returned, the caller decides whether to hold or snap.
///
/// Within a straight segment the position is lerped with the heading
/// held, within a turn the heading is lerped with the position held. A
/// zero-duration segment always shows its end pose.
pub fn interpolate(
    segments: &[AnimationSegment],
    elapsed_ms: f64,
) -> Option<Pose> {
    if segments.is_empty() {
        return None;
    }

    let elapsed_ms = elapsed_ms.max(0.0);

    if elapsed_ms > super::total_duration_ms(segments) {
        return None;
    }

    // First segment whose end lies beyond the elapsed time, everything
    // before it has fully played. At the very end this runs off the
    // timeline, so cap at the last segment
    let index = segments
        .partition_point(|s| s.end_time_ms <= elapsed_ms)
        .min(segments.len() - 1);

    Some(sample_segment(&segments[index], elapsed_ms))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Sample the pose within a single segment.
fn sample_segment(segment: &AnimationSegment, elapsed_ms: f64) -> Pose {
    let duration_ms = segment.duration_ms();

    // A zero-duration segment is always complete
    let t = if duration_ms > 0.0 {
        ((elapsed_ms - segment.start_time_ms) / duration_ms)
            .max(0.0)
            .min(1.0)
    } else {
        1.0
    };

    match segment.kind {
        MotionKind::Straight => Pose {
            position_cm: segment
                .start_pose
                .position_cm
                .lerp(&segment.end_pose.position_cm, t),
            heading_deg: segment.start_pose.heading_deg,
        },
        MotionKind::Turn => Pose {
            position_cm: segment.start_pose.position_cm,
            heading_deg: lerp(
                segment.start_pose.heading_deg,
                segment.end_pose.heading_deg,
                t,
            ),
        },
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::script::parse;
    use crate::timeline::{generate_segments, MIN_EFFECTIVE_SPEED};
    use crate::traj_calc::calculate;

    const TOLERANCE: f64 = 1e-9;

    fn timeline(script: &str) -> Vec<AnimationSegment> {
        let waypoints = calculate(&parse(script), &Pose::default());
        generate_segments(&waypoints, 1.0, MIN_EFFECTIVE_SPEED)
    }

    fn assert_pose_close(pose: &Pose, x: f64, y: f64, heading: f64) {
        assert!((pose.x_cm() - x).abs() < TOLERANCE);
        assert!((pose.y_cm() - y).abs() < TOLERANCE);
        assert!((pose.heading_deg - heading).abs() < TOLERANCE);
    }

    #[test]
    fn halfway_along_a_straight() {
        // 100 cm at 50 cm/s is 2000 ms
        let segments = timeline("reto 100 50");
        let pose = interpolate(&segments, 1000.0).unwrap();

        assert_pose_close(&pose, 0.0, 50.0, 0.0);
    }

    #[test]
    fn halfway_through_a_turn() {
        let segments = timeline("giro 90 90");
        let pose = interpolate(&segments, 500.0).unwrap();

        assert_pose_close(&pose, 0.0, 0.0, 45.0);
    }

    #[test]
    fn time_zero_is_the_start_pose() {
        let segments = timeline("reto 100 50\ngiro 90 90");
        let pose = interpolate(&segments, 0.0).unwrap();

        assert_pose_close(&pose, 0.0, 0.0, 0.0);
    }

    #[test]
    fn segment_boundary_shows_the_shared_waypoint() {
        let segments = timeline("reto 100 50\ngiro 90 90");
        let pose = interpolate(&segments, 2000.0).unwrap();

        assert_pose_close(&pose, 0.0, 100.0, 0.0);
    }

    #[test]
    fn total_elapsed_is_the_final_pose() {
        let segments = timeline("reto 100 50\ngiro 90 90\nreto 50 50");
        let pose = interpolate(&segments, 4000.0).unwrap();

        assert_pose_close(&pose, 50.0, 100.0, 90.0);
    }

    #[test]
    fn past_the_end_is_none() {
        let segments = timeline("reto 100 50");

        assert!(interpolate(&segments, 2000.1).is_none());
    }

    #[test]
    fn negative_time_clamps_to_the_start() {
        let segments = timeline("reto 100 50");
        let pose = interpolate(&segments, -500.0).unwrap();

        assert_pose_close(&pose, 0.0, 0.0, 0.0);
    }

    #[test]
    fn empty_timeline_is_none() {
        assert!(interpolate(&[], 0.0).is_none());
    }

    #[test]
    fn all_zero_durations_show_the_final_pose() {
        let segments = timeline("giro 0\ngiro 0");
        let pose = interpolate(&segments, 0.0).unwrap();

        assert_pose_close(&pose, 0.0, 0.0, 0.0);
    }

    #[test]
    fn straight_holds_heading_while_moving() {
        let segments = timeline("giro 90 90\nreto 100 50");
        let pose = interpolate(&segments, 2000.0).unwrap();

        // Halfway along the straight, facing east
        assert_pose_close(&pose, 50.0, 0.0, 90.0);
    }
}
