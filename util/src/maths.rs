//! Utility maths functions
//!
//! Angles in this workspace are degrees, so the helpers here work in the
//! degree domain rather than radians.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Linearly interpolate between `a` and `b`.
///
/// `t = 0` gives `a`, `t = 1` gives `b`. `t` is not clamped here, callers
/// clamp if they need to stay inside the interval.
pub fn lerp<T>(a: T, b: T, t: T) -> T
where
    T: Float
{
    a + (b - a) * t
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float + std::ops::Rem
{
    let r = lhs % rhs;
    if r < T::from(0).unwrap() { r + rhs.abs() } else { r }
}

/// Wrap an angle in degrees into the range [0, 360).
///
/// Only for display purposes. Internally headings are left unwrapped so
/// that cumulative rotation stays meaningful.
pub fn wrap_deg_360<T>(angle_deg: T) -> T
where
    T: Float + std::ops::Rem
{
    rem_euclid(angle_deg, T::from(360).unwrap())
}

/// Get the signed shortest angular distance from `from_deg` to `to_deg`.
///
/// The result is in the range (-180, 180], with exactly opposite angles
/// mapping to +180. Positive results mean the shortest rotation is in the
/// direction of increasing angle.
pub fn signed_delta_deg<T>(from_deg: T, to_deg: T) -> T
where
    T: Float + std::ops::Rem
{
    let full_turn = T::from(360).unwrap();
    let half_turn = T::from(180).unwrap();

    let d = rem_euclid(to_deg - from_deg, full_turn);

    if d > half_turn {
        d - full_turn
    }
    else {
        d
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wrap_deg_360() {
        assert_eq!(wrap_deg_360(0f64), 0f64);
        assert_eq!(wrap_deg_360(360f64), 0f64);
        assert_eq!(wrap_deg_360(725f64), 5f64);
        assert_eq!(wrap_deg_360(-90f64), 270f64);
        assert_eq!(wrap_deg_360(-360f64), 0f64);
    }

    #[test]
    fn test_signed_delta_deg() {
        assert_eq!(signed_delta_deg(0f64, 90f64), 90f64);
        assert_eq!(signed_delta_deg(90f64, 0f64), -90f64);
        assert_eq!(signed_delta_deg(350f64, 10f64), 20f64);
        assert_eq!(signed_delta_deg(10f64, 350f64), -20f64);
        assert_eq!(signed_delta_deg(0f64, 180f64), 180f64);
        assert_eq!(signed_delta_deg(0f64, 540f64), 180f64);
        // Unwrapped inputs reduce to the same shortest rotation
        assert_eq!(signed_delta_deg(720f64, 45f64), 45f64);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0f64, 10f64, 0.0), 0f64);
        assert_eq!(lerp(0f64, 10f64, 1.0), 10f64);
        assert_eq!(lerp(0f64, 10f64, 0.5), 5f64);
        assert_eq!(lerp(-5f64, 5f64, 0.75), 2.5f64);
    }
}
