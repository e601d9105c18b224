// SPDX-License-Identifier: LGPL-3.0-or-later

//! Floating-point utility functions.

/// Raise a non-negative value to at least `floor`.
///
/// Zero and subnormal results are lifted to `floor`. Negative values and
/// NaN pass through unchanged so that invalid configuration stays visible
/// instead of being masked.
#[inline]
pub fn floor_positive(x: f64, floor: f64) -> f64 {
    if (0.0..floor).contains(&x) { floor } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: f64 = f64::MIN_POSITIVE;

    #[test]
    fn test_floor_normal() {
        assert_eq!(floor_positive(0.25, FLOOR), 0.25);
        assert_eq!(floor_positive(FLOOR, FLOOR), FLOOR);
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(floor_positive(0.0, FLOOR), FLOOR);
        assert_eq!(floor_positive(-0.0, FLOOR), FLOOR);
    }

    #[test]
    fn test_floor_subnormal() {
        let subnormal = f64::from_bits(1);
        assert_eq!(floor_positive(subnormal, FLOOR), FLOOR);
    }

    #[test]
    fn test_negative_passes_through() {
        assert_eq!(floor_positive(-0.5, FLOOR), -0.5);
    }

    #[test]
    fn test_nan_passes_through() {
        assert!(floor_positive(f64::NAN, FLOOR).is_nan());
    }

    #[test]
    fn test_infinity_passes_through() {
        assert_eq!(floor_positive(f64::INFINITY, FLOOR), f64::INFINITY);
    }
}
