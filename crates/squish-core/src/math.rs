//! Mathematical utility functions for dynamics processing.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Curves
//!
//! - [`hermite_interpolation`] - Cubic Hermite spline between two points
//!
//! # Utilities
//!
//! - [`flush_denormal`] - Zero out values below the denormal floor

use libm::{expf, logf};

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use squish_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are clamped, so silence reads as -200 dB
/// instead of negative infinity.
///
/// # Example
/// ```rust
/// use squish_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Cubic Hermite interpolation over `[x0, x1]`.
///
/// Evaluates the unique cubic that passes through `(x0, p0)` and `(x1, p1)`
/// with slopes `m0` and `m1` at those points. Used for soft-knee
/// transitions, where the curve must join two line segments without a
/// corner (C¹ continuity).
///
/// Slopes are given in units of `y per x`; they are rescaled to the unit
/// interval internally. `x0` and `x1` must differ.
///
/// # Example
/// ```rust
/// use squish_core::hermite_interpolation;
///
/// // Straight line y = x reproduced exactly
/// let y = hermite_interpolation(0.25, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0);
/// assert!((y - 0.25).abs() < 1e-6);
/// ```
#[inline]
pub fn hermite_interpolation(x: f32, x0: f32, x1: f32, p0: f32, p1: f32, m0: f32, m1: f32) -> f32 {
    let width = x1 - x0;
    let t = (x - x0) / width;
    let m0 = m0 * width;
    let m1 = m1 * width;

    let t2 = t * t;
    let t3 = t2 * t;

    let c0 = p0;
    let c1 = m0;
    let c2 = -3.0 * p0 - 2.0 * m0 + 3.0 * p1 - m1;
    let c3 = 2.0 * p0 + m0 - 2.0 * p1 + m1;

    c3 * t3 + c2 * t2 + c1 * t + c0
}

/// Flush denormal values to zero.
///
/// Recursive state that decays toward zero (envelope levels, filter
/// memories) can land in the subnormal range, where arithmetic is
/// dramatically slower on most CPUs.
#[inline]
pub fn flush_denormal(x: f64) -> f64 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let db = linear_to_db(original);
        let back = db_to_linear(db);
        assert!(
            (original - back).abs() < 1e-5,
            "Roundtrip failed: {} -> {} -> {}",
            original,
            db,
            back
        );
    }

    #[test]
    fn test_linear_to_db_silence_is_finite() {
        assert!(linear_to_db(0.0).is_finite());
        assert!(linear_to_db(0.0) < -190.0);
    }

    #[test]
    fn test_hermite_endpoints() {
        let (x0, x1, p0, p1) = (-3.0, -1.0, -3.0, -2.0);
        let start = hermite_interpolation(x0, x0, x1, p0, p1, 1.0, 0.5);
        let end = hermite_interpolation(x1, x0, x1, p0, p1, 1.0, 0.5);
        assert!((start - p0).abs() < 1e-6);
        assert!((end - p1).abs() < 1e-6);
    }

    #[test]
    fn test_hermite_endpoint_slopes() {
        let (x0, x1, p0, p1, m0, m1) = (-2.0, 0.0, -2.0, -1.0, 1.0, 0.25);
        let h = 1e-3;
        let slope_start =
            (hermite_interpolation(x0 + h, x0, x1, p0, p1, m0, m1) - p0) / h;
        let slope_end = (p1 - hermite_interpolation(x1 - h, x0, x1, p0, p1, m0, m1)) / h;
        assert!((slope_start - m0).abs() < 1e-2, "start slope {slope_start}");
        assert!((slope_end - m1).abs() < 1e-2, "end slope {slope_end}");
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(0.5), 0.5);
    }
}
