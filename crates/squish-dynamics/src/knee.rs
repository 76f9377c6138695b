//! Knee geometry derived from threshold, ratio and knee width.
//!
//! All boundaries live in the natural-log domain so the gain curve can be
//! evaluated with one `ln` and one `exp` per sample:
//!
//! ```text
//! thres                = ln(threshold)
//! lin_knee_start       = threshold / sqrt(knee)
//! knee_start           = ln(lin_knee_start)
//! knee_stop            = ln(threshold * sqrt(knee))
//! compressed_knee_stop = (knee_stop - thres) / ratio + thres   (finite ratio)
//!                      = thres                                  (limit)
//! ```

use libm::{logf, sqrtf};

use crate::params::Ratio;

/// Precomputed knee boundaries for one parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneeGeometry {
    /// `ln(threshold)`.
    pub thres: f32,
    /// Knee width factor this geometry was built with.
    pub knee: f32,
    /// Ratio this geometry was built with.
    pub ratio: Ratio,
    /// Lower knee boundary, linear.
    pub lin_knee_start: f32,
    /// Upper knee boundary, linear.
    pub lin_knee_stop: f32,
    /// Lower knee boundary, log domain.
    pub knee_start: f32,
    /// Upper knee boundary, log domain.
    pub knee_stop: f32,
    /// Log-domain output level at the upper knee boundary.
    pub compressed_knee_stop: f32,
}

impl KneeGeometry {
    /// Derive the geometry. `threshold` must be positive and `knee >= 1`.
    pub fn new(threshold: f32, ratio: Ratio, knee: f32) -> Self {
        let thres = logf(threshold);
        let root = sqrtf(knee);
        let lin_knee_start = threshold / root;
        let lin_knee_stop = threshold * root;
        let knee_start = logf(lin_knee_start);
        let knee_stop = logf(lin_knee_stop);
        let compressed_knee_stop = match ratio {
            Ratio::Finite(r) => (knee_stop - thres) / r + thres,
            Ratio::Limit => thres,
        };

        Self {
            thres,
            knee,
            ratio,
            lin_knee_start,
            lin_knee_stop,
            knee_start,
            knee_stop,
            compressed_knee_stop,
        }
    }

    /// Returns `true` when the knee has zero width and no interpolation
    /// takes place.
    #[inline]
    pub fn is_hard(&self) -> bool {
        self.knee <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_bracket_threshold() {
        let geo = KneeGeometry::new(0.125, Ratio::Finite(2.0), 2.82843);
        assert!(geo.knee_start <= geo.thres);
        assert!(geo.thres <= geo.knee_stop);
        assert!(geo.lin_knee_start <= 0.125 && 0.125 <= geo.lin_knee_stop);
        assert!((geo.lin_knee_start - 0.125 / 2.82843f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn hard_knee_collapses_boundaries() {
        let geo = KneeGeometry::new(0.5, Ratio::Finite(4.0), 1.0);
        assert!(geo.is_hard());
        assert_eq!(geo.knee_start, geo.knee_stop);
        assert_eq!(geo.lin_knee_start, 0.5);
        assert!((geo.compressed_knee_stop - geo.thres).abs() < 1e-6);
    }

    #[test]
    fn compressed_knee_stop_follows_ratio() {
        let geo = KneeGeometry::new(0.25, Ratio::Finite(4.0), 4.0);
        // knee_stop - thres = ln(2); a 4:1 ratio keeps a quarter of it
        let expected = core::f32::consts::LN_2 / 4.0 + geo.thres;
        assert!((geo.compressed_knee_stop - expected).abs() < 1e-5);
    }

    #[test]
    fn limit_pins_compressed_knee_stop_to_threshold() {
        let geo = KneeGeometry::new(0.25, Ratio::Limit, 4.0);
        assert_eq!(geo.compressed_knee_stop, geo.thres);
    }
}
