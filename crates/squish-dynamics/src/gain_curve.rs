//! Static gain curve with cubic Hermite soft knee.
//!
//! Above the knee the log-domain output follows the ratio line through
//! threshold. Inside the knee the line is replaced by a Hermite segment from
//! `(knee_start, knee_start)` with slope 1 to `(knee_stop,
//! compressed_knee_stop)` with slope `1/ratio`, so the curve is C¹ across
//! both boundaries.

use libm::{expf, logf};
use squish_core::hermite_interpolation;

use crate::knee::KneeGeometry;
use crate::params::{DetectionMode, Ratio};

/// Linear gain for the detector level `level`.
///
/// Callers only invoke this for `level > lin_knee_start`; the result is then
/// in `(0, 1]`. In RMS mode `level` is a squared magnitude and the log is
/// halved.
#[inline]
pub fn output_gain(level: f32, geometry: &KneeGeometry, detection: DetectionMode) -> f32 {
    let mut slope = logf(level);
    if detection == DetectionMode::Rms {
        slope *= 0.5;
    }

    let (mut gain, delta) = match geometry.ratio {
        Ratio::Finite(r) => ((slope - geometry.thres) / r + geometry.thres, 1.0 / r),
        Ratio::Limit => (geometry.thres, 0.0),
    };

    if !geometry.is_hard() && slope < geometry.knee_stop {
        gain = hermite_interpolation(
            slope,
            geometry.knee_start,
            geometry.knee_stop,
            geometry.knee_start,
            geometry.compressed_knee_stop,
            1.0,
            delta,
        );
    }

    expf(gain - slope)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard(threshold: f32, ratio: f32) -> KneeGeometry {
        KneeGeometry::new(threshold, Ratio::Finite(ratio), 1.0)
    }

    #[test]
    fn hard_knee_at_threshold_is_unity() {
        let geo = hard(0.25, 4.0);
        let gain = output_gain(0.25, &geo, DetectionMode::Peak);
        assert!((gain - 1.0).abs() < 1e-6, "gain {gain}");
    }

    #[test]
    fn hard_knee_follows_ratio_above_threshold() {
        let geo = hard(0.25, 4.0);
        // 12 dB over threshold at 4:1 leaves 3 dB over: gain = -9 dB
        let level = 0.25 * 4.0;
        let gain = output_gain(level, &geo, DetectionMode::Peak);
        let expected = libm::powf(4.0, 1.0 / 4.0) / 4.0;
        assert!((gain - expected).abs() < 1e-5, "gain {gain} vs {expected}");
    }

    #[test]
    fn gain_never_exceeds_unity_above_knee_start() {
        let geo = KneeGeometry::new(0.125, Ratio::Finite(2.0), 2.82843);
        let mut level = geo.lin_knee_start * 1.0001;
        while level < 4.0 {
            let gain = output_gain(level, &geo, DetectionMode::Peak);
            assert!(gain <= 1.0 + 1e-5 && gain > 0.0, "level {level} gain {gain}");
            level *= 1.05;
        }
    }

    #[test]
    fn continuous_at_knee_stop() {
        let geo = KneeGeometry::new(0.125, Ratio::Finite(3.0), 4.0);
        let at = libm::expf(geo.knee_stop);
        let below = output_gain(at * (1.0 - 1e-4), &geo, DetectionMode::Peak);
        let above = output_gain(at * (1.0 + 1e-4), &geo, DetectionMode::Peak);
        assert!((below - above).abs() < 1e-3, "below {below} above {above}");
    }

    #[test]
    fn continuous_at_knee_start() {
        let geo = KneeGeometry::new(0.125, Ratio::Finite(3.0), 4.0);
        let gain = output_gain(geo.lin_knee_start * 1.0001, &geo, DetectionMode::Peak);
        assert!((gain - 1.0).abs() < 1e-3, "gain {gain}");
    }

    #[test]
    fn limit_holds_output_at_threshold() {
        let geo = KneeGeometry::new(0.25, Ratio::Limit, 1.0);
        for &level in &[0.3f32, 0.5, 1.0, 2.0] {
            let gain = output_gain(level, &geo, DetectionMode::Peak);
            assert!((gain * level - 0.25).abs() < 1e-5, "level {level} -> {}", gain * level);
        }
    }

    #[test]
    fn rms_and_peak_differ() {
        let geo = KneeGeometry::new(0.125, Ratio::Finite(4.0), 1.0);
        let level = 0.5;
        let peak = output_gain(level, &geo, DetectionMode::Peak);
        let rms = output_gain(level, &geo, DetectionMode::Rms);
        assert!((peak - rms).abs() > 1e-3, "peak {peak} rms {rms}");
    }

    #[test]
    fn unity_ratio_is_transparent() {
        let geo = KneeGeometry::new(0.125, Ratio::Finite(1.0), 2.82843);
        for &level in &[0.1f32, 0.2, 0.5, 1.0] {
            let gain = output_gain(level, &geo, DetectionMode::Peak);
            assert!((gain - 1.0).abs() < 1e-5, "level {level} gain {gain}");
        }
    }
}
