//! Property-based tests for squish-core primitives.
//!
//! Tests envelope stability and convergence, soft-knee interpolation
//! boundaries, and frame split/append integrity using proptest.

use proptest::prelude::*;
use squish_core::{AudioFrame, EnvelopeFollower, hermite_interpolation, smoothing_coeff};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any valid attack/release pair and sample rate, the envelope stays
    /// finite and inside [0, max |input|].
    #[test]
    fn envelope_bounded(
        attack in 0.01f32..2000.0f32,
        release in 0.01f32..9000.0f32,
        sample_rate in 8000.0f32..192_000.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut env = EnvelopeFollower::with_times(sample_rate, attack, release);
        let peak = input.iter().fold(0.0f32, |m, s| m.max(s.abs()));

        for &sample in &input {
            let level = env.process(sample);
            prop_assert!(level.is_finite());
            prop_assert!(level >= 0.0, "negative level {}", level);
            prop_assert!(level <= peak + 1e-6, "level {} above peak {}", level, peak);
        }
    }

    /// Coefficients always land in (0, 1].
    #[test]
    fn coefficient_in_unit_interval(
        time_ms in 0.01f32..9000.0f32,
        sample_rate in 8000.0f32..192_000.0f32,
    ) {
        let coeff = smoothing_coeff(time_ms, sample_rate);
        prop_assert!(coeff > 0.0 && coeff <= 1.0, "coeff {}", coeff);
    }

    /// A constant input is approached monotonically from below.
    #[test]
    fn envelope_monotonic_attack(
        attack in 0.01f32..200.0f32,
        target in 0.01f32..1.0f32,
    ) {
        let mut env = EnvelopeFollower::with_times(48000.0, attack, 250.0);
        let mut prev = 0.0f32;
        for _ in 0..256 {
            let level = env.process(target);
            // Rounding near the target may wobble by an ulp
            prop_assert!(level >= prev - 1e-6);
            prop_assert!(level <= target + 1e-6);
            prev = level;
        }
    }

    /// The Hermite interpolant passes through both control points.
    #[test]
    fn hermite_hits_endpoints(
        x0 in -7.0f32..-0.5f32,
        width in 0.1f32..3.0f32,
        p0 in -7.0f32..0.0f32,
        p1 in -7.0f32..0.0f32,
        m1 in 0.0f32..1.0f32,
    ) {
        let x1 = x0 + width;
        let start = hermite_interpolation(x0, x0, x1, p0, p1, 1.0, m1);
        let end = hermite_interpolation(x1, x0, x1, p0, p1, 1.0, m1);
        prop_assert!((start - p0).abs() < 1e-4, "start {} vs {}", start, p0);
        prop_assert!((end - p1).abs() < 1e-4, "end {} vs {}", end, p1);
    }

    /// Splitting a frame and appending the tail restores the original.
    #[test]
    fn split_then_append_is_identity(
        len in 0usize..64,
        at_frac in 0.0f64..=1.0f64,
        channels in 1usize..4,
    ) {
        let samples: Vec<f32> = (0..len * channels).map(|i| i as f32).collect();
        let original = AudioFrame::from_interleaved(samples, channels, 44100);
        let at = ((len as f64) * at_frac) as usize;

        let mut head = original.clone();
        let tail = head.split_off(at);
        prop_assert_eq!(head.len(), at);
        prop_assert_eq!(tail.len(), len - at);

        head.append(tail);
        prop_assert_eq!(head, original);
    }
}
