//! Envelope follower for tracking detector level.
//!
//! The detector signal of a compressor is a non-negative magnitude (a
//! rectified sample, or its square for RMS-style detection). The follower
//! smooths it with a one-pole recursion whose rate depends on direction:
//!
//! ```text
//! level[n] = level[n-1] + (x[n] - level[n-1]) * coeff
//! coeff    = attack_coeff   if x[n] > level[n-1]
//!            release_coeff  otherwise
//! ```
//!
//! Coefficients are linear in the inverse time constant and clamped to 1,
//! so a very short time (or a very low sample rate) degenerates to
//! "jump straight to the input" rather than overshooting:
//!
//! ```text
//! coeff = min(1, 4000 / (time_ms * sample_rate))
//! ```
//!
//! The level and coefficients are kept in `f64`. With a 9 s release at
//! 192 kHz the per-sample step falls below an `f32` ulp of the level and
//! an `f32` recursion stalls short of its target.

/// Compute a one-pole smoothing coefficient from a time in milliseconds.
///
/// `min(1, 1 / (time_ms * sample_rate / 4000))`.
#[inline]
pub fn smoothing_coeff(time_ms: f32, sample_rate: f32) -> f64 {
    (1.0 / (f64::from(time_ms) * f64::from(sample_rate) / 4000.0)).min(1.0)
}

/// Attack/release envelope follower.
///
/// Holds a single `level` that persists for the life of a stream. Changing
/// attack, release, or sample rate re-derives the coefficients but keeps
/// `level`, so parameter automation never produces a jump in gain.
///
/// # Example
///
/// ```rust
/// use squish_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::with_times(48000.0, 20.0, 250.0);
///
/// let level = env.process(0.5);
/// assert!(level > 0.0 && level < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current envelope level (linear, non-negative)
    level: f64,
    attack_coeff: f64,
    release_coeff: f64,
    sample_rate: f32,
    attack_ms: f32,
    release_ms: f32,
}

impl EnvelopeFollower {
    /// Create a new envelope follower with default attack/release times.
    ///
    /// Defaults:
    /// - Attack: 20ms
    /// - Release: 250ms
    pub fn new(sample_rate: f32) -> Self {
        Self::with_times(sample_rate, 20.0, 250.0)
    }

    /// Create with specified attack and release times.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let mut follower = Self {
            level: 0.0,
            attack_coeff: 1.0,
            release_coeff: 1.0,
            sample_rate,
            attack_ms,
            release_ms,
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Set the attack time in milliseconds.
    ///
    /// Attack applies while the input is above the current level.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms;
        self.recalculate_coefficients();
    }

    /// Get current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set the release time in milliseconds.
    ///
    /// Release applies while the input is at or below the current level.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms;
        self.recalculate_coefficients();
    }

    /// Get current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Update sample rate and recalculate coefficients.
    ///
    /// The current level is kept.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Get the sample rate the coefficients were derived for.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Attack coefficient in (0, 1].
    pub fn attack_coeff(&self) -> f64 {
        self.attack_coeff
    }

    /// Release coefficient in (0, 1].
    pub fn release_coeff(&self) -> f64 {
        self.release_coeff
    }

    /// Feed one detector sample and return the updated level.
    ///
    /// `input` is expected to be a non-negative magnitude; negative values
    /// are rectified.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input_abs = f64::from(input.abs());

        let coeff = if input_abs > self.level {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        self.level = crate::flush_denormal(self.level + (input_abs - self.level) * coeff);
        self.level as f32
    }

    /// Get current envelope level without processing new input.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level as f32
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.level = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = smoothing_coeff(self.attack_ms, self.sample_rate);
        self.release_coeff = smoothing_coeff(self.release_ms, self.sample_rate);
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficient_formula() {
        // 20 ms at 48 kHz: 4000 / (20 * 48000)
        let coeff = smoothing_coeff(20.0, 48000.0);
        assert!((coeff - 4000.0 / 960_000.0).abs() < 1e-12);
    }

    #[test]
    fn test_coefficient_clamped_to_one() {
        // 0.01 ms at 8 kHz would give 50.0 unclamped
        assert_eq!(smoothing_coeff(0.01, 8000.0), 1.0);
    }

    #[test]
    fn test_envelope_attack() {
        let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 250.0);

        let mut envelope = 0.0;
        for _ in 0..500 {
            envelope = env.process(1.0);
        }

        assert!(envelope > 0.9, "Envelope should rise, got {}", envelope);
    }

    #[test]
    fn test_envelope_release() {
        let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 10.0);

        for _ in 0..500 {
            env.process(1.0);
        }

        // release coeff = 4000 / 480000 = 1/120; after 1000 samples
        // (1 - 1/120)^1000 ≈ 2.3e-4
        let mut envelope = 1.0;
        for _ in 0..1000 {
            envelope = env.process(0.0);
        }

        assert!(envelope < 0.01, "Envelope should fall, got {}", envelope);
    }

    #[test]
    fn test_envelope_rectifies() {
        let mut env = EnvelopeFollower::new(48000.0);
        let level = env.process(-0.5);
        assert!(level > 0.0);
    }

    #[test]
    fn test_sample_rate_change_keeps_level() {
        let mut env = EnvelopeFollower::new(48000.0);
        for _ in 0..1000 {
            env.process(0.8);
        }
        let before = env.level();
        let old_attack = env.attack_coeff();

        env.set_sample_rate(96000.0);

        assert_eq!(env.level(), before);
        assert!((env.attack_coeff() - old_attack / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_long_release_settles_at_high_rate() {
        // release coeff = 4000 / (9000 * 192000) ≈ 2.3e-6, so 6M samples
        // leave about 1e-6 of the initial 0.5 excess
        let mut env = EnvelopeFollower::with_times(192_000.0, 0.01, 9000.0);
        assert_eq!(env.process(1.0), 1.0);

        let mut level = 1.0;
        for _ in 0..6_000_000 {
            level = env.process(0.5);
        }
        assert!((level - 0.5).abs() < 1e-5, "stalled at {level}");
    }

    #[test]
    fn test_slow_attack_settles() {
        let mut env = EnvelopeFollower::with_times(48000.0, 2000.0, 250.0);
        // coeff = 4000 / 96_000_000; 1.5M samples leave e^-62.5 of the gap
        let mut level = 0.0;
        for _ in 0..1_500_000 {
            level = env.process(0.25);
        }
        assert!((level - 0.25).abs() < 1e-6, "stalled at {level}");
    }

    #[test]
    fn test_envelope_reset() {
        let mut env = EnvelopeFollower::new(48000.0);

        for _ in 0..100 {
            env.process(1.0);
        }

        env.reset();
        assert_eq!(env.level(), 0.0);
    }
}
