//! Feed-forward compressor engine and its single-input adapter.
//!
//! # Signal Flow
//!
//! ```text
//! detect ─→ Channel Link ─→ Envelope Follower ─→ Gain Curve ─┐
//!                                                            ↓
//! main   ───────────────────────────────────────→ × (gain·makeup·mix + 1 − mix) ─→ out
//! ```
//!
//! One envelope level is shared by every channel of the instance, so all
//! output channels receive the same gain at each sample index.
//!
//! # Tips
//!
//! - **Link maximum** reacts to the loudest channel; **average** lets a
//!   single hot channel through with less reduction.
//! - **RMS detection** squares the detector before smoothing, which reads
//!   steady material as louder than transients of the same peak.
//! - **Mix** below 1 gives parallel ("New York") compression.

use squish_core::{AudioFrame, EnvelopeFollower, ParamDescriptor, ParameterInfo, linear_to_db};

use crate::error::{ConfigureError, ParamError};
use crate::gain_curve::output_gain;
use crate::knee::KneeGeometry;
use crate::link::detector_input;
use crate::params::{self, CompressorParams, PARAM_COUNT};
use crate::sync::Input;

/// Sample processor shared by [`Compressor`] and
/// [`SidechainCompressor`](crate::SidechainCompressor).
///
/// Holds the parameter set, the derived [`KneeGeometry`] and the envelope
/// state for one stream. Parameter and sample-rate changes keep the envelope
/// level; only [`reset`](Self::reset) clears it.
#[derive(Debug, Clone)]
pub struct CompressorCore {
    params: CompressorParams,
    geometry: KneeGeometry,
    envelope: EnvelopeFollower,
    /// Gain applied at the most recent sample, before makeup and mix.
    last_gain: f32,
}

impl CompressorCore {
    /// Create an engine for `sample_rate` Hz.
    pub fn new(params: CompressorParams, sample_rate: f32) -> Result<Self, ParamError> {
        params.validate()?;
        Ok(Self {
            geometry: KneeGeometry::new(params.threshold, params.ratio, params.knee),
            envelope: EnvelopeFollower::with_times(sample_rate, params.attack_ms, params.release_ms),
            params,
            last_gain: 1.0,
        })
    }

    /// Current parameter set.
    pub fn params(&self) -> &CompressorParams {
        &self.params
    }

    /// Replace the parameter set and re-derive knee and coefficients.
    ///
    /// On error the previous parameters stay in effect.
    pub fn set_params(&mut self, params: CompressorParams) -> Result<(), ParamError> {
        params.validate()?;
        self.apply(params);
        Ok(())
    }

    fn apply(&mut self, params: CompressorParams) {
        self.geometry = KneeGeometry::new(params.threshold, params.ratio, params.knee);
        self.envelope.set_attack_ms(params.attack_ms);
        self.envelope.set_release_ms(params.release_ms);
        self.params = params;
    }

    /// Derived knee boundaries.
    pub fn geometry(&self) -> &KneeGeometry {
        &self.geometry
    }

    /// Re-derive attack/release coefficients for a new rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.envelope.set_sample_rate(sample_rate);
    }

    /// Sample rate the coefficients are derived for.
    pub fn sample_rate(&self) -> f32 {
        self.envelope.sample_rate()
    }

    /// Envelope level (squared magnitude in RMS mode).
    pub fn level(&self) -> f32 {
        self.envelope.level()
    }

    /// Clear the envelope and the meter.
    pub fn reset(&mut self) {
        self.envelope.reset();
        self.last_gain = 1.0;
    }

    /// Gain reduction at the most recent sample in dB (zero or negative).
    pub fn gain_reduction_db(&self) -> f32 {
        linear_to_db(self.last_gain)
    }

    /// Advance the envelope by one detector sample and return the factor
    /// to multiply every output channel by.
    #[inline]
    fn step(&mut self, detect: &[f32]) -> f32 {
        let input = detector_input(detect, self.params.link, self.params.detection);
        let level = self.envelope.process(input);

        let gain = if level > 0.0 && level > self.geometry.lin_knee_start {
            output_gain(level, &self.geometry, self.params.detection)
        } else {
            1.0
        };
        self.last_gain = gain;

        let mix = self.params.mix;
        gain * self.params.makeup * mix + (1.0 - mix)
    }

    /// Compress `n` samples of `main` using `detect` as the detector.
    ///
    /// Both buffers are interleaved; sample `i` of `detect` drives the gain
    /// of sample `i` of `main`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer holds fewer than `n` samples or a channel
    /// count is zero.
    pub fn process(
        &mut self,
        main: &mut [f32],
        main_channels: usize,
        detect: &[f32],
        detect_channels: usize,
        n: usize,
    ) {
        assert!(main_channels > 0 && detect_channels > 0);
        let main = &mut main[..n * main_channels];
        let detect = &detect[..n * detect_channels];

        for (out, det) in main
            .chunks_exact_mut(main_channels)
            .zip(detect.chunks_exact(detect_channels))
        {
            let factor = self.step(det);
            for s in out.iter_mut() {
                *s *= factor;
            }
        }
    }

    /// Compress `n` samples of `buffer` using the buffer as its own detector.
    ///
    /// Detection for sample `i` reads the input before it is rewritten.
    pub fn process_in_place(&mut self, buffer: &mut [f32], channels: usize, n: usize) {
        assert!(channels > 0);
        for frame in buffer[..n * channels].chunks_exact_mut(channels) {
            let factor = self.step(frame);
            for s in frame.iter_mut() {
                *s *= factor;
            }
        }
    }
}

/// Single-input compressor: the signal compresses itself.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Threshold | 0.000976563–1.0 | 0.125 |
/// | 1 | Ratio | 1.0–20.0, ∞ = limit | 2.0 |
/// | 2 | Attack | 0.01–2000.0 ms | 20.0 |
/// | 3 | Release | 0.01–9000.0 ms | 250.0 |
/// | 4 | Makeup Gain | 1.0–64.0 | 2.0 |
/// | 5 | Knee | 1.0–8.0 | 2.82843 |
/// | 6 | Link | average, maximum | average |
/// | 7 | Detection | peak, rms | rms |
/// | 8 | Mix | 0.0–1.0 | 1.0 |
///
/// # Example
///
/// ```rust
/// use squish_core::AudioFrame;
/// use squish_dynamics::{Compressor, CompressorParams, Ratio};
///
/// let params = CompressorParams {
///     threshold: 0.1,
///     ratio: Ratio::Finite(4.0),
///     makeup: 1.0,
///     ..CompressorParams::default()
/// };
/// let mut comp = Compressor::new(params, 48000).unwrap();
///
/// let mut frame = AudioFrame::from_interleaved(vec![0.8; 2048], 2, 48000);
/// comp.process_frame(&mut frame);
/// assert!(frame.as_slice()[2047].abs() < 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct Compressor {
    core: CompressorCore,
    sample_rate: u32,
}

impl Compressor {
    /// Create a compressor for a stream at `sample_rate` Hz.
    ///
    /// Fails on invalid parameters or a zero sample rate.
    pub fn new(params: CompressorParams, sample_rate: u32) -> Result<Self, ConfigureError> {
        if sample_rate == 0 {
            return Err(ConfigureError::ZeroSampleRate { line: Input::Main });
        }
        Ok(Self {
            core: CompressorCore::new(params, sample_rate as f32)?,
            sample_rate,
        })
    }

    /// Compress a frame in place.
    ///
    /// A frame at a different sample rate than the previous one re-derives
    /// the coefficients first; the envelope level carries over. A frame
    /// claiming a zero rate keeps the current coefficients.
    pub fn process_frame(&mut self, frame: &mut AudioFrame) {
        if frame.sample_rate() != self.sample_rate && frame.sample_rate() != 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = self.sample_rate,
                to = frame.sample_rate(),
                "compressor sample rate changed"
            );
            self.set_sample_rate(frame.sample_rate());
        }
        let channels = frame.channels();
        let n = frame.len();
        self.core.process_in_place(frame.as_mut_slice(), channels, n);
    }

    /// Re-derive coefficients for `sample_rate` Hz without clearing state.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.core.set_sample_rate(sample_rate as f32);
    }

    /// Current parameter set.
    pub fn params(&self) -> &CompressorParams {
        self.core.params()
    }

    /// Replace the parameter set.
    pub fn set_params(&mut self, params: CompressorParams) -> Result<(), ParamError> {
        self.core.set_params(params)
    }

    /// Gain reduction at the most recent sample in dB.
    pub fn gain_reduction_db(&self) -> f32 {
        self.core.gain_reduction_db()
    }

    /// Clear envelope state.
    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// The shared engine.
    pub fn core(&self) -> &CompressorCore {
        &self.core
    }
}

impl ParameterInfo for CompressorCore {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        params::descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let mut params = self.params;
        params.set(index, value);
        self.apply(params);
    }
}

impl ParameterInfo for Compressor {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        params::descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.core.get_param(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.core.set_param(index, value);
    }
}
