//! Sidechain compressor: the gain of the main line is driven by a second,
//! independently timed input.
//!
//! The host pushes frames on either [`Input`] and asks [`request`] what to
//! feed next. Whenever both lines hold samples, the overlapping span is
//! compressed and returned.
//!
//! [`request`]: SidechainCompressor::request

use squish_core::{AudioFrame, ParamDescriptor, ParameterInfo, StreamFormat};

use crate::compressor::CompressorCore;
use crate::error::{ConfigureError, ParamError, SyncError};
use crate::params::{self, CompressorParams, PARAM_COUNT};
use crate::sync::{FrameSync, Input, Request, SyncState};

/// Two-input compressor.
///
/// # Example
///
/// ```rust
/// use squish_core::{AudioFrame, StreamFormat};
/// use squish_dynamics::{CompressorParams, Input, SidechainCompressor};
///
/// let format = StreamFormat::new(1, 48000);
/// let mut duck =
///     SidechainCompressor::new(CompressorParams::default(), format, format).unwrap();
///
/// let music = AudioFrame::from_interleaved(vec![0.5; 256], 1, 48000);
/// let voice = AudioFrame::from_interleaved(vec![0.9; 128], 1, 48000);
///
/// assert!(duck.push(Input::Main, music).unwrap().is_none());
/// let out = duck.push(Input::Sidechain, voice).unwrap().unwrap();
/// assert_eq!(out.len(), 128);
/// ```
#[derive(Debug, Clone)]
pub struct SidechainCompressor {
    core: CompressorCore,
    sync: FrameSync,
}

impl SidechainCompressor {
    /// Configure for the given line formats.
    ///
    /// Fails on invalid parameters, a zero-channel line, or differing
    /// sample rates.
    pub fn new(
        params: CompressorParams,
        main: StreamFormat,
        sidechain: StreamFormat,
    ) -> Result<Self, ConfigureError> {
        let sync = FrameSync::new(main, sidechain)?;
        let core = CompressorCore::new(params, main.sample_rate as f32)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%main, %sidechain, "sidechain compressor configured");

        Ok(Self { core, sync })
    }

    /// Feed a frame on `line`.
    ///
    /// Returns the compressed main span once both lines have samples
    /// pending, `None` while waiting on the other line.
    pub fn push(&mut self, line: Input, frame: AudioFrame) -> Result<Option<AudioFrame>, SyncError> {
        self.sync.push(line, frame)?;

        let Some((mut main, sidechain)) = self.sync.take_pair() else {
            return Ok(None);
        };

        let n = main.len();
        let main_channels = main.channels();
        self.core.process(
            main.as_mut_slice(),
            main_channels,
            sidechain.as_slice(),
            sidechain.channels(),
            n,
        );

        #[cfg(feature = "tracing")]
        tracing::trace!(
            samples = n,
            main_pending = self.sync.pending(Input::Main),
            sidechain_pending = self.sync.pending(Input::Sidechain),
            "sidechain pair processed"
        );

        Ok(Some(main))
    }

    /// Which line to feed next, and how many samples to ask it for.
    ///
    /// Between calls to [`push`](Self::push) this is always `Some`.
    pub fn request(&self) -> Option<Request> {
        self.sync.request()
    }

    /// Slot occupancy of the synchronizer.
    pub fn state(&self) -> SyncState {
        self.sync.state()
    }

    /// Samples waiting on `line`.
    pub fn pending(&self, line: Input) -> usize {
        self.sync.pending(line)
    }

    /// Format of emitted frames, identical to the main line.
    pub fn output_format(&self) -> StreamFormat {
        self.sync.format(Input::Main)
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

    /// Drop pending frames and clear envelope state.
    pub fn reset(&mut self) {
        self.sync.reset();
        self.core.reset();
    }

    /// The shared engine.
    pub fn core(&self) -> &CompressorCore {
        &self.core
    }
}

impl ParameterInfo for SidechainCompressor {
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
