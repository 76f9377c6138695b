//! Error types for compressor configuration and frame synchronization.

use squish_core::StreamFormat;
use thiserror::Error;

use crate::sync::Input;

/// A parameter value outside its accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParamError {
    /// Value is NaN or outside `[min, max]`.
    #[error("{name} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Parameter string ID.
        name: &'static str,
        /// Rejected value.
        value: f32,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
}

/// Construction-time failure of a compressor instance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigureError {
    /// A parameter failed validation.
    #[error(transparent)]
    Params(#[from] ParamError),

    /// An input line declared zero channels.
    #[error("{line} input has no channels")]
    NoChannels {
        /// Offending line.
        line: Input,
    },

    /// Main and sidechain run at different sample rates.
    #[error("inputs must have the same sample rate: {main} Hz for main vs {sidechain} Hz for sidechain")]
    SampleRateMismatch {
        /// Main input rate.
        main: u32,
        /// Sidechain input rate.
        sidechain: u32,
    },

    /// A sample rate of zero.
    #[error("{line} input has a sample rate of zero")]
    ZeroSampleRate {
        /// Offending line.
        line: Input,
    },
}

/// A frame pushed to the synchronizer does not fit its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Channel count or sample rate differ from the configured line format.
    #[error("{line} frame is {got}, expected {expected}")]
    FormatMismatch {
        /// Line the frame arrived on.
        line: Input,
        /// Configured format.
        expected: StreamFormat,
        /// Format of the rejected frame.
        got: StreamFormat,
    },
}
