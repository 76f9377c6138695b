//! Audio file I/O for squish.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] load and save
//!   interleaved [`AudioFrame`](squish_core::AudioFrame)s, keeping every channel
//! - **Metadata**: [`read_wav_info`] reads the header only
//! - **Block reading**: [`FrameReader`] hands out consecutive frames of any
//!   requested size, so a host can feed a two-input compressor exactly what
//!   it asks for
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use squish_dynamics::{Compressor, CompressorParams};
//! use squish_io::{read_wav, write_wav};
//!
//! let (mut frame, spec) = read_wav("input.wav")?;
//! let mut comp = Compressor::new(CompressorParams::default(), spec.sample_rate)?;
//! comp.process_frame(&mut frame);
//! write_wav("output.wav", &frame, spec.bits_per_sample)?;
//! ```

mod reader;
mod wav;

pub use reader::FrameReader;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
