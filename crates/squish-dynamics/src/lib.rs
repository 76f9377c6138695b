//! Squish Dynamics - feed-forward compression with optional sidechain
//!
//! This crate provides the compressor engine built on squish-core:
//!
//! - [`CompressorCore`] - Per-sample engine: link, detect, smooth, gain
//! - [`Compressor`] - Single-input adapter (the signal compresses itself)
//! - [`SidechainCompressor`] - Two-input adapter with frame synchronization
//! - [`FrameSync`] - Pairs independently timed main/sidechain frames
//! - [`KneeGeometry`] / [`output_gain`] - Soft-knee static curve
//!
//! ## Example
//!
//! ```rust
//! use squish_core::AudioFrame;
//! use squish_dynamics::{Compressor, CompressorParams, Ratio};
//!
//! let params = CompressorParams {
//!     ratio: Ratio::Limit,
//!     ..CompressorParams::default()
//! };
//! let mut limiter = Compressor::new(params, 44100).unwrap();
//!
//! let mut frame = AudioFrame::from_interleaved(vec![0.25; 512], 1, 44100);
//! limiter.process_frame(&mut frame);
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `tracing`: debug logs for configuration and sample-rate changes

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod compressor;
pub mod error;
pub mod gain_curve;
pub mod knee;
pub mod link;
pub mod params;
pub mod sidechain;
pub mod sync;

// Re-export main types at crate root
pub use compressor::{Compressor, CompressorCore};
pub use error::{ConfigureError, ParamError, SyncError};
pub use gain_curve::output_gain;
pub use knee::KneeGeometry;
pub use link::{detector_input, link};
pub use params::{CompressorParams, DetectionMode, LinkMode, PARAM_COUNT, PARAM_ORDER, Ratio};
pub use sidechain::SidechainCompressor;
pub use sync::{FrameSync, Input, Request, SyncState};
