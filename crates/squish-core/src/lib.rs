//! Squish Core - primitives for dynamics processing
//!
//! This crate provides the building blocks shared by the squish compressor
//! engine and its hosts, designed for real-time use with no allocation in
//! the per-sample path.
//!
//! # Core Abstractions
//!
//! ## Frames
//!
//! - [`AudioFrame`] - Interleaved multi-channel `f32` samples with format
//! - [`StreamFormat`] - Channel count and sample rate of one input line
//!
//! ## Level Detection
//!
//! - [`EnvelopeFollower`] - Asymmetric attack/release level tracking
//! - [`smoothing_coeff`] - One-pole coefficient from a time in milliseconds
//!
//! ## Parameters
//!
//! - [`ParameterInfo`] - Runtime parameter discovery and control
//! - [`ParamDescriptor`] - Range, unit, and identity of one parameter
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`],
//!   [`hermite_interpolation`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! squish-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use squish_core::{AudioFrame, EnvelopeFollower};
//!
//! let frame = AudioFrame::from_interleaved(vec![0.5, -0.5, 0.25, -0.25], 2, 48000);
//! let mut env = EnvelopeFollower::with_times(48000.0, 1.0, 100.0);
//!
//! for i in 0..frame.len() {
//!     let peak = frame.sample(i).iter().fold(0.0f32, |m, s| m.max(s.abs()));
//!     env.process(peak);
//! }
//! assert!(env.level() > 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod envelope;
pub mod frame;
pub mod math;
pub mod param_info;

pub use envelope::{EnvelopeFollower, smoothing_coeff};
pub use frame::{AudioFrame, StreamFormat};
pub use math::{db_to_linear, flush_denormal, hermite_interpolation, linear_to_db};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
