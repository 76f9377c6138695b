//! Interleaved multi-channel audio frames.
//!
//! An [`AudioFrame`] is the unit of exchange between a host and the
//! dynamics processors: a run of interleaved `f32` samples together with the
//! channel count and sample rate needed to interpret them.
//!
//! ```text
//! channels = 2:  [L0, R0, L1, R1, L2, R2, ...]
//!                 \____/  \____/
//!                sample 0 sample 1
//! ```
//!
//! Lengths are always expressed in *samples per channel*, never in raw `f32`
//! count.

use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Channel count and sample rate of one audio stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamFormat {
    /// Number of interleaved channels.
    pub channels: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl StreamFormat {
    /// Create a stream format.
    pub const fn new(channels: usize, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ch @ {} Hz", self.channels, self.sample_rate)
    }
}

/// A block of interleaved audio samples.
///
/// # Invariants
///
/// - `channels >= 1`
/// - `samples.len()` is a multiple of `channels`
///
/// # Example
///
/// ```rust
/// use squish_core::AudioFrame;
///
/// let frame = AudioFrame::from_interleaved(vec![0.1, 0.2, 0.3, 0.4], 2, 48000);
/// assert_eq!(frame.len(), 2);
/// assert_eq!(frame.sample(1), &[0.3, 0.4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    samples: Vec<f32>,
    channels: usize,
    sample_rate: u32,
}

impl AudioFrame {
    /// Wrap an interleaved buffer.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is zero or the buffer length is not a multiple
    /// of `channels`.
    pub fn from_interleaved(samples: Vec<f32>, channels: usize, sample_rate: u32) -> Self {
        assert!(channels > 0, "AudioFrame needs at least one channel");
        assert_eq!(
            samples.len() % channels,
            0,
            "Interleaved buffer length must be a multiple of the channel count"
        );
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Create a frame of `len` silent samples per channel.
    pub fn silence(format: StreamFormat, len: usize) -> Self {
        Self::from_interleaved(
            vec![0.0; len * format.channels],
            format.channels,
            format.sample_rate,
        )
    }

    /// Number of samples per channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Check if the frame holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The frame's stream format.
    #[inline]
    pub fn format(&self) -> StreamFormat {
        StreamFormat::new(self.channels, self.sample_rate)
    }

    /// All channels of sample `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn sample(&self, index: usize) -> &[f32] {
        let start = index * self.channels;
        &self.samples[start..start + self.channels]
    }

    /// The interleaved sample buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// The interleaved sample buffer, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Consume the frame and return its interleaved buffer.
    pub fn into_interleaved(self) -> Vec<f32> {
        self.samples
    }

    /// Split the frame at sample `at`, keeping `[0, at)` and returning
    /// `[at, len)` as a new frame of the same format.
    ///
    /// # Panics
    ///
    /// Panics if `at > self.len()`.
    pub fn split_off(&mut self, at: usize) -> AudioFrame {
        assert!(at <= self.len(), "split point past end of frame");
        let tail = self.samples.split_off(at * self.channels);
        AudioFrame {
            samples: tail,
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Append another frame's samples to the end of this one.
    ///
    /// # Panics
    ///
    /// Panics if the two frames have different formats.
    pub fn append(&mut self, mut other: AudioFrame) {
        assert_eq!(
            self.format(),
            other.format(),
            "Cannot append frames of different formats"
        );
        self.samples.append(&mut other.samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_counts_samples_per_channel() {
        let frame = AudioFrame::from_interleaved(vec![0.0; 12], 3, 44100);
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.channels(), 3);
        assert!(!frame.is_empty());
    }

    #[test]
    fn split_off_keeps_head_returns_tail() {
        let mut frame =
            AudioFrame::from_interleaved(vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0], 2, 48000);
        let tail = frame.split_off(1);
        assert_eq!(frame.as_slice(), &[1.0, 10.0]);
        assert_eq!(tail.as_slice(), &[2.0, 20.0, 3.0, 30.0]);
        assert_eq!(tail.format(), frame.format());
    }

    #[test]
    fn split_off_at_end_yields_empty_tail() {
        let mut frame = AudioFrame::from_interleaved(vec![1.0, 2.0], 1, 48000);
        let tail = frame.split_off(2);
        assert!(tail.is_empty());
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn append_concatenates_in_order() {
        let mut a = AudioFrame::from_interleaved(vec![1.0, 2.0], 1, 48000);
        let b = AudioFrame::from_interleaved(vec![3.0], 1, 48000);
        a.append(b);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic]
    fn append_rejects_format_mismatch() {
        let mut a = AudioFrame::from_interleaved(vec![1.0, 2.0], 1, 48000);
        let b = AudioFrame::from_interleaved(vec![3.0, 4.0], 2, 48000);
        a.append(b);
    }

    #[test]
    #[should_panic]
    fn ragged_buffer_rejected() {
        let _ = AudioFrame::from_interleaved(vec![0.0; 5], 2, 48000);
    }

    #[test]
    fn stream_format_display() {
        assert_eq!(StreamFormat::new(2, 44100).to_string(), "2 ch @ 44100 Hz");
    }

    #[test]
    fn silence_has_requested_shape() {
        let frame = AudioFrame::silence(StreamFormat::new(2, 48000), 64);
        assert_eq!(frame.len(), 64);
        assert!(frame.as_slice().iter().all(|&s| s == 0.0));
    }
}
