//! Block-wise reading from a loaded stream.

use std::path::Path;

use squish_core::{AudioFrame, StreamFormat};

use crate::Result;
use crate::wav::{WavSpec, read_wav};

/// Hands out consecutive frames of a loaded stream.
///
/// Each call to [`next_frame`](Self::next_frame) may ask for a different
/// size, which lets a host answer a synchronizer's requests exactly. The
/// last frame is shorter when the stream runs out.
///
/// # Example
///
/// ```rust
/// use squish_core::AudioFrame;
/// use squish_io::FrameReader;
///
/// let stream = AudioFrame::from_interleaved(vec![0.0; 10], 1, 48000);
/// let mut reader = FrameReader::new(stream);
///
/// assert_eq!(reader.next_frame(4).unwrap().len(), 4);
/// assert_eq!(reader.next_frame(8).unwrap().len(), 6);
/// assert!(reader.next_frame(4).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct FrameReader {
    stream: AudioFrame,
    position: usize,
}

impl FrameReader {
    /// Read from an in-memory stream.
    pub fn new(stream: AudioFrame) -> Self {
        Self {
            stream,
            position: 0,
        }
    }

    /// Load a WAV file and read from it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<(Self, WavSpec)> {
        let (stream, spec) = read_wav(path)?;
        Ok((Self::new(stream), spec))
    }

    /// Format of every frame this reader returns.
    pub fn format(&self) -> StreamFormat {
        self.stream.format()
    }

    /// The whole stream, regardless of position.
    pub fn stream(&self) -> &AudioFrame {
        &self.stream
    }

    /// Total length of the stream in samples per channel.
    pub fn len(&self) -> usize {
        self.stream.len()
    }

    /// Check if the stream holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Samples already handed out.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Samples still to come.
    pub fn remaining(&self) -> usize {
        self.stream.len() - self.position
    }

    /// Check whether every sample has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Next frame of at most `samples` samples per channel.
    ///
    /// Returns `None` once the stream is exhausted.
    pub fn next_frame(&mut self, samples: usize) -> Option<AudioFrame> {
        if self.is_exhausted() {
            return None;
        }
        let take = samples.min(self.remaining());
        let channels = self.stream.channels();
        let start = self.position * channels;
        let end = start + take * channels;
        self.position += take;

        Some(AudioFrame::from_interleaved(
            self.stream.as_slice()[start..end].to_vec(),
            channels,
            self.stream.sample_rate(),
        ))
    }

    /// Rewind to the start of the stream.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize, channels: usize) -> AudioFrame {
        let samples = (0..len * channels).map(|i| i as f32).collect();
        AudioFrame::from_interleaved(samples, channels, 44100)
    }

    #[test]
    fn frames_are_consecutive() {
        let mut reader = FrameReader::new(ramp(10, 2));
        let a = reader.next_frame(3).unwrap();
        let b = reader.next_frame(3).unwrap();
        assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(b.sample(0), &[6.0, 7.0]);
        assert_eq!(reader.position(), 6);
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn last_frame_is_short() {
        let mut reader = FrameReader::new(ramp(5, 1));
        assert_eq!(reader.next_frame(4).unwrap().len(), 4);
        let tail = reader.next_frame(4).unwrap();
        assert_eq!(tail.as_slice(), &[4.0]);
        assert!(reader.is_exhausted());
        assert!(reader.next_frame(4).is_none());
    }

    #[test]
    fn zero_request_returns_empty_frame() {
        let mut reader = FrameReader::new(ramp(5, 1));
        let frame = reader.next_frame(0).unwrap();
        assert!(frame.is_empty());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn rewind_starts_over() {
        let mut reader = FrameReader::new(ramp(4, 1));
        reader.next_frame(4);
        reader.rewind();
        assert_eq!(reader.next_frame(1).unwrap().as_slice(), &[0.0]);
    }

    #[test]
    fn format_is_preserved() {
        let mut reader = FrameReader::new(ramp(4, 3));
        assert_eq!(reader.format(), StreamFormat::new(3, 44100));
        assert_eq!(reader.next_frame(2).unwrap().format(), reader.format());
        assert_eq!(reader.stream().len(), 4);
    }
}
