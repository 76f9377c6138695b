//! Two-input frame synchronizer for sidechain processing.
//!
//! Main and sidechain frames arrive independently and with unrelated
//! lengths. The synchronizer keeps one slot per line and releases a pair of
//! equal-length frames once both slots are filled:
//!
//! ```text
//!            push(Main)            push(Sidechain)
//! BothEmpty ───────────→ OneFilled(Main) ───────────→ BothFilled
//!     ↑                                                   │ take_pair
//!     └──────────── tails empty ──────────────────────────┤
//!                   tail left on one line ──→ OneFilled(line)
//! ```
//!
//! A pair is `n = min(len(main), len(sidechain))` samples long. The leading
//! `n` samples of each slot are handed out and the remainders stay queued, so
//! every sample is paired exactly once. A frame arriving on a line that still
//! holds a remainder is appended to it.

use core::fmt;

use squish_core::{AudioFrame, StreamFormat};

use crate::error::{ConfigureError, SyncError};

/// One of the two input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// The signal being compressed.
    Main,
    /// The signal driving the detector.
    Sidechain,
}

impl Input {
    fn slot(self) -> usize {
        match self {
            Input::Main => 0,
            Input::Sidechain => 1,
        }
    }

    /// The other line.
    pub fn other(self) -> Self {
        match self {
            Input::Main => Input::Sidechain,
            Input::Sidechain => Input::Main,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Main => f.write_str("main"),
            Input::Sidechain => f.write_str("sidechain"),
        }
    }
}

/// Occupancy of the two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing pending.
    BothEmpty,
    /// Only this line holds samples.
    OneFilled(Input),
    /// Both lines hold samples; a pair can be taken.
    BothFilled,
}

/// What the host should feed next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Line to pull from.
    pub input: Input,
    /// Preferred frame length, or `None` for any length.
    pub samples: Option<usize>,
}

/// Pairs main and sidechain frames into equal-length chunks.
#[derive(Debug, Clone)]
pub struct FrameSync {
    formats: [StreamFormat; 2],
    slots: [Option<AudioFrame>; 2],
}

impl FrameSync {
    /// Create a synchronizer for the two line formats.
    ///
    /// Both lines need at least one channel and the same non-zero sample
    /// rate. Channel counts may differ.
    pub fn new(main: StreamFormat, sidechain: StreamFormat) -> Result<Self, ConfigureError> {
        for (line, format) in [(Input::Main, main), (Input::Sidechain, sidechain)] {
            if format.channels == 0 {
                return Err(ConfigureError::NoChannels { line });
            }
            if format.sample_rate == 0 {
                return Err(ConfigureError::ZeroSampleRate { line });
            }
        }
        if main.sample_rate != sidechain.sample_rate {
            return Err(ConfigureError::SampleRateMismatch {
                main: main.sample_rate,
                sidechain: sidechain.sample_rate,
            });
        }

        Ok(Self {
            formats: [main, sidechain],
            slots: [None, None],
        })
    }

    /// Configured format of `line`.
    pub fn format(&self, line: Input) -> StreamFormat {
        self.formats[line.slot()]
    }

    /// Queue a frame on `line`.
    ///
    /// Empty frames are accepted and ignored.
    pub fn push(&mut self, line: Input, frame: AudioFrame) -> Result<(), SyncError> {
        let expected = self.format(line);
        if frame.format() != expected {
            return Err(SyncError::FormatMismatch {
                line,
                expected,
                got: frame.format(),
            });
        }
        if frame.is_empty() {
            return Ok(());
        }

        let slot = &mut self.slots[line.slot()];
        *slot = Some(match slot.take() {
            Some(mut pending) => {
                pending.append(frame);
                pending
            }
            None => frame,
        });
        Ok(())
    }

    /// Samples per channel waiting on `line`.
    pub fn pending(&self, line: Input) -> usize {
        self.slots[line.slot()].as_ref().map_or(0, AudioFrame::len)
    }

    /// Current slot occupancy.
    pub fn state(&self) -> SyncState {
        match (&self.slots[0], &self.slots[1]) {
            (None, None) => SyncState::BothEmpty,
            (Some(_), None) => SyncState::OneFilled(Input::Main),
            (None, Some(_)) => SyncState::OneFilled(Input::Sidechain),
            (Some(_), Some(_)) => SyncState::BothFilled,
        }
    }

    /// Take the leading `min(len)` samples of both lines.
    ///
    /// Returns `(main, sidechain)` of equal length, or `None` unless both
    /// slots are filled. Remainders stay queued.
    pub fn take_pair(&mut self) -> Option<(AudioFrame, AudioFrame)> {
        let n = match (&self.slots[0], &self.slots[1]) {
            (Some(main), Some(sc)) => main.len().min(sc.len()),
            _ => return None,
        };

        let main = Self::take_head(&mut self.slots[0], n)?;
        let sidechain = Self::take_head(&mut self.slots[1], n)?;
        Some((main, sidechain))
    }

    fn take_head(slot: &mut Option<AudioFrame>, n: usize) -> Option<AudioFrame> {
        let mut head = slot.take()?;
        let tail = head.split_off(n);
        if !tail.is_empty() {
            *slot = Some(tail);
        }
        Some(head)
    }

    /// Which line to feed next, or `None` when a pair is ready.
    ///
    /// While one line holds samples the other is asked for the same count.
    pub fn request(&self) -> Option<Request> {
        match self.state() {
            SyncState::BothEmpty => Some(Request {
                input: Input::Main,
                samples: None,
            }),
            SyncState::OneFilled(held) => Some(Request {
                input: held.other(),
                samples: Some(self.pending(held)),
            }),
            SyncState::BothFilled => None,
        }
    }

    /// Discard anything pending.
    pub fn reset(&mut self) {
        self.slots = [None, None];
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::vec;

    const MONO: StreamFormat = StreamFormat::new(1, 48000);

    fn ramp(start: usize, len: usize) -> AudioFrame {
        AudioFrame::from_interleaved((start..start + len).map(|i| i as f32).collect(), 1, 48000)
    }

    #[test]
    fn starts_empty_and_requests_main() {
        let sync = FrameSync::new(MONO, MONO).unwrap();
        assert_eq!(sync.state(), SyncState::BothEmpty);
        assert_eq!(
            sync.request(),
            Some(Request {
                input: Input::Main,
                samples: None
            })
        );
    }

    #[test]
    fn one_filled_requests_matching_length() {
        let mut sync = FrameSync::new(MONO, MONO).unwrap();
        sync.push(Input::Main, ramp(0, 100)).unwrap();
        assert_eq!(sync.state(), SyncState::OneFilled(Input::Main));
        assert_eq!(
            sync.request(),
            Some(Request {
                input: Input::Sidechain,
                samples: Some(100)
            })
        );
        assert!(sync.take_pair().is_none());
    }

    #[test]
    fn pair_is_clipped_to_shorter_and_keeps_tail() {
        let mut sync = FrameSync::new(MONO, MONO).unwrap();
        sync.push(Input::Main, ramp(0, 100)).unwrap();
        sync.push(Input::Sidechain, ramp(1000, 60)).unwrap();
        assert_eq!(sync.state(), SyncState::BothFilled);
        assert_eq!(sync.request(), None);

        let (main, sc) = sync.take_pair().unwrap();
        assert_eq!(main.len(), 60);
        assert_eq!(sc.len(), 60);
        assert_eq!(main.as_slice()[59], 59.0);
        assert_eq!(sync.pending(Input::Main), 40);
        assert_eq!(sync.pending(Input::Sidechain), 0);
        assert_eq!(
            sync.request(),
            Some(Request {
                input: Input::Sidechain,
                samples: Some(40)
            })
        );
    }

    #[test]
    fn arrival_appends_to_remainder() {
        let mut sync = FrameSync::new(MONO, MONO).unwrap();
        sync.push(Input::Main, ramp(0, 100)).unwrap();
        sync.push(Input::Sidechain, ramp(0, 60)).unwrap();
        let _ = sync.take_pair();
        sync.push(Input::Main, ramp(100, 50)).unwrap();
        assert_eq!(sync.pending(Input::Main), 90);

        sync.push(Input::Sidechain, ramp(60, 90)).unwrap();
        let (main, sc) = sync.take_pair().unwrap();
        let expected: vec::Vec<f32> = (60..150).map(|i| i as f32).collect();
        assert_eq!(main.as_slice(), expected.as_slice());
        assert_eq!(sc.as_slice(), expected.as_slice());
        assert_eq!(sync.state(), SyncState::BothEmpty);
    }

    #[test]
    fn empty_frames_ignored() {
        let mut sync = FrameSync::new(MONO, MONO).unwrap();
        sync.push(Input::Sidechain, AudioFrame::silence(MONO, 0)).unwrap();
        assert_eq!(sync.state(), SyncState::BothEmpty);
    }

    #[test]
    fn format_mismatch_rejected() {
        let mut sync = FrameSync::new(MONO, StreamFormat::new(2, 48000)).unwrap();
        let err = sync.push(Input::Sidechain, ramp(0, 10)).unwrap_err();
        assert_eq!(
            err,
            SyncError::FormatMismatch {
                line: Input::Sidechain,
                expected: StreamFormat::new(2, 48000),
                got: MONO,
            }
        );
    }

    #[test]
    fn configuration_rejects_bad_formats() {
        assert!(matches!(
            FrameSync::new(MONO, StreamFormat::new(1, 44100)),
            Err(ConfigureError::SampleRateMismatch {
                main: 48000,
                sidechain: 44100
            })
        ));
        assert!(matches!(
            FrameSync::new(StreamFormat::new(0, 48000), MONO),
            Err(ConfigureError::NoChannels { line: Input::Main })
        ));
        assert!(matches!(
            FrameSync::new(MONO, StreamFormat::new(1, 0)),
            Err(ConfigureError::ZeroSampleRate {
                line: Input::Sidechain
            })
        ));
    }

    #[test]
    fn reset_discards_slots() {
        let mut sync = FrameSync::new(MONO, MONO).unwrap();
        sync.push(Input::Main, ramp(0, 10)).unwrap();
        sync.reset();
        assert_eq!(sync.state(), SyncState::BothEmpty);
    }
}
