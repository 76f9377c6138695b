//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use squish_core::{AudioFrame, StreamFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    // duration() counts samples per channel
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format: spec.sample_format.into(),
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// The stream format frames read from this file carry.
    pub fn stream_format(&self) -> StreamFormat {
        StreamFormat::new(usize::from(self.channels), self.sample_rate)
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Full-scale value for signed integer samples of `bits` width.
fn full_scale(bits: u16) -> f32 {
    (1i64 << (bits - 1)) as f32
}

/// Read a WAV file into one interleaved frame along with the spec.
///
/// All channels are kept. Integer PCM is scaled to [-1, 1).
///
/// # Example
/// ```ignore
/// let (frame, spec) = read_wav("input.wav")?;
/// println!("Loaded {} samples at {} Hz", frame.len(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(AudioFrame, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);

    if spec.channels == 0 {
        return Err(Error::UnsupportedFormat("zero channels".to_string()));
    }

    let mut samples: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = full_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    // A truncated final block would break interleaving
    let channels = usize::from(spec.channels);
    samples.truncate(samples.len() - samples.len() % channels);

    tracing::debug!(
        path = %path.display(),
        channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len() / channels,
        "read wav"
    );

    Ok((
        AudioFrame::from_interleaved(samples, channels, spec.sample_rate),
        spec,
    ))
}

/// Write a frame to a WAV file.
///
/// `bits_per_sample` selects 16- or 24-bit integer PCM, or 32-bit float.
/// Integer output is clamped to the representable range.
///
/// # Example
/// ```ignore
/// let frame = AudioFrame::silence(StreamFormat::new(2, 48000), 48000);
/// write_wav("output.wav", &frame, 24)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, frame: &AudioFrame, bits_per_sample: u16) -> Result<()> {
    let path = path.as_ref();
    if !matches!(bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{bits_per_sample}-bit output (expected 16, 24 or 32)"
        )));
    }
    let channels = u16::try_from(frame.channels())
        .map_err(|_| Error::UnsupportedFormat(format!("{} channels", frame.channels())))?;

    let spec = WavSpec {
        channels,
        sample_rate: frame.sample_rate(),
        bits_per_sample,
    };
    let file = BufWriter::new(File::create(path)?);
    let mut writer = WavWriter::new(file, hound::WavSpec::from(spec))?;

    if bits_per_sample == 32 {
        for &sample in frame.as_slice() {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = full_scale(bits_per_sample);
        for &sample in frame.as_slice() {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        channels,
        bits = bits_per_sample,
        frames = frame.len(),
        "wrote wav"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let frame = AudioFrame::from_interleaved(samples.clone(), 1, 48000);

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &frame, 32).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 48000);
        assert_eq!(loaded_spec.bits_per_sample, 32);
        assert_eq!(loaded.len(), samples.len());

        for (a, b) in samples.iter().zip(loaded.as_slice()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_i16_stereo() {
        let samples: Vec<f32> = (0..2000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let frame = AudioFrame::from_interleaved(samples.clone(), 2, 44100);

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &frame, 16).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 2);
        assert_eq!(loaded.format(), StreamFormat::new(2, 44100));
        assert_eq!(loaded.len(), 1000);

        // 16-bit has less precision
        for (a, b) in samples.iter().zip(loaded.as_slice()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_integer_full_scale_is_clamped() {
        let frame = AudioFrame::from_interleaved(vec![1.0, -1.0, 2.0], 1, 8000);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &frame, 16).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        let max = 32767.0 / 32768.0;
        assert_eq!(loaded.as_slice(), &[max, -1.0, max]);
    }

    #[test]
    fn test_unsupported_bit_depth() {
        let frame = AudioFrame::from_interleaved(vec![0.0; 4], 1, 8000);
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            write_wav(file.path(), &frame, 8),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_info_counts_frames_not_samples() {
        let frame = AudioFrame::from_interleaved(vec![0.0; 4800 * 2], 2, 48000);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &frame, 24).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.bits_per_sample, 24);
        assert_eq!(info.num_frames, 4800);
        assert_eq!(info.format, WavFormat::Pcm);
        assert!((info.duration_secs - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_spec_conversions() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 96000,
            bits_per_sample: 24,
        };
        let hound_spec = hound::WavSpec::from(spec);
        assert_eq!(hound_spec.sample_format, SampleFormat::Int);
        assert_eq!(WavSpec::from(hound_spec), spec);
        assert_eq!(spec.stream_format(), StreamFormat::new(2, 96000));
    }
}
