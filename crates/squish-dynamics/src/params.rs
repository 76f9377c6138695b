//! Compressor parameter set.
//!
//! | Parameter | Range | Default | Notes |
//! |-----------|-------|---------|-------|
//! | threshold | 0.000976563 to 1 | 0.125 | linear amplitude (-60 dBFS to 0 dBFS) |
//! | ratio | 1 to 20, or limit | 2 | `Ratio::Limit` clamps at threshold |
//! | attack | 0.01 to 2000 ms | 20 | |
//! | release | 0.01 to 9000 ms | 250 | |
//! | makeup | 1 to 64 | 2 | linear gain |
//! | knee | 1 to 8 | 2.82843 | 1 is a hard knee |
//! | link | average, maximum | average | how detector channels combine |
//! | detection | peak, rms | rms | |
//! | mix | 0 to 1 | 1 | 0 is fully dry |

use core::fmt;

use squish_core::{ParamDescriptor, ParamId, ParamUnit};

use crate::error::ParamError;

/// Lowest accepted threshold, 2^-10 (about -60 dBFS).
pub const THRESHOLD_MIN: f32 = 0.000976563;
/// Highest accepted threshold, 0 dBFS.
pub const THRESHOLD_MAX: f32 = 1.0;
/// Lowest finite ratio (no compression).
pub const RATIO_MIN: f32 = 1.0;
/// Highest finite ratio.
pub const RATIO_MAX: f32 = 20.0;
/// Attack time range in milliseconds.
pub const ATTACK_RANGE: (f32, f32) = (0.01, 2000.0);
/// Release time range in milliseconds.
pub const RELEASE_RANGE: (f32, f32) = (0.01, 9000.0);
/// Make-up gain range (linear).
pub const MAKEUP_RANGE: (f32, f32) = (1.0, 64.0);
/// Knee width range (linear factor).
pub const KNEE_RANGE: (f32, f32) = (1.0, 8.0);
/// Dry/wet range.
pub const MIX_RANGE: (f32, f32) = (0.0, 1.0);

/// Compression ratio.
///
/// Infinite ratio is an explicit variant rather than a large sentinel value.
/// Only [`Ratio::Limit`] hard-limits at threshold; any finite ratio, however
/// large, follows the ratio curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// `n:1` compression with `n` in `[1, 20]`.
    Finite(f32),
    /// `∞:1`. Output is held at threshold once the knee is passed.
    Limit,
}

impl Ratio {
    /// Build a ratio from the flat `f32` parameter value.
    ///
    /// Positive infinity selects [`Ratio::Limit`]; finite values are
    /// clamped into `[1, 20]`.
    pub fn from_value(value: f32) -> Self {
        if value == f32::INFINITY {
            Ratio::Limit
        } else {
            Ratio::Finite(value.clamp(RATIO_MIN, RATIO_MAX))
        }
    }

    /// Flat `f32` value of this ratio; `f32::INFINITY` for [`Ratio::Limit`].
    pub fn value(self) -> f32 {
        match self {
            Ratio::Finite(r) => r,
            Ratio::Limit => f32::INFINITY,
        }
    }

    /// Returns `true` for [`Ratio::Limit`].
    pub fn is_limit(self) -> bool {
        matches!(self, Ratio::Limit)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::Finite(2.0)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Finite(r) => write!(f, "{r}:1"),
            Ratio::Limit => f.write_str("limit"),
        }
    }
}

/// How a multi-channel detector sample is reduced to one magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkMode {
    /// Mean of the absolute channel values.
    #[default]
    Average,
    /// Largest absolute channel value.
    Maximum,
}

impl LinkMode {
    /// Display labels, indexed by [`LinkMode::index`].
    pub const LABELS: &'static [&'static str] = &["average", "maximum"];

    /// Stepped parameter index.
    pub fn index(self) -> usize {
        match self {
            LinkMode::Average => 0,
            LinkMode::Maximum => 1,
        }
    }

    /// Inverse of [`index`](Self::index); out-of-range values saturate.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            LinkMode::Average
        } else {
            LinkMode::Maximum
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// Parse a lowercase or mixed-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("average") {
            Some(LinkMode::Average)
        } else if name.eq_ignore_ascii_case("maximum") {
            Some(LinkMode::Maximum)
        } else {
            None
        }
    }
}

/// Level detection law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetectionMode {
    /// Envelope of the rectified signal.
    Peak,
    /// Envelope of the squared signal.
    #[default]
    Rms,
}

impl DetectionMode {
    /// Display labels, indexed by [`DetectionMode::index`].
    pub const LABELS: &'static [&'static str] = &["peak", "rms"];

    /// Stepped parameter index.
    pub fn index(self) -> usize {
        match self {
            DetectionMode::Peak => 0,
            DetectionMode::Rms => 1,
        }
    }

    /// Inverse of [`index`](Self::index); out-of-range values saturate.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            DetectionMode::Peak
        } else {
            DetectionMode::Rms
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// Parse a lowercase or mixed-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("peak") {
            Some(DetectionMode::Peak)
        } else if name.eq_ignore_ascii_case("rms") {
            Some(DetectionMode::Rms)
        } else {
            None
        }
    }
}

/// Full parameter set for one compressor instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorParams {
    /// Linear threshold.
    pub threshold: f32,
    /// Compression ratio.
    pub ratio: Ratio,
    /// Attack time in milliseconds.
    pub attack_ms: f32,
    /// Release time in milliseconds.
    pub release_ms: f32,
    /// Linear make-up gain.
    pub makeup: f32,
    /// Knee width factor; 1 is a hard knee.
    pub knee: f32,
    /// Dry/wet mix.
    pub mix: f32,
    /// Detector channel linking.
    pub link: LinkMode,
    /// Detector law.
    pub detection: DetectionMode,
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self {
            threshold: 0.125,
            ratio: Ratio::default(),
            attack_ms: 20.0,
            release_ms: 250.0,
            makeup: 2.0,
            knee: 2.82843,
            mix: 1.0,
            link: LinkMode::Average,
            detection: DetectionMode::Rms,
        }
    }
}

fn check(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ParamError> {
    if value.is_nan() || value < min || value > max {
        Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

impl CompressorParams {
    /// Check every numeric field against its range.
    ///
    /// Reports the first offending field.
    pub fn validate(&self) -> Result<(), ParamError> {
        check("threshold", self.threshold, (THRESHOLD_MIN, THRESHOLD_MAX))?;
        if let Ratio::Finite(r) = self.ratio {
            check("ratio", r, (RATIO_MIN, RATIO_MAX))?;
        }
        check("attack", self.attack_ms, ATTACK_RANGE)?;
        check("release", self.release_ms, RELEASE_RANGE)?;
        check("makeup", self.makeup, MAKEUP_RANGE)?;
        check("knee", self.knee, KNEE_RANGE)?;
        check("mix", self.mix, MIX_RANGE)?;
        Ok(())
    }

    /// Flat `f32` value of parameter `index` in [`PARAM_ORDER`] order.
    ///
    /// Stepped parameters return their label index; the limit ratio
    /// returns `f32::INFINITY`.
    pub fn get(&self, index: usize) -> f32 {
        match index {
            0 => self.threshold,
            1 => self.ratio.value(),
            2 => self.attack_ms,
            3 => self.release_ms,
            4 => self.makeup,
            5 => self.knee,
            6 => self.link.index() as f32,
            7 => self.detection.index() as f32,
            8 => self.mix,
            _ => 0.0,
        }
    }

    /// Set parameter `index` from a flat `f32`, clamping into range.
    ///
    /// NaN is ignored. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if value.is_nan() {
            return;
        }
        let Some(desc) = descriptor(index) else {
            return;
        };
        match index {
            0 => self.threshold = desc.clamp(value),
            1 => self.ratio = Ratio::from_value(value),
            2 => self.attack_ms = desc.clamp(value),
            3 => self.release_ms = desc.clamp(value),
            4 => self.makeup = desc.clamp(value),
            5 => self.knee = desc.clamp(value),
            6 => self.link = LinkMode::from_index(libm::roundf(desc.clamp(value)) as usize),
            7 => {
                self.detection = DetectionMode::from_index(libm::roundf(desc.clamp(value)) as usize);
            }
            8 => self.mix = desc.clamp(value),
            _ => {}
        }
    }
}

/// Parameter string IDs in index order.
pub const PARAM_ORDER: [&str; 9] = [
    "threshold",
    "ratio",
    "attack",
    "release",
    "makeup",
    "knee",
    "link",
    "detection",
    "mix",
];

/// Number of compressor parameters.
pub const PARAM_COUNT: usize = PARAM_ORDER.len();

/// Descriptor for compressor parameter `index`.
///
/// Shared by [`Compressor`](crate::Compressor) and
/// [`SidechainCompressor`](crate::SidechainCompressor) so both expose the
/// same indices and IDs.
pub fn descriptor(index: usize) -> Option<ParamDescriptor> {
    let defaults = CompressorParams::default();
    match index {
        0 => Some(
            ParamDescriptor {
                unit: ParamUnit::None,
                step: 0.001,
                ..ParamDescriptor::multiplier(
                    "Threshold",
                    "Thresh",
                    THRESHOLD_MIN,
                    THRESHOLD_MAX,
                    defaults.threshold,
                )
            }
            .with_id(ParamId(100), "threshold"),
        ),
        1 => Some(
            ParamDescriptor {
                unit: ParamUnit::Ratio,
                step: 0.1,
                ..ParamDescriptor::multiplier("Ratio", "Ratio", RATIO_MIN, RATIO_MAX, 2.0)
            }
            .with_id(ParamId(101), "ratio"),
        ),
        2 => Some(
            ParamDescriptor::time_ms(
                "Attack",
                "Attack",
                ATTACK_RANGE.0,
                ATTACK_RANGE.1,
                defaults.attack_ms,
            )
            .with_id(ParamId(102), "attack"),
        ),
        3 => Some(
            ParamDescriptor::time_ms(
                "Release",
                "Release",
                RELEASE_RANGE.0,
                RELEASE_RANGE.1,
                defaults.release_ms,
            )
            .with_id(ParamId(103), "release"),
        ),
        4 => Some(
            ParamDescriptor::multiplier(
                "Makeup Gain",
                "Makeup",
                MAKEUP_RANGE.0,
                MAKEUP_RANGE.1,
                defaults.makeup,
            )
            .with_id(ParamId(104), "makeup"),
        ),
        5 => Some(
            ParamDescriptor::multiplier("Knee", "Knee", KNEE_RANGE.0, KNEE_RANGE.1, defaults.knee)
                .with_id(ParamId(105), "knee"),
        ),
        6 => Some(
            ParamDescriptor::choice("Link", "Link", LinkMode::LABELS, defaults.link.index())
                .with_id(ParamId(106), "link"),
        ),
        7 => Some(
            ParamDescriptor::choice(
                "Detection",
                "Detect",
                DetectionMode::LABELS,
                defaults.detection.index(),
            )
            .with_id(ParamId(107), "detection"),
        ),
        8 => Some(
            ParamDescriptor {
                unit: ParamUnit::None,
                ..ParamDescriptor::multiplier("Mix", "Mix", MIX_RANGE.0, MIX_RANGE.1, defaults.mix)
            }
            .with_id(ParamId(108), "mix"),
        ),
        _ => None,
    }
}
