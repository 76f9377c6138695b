//! Channel linking for the detector path.

use crate::params::{DetectionMode, LinkMode};

/// Reduce one multi-channel detector sample to a single magnitude.
///
/// `channels` must be non-empty.
#[inline]
pub fn link(channels: &[f32], mode: LinkMode) -> f32 {
    match mode {
        LinkMode::Maximum => channels.iter().fold(0.0f32, |m, s| m.max(s.abs())),
        LinkMode::Average => {
            channels.iter().map(|s| s.abs()).sum::<f32>() / channels.len() as f32
        }
    }
}

/// Linked magnitude as fed to the envelope follower: squared in RMS mode.
#[inline]
pub fn detector_input(channels: &[f32], mode: LinkMode, detection: DetectionMode) -> f32 {
    let linked = link(channels, mode);
    match detection {
        DetectionMode::Peak => linked,
        DetectionMode::Rms => linked * linked,
    }
}
