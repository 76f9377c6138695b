//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use squish_config::{Preset, param_index};
use squish_core::linear_to_db;
use squish_dynamics::{CompressorParams, PARAM_ORDER};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.trim().to_string(), value.trim().to_string())),
        None => Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        )),
    }
}

/// Parse an output bit depth.
pub fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("Unsupported bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

/// Load a preset by factory name or TOML path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    Preset::find(name)
        .with_context(|| format!("Cannot load preset '{name}' (see 'squish presets')"))
}

/// Resolve the compressor parameters for a run: the preset (if any), then
/// each `--param` override on top.
///
/// Every bad name or value is reported in one error.
pub fn build_params(
    preset: Option<&str>,
    overrides: &[(String, String)],
) -> anyhow::Result<CompressorParams> {
    let mut preset = match preset {
        Some(name) => {
            let preset = load_preset(name)?;
            tracing::debug!(preset = %preset.name, "loaded preset");
            preset
        }
        None => Preset::default(),
    };

    for (key, value) in overrides {
        // Canonical IDs so "Ratio=8" replaces a preset's "ratio"
        let key = param_index(key).map_or(key.as_str(), |i| PARAM_ORDER[i]);
        preset.params.insert(key.to_string(), value.clone());
    }

    let params = preset.to_params().context("Invalid compressor parameters")?;
    tracing::debug!(?params, "resolved parameters");
    Ok(params)
}

/// Progress bar counting samples per channel.
pub fn progress_bar(len: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// RMS and peak level of an interleaved buffer.
#[derive(Debug, Clone, Copy)]
pub struct Levels {
    rms: f32,
    peak: f32,
}

impl Levels {
    /// Measure `samples`; an empty buffer reads as silence.
    pub fn measure(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self {
                rms: 0.0,
                peak: 0.0,
            };
        }
        let sum: f32 = samples.iter().map(|s| s * s).sum();
        Self {
            rms: (sum / samples.len() as f32).sqrt(),
            peak: samples.iter().map(|s| s.abs()).fold(0.0, f32::max),
        }
    }

    /// Print one summary line.
    pub fn print(&self, label: &str) {
        println!(
            "  {label:7} RMS {:.1} dB, Peak {:.1} dB",
            linear_to_db(self.rms),
            linear_to_db(self.peak)
        );
    }
}
