//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use squish_dynamics::{CompressorParams, PARAM_ORDER};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, FileOp};
use crate::factory_presets::get_factory_preset;
use crate::param_value::{apply_param, format_param_value};
use crate::validation::{ValidationError, collect, validate_params};

/// Which adapter a preset is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single input; the signal compresses itself.
    #[default]
    Compressor,
    /// Gain driven by a second input.
    Sidechain,
}

/// A named compressor setting.
///
/// Parameters are stored as strings so presets can use any form accepted by
/// [`parse_param_value`](crate::parse_param_value). Missing parameters take
/// their defaults.
///
/// # TOML Format
///
/// ```toml
/// name = "Vocal"
/// description = "Smooth leveling for lead vocals"
/// mode = "compressor"
///
/// [params]
/// threshold = "-18dB"
/// ratio = "3"
/// attack = "10ms"
/// release = "120ms"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Intended adapter.
    #[serde(default)]
    pub mode: Mode,

    /// Parameter values keyed by parameter string ID.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            mode: Mode::Compressor,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset holding every field of `params`.
    pub fn from_params(name: impl Into<String>, params: &CompressorParams) -> Self {
        let mut preset = Self::new(name);
        for (index, key) in PARAM_ORDER.iter().enumerate() {
            preset
                .params
                .insert((*key).to_string(), format_param_value(params, index));
        }
        preset
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the intended mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a parameter to the preset.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get a raw parameter string.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|s| s.as_str())
    }

    /// Build the parameter set: defaults overridden by this preset's
    /// values, then range-checked.
    ///
    /// Every unknown name, malformed value, and out-of-range value is
    /// reported together.
    pub fn to_params(&self) -> Result<CompressorParams, ValidationError> {
        let mut params = CompressorParams::default();
        let mut errors = Vec::new();

        for (key, value) in &self.params {
            if let Err(err) = apply_param(&mut params, key, value) {
                errors.push(err);
            }
        }
        if let Err(err) = validate_params(&params) {
            match err {
                ValidationError::Multiple(mut inner) => errors.append(&mut inner),
                other => errors.push(other),
            }
        }

        collect(errors)?;
        Ok(params)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(FileOp::Read, path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Find a preset by factory name, falling back to `name` as a file path.
    pub fn find(name: &str) -> Result<Self, ConfigError> {
        if let Some(preset) = get_factory_preset(name) {
            return Ok(preset);
        }
        let path = Path::new(name);
        if path.is_file() {
            return Self::load(path);
        }
        Err(ConfigError::UnknownPreset(name.to_string()))
    }

    /// Load a preset file and resolve it to a parameter set.
    pub fn load_params(path: impl AsRef<Path>) -> Result<CompressorParams, ConfigError> {
        Ok(Self::load(path)?.to_params()?)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(FileOp::CreateDir, parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(FileOp::Write, path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
