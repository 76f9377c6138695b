//! Configuration and preset management for squish.
//!
//! # Features
//!
//! - **Presets**: Load and save compressor settings as TOML
//! - **Parameter parsing**: Human-friendly value strings (`-12dB`, `4:1`, `limit`, `50%`)
//! - **Validation**: Range checks that report every problem at once
//! - **Factory Presets**: Built-in starting points
//!
//! # Example
//!
//! ```rust,no_run
//! use squish_config::{Mode, Preset};
//!
//! let preset = Preset::new("Podcast")
//!     .with_description("Even out a voice track")
//!     .with_mode(Mode::Compressor)
//!     .with_param("threshold", "-20dB")
//!     .with_param("ratio", "3:1");
//!
//! let params = preset.to_params().unwrap();
//! preset.save("podcast.toml").unwrap();
//! ```

mod error;
mod param_value;
mod preset;

/// Parameter name and range validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::{ConfigError, FileOp};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use param_value::{ParamValue, apply_param, format_param_value, parse_param_value};
pub use preset::{Mode, Preset};
pub use validation::{
    ValidationError, ValidationResult, param_descriptor, param_index, validate_param,
    validate_params,
};
