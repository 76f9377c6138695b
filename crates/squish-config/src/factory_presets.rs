//! Factory presets bundled with squish.
//!
//! Built-in settings that are always available without external files.

use crate::Preset;

/// Names of the factory presets, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["default", "vocal", "drum-bus", "ducking", "brickwall"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("vocal", VOCAL_PRESET),
    ("drum-bus", DRUM_BUS_PRESET),
    ("ducking", DUCKING_PRESET),
    ("brickwall", BRICKWALL_PRESET),
];

/// Stock parameters.
const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Stock settings: 2:1 above -18 dBFS, RMS detection, soft knee"
mode = "compressor"

[params]
threshold = "0.125"
ratio = "2"
attack = "20"
release = "250"
makeup = "2"
knee = "2.82843"
link = "average"
detection = "rms"
mix = "1"
"#;

/// Gentle leveling for speech and vocals.
const VOCAL_PRESET: &str = r#"
name = "Vocal"
description = "Smooth leveling for lead vocals and dialogue"
mode = "compressor"

[params]
threshold = "-20dB"
ratio = "3"
attack = "10ms"
release = "150ms"
makeup = "+6dB"
knee = "4"
link = "maximum"
detection = "rms"
"#;

/// Parallel glue for drum groups.
const DRUM_BUS_PRESET: &str = r#"
name = "Drum Bus"
description = "Punchy parallel compression that keeps transients"
mode = "compressor"

[params]
threshold = "-24dB"
ratio = "4"
attack = "30ms"
release = "80ms"
makeup = "+9dB"
knee = "2"
link = "maximum"
detection = "peak"
mix = "50%"
"#;

/// Music ducked under a voice-over on the sidechain.
const DUCKING_PRESET: &str = r#"
name = "Ducking"
description = "Pull the main signal down while the sidechain is active"
mode = "sidechain"

[params]
threshold = "0.05"
ratio = "8"
attack = "5ms"
release = "400ms"
makeup = "1"
knee = "2"
link = "maximum"
detection = "peak"
"#;

/// Hard ceiling at -1 dBFS.
const BRICKWALL_PRESET: &str = r#"
name = "Brickwall"
description = "Infinite ratio with fast attack: holds peaks at -1 dBFS"
mode = "compressor"

[params]
threshold = "-1dB"
ratio = "limit"
attack = "0.01"
release = "50ms"
makeup = "1"
knee = "1"
link = "maximum"
detection = "peak"
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use squish_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use squish_config::get_factory_preset;
///
/// let preset = get_factory_preset("Drum Bus").unwrap();
/// assert_eq!(preset.name, "Drum Bus");
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Returns true if `name` matches a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
