//! Preset listing and inspection.

use crate::commands::common::load_preset;
use anyhow::Context;
use clap::Args;
use squish_config::{Mode, Preset, factory_presets, format_param_value};
use squish_dynamics::PARAM_ORDER;
use std::path::PathBuf;

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show (factory name or TOML path); lists all when omitted
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Write the fully resolved preset to a TOML file
    #[arg(long, value_name = "PATH", requires = "name")]
    export: Option<PathBuf>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match &args.name {
        None => list_presets(),
        Some(name) => show_preset(name, args.export.as_ref()),
    }
}

fn mode_str(mode: Mode) -> &'static str {
    match mode {
        Mode::Compressor => "compress",
        Mode::Sidechain => "sidechain",
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:12} {:10} - {}", preset.name, mode_str(preset.mode), desc);
    }
    println!();
    println!("Use one with: squish compress in.wav out.wav --preset <name>");
    Ok(())
}

fn show_preset(name: &str, export: Option<&PathBuf>) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let params = preset
        .to_params()
        .with_context(|| format!("Preset '{}' has invalid parameters", preset.name))?;

    println!("{}", preset.name);
    println!("{}", "=".repeat(preset.name.len()));
    if let Some(desc) = &preset.description {
        println!("{desc}");
    }
    println!();
    println!("Mode: {}", mode_str(preset.mode));
    println!();
    println!("Parameters:");
    for (index, key) in PARAM_ORDER.iter().enumerate() {
        let marker = if preset.get_param(key).is_some() { "" } else { " (default)" };
        println!("  {:10} = {}{}", key, format_param_value(&params, index), marker);
    }

    if let Some(path) = export {
        let resolved = Preset {
            description: preset.description.clone(),
            mode: preset.mode,
            ..Preset::from_params(preset.name.clone(), &params)
        };
        resolved
            .save(path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        println!();
        println!("Exported to {}", path.display());
    }

    Ok(())
}
