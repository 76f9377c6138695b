//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use squish_core::{ParamDescriptor, ParamUnit};
use squish_dynamics::params::{PARAM_COUNT, descriptor};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

/// Spellings accepted by `--param` and preset files, per string ID.
fn accepted_forms(string_id: &str) -> &'static str {
    match string_id {
        "threshold" => "0.125, -18dB",
        "ratio" => "4, 4:1, limit, inf",
        "attack" | "release" => "20, 20ms, 0.5s",
        "makeup" => "2, +6dB",
        "knee" => "2.83, 9dB",
        "mix" => "0.5, 50%",
        "link" => "average, maximum",
        "detection" => "peak, rms",
        _ => "",
    }
}

fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    match desc.label_for(value) {
        Some(label) => label.to_string(),
        None => format!("{value}{}", desc.unit.suffix()),
    }
}

fn format_range(desc: &ParamDescriptor) -> String {
    if !desc.step_labels.is_empty() {
        return desc.step_labels.join(" | ");
    }
    let range = format!("{} - {}", desc.min, desc.max);
    match desc.unit {
        ParamUnit::None | ParamUnit::Multiplier => range,
        unit => format!("{range}{}", unit.suffix()),
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let descriptors: Vec<ParamDescriptor> = (0..PARAM_COUNT).filter_map(descriptor).collect();

    if let Some(name) = &args.param {
        let desc = descriptors
            .iter()
            .find(|d| d.string_id.eq_ignore_ascii_case(name) || d.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", name))?;

        println!("{} ({})", desc.name, desc.string_id);
        println!("{}", "=".repeat(desc.name.len() + desc.string_id.len() + 3));
        println!();
        println!("  Range:    {}", format_range(desc));
        println!("  Default:  {}", format_value(desc, desc.default));
        println!("  Accepts:  {}", accepted_forms(desc.string_id));
        if desc.string_id == "ratio" {
            println!("  'limit' switches to brickwall limiting at the threshold.");
        }
        return Ok(());
    }

    println!("Compressor Parameters");
    println!("=====================");
    println!();
    println!(
        "  {:10}  {:22}  {:10}  {}",
        "Name", "Range", "Default", "Accepts"
    );
    println!(
        "  {:10}  {:22}  {:10}  {}",
        "----", "-----", "-------", "-------"
    );
    for desc in &descriptors {
        println!(
            "  {:10}  {:22}  {:10}  {}",
            desc.string_id,
            format_range(desc),
            format_value(desc, desc.default),
            accepted_forms(desc.string_id)
        );
    }
    println!();
    println!("Example:");
    println!("  squish compress in.wav out.wav --param threshold=-24dB --param ratio=4:1");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_parameter_has_accepted_forms() {
        for index in 0..PARAM_COUNT {
            let desc = descriptor(index).unwrap();
            assert!(!accepted_forms(desc.string_id).is_empty(), "{}", desc.string_id);
        }
    }

    #[test]
    fn stepped_defaults_show_labels() {
        let detection = (0..PARAM_COUNT)
            .filter_map(descriptor)
            .find(|d| d.string_id == "detection")
            .unwrap();
        assert_eq!(format_value(&detection, detection.default), "rms");
        assert_eq!(format_range(&detection), "peak | rms");
    }
}
