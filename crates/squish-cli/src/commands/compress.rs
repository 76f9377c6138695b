//! Single-input compression command.

use crate::commands::common::{Levels, build_params, parse_bit_depth, parse_key_val, progress_bar};
use anyhow::Context;
use clap::Args;
use squish_core::AudioFrame;
use squish_dynamics::Compressor;
use squish_io::{FrameReader, read_wav, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct CompressArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset name or preset file (TOML)
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter overrides (e.g., "threshold=-18dB", "ratio=4:1")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size in samples per channel
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

pub fn run(args: CompressArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    let params = build_params(args.preset.as_deref(), &args.param)?;

    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    println!(
        "  {} samples, {}, {:.2}s",
        input.len(),
        input.format(),
        input.len() as f32 / spec.sample_rate as f32
    );

    let mut compressor =
        Compressor::new(params, spec.sample_rate).context("Cannot configure compressor")?;
    println!(
        "Compressing: threshold {}, ratio {}, attack {} ms, release {} ms",
        params.threshold, params.ratio, params.attack_ms, params.release_ms
    );

    let input_levels = Levels::measure(input.as_slice());
    let pb = progress_bar(input.len())?;
    let mut output = AudioFrame::silence(input.format(), 0);
    let mut max_reduction = 0.0f32;

    let mut reader = FrameReader::new(input);
    while let Some(mut block) = reader.next_frame(args.block_size) {
        compressor.process_frame(&mut block);
        max_reduction = max_reduction.min(compressor.gain_reduction_db());
        pb.inc(block.len() as u64);
        output.append(block);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    input_levels.print("Input:");
    Levels::measure(output.as_slice()).print("Output:");
    println!("  Max gain reduction at block end: {:.1} dB", -max_reduction);

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, args.bit_depth)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}
