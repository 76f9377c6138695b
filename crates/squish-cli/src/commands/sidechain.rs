//! Two-input compression command.
//!
//! The host loop asks the compressor which input it wants next and reads
//! exactly that many samples from it. Once the sidechain file runs out it
//! is padded with silence, so every main sample reaches the output.

use crate::commands::common::{Levels, build_params, parse_bit_depth, parse_key_val, progress_bar};
use anyhow::Context;
use clap::Args;
use squish_core::AudioFrame;
use squish_dynamics::{Input, SidechainCompressor};
use squish_io::{FrameReader, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct SidechainArgs {
    /// Main WAV file (the signal that gets compressed)
    #[arg(value_name = "MAIN")]
    main: PathBuf,

    /// Sidechain WAV file (the signal that drives the gain)
    #[arg(value_name = "SIDECHAIN")]
    sidechain: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset name or preset file (TOML)
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter overrides (e.g., "threshold=-30dB", "release=400ms")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Main read size when the compressor will take any length
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Sidechain read size when the compressor will take any length
    /// (defaults to --block-size)
    #[arg(long)]
    sidechain_block_size: Option<usize>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

pub fn run(args: SidechainArgs) -> anyhow::Result<()> {
    let main_block = args.block_size;
    let sidechain_block = args.sidechain_block_size.unwrap_or(main_block);
    if main_block == 0 || sidechain_block == 0 {
        anyhow::bail!("block sizes must be at least 1");
    }
    let params = build_params(args.preset.as_deref(), &args.param)?;

    let (mut main, _) = FrameReader::open(&args.main)
        .with_context(|| format!("Failed to read {}", args.main.display()))?;
    let (mut sidechain, _) = FrameReader::open(&args.sidechain)
        .with_context(|| format!("Failed to read {}", args.sidechain.display()))?;
    println!("Main:      {} ({} samples, {})", args.main.display(), main.len(), main.format());
    println!(
        "Sidechain: {} ({} samples, {})",
        args.sidechain.display(),
        sidechain.len(),
        sidechain.format()
    );

    let mut compressor = SidechainCompressor::new(params, main.format(), sidechain.format())
        .context("Cannot pair main and sidechain inputs")?;
    if sidechain.len() < main.len() {
        println!(
            "  sidechain is {} samples shorter; padding with silence",
            main.len() - sidechain.len()
        );
    }

    let main_levels = Levels::measure(main.stream().as_slice());
    let pb = progress_bar(main.len())?;
    let mut output = AudioFrame::silence(compressor.output_format(), 0);
    let mut padded = 0usize;

    while let Some(request) = compressor.request() {
        let frame = match request.input {
            Input::Main => {
                let Some(frame) = main.next_frame(request.samples.unwrap_or(main_block)) else {
                    break;
                };
                frame
            }
            Input::Sidechain => {
                let wanted = request.samples.unwrap_or(sidechain_block);
                match sidechain.next_frame(wanted) {
                    Some(frame) => frame,
                    None => {
                        if padded == 0 {
                            tracing::debug!(at = main.position(), "sidechain exhausted");
                        }
                        padded += wanted;
                        AudioFrame::silence(sidechain.format(), wanted)
                    }
                }
            }
        };

        let line = request.input;
        if let Some(block) = compressor
            .push(line, frame)
            .with_context(|| format!("Rejected {line} frame"))?
        {
            pb.inc(block.len() as u64);
            output.append(block);
        }
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    main_levels.print("Main:");
    Levels::measure(sidechain.stream().as_slice()).print("Side:");
    Levels::measure(output.as_slice()).print("Output:");
    if padded > 0 {
        println!("  Sidechain padded with {padded} silent samples");
    }

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, args.bit_depth)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}
