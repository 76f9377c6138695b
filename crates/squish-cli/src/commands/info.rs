//! WAV file metadata and level summary.

use anyhow::Context;
use clap::Args;
use squish_core::linear_to_db;
use squish_io::{WavFormat, WavInfo, read_wav, read_wav_info};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    file: PathBuf,

    /// Also decode the file and print per-channel peak and RMS levels
    #[arg(long)]
    levels: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_size = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Encoding:    {}", encoding(&info));
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} samples per channel)",
        info.duration_secs, info.num_frames
    );
    println!("Size:        {}", format_bytes(file_size));

    if args.levels {
        let (frame, _) = read_wav(&args.file)?;
        println!();
        println!("  {:8}  {:>10}  {:>10}", "Channel", "Peak dB", "RMS dB");
        for ch in 0..frame.channels() {
            let (peak, rms) = channel_levels(frame.as_slice(), frame.channels(), ch);
            println!(
                "  {:8}  {:>10.1}  {:>10.1}",
                ch,
                linear_to_db(peak),
                linear_to_db(rms)
            );
        }
    }

    Ok(())
}

fn encoding(info: &WavInfo) -> String {
    match info.format {
        WavFormat::Pcm => format!("PCM {}-bit", info.bits_per_sample),
        WavFormat::IeeeFloat => format!("IEEE Float {}-bit", info.bits_per_sample),
    }
}

/// Peak and RMS of channel `ch` in an interleaved buffer.
fn channel_levels(samples: &[f32], channels: usize, ch: usize) -> (f32, f32) {
    let mut peak = 0.0f32;
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for s in samples.iter().skip(ch).step_by(channels) {
        peak = peak.max(s.abs());
        sum += f64::from(*s) * f64::from(*s);
        count += 1;
    }
    let rms = if count == 0 { 0.0 } else { (sum / count as f64).sqrt() as f32 };
    (peak, rms)
}

fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}
