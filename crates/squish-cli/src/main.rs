//! squish CLI - compress WAV files from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "squish")]
#[command(author, version, about = "Feed-forward dynamic range compressor", long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a WAV file with its own signal as the detector
    Compress(commands::compress::CompressArgs),

    /// Compress a WAV file driven by a second (sidechain) file
    Sidechain(commands::sidechain::SidechainArgs),

    /// Show WAV file information
    Info(commands::info::InfoArgs),

    /// List compressor parameters and accepted values
    Params(commands::params::ParamsArgs),

    /// List or show presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match cli.command {
        Commands::Compress(args) => commands::compress::run(args),
        Commands::Sidechain(args) => commands::sidechain::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
