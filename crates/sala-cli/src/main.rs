//! Sala CLI - command-line room acoustics analysis.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sala")]
#[command(author, version, about = "Room acoustics analysis of measured impulse responses", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config file if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate reverberation times of an impulse response
    Reverb(commands::reverb::ReverbArgs),

    /// Compute the complex mode indicator function of measured responses
    Modes(commands::modes::ModesArgs),

    /// Sum magnitude spectra across measurement channels
    Sum(commands::sum::SumArgs),

    /// Show or initialize the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Reverb(args) => commands::reverb::run(args, config_path),
        Commands::Modes(args) => commands::modes::run(args, config_path),
        Commands::Sum(args) => commands::sum::run(args, config_path),
        Commands::Config(args) => commands::config::run(args, config_path),
    }
}
