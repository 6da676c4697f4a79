//! Reverberation time estimation.

use anyhow::Context;
use clap::Args;
use sala_analysis::{DecayAnalysis, ReverbMode};
use sala_config::validate_onset_threshold;
use sala_io::read_wav;
use std::path::{Path, PathBuf};

use super::common::load_config;

#[derive(Args)]
pub struct ReverbArgs {
    /// Impulse response WAV file (multi-channel files are mixed to mono)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Mode to estimate: EDT, T20, T30 or T60 (repeatable, default from config)
    #[arg(short, long = "mode", value_name = "MODE")]
    modes: Vec<String>,

    /// Onset threshold in dB relative to the peak
    #[arg(long, value_name = "DB", allow_hyphen_values = true)]
    onset_threshold: Option<f64>,
}

pub fn run(args: ReverbArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let modes = if args.modes.is_empty() {
        config.reverb_modes()?
    } else {
        args.modes
            .iter()
            .map(|name| name.parse::<ReverbMode>())
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut options = config.decay_options();
    if let Some(threshold) = args.onset_threshold {
        validate_onset_threshold(threshold)?;
        options = options.with_onset_threshold_db(threshold);
    }

    println!("Analyzing reverberation of {}...", args.input.display());

    let (samples, spec) = read_wav(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f64 / f64::from(spec.sample_rate)
    );

    let analysis = DecayAnalysis::new(&samples, spec.sample_rate, &options)?;
    println!(
        "  onset at sample {} ({:.1} ms)\n",
        analysis.onset(),
        analysis.onset() as f64 * 1000.0 / f64::from(spec.sample_rate)
    );

    let mut succeeded = 0;
    for (mode, fit) in analysis.report(&modes) {
        match fit {
            Ok(fit) => {
                succeeded += 1;
                println!(
                    "{mode}: {:.3} s (r = {:.4})",
                    fit.reverberation_time(),
                    fit.correlation
                );
            }
            Err(e) => println!("{mode}: {e}"),
        }
    }

    if succeeded == 0 {
        anyhow::bail!("no reverberation time could be estimated");
    }
    Ok(())
}
