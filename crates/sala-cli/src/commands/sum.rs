//! Summed magnitude spectrum across measurement channels.

use clap::Args;
use sala_analysis::{aggregate_magnitude, bin_frequencies, spectra_from_impulse_responses};
use std::path::{Path, PathBuf};

use super::common::{find_peaks, load_config, load_measurement, to_db};

#[derive(Args)]
pub struct SumArgs {
    /// Impulse response WAV files; every channel is one measurement channel
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// FFT size
    #[arg(long)]
    fft_size: Option<usize>,

    /// Show top N peaks
    #[arg(long, default_value = "10")]
    peaks: usize,

    /// Output CSV file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: SumArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let fft_size = args.fft_size.unwrap_or(config.spectrum.fft_size);
    let window = config.window()?;

    if fft_size < 2 {
        anyhow::bail!("FFT size must be at least 2, got {fft_size}");
    }

    println!("Summing magnitude spectra...");
    let measurement = load_measurement(&args.inputs)?;

    let spectra = spectra_from_impulse_responses(&measurement.channels, fft_size, window)?;
    let summed = aggregate_magnitude(&spectra);
    let freqs = bin_frequencies(fft_size, measurement.sample_rate);

    println!("\nTop {} peaks:", args.peaks);
    println!("  {:>10}  {:>10}", "Freq (Hz)", "Level (dB)");
    println!("  {:>10}  {:>10}", "--------", "----------");
    for bin in find_peaks(&summed, args.peaks) {
        println!("  {:>10.1}  {:>10.1}", freqs[bin], to_db(summed[bin]));
    }

    if let Some(output_path) = args.output {
        let mut csv = String::from("frequency_hz,magnitude\n");
        for (freq, value) in freqs.iter().zip(&summed) {
            csv.push_str(&format!("{freq:.2},{value:.6e}\n"));
        }
        std::fs::write(&output_path, csv)?;
        println!("\nWrote summed magnitude to {}", output_path.display());
    }

    Ok(())
}
