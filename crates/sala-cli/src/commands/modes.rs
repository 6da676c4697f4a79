//! Complex mode indicator function of multi-position measurements.

use clap::Args;
use sala_analysis::{
    RowConvention, bin_frequencies, compute_mode_indicators_with, spectra_from_impulse_responses,
};
use std::path::{Path, PathBuf};

use super::common::{find_peaks, load_config, load_measurement, to_db};

#[derive(Args)]
pub struct ModesArgs {
    /// Impulse response WAV files; every channel is one measurement channel
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Number of indicator functions (singular values per bin)
    #[arg(short = 'k', long)]
    count: Option<usize>,

    /// FFT size
    #[arg(long)]
    fft_size: Option<usize>,

    /// Structured matrix row convention: plain or conjugate
    #[arg(long)]
    convention: Option<String>,

    /// Show top N peaks of the first indicator
    #[arg(long, default_value = "10")]
    peaks: usize,

    /// Output CSV file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ModesArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let count = args.count.unwrap_or(config.modal.count);
    let fft_size = args.fft_size.unwrap_or(config.spectrum.fft_size);
    let convention = match args.convention {
        Some(name) => RowConvention::from_name(&name)
            .ok_or_else(|| anyhow::anyhow!("Unknown row convention '{name}'"))?,
        None => config.row_convention()?,
    };
    let window = config.window()?;

    if fft_size < 2 {
        anyhow::bail!("FFT size must be at least 2, got {fft_size}");
    }

    println!("Computing mode indicators...");
    let measurement = load_measurement(&args.inputs)?;
    tracing::info!(
        channels = measurement.channels.len(),
        fft_size,
        count,
        convention = convention.name(),
        "building spectra"
    );

    let spectra = spectra_from_impulse_responses(&measurement.channels, fft_size, window)?;
    let cmif = compute_mode_indicators_with(&spectra, count, convention)?;
    let freqs = bin_frequencies(fft_size, measurement.sample_rate);

    let first: Vec<f64> = cmif.column(0).iter().copied().collect();
    println!("\nTop {} indicator peaks:", args.peaks);
    println!("  {:>10}  {:>10}", "Freq (Hz)", "Level (dB)");
    println!("  {:>10}  {:>10}", "--------", "----------");
    for bin in find_peaks(&first, args.peaks) {
        println!("  {:>10.1}  {:>10.1}", freqs[bin], to_db(first[bin]));
    }

    if let Some(output_path) = args.output {
        let mut csv = String::from("frequency_hz");
        for k in 1..=count {
            csv.push_str(&format!(",sv{k}"));
        }
        csv.push('\n');
        for (bin, freq) in freqs.iter().enumerate() {
            csv.push_str(&format!("{freq:.2}"));
            for value in cmif.row(bin).iter() {
                csv.push_str(&format!(",{value:.6e}"));
            }
            csv.push('\n');
        }
        std::fs::write(&output_path, csv)?;
        println!("\nWrote mode indicators to {}", output_path.display());
    }

    Ok(())
}
