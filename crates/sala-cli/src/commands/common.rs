//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use sala_config::{AnalysisConfig, default_config_path};
use sala_io::read_wav_channels;
use std::path::{Path, PathBuf};

/// Load the effective configuration.
///
/// Uses `path` when given, otherwise the user config file if it exists,
/// otherwise built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    if let Some(path) = path {
        return AnalysisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let default = default_config_path();
    if default.exists() {
        tracing::debug!(path = %default.display(), "using user config");
        return AnalysisConfig::load(&default)
            .with_context(|| format!("failed to load config {}", default.display()));
    }

    Ok(AnalysisConfig::default())
}

/// Measurement channels gathered from one or more WAV files.
pub struct Measurement {
    /// One impulse response per channel.
    pub channels: Vec<Vec<f64>>,
    /// Shared sample rate in Hz.
    pub sample_rate: u32,
}

/// Load every channel of every file as a separate measurement channel.
///
/// All files must share one sample rate.
pub fn load_measurement(inputs: &[PathBuf]) -> anyhow::Result<Measurement> {
    let mut channels = Vec::new();
    let mut sample_rate = None;

    for input in inputs {
        let (file_channels, spec) = read_wav_channels(input)
            .with_context(|| format!("failed to read {}", input.display()))?;

        match sample_rate {
            None => sample_rate = Some(spec.sample_rate),
            Some(rate) if rate != spec.sample_rate => anyhow::bail!(
                "Sample rate mismatch: {} is {} Hz, expected {} Hz",
                input.display(),
                spec.sample_rate,
                rate
            ),
            Some(_) => {}
        }

        println!(
            "  {}: {} channel(s), {} Hz, {} samples",
            input.display(),
            spec.channels,
            spec.sample_rate,
            file_channels.first().map_or(0, Vec::len)
        );
        channels.extend(file_channels);
    }

    let Some(sample_rate) = sample_rate else {
        anyhow::bail!("no input files given");
    };

    Ok(Measurement {
        channels,
        sample_rate,
    })
}

/// Indices of the `count` largest local maxima, strongest first.
pub fn find_peaks(values: &[f64], count: usize) -> Vec<usize> {
    let mut peaks: Vec<usize> = (0..values.len())
        .filter(|&i| {
            let left = i == 0 || values[i] > values[i - 1];
            let right = i + 1 == values.len() || values[i] >= values[i + 1];
            left && right
        })
        .collect();
    peaks.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    peaks.truncate(count);
    peaks
}

/// Level in dB re. 1, floored at -200 dB.
pub fn to_db(value: f64) -> f64 {
    if value > 0.0 {
        (20.0 * value.log10()).max(-200.0)
    } else {
        -200.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaks_are_local_maxima_in_descending_order() {
        let values = [0.0, 3.0, 1.0, 5.0, 2.0, 2.5, 0.5];
        assert_eq!(find_peaks(&values, 10), vec![3, 1, 5]);
        assert_eq!(find_peaks(&values, 1), vec![3]);
    }

    #[test]
    fn edges_can_be_peaks() {
        assert_eq!(find_peaks(&[4.0, 1.0, 2.0], 5), vec![0, 2]);
        assert!(find_peaks(&[], 3).is_empty());
    }

    #[test]
    fn db_of_zero_is_floored() {
        assert_eq!(to_db(0.0), -200.0);
        assert!((to_db(10.0) - 20.0).abs() < 1e-12);
    }
}
