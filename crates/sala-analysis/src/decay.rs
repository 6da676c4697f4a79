//! Energy decay curve (Schroeder backward integration)
//!
//! The remaining energy at sample `n` is the sum of the squared samples after
//! `n`, accumulated from the tail.

use crate::error::{AnalysisError, Result};
use crate::onset::DEFAULT_ONSET_THRESHOLD_DB;

/// Smallest remaining energy used before taking a logarithm.
///
/// The last sample has no energy after it, and tails can round to zero. Those
/// values are clamped to this floor so the dB curve stays finite. The clamp
/// truncates the true tail: levels below roughly -200 dB re. the onset are
/// not meaningful.
pub const DECAY_FLOOR: f64 = 1e-20;

/// Per-call overrides for the decay curve and onset constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayOptions {
    /// Onset threshold in dB relative to peak energy.
    pub onset_threshold_db: f64,
    /// Floor applied to non-positive remaining energy.
    pub floor: f64,
}

impl Default for DecayOptions {
    fn default() -> Self {
        Self {
            onset_threshold_db: DEFAULT_ONSET_THRESHOLD_DB,
            floor: DECAY_FLOOR,
        }
    }
}

impl DecayOptions {
    /// Override the onset threshold.
    pub fn with_onset_threshold_db(mut self, threshold_db: f64) -> Self {
        self.onset_threshold_db = threshold_db;
        self
    }

    /// Override the energy floor.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }
}

/// Per-sample energy (squared amplitude).
pub fn energy(samples: &[f64]) -> Vec<f64> {
    samples.iter().map(|&x| x * x).collect()
}

/// Linear remaining energy after each sample, before any floor clamping.
///
/// `remaining[n] = sum(energy[n + 1..])`, so the curve is non-increasing and
/// its last element is zero.
pub fn schroeder_integral(samples: &[f64]) -> Vec<f64> {
    let energies = energy(samples);
    let mut remaining = vec![0.0; energies.len()];
    let mut sum = 0.0f64;
    for n in (0..energies.len().saturating_sub(1)).rev() {
        sum += energies[n + 1];
        remaining[n] = sum;
    }
    remaining
}

/// Decibel energy decay curve normalized to 0 dB at `onset`.
///
/// Non-positive remaining energy is clamped to `floor` before conversion.
/// Uses `10 * log10` since the curve is already an energy quantity.
///
/// # Arguments
/// * `samples` - Impulse response samples
/// * `onset` - Reference index, typically from [`detect_onset`](crate::detect_onset)
/// * `floor` - Positive floor, see [`DECAY_FLOOR`]
///
/// # Errors
/// [`AnalysisError::OnsetOutOfRange`] if `onset >= samples.len()`.
pub fn energy_decay_curve(samples: &[f64], onset: usize, floor: f64) -> Result<Vec<f64>> {
    if onset >= samples.len() {
        return Err(AnalysisError::OnsetOutOfRange {
            onset,
            len: samples.len(),
        });
    }
    Ok(normalize_db(schroeder_integral(samples), onset, floor))
}

/// Number of leading samples with positive remaining energy.
///
/// The remaining energy is non-increasing, so everything from this index on
/// is floor-clamped tail rather than measured decay.
pub fn measured_len(remaining: &[f64]) -> usize {
    remaining.iter().take_while(|&&e| e > 0.0).count()
}

pub(crate) fn normalize_db(mut remaining: Vec<f64>, onset: usize, floor: f64) -> Vec<f64> {
    for value in &mut remaining {
        if *value <= 0.0 {
            *value = floor;
        }
    }

    let reference = remaining[onset];
    remaining
        .into_iter()
        .map(|e| 10.0 * (e / reference).log10())
        .collect()
}
