//! Impulse response onset detection

use crate::decay::{DECAY_FLOOR, energy};
use crate::error::{AnalysisError, Result};

/// Default onset sensitivity, in dB relative to the peak energy.
///
/// A direct sound 20 dB below the strongest reflection is still treated as
/// the start of the response.
pub const DEFAULT_ONSET_THRESHOLD_DB: f64 = -20.0;

/// Find the first sample whose energy reaches `threshold_db` relative to the
/// peak energy of the response.
///
/// Energy is the squared sample value. The ratio to the peak energy gets
/// [`DECAY_FLOOR`] added before the logarithm so silent samples map to a
/// finite level. The comparison is inclusive, so the peak sample itself
/// always qualifies for any threshold at or below 0 dB.
///
/// # Arguments
/// * `samples` - Impulse response samples
/// * `threshold_db` - Threshold relative to peak energy (usually negative)
///
/// # Errors
/// [`AnalysisError::OnsetNotFound`] if the response is empty, silent, or no
/// sample reaches the threshold.
pub fn detect_onset(samples: &[f64], threshold_db: f64) -> Result<usize> {
    let not_found = || AnalysisError::OnsetNotFound {
        threshold_db,
        len: samples.len(),
    };

    let energies = energy(samples);
    let peak_energy = energies.iter().copied().fold(0.0f64, f64::max);
    if peak_energy <= 0.0 {
        return Err(not_found());
    }

    let onset = energies
        .iter()
        .position(|&e| 10.0 * (e / peak_energy + DECAY_FLOOR).log10() >= threshold_db)
        .ok_or_else(not_found)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(onset, threshold_db, len = samples.len(), "onset detected");

    Ok(onset)
}
