//! Reverberation time estimation (ISO 3382-1)
//!
//! A straight line is fitted by least squares to the decibel energy decay
//! curve between two threshold crossings. The fitted decay rate is then
//! extrapolated to a 60 dB decay, whatever span the mode measured.

use std::fmt;
use std::str::FromStr;

use crate::decay::{DecayOptions, measured_len, normalize_db, schroeder_integral};
use crate::error::{AnalysisError, Result};
use crate::onset::detect_onset;

/// Measurement mode selecting the evaluation range of the decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReverbMode {
    /// Early decay time, 0 dB to -10 dB
    Edt,
    /// -5 dB to -25 dB
    T20,
    /// -5 dB to -35 dB
    T30,
    /// -5 dB to -65 dB
    T60,
}

impl ReverbMode {
    /// All modes in report order.
    pub const ALL: [ReverbMode; 4] = [
        ReverbMode::Edt,
        ReverbMode::T20,
        ReverbMode::T30,
        ReverbMode::T60,
    ];

    /// Start and end thresholds in dB re. the onset level.
    pub fn thresholds(self) -> (f64, f64) {
        match self {
            ReverbMode::Edt => (0.0, -10.0),
            ReverbMode::T20 => (-5.0, -25.0),
            ReverbMode::T30 => (-5.0, -35.0),
            ReverbMode::T60 => (-5.0, -65.0),
        }
    }

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            ReverbMode::Edt => "EDT",
            ReverbMode::T20 => "T20",
            ReverbMode::T30 => "T30",
            ReverbMode::T60 => "T60",
        }
    }
}

impl fmt::Display for ReverbMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReverbMode {
    type Err = AnalysisError;

    /// Case-insensitive: `"t30"`, `"T30"` and `"edt"` are all accepted.
    fn from_str(s: &str) -> Result<Self> {
        ReverbMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AnalysisError::UnsupportedMode(s.to_string()))
    }
}

/// Least-squares line fitted to a decay curve segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFit {
    /// Mode the segment was selected for.
    pub mode: ReverbMode,
    /// First index of the fitted segment (inclusive).
    pub start: usize,
    /// End index of the fitted segment (exclusive).
    pub end: usize,
    /// Decay rate in dB per second (negative for a decaying curve).
    pub slope_db_per_s: f64,
    /// Fitted level at the start of the segment, in dB.
    pub intercept_db: f64,
    /// Magnitude of the correlation coefficient (1.0 = perfectly linear).
    pub correlation: f64,
}

impl DecayFit {
    /// Time for a 60 dB decay at the fitted rate, in seconds.
    pub fn reverberation_time(&self) -> f64 {
        60.0 / self.slope_db_per_s.abs()
    }
}

/// First index where the curve falls strictly below `threshold_db`.
fn first_below(edc_db: &[f64], threshold_db: f64, mode: ReverbMode) -> Result<usize> {
    edc_db
        .iter()
        .position(|&level| level < threshold_db)
        .ok_or(AnalysisError::InsufficientDecayRange {
            mode,
            threshold_db,
            len: edc_db.len(),
        })
}

/// Fit the decay line for `mode` to a decibel energy decay curve.
///
/// The segment runs from the first sample below the start threshold up to
/// (not including) the first sample below the end threshold. Both searches
/// scan from the beginning of the curve. The time axis is `k / sample_rate`.
///
/// # Errors
/// * [`AnalysisError::InvalidSampleRate`] for a zero sample rate
/// * [`AnalysisError::InsufficientDecayRange`] if a threshold is never crossed,
///   or the segment holds fewer than two samples
pub fn fit_decay(edc_db: &[f64], sample_rate: u32, mode: ReverbMode) -> Result<DecayFit> {
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidSampleRate(sample_rate));
    }

    let (start_db, end_db) = mode.thresholds();
    let start = first_below(edc_db, start_db, mode)?;
    let end = first_below(edc_db, end_db, mode)?;

    if end < start + 2 {
        return Err(AnalysisError::InsufficientDecayRange {
            mode,
            threshold_db: end_db,
            len: edc_db.len(),
        });
    }

    let segment = &edc_db[start..end];
    let n = segment.len() as f64;
    let dt = 1.0 / f64::from(sample_rate);

    // Centered sums keep the normal equations well conditioned for long segments
    let mean_x = (n - 1.0) * dt / 2.0;
    let mean_y = segment.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (k, &y) in segment.iter().enumerate() {
        let dx = k as f64 * dt - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let slope_db_per_s = sxy / sxx;
    let intercept_db = mean_y - slope_db_per_s * mean_x;
    let correlation = if syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).abs()
    } else {
        0.0
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(%mode, start, end, slope_db_per_s, correlation, "decay fit");

    Ok(DecayFit {
        mode,
        start,
        end,
        slope_db_per_s,
        intercept_db,
        correlation,
    })
}

/// Reverberation time in seconds from an already computed decibel decay curve.
pub fn reverberation_time_from_edc(
    edc_db: &[f64],
    sample_rate: u32,
    mode: ReverbMode,
) -> Result<f64> {
    Ok(fit_decay(edc_db, sample_rate, mode)?.reverberation_time())
}

/// Reverberation time in seconds of an impulse response.
///
/// Uses the default onset threshold and decay floor, see [`DecayOptions`].
///
/// # Example
/// ```
/// use sala_analysis::{ReverbMode, estimate_reverberation_time};
///
/// let sample_rate = 8000;
/// // 0.5 s reverberation time: energy falls 60 dB in 4000 samples
/// let per_sample = 10f64.powf(-60.0 / 20.0 / 4000.0);
/// let ir: Vec<f64> = (0..12000).map(|i| per_sample.powi(i)).collect();
///
/// let t30 = estimate_reverberation_time(&ir, sample_rate, ReverbMode::T30).unwrap();
/// assert!((t30 - 0.5).abs() < 0.005);
/// ```
pub fn estimate_reverberation_time(
    samples: &[f64],
    sample_rate: u32,
    mode: ReverbMode,
) -> Result<f64> {
    estimate_reverberation_time_with(samples, sample_rate, mode, &DecayOptions::default())
}

/// [`estimate_reverberation_time`] with explicit onset and floor settings.
pub fn estimate_reverberation_time_with(
    samples: &[f64],
    sample_rate: u32,
    mode: ReverbMode,
    options: &DecayOptions,
) -> Result<f64> {
    DecayAnalysis::new(samples, sample_rate, options)?.reverberation_time(mode)
}

/// Onset and decay curve of one impulse response, evaluated once and
/// queried for any number of modes.
///
/// Crossings are only searched in the measured part of the curve. The
/// floor-clamped tail (at least the final sample) never counts as decay, so a
/// response that stops decaying above a threshold fails instead of matching
/// the clamp.
#[derive(Debug, Clone)]
pub struct DecayAnalysis {
    sample_rate: u32,
    onset: usize,
    measured: usize,
    edc_db: Vec<f64>,
}

impl DecayAnalysis {
    /// Detect the onset and build the normalized decay curve.
    pub fn new(samples: &[f64], sample_rate: u32, options: &DecayOptions) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }
        let onset = detect_onset(samples, options.onset_threshold_db)?;
        let remaining = schroeder_integral(samples);
        let measured = measured_len(&remaining);
        let edc_db = normalize_db(remaining, onset, options.floor);
        Ok(Self {
            sample_rate,
            onset,
            measured,
            edc_db,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Onset index used as the 0 dB reference.
    pub fn onset(&self) -> usize {
        self.onset
    }

    /// Decay curve in dB re. the onset, including the clamped tail.
    pub fn edc_db(&self) -> &[f64] {
        &self.edc_db
    }

    /// Length of the curve before the clamped tail.
    pub fn measured_len(&self) -> usize {
        self.measured
    }

    /// Decay fit for one mode.
    pub fn fit(&self, mode: ReverbMode) -> Result<DecayFit> {
        fit_decay(&self.edc_db[..self.measured], self.sample_rate, mode)
    }

    /// Reverberation time for one mode, in seconds.
    pub fn reverberation_time(&self, mode: ReverbMode) -> Result<f64> {
        Ok(self.fit(mode)?.reverberation_time())
    }

    /// Fits for several modes. Each mode succeeds or fails on its own.
    pub fn report(&self, modes: &[ReverbMode]) -> Vec<(ReverbMode, Result<DecayFit>)> {
        modes.iter().map(|&mode| (mode, self.fit(mode))).collect()
    }
}
