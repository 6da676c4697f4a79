//! Error types for room acoustics analysis.

use thiserror::Error;

use crate::reverb::ReverbMode;

/// Errors raised by the analysis functions.
///
/// Input validation errors (`UnsupportedMode`, `InvalidModeCount`,
/// `InvalidSampleRate`, `InvalidFftSize`, `OnsetOutOfRange`) are detected
/// before any computation. Range errors (`OnsetNotFound`,
/// `InsufficientDecayRange`) are raised when a required threshold crossing
/// cannot be located in the data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// Mode string did not name one of the supported measurement modes.
    #[error("unsupported mode '{0}': supported modes are EDT, T20, T30 and T60")]
    UnsupportedMode(String),

    /// Requested more singular values than there are channels.
    #[error("invalid mode count {requested}: spectra have {channels} channel(s)")]
    InvalidModeCount {
        /// Number of singular values requested.
        requested: usize,
        /// Number of channels available in the spectra matrix.
        channels: usize,
    },

    /// No sample rose above the onset threshold.
    #[error("onset not found: no sample above {threshold_db} dB re. peak in {len} samples")]
    OnsetNotFound {
        /// Threshold relative to peak energy, in dB.
        threshold_db: f64,
        /// Length of the impulse response.
        len: usize,
    },

    /// The decay curve never fell below a threshold the mode requires.
    #[error(
        "insufficient decay range for {mode}: curve never falls below {threshold_db} dB in {len} samples"
    )]
    InsufficientDecayRange {
        /// Mode being evaluated.
        mode: ReverbMode,
        /// Threshold that was not crossed, in dB.
        threshold_db: f64,
        /// Length of the decay curve.
        len: usize,
    },

    /// Sampling rate must be positive.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// FFT size must be positive.
    #[error("invalid FFT size: {0}")]
    InvalidFftSize(usize),

    /// Reference index lies outside the response.
    #[error("onset {onset} out of range for {len} samples")]
    OnsetOutOfRange {
        /// Requested reference index.
        onset: usize,
        /// Length of the impulse response.
        len: usize,
    },
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
