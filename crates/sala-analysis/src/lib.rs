//! Sala Analysis - Room acoustics descriptors from impulse responses
//!
//! This crate implements the numeric core of room impulse response analysis:
//!
//! - [`onset`] - Onset detection relative to peak energy
//! - [`decay`] - Schroeder energy decay curve
//! - [`reverb`] - Reverberation time (EDT, T20, T30, T60) by linear regression
//! - [`modal`] - Complex Mode Indicator Function over multi-channel spectra
//! - [`spectrum`] - Magnitude aggregation and spectra construction
//! - [`fft`] - FFT wrapper with windowing functions
//!
//! Everything here is a pure function over numeric arrays. Reading audio,
//! filtering and plotting live elsewhere.
//!
//! ## Reverberation Time
//!
//! ```rust,ignore
//! use sala_analysis::{DecayAnalysis, DecayOptions, ReverbMode};
//!
//! let analysis = DecayAnalysis::new(&ir, 48000, &DecayOptions::default())?;
//! for (mode, fit) in analysis.report(&ReverbMode::ALL) {
//!     match fit {
//!         Ok(fit) => println!("{mode}: {:.3} s", fit.reverberation_time()),
//!         Err(e) => println!("{mode}: {e}"),
//!     }
//! }
//! ```
//!
//! ## Mode Indicators
//!
//! ```rust,ignore
//! use sala_analysis::{Window, compute_mode_indicators, spectra_from_impulse_responses};
//!
//! // one impulse response per microphone position
//! let spectra = spectra_from_impulse_responses(&responses, 8192, Window::Rectangular);
//! let cmif = compute_mode_indicators(&spectra, 2)?;
//! ```
//!
//! ## Features
//!
//! - `parallel` (default) - evaluate CMIF bins on the rayon thread pool
//! - `tracing` - emit `debug` events for onsets, fits and CMIF runs

pub mod decay;
pub mod error;
pub mod fft;
pub mod modal;
pub mod onset;
pub mod reverb;
pub mod spectrum;

// Re-export main types
pub use decay::{
    DECAY_FLOOR, DecayOptions, energy, energy_decay_curve, measured_len, schroeder_integral,
};
pub use error::{AnalysisError, Result};
pub use fft::{Fft, Window, bin_frequencies};
pub use modal::{RowConvention, Spectra, compute_mode_indicators, compute_mode_indicators_with};
pub use onset::{DEFAULT_ONSET_THRESHOLD_DB, detect_onset};
pub use reverb::{
    DecayAnalysis, DecayFit, ReverbMode, estimate_reverberation_time,
    estimate_reverberation_time_with, fit_decay, reverberation_time_from_edc,
};
pub use rustfft::num_complex::Complex;
pub use spectrum::{Magnitude, aggregate_magnitude, spectra_from_impulse_responses};
