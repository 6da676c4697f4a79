//! Audio input for sala.
//!
//! Loads impulse responses from WAV files as `f64` samples plus the sample
//! rate, the form the analysis functions take:
//!
//! - [`read_wav`] mixes all channels down to one response
//! - [`read_wav_channels`] keeps each channel as a separate response, e.g. one
//!   per microphone position
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sala_io::read_wav;
//! use sala_analysis::{ReverbMode, estimate_reverberation_time};
//!
//! let (samples, spec) = read_wav("room.wav")?;
//! let t30 = estimate_reverberation_time(&samples, spec.sample_rate, ReverbMode::T30)?;
//! ```

mod wav;

pub use wav::{WavSpec, read_wav, read_wav_channels, write_wav, write_wav_channels};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Channels passed to a multi-channel writer differ in length.
    #[error("channel length mismatch: expected {expected} samples, channel {channel} has {actual}")]
    ChannelLengthMismatch {
        /// Length of the first channel.
        expected: usize,
        /// Index of the offending channel.
        channel: usize,
        /// Its length.
        actual: usize,
    },
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
