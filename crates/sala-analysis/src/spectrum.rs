//! Multi-channel spectra: construction and magnitude aggregation

use nalgebra::{DMatrix, Scalar};
use rustfft::num_complex::Complex;

use crate::error::{AnalysisError, Result};
use crate::fft::{Fft, Window};
use crate::modal::Spectra;

/// Per-element magnitude used by [`aggregate_magnitude`].
///
/// Complex values contribute their modulus. Real values are taken as
/// magnitudes already and pass through unchanged.
pub trait Magnitude {
    /// Magnitude as `f64`.
    fn magnitude(&self) -> f64;
}

impl Magnitude for f64 {
    fn magnitude(&self) -> f64 {
        *self
    }
}

impl Magnitude for f32 {
    fn magnitude(&self) -> f64 {
        f64::from(*self)
    }
}

impl Magnitude for Complex<f64> {
    fn magnitude(&self) -> f64 {
        self.norm()
    }
}

impl Magnitude for Complex<f32> {
    fn magnitude(&self) -> f64 {
        f64::from(self.norm())
    }
}

/// Sum of the per-channel magnitudes at each frequency bin.
///
/// # Example
/// ```
/// use nalgebra::DMatrix;
/// use sala_analysis::aggregate_magnitude;
///
/// let magnitudes = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(aggregate_magnitude(&magnitudes), vec![3.0, 7.0]);
/// ```
pub fn aggregate_magnitude<T: Magnitude + Scalar>(spectra: &DMatrix<T>) -> Vec<f64> {
    spectra
        .row_iter()
        .map(|bin| bin.iter().map(Magnitude::magnitude).sum())
        .collect()
}

/// Spectra matrix from a set of impulse responses, one channel per response.
///
/// Each response is windowed, zero-padded or truncated to `fft_size`, and
/// transformed. The result has `fft_size / 2 + 1` rows.
///
/// # Errors
/// [`AnalysisError::InvalidFftSize`] if `fft_size` is zero.
pub fn spectra_from_impulse_responses(
    responses: &[Vec<f64>],
    fft_size: usize,
    window: Window,
) -> Result<Spectra> {
    if fft_size == 0 {
        return Err(AnalysisError::InvalidFftSize(fft_size));
    }

    let fft = Fft::new(fft_size);
    let columns: Vec<Vec<Complex<f64>>> = responses
        .iter()
        .map(|response| {
            let mut buffer: Vec<f64> = response.iter().take(fft_size).copied().collect();
            window.apply(&mut buffer);
            fft.forward(&buffer)
        })
        .collect();

    Ok(Spectra::from_fn(fft.num_bins(), responses.len(), |bin, channel| {
        columns[channel][bin]
    }))
}
