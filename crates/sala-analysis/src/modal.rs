//! Complex Mode Indicator Function (CMIF)
//!
//! For each frequency bin the channel values are placed into the first row
//! and first column of an otherwise zero `channels x channels` matrix. The
//! largest singular values of that matrix rank modal dominance at the bin.
//!
//! Reference: Shih, Tsuei, Allemang, Brown, "Complex Mode Indication
//! Function and its Applications to Spatial Domain Parameter Estimation"
//! (1988).
//!
//! Bins are independent. With the `parallel` feature the bins are spread
//! over the rayon thread pool; results do not depend on the schedule.

use nalgebra::DMatrix;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustfft::num_complex::Complex;

use crate::error::{AnalysisError, Result};

/// Spectra matrix: one row per frequency bin, one column per channel.
pub type Spectra = DMatrix<Complex<f64>>;

/// How the first row of the structured matrix relates to the first column.
///
/// Column 0 always holds the bin's channel values. Row 0 holds either the
/// same values or their complex conjugates; entry `(0, 0)` takes the row
/// value. The two layouts differ only by diagonal unitary factors, so their
/// singular values agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowConvention {
    /// Row 0 mirrors the column values unchanged.
    #[default]
    Plain,
    /// Row 0 holds the complex conjugate of the column values.
    Conjugate,
}

impl RowConvention {
    /// Lower-case configuration name.
    pub fn name(self) -> &'static str {
        match self {
            RowConvention::Plain => "plain",
            RowConvention::Conjugate => "conjugate",
        }
    }

    /// Parse a configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        [RowConvention::Plain, RowConvention::Conjugate]
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// Mode indicator matrix with the default [`RowConvention::Plain`] layout.
///
/// Returns a `bins x count` matrix; row `i` holds the `count` largest
/// singular values at bin `i` in descending order.
///
/// # Errors
/// [`AnalysisError::InvalidModeCount`] if `count` is zero or exceeds the
/// number of channels.
///
/// # Example
/// ```
/// use sala_analysis::{Complex, Spectra, compute_mode_indicators};
///
/// let spectra = Spectra::from_column_slice(2, 1, &[Complex::new(3.0, 4.0), Complex::new(0.0, -1.0)]);
/// let cmif = compute_mode_indicators(&spectra, 1).unwrap();
/// assert!((cmif[(0, 0)] - 5.0).abs() < 1e-12);
/// assert!((cmif[(1, 0)] - 1.0).abs() < 1e-12);
/// ```
pub fn compute_mode_indicators(spectra: &Spectra, count: usize) -> Result<DMatrix<f64>> {
    compute_mode_indicators_with(spectra, count, RowConvention::default())
}

/// [`compute_mode_indicators`] with an explicit row convention.
pub fn compute_mode_indicators_with(
    spectra: &Spectra,
    count: usize,
    convention: RowConvention,
) -> Result<DMatrix<f64>> {
    let (bins, channels) = spectra.shape();
    if count == 0 || count > channels {
        return Err(AnalysisError::InvalidModeCount {
            requested: count,
            channels,
        });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(bins, channels, count, ?convention, "computing mode indicators");

    let row = |bin: usize| indicator_row(spectra, bin, count, convention);

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<f64>> = (0..bins).into_par_iter().map(row).collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<f64>> = (0..bins).map(row).collect();

    Ok(DMatrix::from_fn(bins, count, |i, j| rows[i][j]))
}

/// Structured matrix for one bin.
fn structured_matrix(spectra: &Spectra, bin: usize, convention: RowConvention) -> Spectra {
    let channels = spectra.ncols();
    let mut h = Spectra::zeros(channels, channels);
    for (n, &value) in spectra.row(bin).iter().enumerate() {
        h[(n, 0)] = value;
        h[(0, n)] = match convention {
            RowConvention::Plain => value,
            RowConvention::Conjugate => value.conj(),
        };
    }
    h
}

/// Largest `count` singular values at one bin, descending.
fn indicator_row(
    spectra: &Spectra,
    bin: usize,
    count: usize,
    convention: RowConvention,
) -> Vec<f64> {
    let mut values: Vec<f64> = structured_matrix(spectra, bin, convention)
        .singular_values()
        .iter()
        .copied()
        .collect();
    values.sort_unstable_by(|a, b| b.total_cmp(a));
    values.truncate(count);
    values
}
