//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f64::consts::PI;
use std::sync::Arc;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Rectangular (no windowing). Impulse responses are usually
    /// transformed whole, so this is the default.
    #[default]
    Rectangular,
    /// Hann window (raised cosine)
    Hann,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
}

impl Window {
    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f64]) {
        let n = buffer.len() as f64;
        let shape: fn(f64) -> f64 = match self {
            Window::Rectangular => return,
            Window::Hann => |x| 0.5 * (1.0 - x.cos()),
            Window::Hamming => |x| 0.54 - 0.46 * x.cos(),
            Window::Blackman => |x| 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
        };
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= shape(2.0 * PI * i as f64 / n);
        }
    }

    /// Get window coefficients
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }

    /// Lower-case configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Window::Rectangular => "rectangular",
            Window::Hann => "hann",
            Window::Hamming => "hamming",
            Window::Blackman => "blackman",
        }
    }

    /// Parse a configuration name. Accepts `rect` and `none` for
    /// [`Window::Rectangular`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Some(Window::Rectangular),
            "hann" => Some(Window::Hann),
            "hamming" => Some(Window::Hamming),
            "blackman" => Some(Window::Blackman),
            _ => None,
        }
    }
}

/// Forward FFT processor with a cached plan
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative frequency bins (DC to Nyquist), zero for an
    /// empty transform.
    pub fn num_bins(&self) -> usize {
        (self.size / 2 + 1).min(self.size)
    }

    /// Perform forward FFT on real input
    ///
    /// Input is zero-padded or truncated to the FFT size. Returns the
    /// `size / 2 + 1` bins from DC to Nyquist.
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.num_bins());
        buffer
    }
}

/// Center frequency of each bin returned by [`Fft::forward`], in Hz.
pub fn bin_frequencies(fft_size: usize, sample_rate: u32) -> Vec<f64> {
    let resolution = f64::from(sample_rate) / fft_size as f64;
    (0..fft_size / 2 + 1).map(|k| k as f64 * resolution).collect()
}
