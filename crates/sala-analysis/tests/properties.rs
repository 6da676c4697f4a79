//! Property-based tests for sala-analysis.
//!
//! Tests decay curve monotonicity, onset detection on trivial responses,
//! mode parsing and the degenerate single-channel spectra cases using
//! proptest for randomized input generation.

use proptest::prelude::*;
use sala_analysis::{
    Complex, ReverbMode, Spectra, aggregate_magnitude, compute_mode_indicators, detect_onset,
    schroeder_integral,
};

/// Apply a case pattern to a mode name.
fn recase(name: &str, upper: &[bool]) -> String {
    name.chars()
        .zip(upper.iter().cycle())
        .map(|(ch, &up)| {
            if up {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The linear remaining energy never increases with the sample index.
    #[test]
    fn schroeder_integral_is_non_increasing(
        samples in prop::collection::vec(-1.0f64..=1.0f64, 1..512),
    ) {
        let remaining = schroeder_integral(&samples);
        prop_assert_eq!(remaining.len(), samples.len());
        for pair in remaining.windows(2) {
            prop_assert!(pair[1] <= pair[0], "{} then {}", pair[0], pair[1]);
        }
        prop_assert!(remaining.iter().all(|&e| e >= 0.0));
    }

    /// A lone impulse at index 0 is its own onset for any threshold at or below 0 dB.
    #[test]
    fn leading_impulse_is_onset(
        amplitude in prop_oneof![1e-6f64..10.0, -10.0f64..-1e-6],
        len in 1usize..256,
        threshold_db in -200.0f64..=0.0,
    ) {
        let mut ir = vec![0.0; len];
        ir[0] = amplitude;
        prop_assert_eq!(detect_onset(&ir, threshold_db).unwrap(), 0);
    }

    /// The onset sample always reaches the threshold and nothing before it does.
    #[test]
    fn onset_is_first_qualifying_sample(
        samples in prop::collection::vec(-1.0f64..=1.0f64, 1..256),
        threshold_db in -60.0f64..-0.1,
    ) {
        let peak = samples.iter().map(|x| x * x).fold(0.0f64, f64::max);
        prop_assume!(peak > 0.0);
        let level = |x: f64| 10.0 * (x * x / peak + 1e-20).log10();

        let onset = detect_onset(&samples, threshold_db).unwrap();
        prop_assert!(level(samples[onset]) >= threshold_db);
        prop_assert!(samples[..onset].iter().all(|&x| level(x) < threshold_db));
    }

    /// Mode names parse regardless of letter case.
    #[test]
    fn mode_parsing_ignores_case(
        mode in prop::sample::select(ReverbMode::ALL.to_vec()),
        upper in prop::collection::vec(any::<bool>(), 3),
    ) {
        let name = recase(mode.name(), &upper);
        prop_assert_eq!(name.parse::<ReverbMode>().unwrap(), mode);
    }

    /// Single-channel CMIF is the modulus of each bin.
    #[test]
    fn single_channel_cmif_is_modulus(
        values in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..64),
    ) {
        let bins: Vec<Complex<f64>> = values.iter().map(|&(re, im)| Complex::new(re, im)).collect();
        let spectra = Spectra::from_column_slice(bins.len(), 1, &bins);
        let cmif = compute_mode_indicators(&spectra, 1).unwrap();
        for (i, value) in bins.iter().enumerate() {
            let expected = value.norm();
            prop_assert!(
                (cmif[(i, 0)] - expected).abs() <= 1e-9 * (1.0 + expected),
                "bin {}: {} vs {}", i, cmif[(i, 0)], expected
            );
        }
    }

    /// Aggregating a single channel returns that channel's magnitude.
    #[test]
    fn single_channel_aggregate_is_identity(
        values in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..64),
    ) {
        let bins: Vec<Complex<f64>> = values.iter().map(|&(re, im)| Complex::new(re, im)).collect();
        let spectra = Spectra::from_column_slice(bins.len(), 1, &bins);
        let summed = aggregate_magnitude(&spectra);
        prop_assert_eq!(summed.len(), bins.len());
        for (s, v) in summed.iter().zip(bins.iter()) {
            prop_assert_eq!(*s, v.norm());
        }
    }

    /// Requesting more functions than channels always fails.
    #[test]
    fn cmif_count_above_channels_fails(
        channels in 1usize..6,
        extra in 1usize..4,
        bins in 1usize..8,
    ) {
        let spectra = Spectra::from_element(bins, channels, Complex::new(1.0, -1.0));
        prop_assert!(compute_mode_indicators(&spectra, channels + extra).is_err());
        prop_assert!(compute_mode_indicators(&spectra, channels).is_ok());
    }
}
