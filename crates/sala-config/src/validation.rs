//! Configuration validation.
//!
//! Every section of [`AnalysisConfig`](crate::AnalysisConfig) is checked and
//! all problems are reported together.
//!
//! # Example
//!
//! ```rust
//! use sala_config::{AnalysisConfig, validate_config};
//!
//! let mut config = AnalysisConfig::default();
//! validate_config(&config).expect("defaults are valid");
//!
//! config.reverb.modes.push("T45".to_string());
//! assert!(validate_config(&config).is_err());
//! ```

use sala_analysis::{ReverbMode, RowConvention, Window};
use thiserror::Error;

use crate::config::AnalysisConfig;

/// Lowest accepted onset threshold in dB.
pub const MIN_ONSET_THRESHOLD_DB: f64 = -200.0;

/// Largest accepted FFT size.
pub const MAX_FFT_SIZE: usize = 1 << 24;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Mode name is not one of EDT, T20, T30, T60.
    #[error("unknown reverberation mode: {0}")]
    UnknownMode(String),

    /// Row convention name is not recognized.
    #[error("unknown row convention '{0}': expected 'plain' or 'conjugate'")]
    UnknownConvention(String),

    /// Window name is not recognized.
    #[error("unknown window: {0}")]
    UnknownWindow(String),

    /// A list that must not be empty is empty.
    #[error("parameter '{0}' must not be empty")]
    Empty(String),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_range(param: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Check an onset threshold in dB re. peak energy.
///
/// Accepts `MIN_ONSET_THRESHOLD_DB..=0.0`.
pub fn validate_onset_threshold(threshold_db: f64) -> ValidationResult<()> {
    check_range(
        "decay.onset_threshold_db",
        threshold_db,
        MIN_ONSET_THRESHOLD_DB,
        0.0,
    )
}

/// Parse mode names into [`ReverbMode`]s.
pub fn parse_modes(names: &[String]) -> ValidationResult<Vec<ReverbMode>> {
    if names.is_empty() {
        return Err(ValidationError::Empty("reverb.modes".to_string()));
    }
    names
        .iter()
        .map(|name| {
            name.parse::<ReverbMode>()
                .map_err(|_| ValidationError::UnknownMode(name.clone()))
        })
        .collect()
}

/// Parse a row convention name.
pub fn parse_convention(name: &str) -> ValidationResult<RowConvention> {
    RowConvention::from_name(name).ok_or_else(|| ValidationError::UnknownConvention(name.to_string()))
}

/// Parse a window name.
pub fn parse_window(name: &str) -> ValidationResult<Window> {
    Window::from_name(name).ok_or_else(|| ValidationError::UnknownWindow(name.to_string()))
}

/// Validate every section of a configuration.
///
/// Returns the single error when one check fails, or
/// [`ValidationError::Multiple`] when several do.
pub fn validate_config(config: &AnalysisConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    let checks = [
        validate_onset_threshold(config.decay.onset_threshold_db),
        check_range("decay.floor", config.decay.floor, f64::MIN_POSITIVE, 1e-3),
        parse_modes(&config.reverb.modes).map(|_| ()),
        check_range("modal.count", config.modal.count as f64, 1.0, f64::from(u16::MAX)),
        parse_convention(&config.modal.convention).map(|_| ()),
        check_range(
            "spectrum.fft_size",
            config.spectrum.fft_size as f64,
            2.0,
            MAX_FFT_SIZE as f64,
        ),
        parse_window(&config.spectrum.window).map(|_| ()),
    ];

    for check in checks {
        if let Err(e) = check {
            errors.push(e);
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_config(&AnalysisConfig::default()), Ok(()));
    }

    #[test]
    fn positive_onset_threshold_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.decay.onset_threshold_db = 3.0;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::OutOfRange { ref param, .. }) if param == "decay.onset_threshold_db"
        ));
    }

    #[test]
    fn onset_threshold_bounds() {
        assert_eq!(validate_onset_threshold(0.0), Ok(()));
        assert_eq!(validate_onset_threshold(MIN_ONSET_THRESHOLD_DB), Ok(()));
        assert!(validate_onset_threshold(0.5).is_err());
        assert!(validate_onset_threshold(-250.0).is_err());
        assert!(validate_onset_threshold(f64::NAN).is_err());
    }

    #[test]
    fn nan_floor_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.decay.floor = f64::NAN;
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::OutOfRange { ref param, .. }) if param == "decay.floor"
        ));
    }

    #[test]
    fn modes_parse_case_insensitively() {
        let names = vec!["edt".to_string(), "T30".to_string()];
        assert_eq!(
            parse_modes(&names).unwrap(),
            vec![ReverbMode::Edt, ReverbMode::T30]
        );
    }

    #[test]
    fn empty_mode_list_is_rejected() {
        assert_eq!(
            parse_modes(&[]),
            Err(ValidationError::Empty("reverb.modes".to_string()))
        );
    }

    #[test]
    fn several_problems_are_collected() {
        let mut config = AnalysisConfig::default();
        config.modal.count = 0;
        config.modal.convention = "hermitian".to_string();
        config.spectrum.window = "kaiser".to_string();

        let Err(ValidationError::Multiple(errors)) = validate_config(&config) else {
            panic!("expected multiple errors");
        };
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::UnknownConvention("hermitian".to_string())));
        assert!(errors.contains(&ValidationError::UnknownWindow("kaiser".to_string())));
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::UnknownMode("T1".to_string()),
            ValidationError::UnknownWindow("w".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: unknown reverberation mode: T1; unknown window: w"
        );
    }
}
