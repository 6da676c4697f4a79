//! Integration tests for sala-config.
//!
//! These tests verify file round trips and that loaded settings drive the
//! analysis functions.

use sala_analysis::{DecayAnalysis, ReverbMode, RowConvention, Window};
use sala_config::{AnalysisConfig, ConfigError};
use tempfile::TempDir;

#[test]
fn test_config_save_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("sala.toml");

    let mut config = AnalysisConfig::default();
    config.decay.onset_threshold_db = -25.0;
    config.reverb.modes = vec!["t30".to_string(), "EDT".to_string()];
    config.modal.count = 3;
    config.modal.convention = "conjugate".to_string();
    config.spectrum.window = "hann".to_string();

    config.save(&path).expect("should save and create parent dir");
    assert!(path.exists());

    let loaded = AnalysisConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(
        loaded.reverb_modes().unwrap(),
        vec![ReverbMode::T30, ReverbMode::Edt]
    );
    assert_eq!(loaded.row_convention().unwrap(), RowConvention::Conjugate);
    assert_eq!(loaded.window().unwrap(), Window::Hann);
}

#[test]
fn test_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    let err = AnalysisConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[decay]\nonset_threshold_db = 12.0\n").unwrap();
    assert!(matches!(
        AnalysisConfig::load(&path),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_decay_options_drive_onset_detection() {
    // quiet lead-in at -30 dB before the main impulse
    let mut ir = vec![0.0316; 50];
    ir.extend((0..4000).map(|i| 0.999f64.powi(i)));

    let strict = AnalysisConfig::from_toml("[decay]\nonset_threshold_db = -40.0").unwrap();
    let analysis = DecayAnalysis::new(&ir, 8000, &strict.decay_options()).unwrap();
    assert_eq!(analysis.onset(), 0);

    let default = AnalysisConfig::default();
    let analysis = DecayAnalysis::new(&ir, 8000, &default.decay_options()).unwrap();
    assert_eq!(analysis.onset(), 50);
}
