//! Analysis configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use sala_analysis::{
    DECAY_FLOOR, DEFAULT_ONSET_THRESHOLD_DB, DecayOptions, ReverbMode, RowConvention, Window,
};

use crate::error::ConfigError;
use crate::validation::{self, ValidationResult};

/// Analysis settings shared by every command.
///
/// Every field has a default, so a file only needs the values it changes.
///
/// # TOML Format
///
/// ```toml
/// [decay]
/// onset_threshold_db = -20.0
/// floor = 1e-20
///
/// [reverb]
/// modes = ["EDT", "T20", "T30"]
///
/// [modal]
/// count = 2
/// convention = "plain"
///
/// [spectrum]
/// fft_size = 8192
/// window = "rectangular"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Onset and decay curve settings.
    pub decay: DecaySection,
    /// Reverberation time settings.
    pub reverb: ReverbSection,
    /// Mode indicator settings.
    pub modal: ModalSection,
    /// Spectra construction settings.
    pub spectrum: SpectrumSection,
}

/// `[decay]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecaySection {
    /// Onset threshold in dB relative to peak energy.
    pub onset_threshold_db: f64,
    /// Floor for non-positive remaining energy.
    pub floor: f64,
}

impl Default for DecaySection {
    fn default() -> Self {
        Self {
            onset_threshold_db: DEFAULT_ONSET_THRESHOLD_DB,
            floor: DECAY_FLOOR,
        }
    }
}

/// `[reverb]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReverbSection {
    /// Modes to report, by name.
    pub modes: Vec<String>,
}

impl Default for ReverbSection {
    fn default() -> Self {
        Self {
            modes: ReverbMode::ALL.iter().map(ToString::to_string).collect(),
        }
    }
}

/// `[modal]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModalSection {
    /// Number of singular values per bin.
    pub count: usize,
    /// Structured matrix row convention, `plain` or `conjugate`.
    pub convention: String,
}

impl Default for ModalSection {
    fn default() -> Self {
        Self {
            count: 1,
            convention: RowConvention::default().name().to_string(),
        }
    }
}

/// `[spectrum]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpectrumSection {
    /// FFT size used to build spectra from impulse responses.
    pub fft_size: usize,
    /// Window applied before the FFT.
    pub window: String,
}

impl Default for SpectrumSection {
    fn default() -> Self {
        Self {
            fft_size: 8192,
            window: Window::default().name().to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every section.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_config(self)
    }

    /// Onset and floor settings for the decay analysis.
    pub fn decay_options(&self) -> DecayOptions {
        DecayOptions::default()
            .with_onset_threshold_db(self.decay.onset_threshold_db)
            .with_floor(self.decay.floor)
    }

    /// Configured reverberation modes.
    pub fn reverb_modes(&self) -> ValidationResult<Vec<ReverbMode>> {
        validation::parse_modes(&self.reverb.modes)
    }

    /// Configured CMIF row convention.
    pub fn row_convention(&self) -> ValidationResult<RowConvention> {
        validation::parse_convention(&self.modal.convention)
    }

    /// Configured FFT window.
    pub fn window(&self) -> ValidationResult<Window> {
        validation::parse_window(&self.spectrum.window)
    }
}
