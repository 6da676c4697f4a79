//! Configuration for sala room acoustics analysis.
//!
//! Settings are stored as TOML. Each section maps onto the parameters of the
//! analysis functions in `sala-analysis`:
//!
//! - **`[decay]`**: onset threshold and decay floor ([`DecayOptions`](sala_analysis::DecayOptions))
//! - **`[reverb]`**: which measurement modes to report
//! - **`[modal]`**: number of singular values and row convention
//! - **`[spectrum]`**: FFT size and window for building spectra
//!
//! # Example
//!
//! ```rust,no_run
//! use sala_config::{AnalysisConfig, default_config_path};
//!
//! // Load from the user config directory, falling back to defaults
//! let path = default_config_path();
//! let config = if path.exists() {
//!     AnalysisConfig::load(&path).unwrap()
//! } else {
//!     AnalysisConfig::default()
//! };
//!
//! let options = config.decay_options();
//! let modes = config.reverb_modes().unwrap();
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

/// Configuration validation.
pub mod validation;

pub use config::{AnalysisConfig, DecaySection, ModalSection, ReverbSection, SpectrumSection};
pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, default_config_path, ensure_user_config_dir, user_config_dir};
pub use validation::{
    ValidationError, ValidationResult, validate_config, validate_onset_threshold,
};
