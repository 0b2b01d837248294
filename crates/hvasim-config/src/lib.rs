// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # HVA Simulation Settings
//!
//! Type-safe settings for the HVA short-term-plasticity circuit simulations:
//! - Neuron populations, the afferent input population, directed synaptic
//!   pathways and recording monitors
//! - TOML/JSON settings files with environment and CLI overrides
//! - Schema validation (population references, numeric ranges, equation roles)
//! - Built-in presets for the reference experiments
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hvasim_config::{load_settings, validate_settings};
//!
//! let settings = load_settings(None, None).expect("Failed to load settings");
//! let report = validate_settings(&settings).expect("Settings are invalid");
//!
//! println!("Populations: {:?}", settings.population_names());
//! println!("Warnings: {}", report.warnings.len());
//! ```
//!
//! The simulator that integrates the model equations is not part of this
//! crate. Equation references are resolved to descriptors only.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod equations;
pub mod loader;
pub mod pathway;
pub mod presets;
pub mod types;
pub mod validation;

pub use equations::{EquationDescriptor, EquationKind, EquationRef, EquationRegistry};
pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_settings_file, load_settings,
    parse_settings, save_settings, settings_to_string, SettingsFormat,
};
pub use pathway::{PathwayKey, AFFERENTS};
pub use presets::{
    default_settings, ff_hva_only_settings, test_stp_settings, ModelScale, Preset,
};
pub use types::*;
pub use validation::{
    validate_settings, validate_settings_with, SettingsValidationError, SettingsWarning,
    ValidationReport,
};

/// Re-export for convenience
pub use serde;

/// Settings error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings syntax: {0}")]
    ParseError(String),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(String),

    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Unknown population: {0}")]
    UnknownPopulation(String),

    #[error("Unknown pathway: {0}")]
    UnknownPathway(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown equation reference: {0}")]
    UnknownEquation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SerializeError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            ConfigError::SerializeError(err.to_string())
        } else {
            ConfigError::ParseError(err.to_string())
        }
    }
}

/// Result type for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;
