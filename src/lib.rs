// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # hvasim - HVA short-term-plasticity circuit settings
//!
//! Parameter sets for spiking simulations of higher-visual-area (HVA) circuits:
//! neuron populations, the afferent input population, directed synaptic
//! pathways with short-term depression/facilitation, and recording monitors.
//! The simulator that integrates the model equations is external; this crate
//! provides the typed settings, their loader and their validator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hvasim::prelude::*;
//!
//! // Built-in preset
//! let settings = Preset::TestStp.settings();
//! assert_eq!(settings.pathway("afferents", "HVA_PY")?.w_e, 10.0);
//!
//! // Or a settings file with overrides, validated before use
//! let settings = load_settings(Some(std::path::Path::new("settings/default.toml")), None)?;
//! let report = validate_settings(&settings)?;
//! println!("{}", SettingsSummary::new(&settings));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  hvasim-config                                          │
//! │  (schema, presets, loader, equation registry, checks)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  hvasim (this crate) + hvasim_settings CLI              │
//! │  (summaries, validation/export commands)                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! `hvasim-observability` sets up `tracing` output for the CLI.
//!
//! ## License
//!
//! Apache-2.0

pub use hvasim_config as config;
pub use hvasim_observability as observability;

pub mod summary;

pub use summary::SettingsSummary;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::config::{
        default_settings, ff_hva_only_settings, load_settings, save_settings, test_stp_settings,
        validate_settings, AfferentDrive, AfferentSpec, ConfigError, ConfigResult, ModelScale,
        MonitorSpec, NeuronTypeSpec, PathwayKey, Preset, Settings, SynapsePolarity, SynapseSpec,
        ValidationReport,
    };
    pub use crate::summary::SettingsSummary;
}
