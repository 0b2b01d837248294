// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shipped settings files tests.
//!
//! The files under `settings/` are the editable form of the built-in presets
//! and must stay in sync with them.

use std::path::{Path, PathBuf};

use hvasim::prelude::*;

fn settings_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("settings")
        .join(format!("{}.toml", name))
}

fn load_shipped(preset: Preset) -> Settings {
    let path = settings_path(preset.name());
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    hvasim::config::parse_settings(&content, hvasim::config::SettingsFormat::Toml)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

#[test]
fn test_shipped_files_match_presets() {
    for preset in Preset::all() {
        assert_eq!(
            load_shipped(preset),
            preset.settings(),
            "settings/{}.toml differs from the built-in preset",
            preset.name()
        );
    }
}

#[test]
fn test_shipped_files_validate() {
    for preset in Preset::all() {
        let settings = load_shipped(preset);
        validate_settings(&settings)
            .unwrap_or_else(|e| panic!("{} failed validation: {}", preset.name(), e));
    }
}

#[test]
fn test_default_file_values() {
    let settings = load_shipped(Preset::Default);

    assert_eq!(settings.neurons["FS"].tau_m, 0.010);
    assert_eq!(settings.neurons["HVA_PY"].thresh, -0.044);
    assert_eq!(settings.afferents.modulation_rate, Some(vec![5.0]));
    assert_eq!(settings.afferents.peak_rate, Some(50.0));
    assert!(settings.afferents.spikes_per_second.is_none());

    let fs_inhibition = settings.pathway("FS", "HVA_PY").unwrap();
    assert_eq!(fs_inhibition.polarity(), SynapsePolarity::Inhibitory);
    assert_eq!(fs_inhibition.d1, 0.4);
}

#[test]
fn test_stp_file_values() {
    let settings = load_shipped(Preset::TestStp);

    assert_eq!(settings.pathway("afferents", "HVA_PY").unwrap().w_e, 10.0);
    assert_eq!(settings.pathway("afferents", "FS").unwrap().w_e, 5.0);
    assert_eq!(settings.pathway("afferents", "SOM").unwrap().w_e, 1.0);
    assert!(matches!(
        settings.afferents.drive().unwrap(),
        AfferentDrive::PulseTrain { spikes_per_second }
            if spikes_per_second.to_vec() == vec![1.0, 10.0, 50.0, 100.0]
    ));
}

#[test]
fn test_ff_file_is_reduced_scale() {
    let settings = load_shipped(Preset::FfHvaOnly);

    assert_eq!(settings, ff_hva_only_settings(ModelScale::Reduced));
    assert_ne!(settings, ff_hva_only_settings(ModelScale::Full));
    assert_eq!(settings.afferents.condition_count(), 8);
    assert!(settings.monitors["HVA_PV"].records_spikes());
}

#[test]
fn test_every_pathway_endpoint_is_declared() {
    for preset in Preset::all() {
        let settings = preset.settings_at(ModelScale::Full);
        for key in settings.synapses.keys() {
            assert!(settings.contains_population(&key.source), "{}", key);
            assert!(settings.neurons.contains_key(&key.target), "{}", key);
        }
        for population in settings.monitors.keys() {
            assert!(settings.contains_population(population), "{}", population);
        }
    }
}
