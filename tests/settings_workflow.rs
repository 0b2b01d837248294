// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Load / override / validate / save workflow tests.

use std::collections::HashMap;
use std::fs;

use hvasim::config::{apply_cli_overrides, parse_settings, SettingsFormat};
use hvasim::prelude::*;
use tempfile::TempDir;

fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn test_save_and_reload_every_preset() {
    let dir = TempDir::new().unwrap();

    for preset in Preset::all() {
        let settings = preset.settings_at(ModelScale::Full);
        for extension in ["toml", "json"] {
            let path = dir.path().join(format!("{}.{}", preset.name(), extension));
            save_settings(&settings, &path).unwrap();

            let content = fs::read_to_string(&path).unwrap();
            let format: SettingsFormat = extension.parse().unwrap();
            assert_eq!(parse_settings(&content, format).unwrap(), settings);
        }
    }
}

#[test]
fn test_load_with_cli_overrides_then_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ff.toml");
    save_settings(&Preset::FfHvaOnly.settings(), &path).unwrap();

    let mut settings = parse_settings(&fs::read_to_string(&path).unwrap(), SettingsFormat::Toml)
        .unwrap();
    apply_cli_overrides(
        &mut settings,
        &overrides(&[
            ("neurons.HVA_PV.N", "100"),
            ("afferents.modulation_rate", "[1, 2, 4]"),
            ("synapses.HVA_SOM->MED_PY.p_connect", "0.4"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.neurons["HVA_PV"].count, 100);
    assert_eq!(settings.afferents.condition_count(), 3);
    assert_eq!(settings.pathway("HVA_SOM", "MED_PY").unwrap().p_connect, 0.4);
    assert!(validate_settings(&settings).is_ok());
}

#[test]
fn test_override_that_breaks_invariants_fails_validation() {
    let mut settings = Preset::Default.settings();
    apply_cli_overrides(
        &mut settings,
        &overrides(&[
            ("synapses.afferents->FS.p_connect", "1.5"),
            ("neurons.SOM.reset", "-0.030"),
        ]),
    )
    .unwrap();

    let message = validate_settings(&settings).unwrap_err().to_string();
    assert!(message.contains("afferents->FS"), "{}", message);
    assert!(message.contains("SOM"), "{}", message);
}

#[test]
fn test_override_of_missing_pathway_is_rejected() {
    let mut settings = Preset::TestStp.settings();
    let result = apply_cli_overrides(
        &mut settings,
        &overrides(&[("synapses.FS->HVA_PY.w_i", "0.01")]),
    );
    assert!(matches!(result, Err(ConfigError::UnknownPathway(_))));
}

#[test]
fn test_unknown_field_in_file_is_rejected() {
    let mut content = hvasim::config::settings_to_string(
        &Preset::TestStp.settings(),
        SettingsFormat::Toml,
    )
    .unwrap();
    content = content.replacen("[afferents]", "[afferents]\nburst_rate = 3.0", 1);

    assert!(matches!(
        parse_settings(&content, SettingsFormat::Toml),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_both_drive_modes_are_rejected() {
    let mut settings = Preset::TestStp.settings();
    settings.afferents.use_poisson = true;
    settings.afferents.peak_rate = Some(20.0);
    settings.afferents.modulation_rate = Some(vec![1.0]);

    assert!(settings.afferents.drive().is_err());
    assert!(validate_settings(&settings).is_err());
}

#[test]
fn test_pathway_to_undeclared_population_is_rejected() {
    let mut settings = Preset::TestStp.settings();
    let template = settings.pathway("afferents", "FS").unwrap().clone();
    settings
        .synapses
        .insert(PathwayKey::new("VIP", "HVA_PY"), template);

    let message = validate_settings(&settings).unwrap_err().to_string();
    assert!(message.contains("VIP"), "{}", message);
}

#[test]
fn test_summary_reflects_overrides() {
    let mut settings = Preset::Default.settings();
    apply_cli_overrides(&mut settings, &overrides(&[("afferents.peak_rate", "35")])).unwrap();

    let text = SettingsSummary::new(&settings).to_string();
    assert!(text.contains("peak 35 Hz"), "{}", text);
    assert!(text.contains("SOM->HVA_PY"), "{}", text);
}
