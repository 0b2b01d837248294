// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Settings file loading with override support
//!
//! This module implements the 3-tier settings loading system:
//! 1. Settings file, TOML or JSON (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::pathway::PathwayKey;
use crate::types::{AfferentSpec, NeuronTypeSpec, Settings, SynapseSpec};
use crate::{ConfigError, ConfigResult, EquationRef};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Default settings file name searched for by [`find_settings_file`]
pub const SETTINGS_FILE_NAME: &str = "hvasim_settings.toml";

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "HVASIM_SETTINGS_PATH";

/// Serialization format of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Toml,
    Json,
}

impl SettingsFormat {
    /// Pick the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for anything but `.toml` / `.json`
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(SettingsFormat::Toml),
            Some("json") => Ok(SettingsFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(format!(
                "{} (expected a .toml or .json file)",
                path.display()
            ))),
        }
    }
}

impl FromStr for SettingsFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(SettingsFormat::Toml),
            "json" => Ok(SettingsFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Find the settings file
///
/// Search order:
/// 1. `HVASIM_SETTINGS_PATH` environment variable
/// 2. Current working directory: `./hvasim_settings.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no settings file is found in any location
pub fn find_settings_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Settings file specified by {} not found: {}",
            SETTINGS_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(SETTINGS_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|dir| dir.join(SETTINGS_FILE_NAME)),
        );
    }

    if let Some(path) = search_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Settings file '{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        SETTINGS_FILE_NAME, search_list, SETTINGS_PATH_ENV
    )))
}

/// Parse settings from a string
///
/// # Errors
///
/// Returns `ConfigError::ParseError` for malformed input or unknown keys
pub fn parse_settings(content: &str, format: SettingsFormat) -> ConfigResult<Settings> {
    let settings = match format {
        SettingsFormat::Toml => toml::from_str(content)?,
        SettingsFormat::Json => serde_json::from_str(content)?,
    };
    Ok(settings)
}

/// Load settings from a TOML or JSON file
///
/// # Arguments
///
/// * `settings_path` - Optional path to the settings file. If `None`, will search for it.
/// * `cli_args` - Optional CLI overrides keyed by dotted path (see [`apply_cli_overrides`])
///
/// # Errors
///
/// Returns error if the file is not found, cannot be parsed, or an override is invalid.
/// Loading does not validate; call [`crate::validate_settings`] afterwards.
pub fn load_settings(
    settings_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<Settings> {
    let settings_file = match settings_path {
        Some(path) => path.to_path_buf(),
        None => find_settings_file()?,
    };
    debug!(path = %settings_file.display(), "Loading settings");

    let format = SettingsFormat::from_path(&settings_file)?;
    let content = fs::read_to_string(&settings_file)?;
    let mut settings = parse_settings(&content, format)?;

    apply_environment_overrides(&mut settings);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut settings, cli)?;
    }

    Ok(settings)
}

/// Serialize settings in the given format
///
/// # Errors
///
/// Returns `ConfigError::SerializeError` if serialization fails
pub fn settings_to_string(settings: &Settings, format: SettingsFormat) -> ConfigResult<String> {
    let content = match format {
        SettingsFormat::Toml => toml::to_string_pretty(settings)?,
        SettingsFormat::Json => serde_json::to_string_pretty(settings)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?,
    };
    Ok(content)
}

/// Write settings to a file, format chosen from the extension
///
/// # Errors
///
/// Returns error for unsupported extensions, serialization or I/O failures
pub fn save_settings(settings: &Settings, path: &Path) -> ConfigResult<()> {
    let format = SettingsFormat::from_path(path)?;
    let content = settings_to_string(settings, format)?;
    fs::write(path, content)?;
    debug!(path = %path.display(), "Saved settings");
    Ok(())
}

/// Apply environment variable overrides to settings
///
/// Supported environment variables:
/// - `HVASIM_SIM_TIME` -> `afferents.sim_time`
/// - `HVASIM_AFFERENT_COUNT` -> `afferents.N`
/// - `HVASIM_PEAK_RATE` -> `afferents.peak_rate`
/// - `HVASIM_POPULATION_SIZE` -> `N` of every neuron population
///
/// Values that fail to parse are logged and ignored, as is
/// `HVASIM_PEAK_RATE` when the afferents are driven by pulse trains.
pub fn apply_environment_overrides(settings: &mut Settings) {
    if let Some(sim_time) = env_value::<f64>("HVASIM_SIM_TIME") {
        settings.afferents.sim_time = sim_time;
    }
    if let Some(count) = env_value::<u32>("HVASIM_AFFERENT_COUNT") {
        settings.afferents.count = count;
    }
    if let Some(peak_rate) = env_value::<f64>("HVASIM_PEAK_RATE") {
        if settings.afferents.use_poisson {
            settings.afferents.peak_rate = Some(peak_rate);
        } else {
            warn!(
                variable = "HVASIM_PEAK_RATE",
                "Ignoring peak rate override for pulse-train afferents"
            );
        }
    }
    if let Some(count) = env_value::<u32>("HVASIM_POPULATION_SIZE") {
        set_population_size(settings, count);
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => {
            debug!(variable = name, value = %raw, "Applying environment override");
            Some(value)
        }
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

fn set_population_size(settings: &mut Settings, count: u32) {
    for spec in settings.neurons.values_mut() {
        spec.count = count;
    }
}

/// Apply CLI argument overrides to settings
///
/// Keys are dotted paths using the serialized parameter names:
/// - `neurons.<population>.<field>` (e.g. `neurons.HVA_PV.N`)
/// - `afferents.<field>` (e.g. `afferents.modulation_rate = "0,2,4"`)
/// - `synapses.<source>-><target>.<field>` (e.g. `synapses.afferents->HVA_PY.w_e`)
/// - `population_size` (sets `N` of every neuron population)
///
/// List values are comma-separated; `none` clears an optional field.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for unknown fields or unparseable values,
/// `ConfigError::UnknownPopulation` / `ConfigError::UnknownPathway` for missing targets
pub fn apply_cli_overrides(
    settings: &mut Settings,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    // population_size first so per-population N overrides win over it;
    // the rest sorted so that failures are reported deterministically
    let mut keys: Vec<&String> = cli_args.keys().collect();
    keys.sort_by(|a, b| {
        (a.as_str() != "population_size", a).cmp(&(b.as_str() != "population_size", b))
    });

    for key in keys {
        let value = cli_args[key].trim();
        debug!(path = %key, value, "Applying CLI override");
        apply_override(settings, key, value)?;
    }
    Ok(())
}

fn apply_override(settings: &mut Settings, path: &str, value: &str) -> ConfigResult<()> {
    if path == "population_size" {
        set_population_size(settings, parse_value(path, value)?);
        return Ok(());
    }

    let (section, rest) = path
        .split_once('.')
        .ok_or_else(|| unknown_field(path))?;

    match section {
        "afferents" => set_afferent_field(&mut settings.afferents, rest, value),
        "neurons" => {
            let (population, field) = rest.split_once('.').ok_or_else(|| unknown_field(path))?;
            let spec = settings
                .neurons
                .get_mut(population)
                .ok_or_else(|| ConfigError::UnknownPopulation(population.to_string()))?;
            set_neuron_field(spec, population, field, value)
        }
        "synapses" => {
            let (pathway, field) = rest.rsplit_once('.').ok_or_else(|| unknown_field(path))?;
            let key: PathwayKey = pathway.parse()?;
            let spec = settings
                .synapses
                .get_mut(&key)
                .ok_or_else(|| ConfigError::UnknownPathway(key.to_string()))?;
            set_synapse_field(spec, &key, field, value)
        }
        _ => Err(unknown_field(path)),
    }
}

fn set_neuron_field(
    spec: &mut NeuronTypeSpec,
    population: &str,
    field: &str,
    value: &str,
) -> ConfigResult<()> {
    let path = format!("neurons.{}.{}", population, field);
    match field {
        "N" => spec.count = parse_value(&path, value)?,
        "eqs" => spec.eqs = EquationRef::new(value),
        "tau_m" => spec.tau_m = parse_value(&path, value)?,
        "tau_e" => spec.tau_e = parse_value(&path, value)?,
        "tau_i" => spec.tau_i = parse_value(&path, value)?,
        "thresh" => spec.thresh = parse_value(&path, value)?,
        "reset" => spec.reset = parse_value(&path, value)?,
        "V_rest" => spec.v_rest = parse_value(&path, value)?,
        "refract" => spec.refract = parse_value(&path, value)?,
        _ => return Err(unknown_field(&path)),
    }
    Ok(())
}

fn set_afferent_field(spec: &mut AfferentSpec, field: &str, value: &str) -> ConfigResult<()> {
    let path = format!("afferents.{}", field);
    match field {
        "N" => spec.count = parse_value(&path, value)?,
        "use_poisson" => spec.use_poisson = parse_bool(&path, value)?,
        "modulation_rate" => spec.modulation_rate = parse_optional_list(&path, value)?,
        "peak_rate" => {
            spec.peak_rate = if is_none(value) {
                None
            } else {
                Some(parse_value(&path, value)?)
            }
        }
        "spikes_per_second" => spec.spikes_per_second = parse_optional_list(&path, value)?,
        "eqs" => spec.eqs = EquationRef::new(value),
        "sim_time" => spec.sim_time = parse_value(&path, value)?,
        _ => return Err(unknown_field(&path)),
    }
    Ok(())
}

fn set_synapse_field(
    spec: &mut SynapseSpec,
    key: &PathwayKey,
    field: &str,
    value: &str,
) -> ConfigResult<()> {
    let path = format!("synapses.{}.{}", key, field);
    let slot = match field {
        "eqs" => {
            spec.eqs = EquationRef::new(value);
            return Ok(());
        }
        "on_spike" => {
            spec.on_spike = EquationRef::new(value);
            return Ok(());
        }
        "p_connect" => &mut spec.p_connect,
        "d1" => &mut spec.d1,
        "d2" => &mut spec.d2,
        "f1" => &mut spec.f1,
        "f2" => &mut spec.f2,
        "tau_D1" => &mut spec.tau_d1,
        "tau_D2" => &mut spec.tau_d2,
        "tau_F1" => &mut spec.tau_f1,
        "tau_F2" => &mut spec.tau_f2,
        "w_e" => &mut spec.w_e,
        "w_i" => &mut spec.w_i,
        "delay" => &mut spec.delay,
        _ => return Err(unknown_field(&path)),
    };
    *slot = parse_value(&path, value)?;
    Ok(())
}

fn parse_value<T: FromStr>(path: &str, value: &str) -> ConfigResult<T> {
    value.parse::<T>().map_err(|_| {
        ConfigError::InvalidValue(format!("{} = '{}' could not be parsed", path, value))
    })
}

fn parse_bool(path: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} = '{}' is not a boolean",
            path, value
        ))),
    }
}

fn is_none(value: &str) -> bool {
    value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("null")
}

fn parse_optional_list(path: &str, value: &str) -> ConfigResult<Option<Vec<f64>>> {
    if is_none(value) {
        return Ok(None);
    }
    value
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_value(path, item))
        .collect::<ConfigResult<Vec<f64>>>()
        .map(Some)
}

fn unknown_field(path: &str) -> ConfigError {
    ConfigError::InvalidValue(format!("unknown settings field '{}'", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{default_settings, test_stp_settings};
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 4] = [
        "HVASIM_SIM_TIME",
        "HVASIM_AFFERENT_COUNT",
        "HVASIM_PEAK_RATE",
        "HVASIM_POPULATION_SIZE",
    ];

    fn clear_override_vars() {
        for name in OVERRIDE_VARS {
            env::remove_var(name);
        }
    }

    const MINIMAL_TOML: &str = r#"
[neurons.HVA_PY]
N = 1
eqs = "neuron_eqs"
tau_m = 0.030
tau_e = 0.002
tau_i = 0.010
thresh = -0.044
reset = -0.050
V_rest = -0.075
refract = 0.0015

[afferents]
N = 800
use_poisson = true
modulation_rate = [5]
peak_rate = 50
eqs = "sinusoid_rate"
sim_time = 2

[synapses."afferents->HVA_PY"]
eqs = "synapse_eqs"
on_spike = "onspike_eqs"
p_connect = 0.6
d1 = 0.7
d2 = 1.0
f1 = 0.0
f2 = 0.0
tau_D1 = 0.200
tau_D2 = 0.300
tau_F1 = 1000
tau_F2 = 0.300
w_e = 0.010
w_i = 0.0
delay = 0

[monitors]
HVA_PY = "V Ge_total Gi_total"
afferents = "spikes"
"#;

    #[test]
    fn test_find_settings_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("custom_settings.toml");
        File::create(&settings_path).unwrap();

        env::set_var(SETTINGS_PATH_ENV, settings_path.to_str().unwrap());
        let result = find_settings_file();
        env::remove_var(SETTINGS_PATH_ENV);

        assert_eq!(result.unwrap(), settings_path);
    }

    #[test]
    fn test_find_settings_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        env::set_var(SETTINGS_PATH_ENV, missing.to_str().unwrap());
        let result = find_settings_file();
        env::remove_var(SETTINGS_PATH_ENV);

        assert!(matches!(result, Err(ConfigError::FileNotFound(msg)) if msg.contains(SETTINGS_PATH_ENV)));
    }

    #[test]
    fn test_load_minimal_settings() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("hvasim_settings.toml");
        let mut file = File::create(&settings_path).unwrap();
        write!(file, "{}", MINIMAL_TOML).unwrap();

        let settings = load_settings(Some(&settings_path), None).unwrap();

        assert_eq!(settings.neurons["HVA_PY"].tau_m, 0.030);
        assert_eq!(settings.afferents.peak_rate, Some(50.0));
        assert_eq!(settings.afferents.spikes_per_second, None);
        let pathway = settings.pathway("afferents", "HVA_PY").unwrap();
        assert_eq!(pathway.tau_f1, 1000.0);
        assert_eq!(pathway.delay, 0.0);
        assert!(settings.monitors["afferents"].records_spikes());
        assert!(settings.meta.is_empty());
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let content = MINIMAL_TOML.replace("refract = 0.0015", "refract = 0.0015\ntau_w = 1");
        let result = parse_settings(&content, SettingsFormat::Toml);
        assert!(matches!(result, Err(ConfigError::ParseError(msg)) if msg.contains("tau_w")));
    }

    #[test]
    fn test_malformed_pathway_key_is_a_parse_error() {
        let content = MINIMAL_TOML.replace("\"afferents->HVA_PY\"", "\"afferents_HVA_PY\"");
        assert!(parse_settings(&content, SettingsFormat::Toml).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SettingsFormat::from_path(Path::new("a/b.TOML")).unwrap(),
            SettingsFormat::Toml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("b.json")).unwrap(),
            SettingsFormat::Json
        );
        assert!(matches!(
            SettingsFormat::from_path(Path::new("settings.py")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();

        for name in ["stp.toml", "stp.json"] {
            let path = dir.path().join(name);
            let settings = test_stp_settings();
            save_settings(&settings, &path).unwrap();

            let reloaded = load_settings(Some(&path), None).unwrap();
            assert_eq!(reloaded, settings, "{} did not round-trip", name);
        }
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let mut settings = default_settings();

        env::set_var("HVASIM_SIM_TIME", "5.5");
        env::set_var("HVASIM_POPULATION_SIZE", "100");
        env::set_var("HVASIM_AFFERENT_COUNT", "not-a-number");

        apply_environment_overrides(&mut settings);
        clear_override_vars();

        assert_eq!(settings.afferents.sim_time, 5.5);
        assert!(settings.neurons.values().all(|spec| spec.count == 100));
        assert_eq!(settings.afferents.count, 800);
    }

    #[test]
    fn test_peak_rate_env_ignored_for_pulse_trains() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let mut settings = test_stp_settings();

        env::set_var("HVASIM_PEAK_RATE", "30");
        apply_environment_overrides(&mut settings);
        clear_override_vars();

        assert_eq!(settings.afferents.peak_rate, None);
        assert!(crate::validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_peak_rate_env_applies_to_poisson() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let mut settings = default_settings();

        env::set_var("HVASIM_PEAK_RATE", "30");
        apply_environment_overrides(&mut settings);
        clear_override_vars();

        assert_eq!(settings.afferents.peak_rate, Some(30.0));
    }

    #[test]
    fn test_population_size_applies_before_specific_counts() {
        let mut settings = default_settings();
        let mut cli_args = HashMap::new();
        cli_args.insert("neurons.FS.N".to_string(), "100".to_string());
        cli_args.insert("population_size".to_string(), "3".to_string());

        apply_cli_overrides(&mut settings, &cli_args).unwrap();

        assert_eq!(settings.neurons["FS"].count, 100);
        assert_eq!(settings.neurons["HVA_PY"].count, 3);
        assert_eq!(settings.neurons["SOM"].count, 3);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = default_settings();
        let mut cli_args = HashMap::new();
        cli_args.insert("neurons.FS.tau_m".to_string(), "0.012".to_string());
        cli_args.insert("neurons.SOM.N".to_string(), "100".to_string());
        cli_args.insert("synapses.afferents->HVA_PY.w_e".to_string(), "0.02".to_string());
        cli_args.insert("synapses.FS->HVA_PY.tau_D1".to_string(), "0.5".to_string());
        cli_args.insert("afferents.modulation_rate".to_string(), "[0, 2, 4]".to_string());

        apply_cli_overrides(&mut settings, &cli_args).unwrap();

        assert_eq!(settings.neurons["FS"].tau_m, 0.012);
        assert_eq!(settings.neurons["SOM"].count, 100);
        assert_eq!(settings.pathway("afferents", "HVA_PY").unwrap().w_e, 0.02);
        assert_eq!(settings.pathway("FS", "HVA_PY").unwrap().tau_d1, 0.5);
        assert_eq!(settings.afferents.modulation_rate, Some(vec![0.0, 2.0, 4.0]));
    }

    #[test]
    fn test_cli_switches_afferent_mode() {
        let mut settings = default_settings();
        let mut cli_args = HashMap::new();
        cli_args.insert("afferents.use_poisson".to_string(), "false".to_string());
        cli_args.insert("afferents.modulation_rate".to_string(), "none".to_string());
        cli_args.insert("afferents.peak_rate".to_string(), "none".to_string());
        cli_args.insert("afferents.spikes_per_second".to_string(), "1,10,50".to_string());

        apply_cli_overrides(&mut settings, &cli_args).unwrap();

        assert!(matches!(
            settings.afferents.drive().unwrap(),
            crate::AfferentDrive::PulseTrain { spikes_per_second } if spikes_per_second.to_vec() == vec![1.0, 10.0, 50.0]
        ));
    }

    #[test]
    fn test_cli_override_errors() {
        let cases = [
            ("neurons.VIP.tau_m", "0.01"),
            ("neurons.FS.tau_x", "0.01"),
            ("neurons.FS.tau_m", "fast"),
            ("synapses.VIP->FS.w_e", "0.01"),
            ("synapses.afferents.w_e", "0.01"),
            ("monitors.FS", "V"),
            ("afferents.use_poisson", "maybe"),
        ];

        for (key, value) in cases {
            let mut settings = default_settings();
            let mut cli_args = HashMap::new();
            cli_args.insert(key.to_string(), value.to_string());
            assert!(
                apply_cli_overrides(&mut settings, &cli_args).is_err(),
                "{} = {} should be rejected",
                key,
                value
            );
        }
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("hvasim_settings.toml");
        let mut file = File::create(&settings_path).unwrap();
        write!(file, "{}", MINIMAL_TOML).unwrap();

        env::set_var("HVASIM_SIM_TIME", "4");
        env::set_var("HVASIM_POPULATION_SIZE", "10");

        let mut cli_args = HashMap::new();
        cli_args.insert("neurons.HVA_PY.N".to_string(), "25".to_string());

        let settings = load_settings(Some(&settings_path), Some(&cli_args)).unwrap();
        clear_override_vars();

        // CLI wins for N, env wins for sim_time (no CLI override)
        assert_eq!(settings.neurons["HVA_PY"].count, 25);
        assert_eq!(settings.afferents.sim_time, 4.0);
    }
}
