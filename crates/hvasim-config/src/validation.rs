// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Settings validation
//!
//! This module checks that a settings set is internally consistent before it
//! is handed to the simulator: pathways and monitors reference existing
//! populations, numeric values are within their valid ranges, the afferent
//! drive mode is unambiguous and equation references resolve to equations of
//! the right kind.
//!
//! Hard errors are collected and returned together. Suspicious but legal
//! values are reported as warnings and logged.

use crate::equations::{EquationKind, EquationRef, EquationRegistry};
use crate::pathway::AFFERENTS;
use crate::types::{MonitorSpec, NeuronTypeSpec, Settings, SynapsePolarity, SynapseSpec};
use crate::{ConfigError, ConfigResult};
use std::fmt;
use tracing::{debug, info, warn};

/// Validation errors that can occur during settings validation
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsValidationError {
    UnknownPopulation { field: String, population: String },
    ReservedPopulationName { name: String },
    NotPositive { field: String, value: f64 },
    Negative { field: String, value: f64 },
    OutOfRange { field: String, value: f64, min: f64, max: f64 },
    NotFinite { field: String },
    EmptyPopulation { field: String },
    ResetAboveThreshold { population: String, reset: f64, thresh: f64 },
    AmbiguousAfferentDrive { reason: String },
    EmptyMonitor { population: String },
    Equation { field: String, reason: String },
}

impl fmt::Display for SettingsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPopulation { field, population } => write!(
                f,
                "{} references population '{}' which is neither a neuron population nor '{}'",
                field, population, AFFERENTS
            ),
            Self::ReservedPopulationName { name } => {
                write!(f, "neurons.{} uses the reserved population name", name)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} = {} must be strictly positive", field, value)
            }
            Self::Negative { field, value } => {
                write!(f, "{} = {} must not be negative", field, value)
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{} = {} is outside [{}, {}]", field, value, min, max),
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
            Self::EmptyPopulation { field } => write!(f, "{} must be at least 1", field),
            Self::ResetAboveThreshold {
                population,
                reset,
                thresh,
            } => write!(
                f,
                "neurons.{}: reset ({}) is above thresh ({})",
                population, reset, thresh
            ),
            Self::AmbiguousAfferentDrive { reason } => write!(f, "afferents: {}", reason),
            Self::EmptyMonitor { population } => {
                write!(f, "monitors.{} records no variables", population)
            }
            Self::Equation { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

/// Legal but suspicious settings
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsWarning {
    RestAboveReset { population: String, v_rest: f64, reset: f64 },
    PathwayPolarity { pathway: String, polarity: SynapsePolarity },
    AfferentTarget { pathway: String },
    UnknownMonitorVariable { population: String, variable: String },
    AfferentStateMonitor { variable: String },
}

impl fmt::Display for SettingsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RestAboveReset {
                population,
                v_rest,
                reset,
            } => write!(
                f,
                "neurons.{}: V_rest ({}) is above reset ({})",
                population, v_rest, reset
            ),
            Self::PathwayPolarity { pathway, polarity } => write!(
                f,
                "synapses.{} is {} (expected exactly one of w_e / w_i to be nonzero)",
                pathway, polarity
            ),
            Self::AfferentTarget { pathway } => write!(
                f,
                "synapses.{} targets the afferent input population",
                pathway
            ),
            Self::UnknownMonitorVariable {
                population,
                variable,
            } => write!(
                f,
                "monitors.{} records unknown variable '{}'",
                population, variable
            ),
            Self::AfferentStateMonitor { variable } => write!(
                f,
                "monitors.{} records '{}' but afferents only produce spikes",
                AFFERENTS, variable
            ),
        }
    }
}

/// Outcome of a successful validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub warnings: Vec<SettingsWarning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Default)]
struct Findings {
    errors: Vec<SettingsValidationError>,
    warnings: Vec<SettingsWarning>,
}

impl Findings {
    fn error(&mut self, error: SettingsValidationError) {
        self.errors.push(error);
    }

    fn warn(&mut self, warning: SettingsWarning) {
        self.warnings.push(warning);
    }

    fn finite(&mut self, field: &str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.error(SettingsValidationError::NotFinite {
                field: field.to_string(),
            });
            false
        }
    }

    fn positive(&mut self, field: String, value: f64) {
        if self.finite(&field, value) && value <= 0.0 {
            self.error(SettingsValidationError::NotPositive { field, value });
        }
    }

    fn non_negative(&mut self, field: String, value: f64) {
        if self.finite(&field, value) && value < 0.0 {
            self.error(SettingsValidationError::Negative { field, value });
        }
    }

    fn in_range(&mut self, field: String, value: f64, min: f64, max: f64) {
        if self.finite(&field, value) && !(min..=max).contains(&value) {
            self.error(SettingsValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    fn equation(
        &mut self,
        registry: &EquationRegistry,
        field: String,
        reference: &EquationRef,
        kind: EquationKind,
    ) {
        if let Err(e) = registry.resolve_as(reference, kind) {
            let reason = match e {
                ConfigError::UnknownEquation(name) => format!("unknown equation '{}'", name),
                ConfigError::InvalidValue(reason) => reason,
                other => other.to_string(),
            };
            self.error(SettingsValidationError::Equation { field, reason });
        }
    }
}

/// Validate settings against the built-in equation registry
///
/// Checks for:
/// - Pathway and monitor references to existing populations
/// - Positive time constants and population sizes
/// - `reset <= thresh` for every neuron population
/// - Connection probabilities in [0, 1] and non-negative weights
/// - Exactly one afferent drive mode
/// - Equation references of the right kind
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_settings(settings: &Settings) -> ConfigResult<ValidationReport> {
    validate_settings_with(settings, &EquationRegistry::with_builtins())
}

/// Validate settings, resolving equation references through `registry`
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_settings_with(
    settings: &Settings,
    registry: &EquationRegistry,
) -> ConfigResult<ValidationReport> {
    let mut findings = Findings::default();

    validate_neurons(settings, registry, &mut findings);
    validate_afferents(settings, registry, &mut findings);
    validate_synapses(settings, registry, &mut findings);
    validate_monitors(settings, &mut findings);

    if !findings.errors.is_empty() {
        let error_messages = findings
            .errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Settings validation failed:\n{}",
            error_messages
        )));
    }

    for warning in &findings.warnings {
        warn!("{}", warning);
    }
    info!(
        populations = settings.neurons.len(),
        pathways = settings.synapses.len(),
        warnings = findings.warnings.len(),
        "Settings validated"
    );

    Ok(ValidationReport {
        warnings: findings.warnings,
    })
}

fn validate_neurons(settings: &Settings, registry: &EquationRegistry, findings: &mut Findings) {
    for (name, spec) in &settings.neurons {
        debug!(population = %name, "Validating neuron population");
        validate_neuron(name, spec, registry, findings);
    }
}

fn validate_neuron(
    name: &str,
    spec: &NeuronTypeSpec,
    registry: &EquationRegistry,
    findings: &mut Findings,
) {
    if name == AFFERENTS {
        findings.error(SettingsValidationError::ReservedPopulationName {
            name: name.to_string(),
        });
    }

    if spec.count == 0 {
        findings.error(SettingsValidationError::EmptyPopulation {
            field: format!("neurons.{}.N", name),
        });
    }

    for (field, value) in spec.time_constants() {
        findings.positive(format!("neurons.{}.{}", name, field), value);
    }

    let potentials_finite = [
        ("thresh", spec.thresh),
        ("reset", spec.reset),
        ("V_rest", spec.v_rest),
    ]
    .into_iter()
    .fold(true, |ok, (field, value)| {
        findings.finite(&format!("neurons.{}.{}", name, field), value) && ok
    });

    if potentials_finite {
        if spec.reset > spec.thresh {
            findings.error(SettingsValidationError::ResetAboveThreshold {
                population: name.to_string(),
                reset: spec.reset,
                thresh: spec.thresh,
            });
        }
        if spec.v_rest > spec.reset {
            findings.warn(SettingsWarning::RestAboveReset {
                population: name.to_string(),
                v_rest: spec.v_rest,
                reset: spec.reset,
            });
        }
    }

    findings.equation(
        registry,
        format!("neurons.{}.eqs", name),
        &spec.eqs,
        EquationKind::NeuronDynamics,
    );
}

fn validate_afferents(settings: &Settings, registry: &EquationRegistry, findings: &mut Findings) {
    let afferents = &settings.afferents;

    if afferents.count == 0 {
        findings.error(SettingsValidationError::EmptyPopulation {
            field: "afferents.N".to_string(),
        });
    }
    findings.positive("afferents.sim_time".to_string(), afferents.sim_time);

    if let Err(e) = afferents.drive() {
        let reason = match e {
            ConfigError::InvalidValue(reason) => reason,
            other => other.to_string(),
        };
        findings.error(SettingsValidationError::AmbiguousAfferentDrive { reason });
    }

    if let Some(rates) = &afferents.modulation_rate {
        if rates.is_empty() {
            findings.error(SettingsValidationError::AmbiguousAfferentDrive {
                reason: "modulation_rate lists no modulation frequency".to_string(),
            });
        }
        for (i, rate) in rates.iter().enumerate() {
            findings.non_negative(format!("afferents.modulation_rate[{}]", i), *rate);
        }
    }
    if let Some(peak_rate) = afferents.peak_rate {
        findings.non_negative("afferents.peak_rate".to_string(), peak_rate);
    }
    if let Some(rates) = &afferents.spikes_per_second {
        if rates.is_empty() {
            findings.error(SettingsValidationError::AmbiguousAfferentDrive {
                reason: "spikes_per_second lists no pulse-train frequency".to_string(),
            });
        }
        for (i, rate) in rates.iter().enumerate() {
            findings.positive(format!("afferents.spikes_per_second[{}]", i), *rate);
        }
    }

    findings.equation(
        registry,
        "afferents.eqs".to_string(),
        &afferents.eqs,
        EquationKind::RateGenerator,
    );
}

fn validate_synapses(settings: &Settings, registry: &EquationRegistry, findings: &mut Findings) {
    for (key, spec) in &settings.synapses {
        let prefix = format!("synapses.{}", key);

        for population in [&key.source, &key.target] {
            if !settings.contains_population(population) {
                findings.error(SettingsValidationError::UnknownPopulation {
                    field: prefix.clone(),
                    population: population.clone(),
                });
            }
        }
        if key.target == AFFERENTS {
            findings.warn(SettingsWarning::AfferentTarget {
                pathway: key.to_string(),
            });
        }

        validate_synapse(&prefix, spec, registry, findings);

        match spec.polarity() {
            SynapsePolarity::Excitatory | SynapsePolarity::Inhibitory => {}
            polarity => findings.warn(SettingsWarning::PathwayPolarity {
                pathway: key.to_string(),
                polarity,
            }),
        }
    }
}

fn validate_synapse(
    prefix: &str,
    spec: &SynapseSpec,
    registry: &EquationRegistry,
    findings: &mut Findings,
) {
    findings.in_range(format!("{}.p_connect", prefix), spec.p_connect, 0.0, 1.0);
    findings.non_negative(format!("{}.w_e", prefix), spec.w_e);
    findings.non_negative(format!("{}.w_i", prefix), spec.w_i);
    findings.non_negative(format!("{}.delay", prefix), spec.delay);

    for (field, value) in spec.stp_factors() {
        findings.non_negative(format!("{}.{}", prefix, field), value);
    }
    for (field, value) in spec.stp_time_constants() {
        findings.positive(format!("{}.{}", prefix, field), value);
    }

    findings.equation(
        registry,
        format!("{}.eqs", prefix),
        &spec.eqs,
        EquationKind::SynapticConductance,
    );
    findings.equation(
        registry,
        format!("{}.on_spike", prefix),
        &spec.on_spike,
        EquationKind::OnSpikeUpdate,
    );
}

fn validate_monitors(settings: &Settings, findings: &mut Findings) {
    for (population, monitor) in &settings.monitors {
        if !settings.contains_population(population) {
            findings.error(SettingsValidationError::UnknownPopulation {
                field: format!("monitors.{}", population),
                population: population.clone(),
            });
        }
        if monitor.is_empty() {
            findings.error(SettingsValidationError::EmptyMonitor {
                population: population.clone(),
            });
        }

        for variable in monitor.variables() {
            if !MonitorSpec::KNOWN_VARIABLES.contains(&variable.as_str()) {
                findings.warn(SettingsWarning::UnknownMonitorVariable {
                    population: population.clone(),
                    variable: variable.clone(),
                });
            } else if population == AFFERENTS && variable != MonitorSpec::SPIKES {
                findings.warn(SettingsWarning::AfferentStateMonitor {
                    variable: variable.clone(),
                });
            }
        }
    }
}
