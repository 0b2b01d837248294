// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Settings type definitions
//!
//! This module defines the structs that map to the sections of a settings
//! file: `[neurons.<name>]`, `[afferents]`, `[synapses."<src>-><dst>"]`,
//! `[monitors]` and the optional `[meta]`. Serialized key names match the
//! parameter names used by the simulator (`N`, `V_rest`, `tau_D1`, ...).

use crate::equations::EquationRef;
use crate::pathway::{PathwayKey, AFFERENTS};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Root settings structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "SettingsMeta::is_empty")]
    pub meta: SettingsMeta,
    pub neurons: BTreeMap<String, NeuronTypeSpec>,
    pub afferents: AfferentSpec,
    #[serde(default)]
    pub synapses: BTreeMap<PathwayKey, SynapseSpec>,
    #[serde(default)]
    pub monitors: BTreeMap<String, MonitorSpec>,
}

impl Settings {
    /// Neuron population names followed by `afferents`
    pub fn population_names(&self) -> Vec<&str> {
        self.neurons
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(AFFERENTS))
            .collect()
    }

    /// True for any neuron population and for `afferents`
    pub fn contains_population(&self, name: &str) -> bool {
        name == AFFERENTS || self.neurons.contains_key(name)
    }

    pub fn neuron(&self, name: &str) -> ConfigResult<&NeuronTypeSpec> {
        self.neurons
            .get(name)
            .ok_or_else(|| ConfigError::UnknownPopulation(name.to_string()))
    }

    pub fn pathway(&self, source: &str, target: &str) -> ConfigResult<&SynapseSpec> {
        let key = PathwayKey::new(source, target);
        self.synapses
            .get(&key)
            .ok_or_else(|| ConfigError::UnknownPathway(key.to_string()))
    }

    pub fn pathways_from<'a>(
        &'a self,
        source: &'a str,
    ) -> impl Iterator<Item = (&'a PathwayKey, &'a SynapseSpec)> + 'a {
        self.synapses.iter().filter(move |(key, _)| key.source == source)
    }

    pub fn pathways_into<'a>(
        &'a self,
        target: &'a str,
    ) -> impl Iterator<Item = (&'a PathwayKey, &'a SynapseSpec)> + 'a {
        self.synapses.iter().filter(move |(key, _)| key.target == target)
    }

    /// Neurons across all populations, afferents excluded
    pub fn total_neurons(&self) -> u64 {
        self.neurons.values().map(|spec| u64::from(spec.count)).sum()
    }
}

/// Descriptive metadata carried alongside the parameters
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Literature sources for the parameter values
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl SettingsMeta {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.references.is_empty()
    }
}

/// Parameters of one neuron population (times in s, potentials in V)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NeuronTypeSpec {
    #[serde(rename = "N")]
    pub count: u32,
    pub eqs: EquationRef,
    pub tau_m: f64,
    pub tau_e: f64,
    pub tau_i: f64,
    pub thresh: f64,
    pub reset: f64,
    #[serde(rename = "V_rest")]
    pub v_rest: f64,
    pub refract: f64,
}

impl NeuronTypeSpec {
    /// Named time constants, all of which must be strictly positive
    pub fn time_constants(&self) -> [(&'static str, f64); 4] {
        [
            ("tau_m", self.tau_m),
            ("tau_e", self.tau_e),
            ("tau_i", self.tau_i),
            ("refract", self.refract),
        ]
    }
}

/// External input population
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AfferentSpec {
    #[serde(rename = "N")]
    pub count: u32,
    pub use_poisson: bool,
    /// Sinusoidal modulation frequencies (Hz), one run per entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modulation_rate: Option<Vec<f64>>,
    /// Peak Poisson rate (Hz)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_rate: Option<f64>,
    /// Pulse-train frequencies (Hz), one run per entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spikes_per_second: Option<Vec<f64>>,
    pub eqs: EquationRef,
    /// Simulated duration (s)
    pub sim_time: f64,
}

/// How the afferent population generates spikes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AfferentDrive<'a> {
    /// Inhomogeneous Poisson process with sinusoidal rate modulation
    Poisson {
        modulation_rates: &'a [f64],
        peak_rate: f64,
    },
    /// Regular pulse trains at the given frequencies
    PulseTrain { spikes_per_second: &'a [f64] },
}

impl AfferentSpec {
    /// Typed view of the active drive mode
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` unless exactly one of Poisson
    /// modulation (`use_poisson` with `modulation_rate` and `peak_rate`) or
    /// `spikes_per_second` is configured
    pub fn drive(&self) -> ConfigResult<AfferentDrive<'_>> {
        match (
            self.use_poisson,
            &self.modulation_rate,
            self.peak_rate,
            &self.spikes_per_second,
        ) {
            (true, Some(rates), Some(peak_rate), None) => Ok(AfferentDrive::Poisson {
                modulation_rates: rates,
                peak_rate,
            }),
            (false, None, None, Some(spikes)) => Ok(AfferentDrive::PulseTrain {
                spikes_per_second: spikes,
            }),
            (true, _, _, _) => Err(ConfigError::InvalidValue(
                "afferents.use_poisson requires modulation_rate and peak_rate and no \
                 spikes_per_second"
                    .to_string(),
            )),
            (false, _, _, _) => Err(ConfigError::InvalidValue(
                "afferents without use_poisson require spikes_per_second and no \
                 modulation_rate or peak_rate"
                    .to_string(),
            )),
        }
    }

    /// Number of separate runs the afferent drive describes
    pub fn condition_count(&self) -> usize {
        match self.drive() {
            Ok(AfferentDrive::Poisson {
                modulation_rates, ..
            }) => modulation_rates.len(),
            Ok(AfferentDrive::PulseTrain { spikes_per_second }) => spikes_per_second.len(),
            Err(_) => 0,
        }
    }
}

/// Parameters of one directed synaptic pathway
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SynapseSpec {
    pub eqs: EquationRef,
    pub on_spike: EquationRef,
    pub p_connect: f64,
    pub d1: f64,
    pub d2: f64,
    pub f1: f64,
    pub f2: f64,
    #[serde(rename = "tau_D1")]
    pub tau_d1: f64,
    #[serde(rename = "tau_D2")]
    pub tau_d2: f64,
    #[serde(rename = "tau_F1")]
    pub tau_f1: f64,
    #[serde(rename = "tau_F2")]
    pub tau_f2: f64,
    pub w_e: f64,
    pub w_i: f64,
    pub delay: f64,
}

/// Sign of the conductance a pathway contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynapsePolarity {
    Excitatory,
    Inhibitory,
    Mixed,
    Silent,
}

impl fmt::Display for SynapsePolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Excitatory => "excitatory",
            Self::Inhibitory => "inhibitory",
            Self::Mixed => "mixed",
            Self::Silent => "silent",
        };
        f.write_str(name)
    }
}

impl SynapseSpec {
    pub fn polarity(&self) -> SynapsePolarity {
        match (self.w_e > 0.0, self.w_i > 0.0) {
            (true, false) => SynapsePolarity::Excitatory,
            (false, true) => SynapsePolarity::Inhibitory,
            (true, true) => SynapsePolarity::Mixed,
            (false, false) => SynapsePolarity::Silent,
        }
    }

    /// Depression/facilitation recovery time constants
    pub fn stp_time_constants(&self) -> [(&'static str, f64); 4] {
        [
            ("tau_D1", self.tau_d1),
            ("tau_D2", self.tau_d2),
            ("tau_F1", self.tau_f1),
            ("tau_F2", self.tau_f2),
        ]
    }

    /// Per-spike depression and facilitation factors
    pub fn stp_factors(&self) -> [(&'static str, f64); 4] {
        [
            ("d1", self.d1),
            ("d2", self.d2),
            ("f1", self.f1),
            ("f2", self.f2),
        ]
    }
}

/// State variables recorded for one population
///
/// Written as a space-separated string, e.g. `"V Ge_total Gi_total"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorSpec {
    variables: Vec<String>,
}

impl MonitorSpec {
    pub const MEMBRANE_POTENTIAL: &'static str = "V";
    pub const EXCITATORY_CONDUCTANCE: &'static str = "Ge_total";
    pub const INHIBITORY_CONDUCTANCE: &'static str = "Gi_total";
    pub const SPIKES: &'static str = "spikes";

    /// Variable names the simulator knows how to record
    pub const KNOWN_VARIABLES: [&'static str; 4] = [
        Self::MEMBRANE_POTENTIAL,
        Self::EXCITATORY_CONDUCTANCE,
        Self::INHIBITORY_CONDUCTANCE,
        Self::SPIKES,
    ];

    pub fn new<I, S>(variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split_whitespace())
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn records(&self, variable: &str) -> bool {
        self.variables.iter().any(|v| v == variable)
    }

    pub fn records_spikes(&self) -> bool {
        self.records(Self::SPIKES)
    }

    /// Recorded state variables, `spikes` excluded
    pub fn state_variables(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .map(String::as_str)
            .filter(|v| *v != Self::SPIKES)
    }
}

impl fmt::Display for MonitorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.variables.join(" "))
    }
}

impl Serialize for MonitorSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonitorSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
