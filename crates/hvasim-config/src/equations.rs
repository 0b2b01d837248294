// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Model-equation references
//!
//! Settings refer to the simulator's model equations by name. This module
//! resolves those names to descriptors so that a settings file can be checked
//! for unknown references, or for an equation used in the wrong slot (e.g. a
//! rate generator given as neuron dynamics), before it reaches the simulator.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Symbolic reference to an equation set of the external simulator
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquationRef(pub String);

impl EquationRef {
    /// Membrane dynamics of a conductance-based integrate-and-fire neuron
    pub const NEURON_EQS: &'static str = "neuron_eqs";
    /// Synaptic conductance and STP state dynamics
    pub const SYNAPSE_EQS: &'static str = "synapse_eqs";
    /// Presynaptic spike update rule
    pub const ONSPIKE_EQS: &'static str = "onspike_eqs";
    /// Sinusoidally modulated firing rate
    pub const SINUSOID_RATE: &'static str = "sinusoid_rate";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn neuron_eqs() -> Self {
        Self::new(Self::NEURON_EQS)
    }

    pub fn synapse_eqs() -> Self {
        Self::new(Self::SYNAPSE_EQS)
    }

    pub fn onspike_eqs() -> Self {
        Self::new(Self::ONSPIKE_EQS)
    }

    pub fn sinusoid_rate() -> Self {
        Self::new(Self::SINUSOID_RATE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EquationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role an equation set plays in the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationKind {
    NeuronDynamics,
    SynapticConductance,
    OnSpikeUpdate,
    RateGenerator,
}

impl fmt::Display for EquationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NeuronDynamics => "neuron dynamics",
            Self::SynapticConductance => "synaptic conductance",
            Self::OnSpikeUpdate => "on-spike update",
            Self::RateGenerator => "rate generator",
        };
        f.write_str(name)
    }
}

/// Description of an equation set known to the simulator
#[derive(Debug, Clone, PartialEq)]
pub struct EquationDescriptor {
    pub name: String,
    pub kind: EquationKind,
    pub summary: String,
}

/// Name → descriptor lookup for equation references
#[derive(Debug, Clone)]
pub struct EquationRegistry {
    equations: HashMap<String, EquationDescriptor>,
}

impl Default for EquationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl EquationRegistry {
    /// Registry with no equations
    pub fn empty() -> Self {
        Self {
            equations: HashMap::new(),
        }
    }

    /// Registry holding the four equation sets used by the reference settings
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(
            EquationRef::NEURON_EQS,
            EquationKind::NeuronDynamics,
            "membrane and conductance dynamics; uses tau_m, tau_e, tau_i, thresh, reset, \
             V_rest, refract",
        );
        registry.register(
            EquationRef::SYNAPSE_EQS,
            EquationKind::SynapticConductance,
            "synaptic conductance with depression/facilitation recovery; uses tau_D1, \
             tau_D2, tau_F1, tau_F2",
        );
        registry.register(
            EquationRef::ONSPIKE_EQS,
            EquationKind::OnSpikeUpdate,
            "presynaptic spike update; uses w_e, w_i, d1, d2, f1, f2",
        );
        registry.register(
            EquationRef::SINUSOID_RATE,
            EquationKind::RateGenerator,
            "sinusoidally modulated afferent rate; uses modulation_rate, peak_rate",
        );
        registry
    }

    /// Add or replace an equation set
    pub fn register(&mut self, name: impl Into<String>, kind: EquationKind, summary: &str) {
        let name = name.into();
        self.equations.insert(
            name.clone(),
            EquationDescriptor {
                name,
                kind,
                summary: summary.to_string(),
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.equations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Look up an equation reference
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEquation` if the name is not registered
    pub fn resolve(&self, reference: &EquationRef) -> ConfigResult<&EquationDescriptor> {
        self.equations
            .get(reference.as_str())
            .ok_or_else(|| ConfigError::UnknownEquation(reference.to_string()))
    }

    /// Look up an equation reference that must play a given role
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEquation` for unregistered names and
    /// `ConfigError::InvalidValue` when the equation has a different role
    pub fn resolve_as(
        &self,
        reference: &EquationRef,
        expected: EquationKind,
    ) -> ConfigResult<&EquationDescriptor> {
        let descriptor = self.resolve(reference)?;
        if descriptor.kind != expected {
            return Err(ConfigError::InvalidValue(format!(
                "equation '{}' is a {} but a {} is required",
                reference, descriptor.kind, expected
            )));
        }
        Ok(descriptor)
    }
}
