// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Built-in settings presets
//!
//! - [`Preset::Default`]: PY, FS and SOM cells driven by 5 Hz sinusoidally
//!   modulated Poisson afferents. Values are measured or literature-derived
//!   and are a starting point for specific simulations.
//! - [`Preset::TestStp`]: three identical cells driven by regular pulse trains.
//!   STP recovery is effectively infinite so depression decays geometrically
//!   and facilitation grows linearly, and each pathway has a distinct
//!   feedforward weight equal to the expected first-pulse amplitude.
//! - [`Preset::FfHvaOnly`]: feedforward excitation onto medial and lateral HVA
//!   pyramidal cells with PV/SOM interneurons, STP drawn from slice data.
//!   Swept over eight modulation frequencies.

use crate::equations::EquationRef;
use crate::pathway::{PathwayKey, AFFERENTS};
use crate::types::{
    AfferentSpec, MonitorSpec, NeuronTypeSpec, Settings, SettingsMeta, SynapseSpec,
};
use crate::ConfigError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named settings preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Default,
    TestStp,
    FfHvaOnly,
}

impl Preset {
    pub fn all() -> [Preset; 3] {
        [Preset::Default, Preset::TestStp, Preset::FfHvaOnly]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::TestStp => "test_stp",
            Preset::FfHvaOnly => "ff_hva_only",
        }
    }

    /// Settings for this preset (reduced scale where it applies)
    pub fn settings(&self) -> Settings {
        self.settings_at(ModelScale::Reduced)
    }

    pub fn settings_at(&self, scale: ModelScale) -> Settings {
        match self {
            Preset::Default => default_settings(),
            Preset::TestStp => test_stp_settings(),
            Preset::FfHvaOnly => ff_hva_only_settings(scale),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Preset::Default),
            "test_stp" | "stp" => Ok(Preset::TestStp),
            "ff_hva_only" | "sim_ff_hva_only" => Ok(Preset::FfHvaOnly),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Network size for presets that have a reduced debugging variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelScale {
    /// Few interneurons, all-to-all interneuron→pyramidal wiring
    #[default]
    Reduced,
    /// 100 cells per interneuron population, 40% interneuron→pyramidal wiring
    Full,
}

impl ModelScale {
    fn interneuron_count(&self) -> u32 {
        match self {
            ModelScale::Reduced => 3,
            ModelScale::Full => 100,
        }
    }

    fn interneuron_p_connect(&self) -> f64 {
        match self {
            ModelScale::Reduced => 1.0,
            ModelScale::Full => 0.4,
        }
    }
}

impl FromStr for ModelScale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reduced" => Ok(ModelScale::Reduced),
            "full" => Ok(ModelScale::Full),
            _ => Err(ConfigError::InvalidValue(format!(
                "model scale '{}' must be 'reduced' or 'full'",
                s
            ))),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn neuron(
    count: u32,
    tau_m: f64,
    tau_e: f64,
    tau_i: f64,
    thresh: f64,
    reset: f64,
    v_rest: f64,
    refract: f64,
) -> NeuronTypeSpec {
    NeuronTypeSpec {
        count,
        eqs: EquationRef::neuron_eqs(),
        tau_m,
        tau_e,
        tau_i,
        thresh,
        reset,
        v_rest,
        refract,
    }
}

/// Pathway with the default equations; tune fields with struct update syntax
fn synapse(p_connect: f64, w_e: f64, w_i: f64) -> SynapseSpec {
    SynapseSpec {
        eqs: EquationRef::synapse_eqs(),
        on_spike: EquationRef::onspike_eqs(),
        p_connect,
        d1: 1.0,
        d2: 1.0,
        f1: 0.0,
        f2: 0.0,
        tau_d1: 0.300,
        tau_d2: 0.300,
        tau_f1: 0.300,
        tau_f2: 0.300,
        w_e,
        w_i,
        delay: 0.0,
    }
}

fn monitors(entries: &[(&str, &str)]) -> BTreeMap<String, MonitorSpec> {
    entries
        .iter()
        .map(|(population, variables)| (population.to_string(), MonitorSpec::parse(variables)))
        .collect()
}

const CONDUCTANCE_MONITOR: &str = "V Ge_total Gi_total";

/// Measured or good-guess values for PY, FS and SOM cells
pub fn default_settings() -> Settings {
    let mut neurons = BTreeMap::new();
    neurons.insert(
        "HVA_PY".to_string(),
        neuron(1, 0.030, 0.002, 0.010, -0.044, -0.050, -0.075, 0.0015),
    );
    neurons.insert(
        "FS".to_string(),
        neuron(1, 0.010, 0.002, 0.008, -0.040, -0.058, -0.071, 0.0015),
    );
    neurons.insert(
        "SOM".to_string(),
        neuron(1, 0.026, 0.002, 0.012, -0.040, -0.055, -0.060, 0.0015),
    );

    let afferents = AfferentSpec {
        count: 800,
        use_poisson: true,
        modulation_rate: Some(vec![5.0]),
        peak_rate: Some(50.0),
        spikes_per_second: None,
        eqs: EquationRef::sinusoid_rate(),
        sim_time: 2.0,
    };

    let mut synapses = BTreeMap::new();
    synapses.insert(
        PathwayKey::new("SOM", "HVA_PY"),
        SynapseSpec {
            d1: 0.5,
            ..synapse(0.0, 0.0, 0.0025)
        },
    );
    synapses.insert(
        PathwayKey::new("FS", "HVA_PY"),
        SynapseSpec {
            d1: 0.4,
            ..synapse(0.0, 0.0, 0.005)
        },
    );
    synapses.insert(
        PathwayKey::from_afferents("HVA_PY"),
        SynapseSpec {
            d1: 0.7,
            tau_d1: 0.200,
            tau_f1: 1000.0,
            ..synapse(0.6, 0.010, 0.0)
        },
    );
    synapses.insert(
        PathwayKey::from_afferents("FS"),
        SynapseSpec {
            d1: 0.4,
            tau_f1: 1000.0,
            ..synapse(0.6, 0.015, 0.0)
        },
    );
    synapses.insert(
        PathwayKey::from_afferents("SOM"),
        SynapseSpec {
            f1: 0.7,
            tau_d1: 0.400,
            tau_f1: 0.400,
            ..synapse(0.6, 0.002, 0.0)
        },
    );

    Settings {
        meta: SettingsMeta {
            name: Some(Preset::Default.name().to_string()),
            description: Some(
                "Measured or good-guess values; modify for specific simulations".to_string(),
            ),
            references: vec![
                "Kapfer, Glickfeld, Atallah, Scanziani (2007). Supralinear increase of \
                 recurrent inhibition during sparse activity in somatosensory cortex"
                    .to_string(),
                "Chance, Nelson, Abbott (1998). Synaptic depression and the temporal \
                 response characteristics of V1 cells"
                    .to_string(),
                "Lefort, Tomm, Sarria, Petersen (2008). The excitatory neuronal network of \
                 the C2 barrel column in mouse primary somatosensory cortex"
                    .to_string(),
                "Yang, Carrasquillo, Hooks, Nerbonne, Burkhalter (2013). Distinct balance \
                 of excitation and inhibition in an interareal feedforward and feedback \
                 circuit of mouse visual cortex"
                    .to_string(),
                "Nassar et al. (2015). Diversity and overlap of parvalbumin and \
                 somatostatin expressing neurons in mouse presubiculum"
                    .to_string(),
                "Economo, White (2012). Membrane properties and the balance between \
                 excitation and inhibition control gamma-frequency oscillations arising \
                 from feedback inhibition"
                    .to_string(),
            ],
        },
        neurons,
        afferents,
        synapses,
        monitors: monitors(&[
            ("HVA_PY", CONDUCTANCE_MONITOR),
            ("FS", CONDUCTANCE_MONITOR),
            ("SOM", CONDUCTANCE_MONITOR),
            (AFFERENTS, MonitorSpec::SPIKES),
        ]),
    }
}

/// Identical cells probed with pulse trains to check STP bookkeeping
pub fn test_stp_settings() -> Settings {
    let neurons = ["HVA_PY", "FS", "SOM"]
        .into_iter()
        .map(|name| {
            (
                name.to_string(),
                neuron(1, 0.030, 0.002, 0.010, -0.044, -0.050, -0.075, 0.0015),
            )
        })
        .collect();

    let afferents = AfferentSpec {
        count: 1,
        use_poisson: false,
        modulation_rate: None,
        peak_rate: None,
        spikes_per_second: Some(vec![1.0, 10.0, 50.0, 100.0]),
        eqs: EquationRef::sinusoid_rate(),
        sim_time: 2.0,
    };

    let slow_recovery = |tau: f64| SynapseSpec {
        tau_d1: tau,
        tau_d2: tau,
        tau_f1: tau,
        tau_f2: tau,
        ..synapse(1.0, 0.0, 0.0)
    };

    let mut synapses = BTreeMap::new();
    synapses.insert(
        PathwayKey::from_afferents("HVA_PY"),
        SynapseSpec {
            d1: 0.8,
            w_e: 10.0,
            ..slow_recovery(1000.0)
        },
    );
    synapses.insert(
        PathwayKey::from_afferents("FS"),
        SynapseSpec {
            d1: 0.5,
            w_e: 5.0,
            ..slow_recovery(1000.0)
        },
    );
    synapses.insert(
        PathwayKey::from_afferents("SOM"),
        SynapseSpec {
            f1: 2.0,
            w_e: 1.0,
            ..slow_recovery(100.0)
        },
    );

    Settings {
        meta: SettingsMeta {
            name: Some(Preset::TestStp.name().to_string()),
            description: Some(
                "Identical cells, non-recovering STP and distinct feedforward weights; \
                 the first EPSC amplitude equals w_e"
                    .to_string(),
            ),
            references: Vec::new(),
        },
        neurons,
        afferents,
        synapses,
        monitors: monitors(&[
            ("HVA_PY", CONDUCTANCE_MONITOR),
            ("FS", CONDUCTANCE_MONITOR),
            ("SOM", CONDUCTANCE_MONITOR),
            (AFFERENTS, MonitorSpec::SPIKES),
        ]),
    }
}

/// Feedforward HVA network: medial/lateral PY cells plus PV and SOM interneurons
pub fn ff_hva_only_settings(scale: ModelScale) -> Settings {
    let interneurons = scale.interneuron_count();

    let mut neurons = BTreeMap::new();
    for name in ["MED_PY", "LAT_PY"] {
        neurons.insert(
            name.to_string(),
            neuron(1, 0.020, 0.002, 0.010, -0.040, -0.044, -0.075, 0.0015),
        );
    }
    for name in ["HVA_PV", "HVA_SOM"] {
        neurons.insert(
            name.to_string(),
            neuron(interneurons, 0.010, 0.002, 0.010, -0.040, -0.042, -0.070, 0.005),
        );
    }

    let afferents = AfferentSpec {
        count: 2000,
        use_poisson: true,
        modulation_rate: Some(vec![0.0, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0]),
        peak_rate: Some(20.0),
        spikes_per_second: None,
        eqs: EquationRef::sinusoid_rate(),
        sim_time: 3.0,
    };

    let slice_stp = |p_connect: f64, w_e: f64, w_i: f64| SynapseSpec {
        tau_d1: 0.250,
        tau_d2: 1.0,
        tau_f1: 1.0,
        tau_f2: 1.0,
        delay: 0.002,
        ..synapse(p_connect, w_e, w_i)
    };

    let mut synapses = BTreeMap::new();
    for target in ["MED_PY", "LAT_PY"] {
        synapses.insert(
            PathwayKey::from_afferents(target),
            SynapseSpec {
                d1: 0.8,
                tau_d1: 0.100,
                ..slice_stp(0.50, 0.050, 0.0)
            },
        );
    }
    synapses.insert(
        PathwayKey::from_afferents("HVA_PV"),
        SynapseSpec {
            d1: 0.7,
            ..slice_stp(1.0, 0.025, 0.0)
        },
    );
    synapses.insert(
        PathwayKey::from_afferents("HVA_SOM"),
        SynapseSpec {
            f1: 0.5,
            ..slice_stp(1.0, 0.005, 0.0)
        },
    );
    let inhibitory_p = scale.interneuron_p_connect();
    synapses.insert(
        PathwayKey::new("HVA_PV", "LAT_PY"),
        slice_stp(inhibitory_p, 0.0, 0.100),
    );
    synapses.insert(
        PathwayKey::new("HVA_SOM", "MED_PY"),
        slice_stp(inhibitory_p, 0.0, 0.100),
    );

    Settings {
        meta: SettingsMeta {
            name: Some(Preset::FfHvaOnly.name().to_string()),
            description: Some(
                "Feedforward excitation onto medial/lateral HVA with PV and SOM \
                 interneurons; STP parameters from slice recordings"
                    .to_string(),
            ),
            references: Vec::new(),
        },
        neurons,
        afferents,
        synapses,
        monitors: monitors(&[
            ("MED_PY", "V Ge_total Gi_total spikes"),
            ("LAT_PY", "V Ge_total Gi_total spikes"),
            ("HVA_PV", "V Ge_total spikes"),
            ("HVA_SOM", "V Ge_total spikes"),
            (AFFERENTS, MonitorSpec::SPIKES),
        ]),
    }
}
