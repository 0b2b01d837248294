// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Human-readable overview of a settings set

use std::fmt;

use crate::config::{AfferentDrive, Settings, AFFERENTS};

/// Borrowing view that renders populations, input drive, pathways and monitors
pub struct SettingsSummary<'a> {
    settings: &'a Settings,
}

impl<'a> SettingsSummary<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Number of separate runs implied by the afferent drive
    pub fn condition_count(&self) -> usize {
        self.settings.afferents.condition_count()
    }
}

impl fmt::Display for SettingsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.settings;

        if let Some(name) = &settings.meta.name {
            writeln!(f, "Settings: {}", name)?;
        }
        if let Some(description) = &settings.meta.description {
            writeln!(f, "  {}", description)?;
        }

        writeln!(
            f,
            "Populations ({} neurons):",
            settings.total_neurons()
        )?;
        for (name, spec) in &settings.neurons {
            writeln!(
                f,
                "  {:<10} N={:<4} tau_m={}s thresh={}V reset={}V V_rest={}V refract={}s",
                name, spec.count, spec.tau_m, spec.thresh, spec.reset, spec.v_rest, spec.refract
            )?;
        }

        let afferents = &settings.afferents;
        match afferents.drive() {
            Ok(AfferentDrive::Poisson {
                modulation_rates,
                peak_rate,
            }) => writeln!(
                f,
                "Afferents: N={} Poisson, peak {} Hz, modulation {:?} Hz, {} s per run",
                afferents.count, peak_rate, modulation_rates, afferents.sim_time
            )?,
            Ok(AfferentDrive::PulseTrain { spikes_per_second }) => writeln!(
                f,
                "Afferents: N={} pulse trains at {:?} Hz, {} s per run",
                afferents.count, spikes_per_second, afferents.sim_time
            )?,
            Err(e) => writeln!(f, "Afferents: N={} ({})", afferents.count, e)?,
        }

        writeln!(f, "Pathways:")?;
        for (key, spec) in &settings.synapses {
            writeln!(
                f,
                "  {:<20} {:<10} p={} w_e={} w_i={} d1={} f1={} delay={}s",
                key.to_string(),
                spec.polarity().to_string(),
                spec.p_connect,
                spec.w_e,
                spec.w_i,
                spec.d1,
                spec.f1,
                spec.delay
            )?;
        }

        writeln!(f, "Monitors:")?;
        for (population, monitor) in &settings.monitors {
            let marker = if population == AFFERENTS { " (input)" } else { "" };
            writeln!(f, "  {:<10} {}{}", population, monitor, marker)?;
        }

        Ok(())
    }
}
