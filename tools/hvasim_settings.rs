// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Settings Tool

Validates, summarizes and exports HVA simulation settings.

Usage:
  cargo run --bin hvasim_settings -- validate settings/default.toml
  cargo run --bin hvasim_settings -- validate --preset test_stp --set afferents.sim_time=4
  cargo run --bin hvasim_settings -- show --preset ff_hva_only --scale full
  cargo run --bin hvasim_settings -- export --preset ff_hva_only --scale full --out ff_full.toml

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use hvasim::config::{
    apply_cli_overrides, apply_environment_overrides, load_settings, save_settings,
    validate_settings, ModelScale, Preset, Settings,
};
use hvasim::observability::{init_logging, CrateDebugFlags};
use hvasim::SettingsSummary;

/// HVA simulation settings tool
#[derive(Parser, Debug)]
#[command(name = "hvasim_settings", version, author, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging for a crate (repeatable, e.g. --debug hvasim-config)
    #[arg(long = "debug", value_name = "CRATE", global = true)]
    debug: Vec<String>,

    /// Enable debug logging for all crates
    #[arg(long, global = true, default_value_t = false)]
    debug_all: bool,

    /// Directory for a per-run JSON log file
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a settings file or preset and report errors and warnings
    Validate(Source),
    /// Print populations, afferent drive, pathways and monitors
    Show(Source),
    /// Write a settings file or preset (after overrides) as TOML or JSON
    Export {
        #[command(flatten)]
        source: Source,

        /// Output file; the extension selects the format (.toml or .json)
        #[arg(short, long)]
        out: PathBuf,

        /// Export even if validation fails
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct Source {
    /// Settings file (.toml or .json)
    #[arg(conflicts_with = "preset")]
    path: Option<PathBuf>,

    /// Built-in preset: default, test_stp, ff_hva_only
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Network size for presets with a reduced variant
    #[arg(long, default_value = "reduced", conflicts_with = "path")]
    scale: ModelScale,

    /// Override a parameter by dotted path, e.g. neurons.HVA_PV.N=100
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, String)>,
}

fn parse_override(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(path, value)| (path.trim().to_string(), value.trim().to_string()))
        .filter(|(path, _)| !path.is_empty())
        .ok_or_else(|| format!("'{}' must have the form PATH=VALUE", raw))
}

impl Source {
    /// Load the settings this source names, with environment and CLI overrides applied
    fn load(&self) -> Result<Settings> {
        let overrides: HashMap<String, String> = self.overrides.iter().cloned().collect();

        match (&self.path, self.preset) {
            (Some(path), _) => load_settings(Some(path), Some(&overrides))
                .with_context(|| format!("Failed to load settings from {}", path.display())),
            (None, Some(preset)) => {
                info!(preset = %preset, "Using built-in preset");
                let mut settings = preset.settings_at(self.scale);
                apply_environment_overrides(&mut settings);
                apply_cli_overrides(&mut settings, &overrides)?;
                Ok(settings)
            }
            (None, None) => load_settings(None, Some(&overrides))
                .context("No settings file or preset given and none found"),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let debug_flags = CrateDebugFlags::from_cli(&cli.debug, cli.debug_all);

    let _logging_guard = match init_logging(&debug_flags, cli.log_dir.clone()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("❌ Failed to initialize logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Validate(source) => {
            let settings = source.load()?;
            let report = validate_settings(&settings)?;

            println!("✅ Settings are valid");
            if !report.is_clean() {
                println!("⚠️  Warnings:");
                for warning in &report.warnings {
                    println!("   {}", warning);
                }
            }
        }
        Command::Show(source) => {
            let settings = source.load()?;
            print!("{}", SettingsSummary::new(&settings));
        }
        Command::Export { source, out, force } => {
            let settings = source.load()?;
            if let Err(e) = validate_settings(&settings) {
                if !force {
                    bail!("{}\n\nUse --force to export anyway.", e);
                }
                eprintln!("⚠️  Exporting invalid settings: {}", e);
            }

            save_settings(&settings, &out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("💾 Wrote {}", out.display());
        }
    }
    Ok(())
}
