// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug flags
//!
//! Supports flags like `--debug-hvasim-config` and `--debug-all`, plus the
//! `HVASIM_DEBUG` environment variable, to raise individual crates to debug
//! level.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (comma-separated, or `all`)
pub const DEBUG_ENV: &str = "HVASIM_DEBUG";

/// Crates with debug logging enabled
///
/// # Example
/// ```rust
/// use hvasim_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-hvasim-config".to_string()]);
/// assert!(flags.is_enabled("hvasim-config"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Build flags from parsed `--debug CRATE` / `--debug-all` options, then
    /// merge `HVASIM_DEBUG`
    pub fn from_cli(crates: &[String], all: bool) -> Self {
        let mut flags = CrateDebugFlags::default();
        for crate_name in crates {
            flags.enable(crate_name);
        }
        if all {
            flags.enable_all();
        }
        flags.merge_env();
        flags
    }

    /// Enable debug logging for a crate
    pub fn enable(&mut self, crate_name: &str) {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            self.enabled_crates.insert(crate_name.replace('_', "-"));
        }
    }

    /// Enable debug logging for every known crate
    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Add crates listed in `HVASIM_DEBUG`
    pub fn merge_env(&mut self) {
        if let Ok(env_var) = env::var(DEBUG_ENV) {
            self.merge_list(&env_var);
        }
    }

    fn merge_list(&mut self, list: &str) {
        if list.trim() == "all" {
            self.enable_all();
        } else {
            for crate_name in list.split(',') {
                self.enable(crate_name);
            }
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(&crate_name.replace('_', "-"))
    }

    pub fn enabled_crates(&self) -> impl Iterator<Item = &str> {
        self.enabled_crates.iter().map(String::as_str)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags
    ///
    /// Targets use module paths, so crate names are written with underscores:
    /// `"hvasim_config=debug,info"`, or `"info"` if none enabled.
    pub fn to_filter_string(&self) -> String {
        if self.enabled_crates.is_empty() {
            return "info".to_string();
        }

        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .collect();
        filters.push("info".to_string());
        filters.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-hvasim-config".to_string()]);
        assert!(flags.is_enabled("hvasim-config"));
        assert!(flags.is_enabled("hvasim_config"));
        assert!(!flags.is_enabled("hvasim"));
    }

    #[test]
    fn test_unrelated_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "validate".to_string(),
            "--preset".to_string(),
            "default".to_string(),
        ]);
        assert!(!flags.any_enabled());
        assert_eq!(flags.to_filter_string(), "info");
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_filter_string_uses_module_paths() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-hvasim-config".to_string(),
            "--debug-hvasim".to_string(),
        ]);
        assert_eq!(flags.to_filter_string(), "hvasim=debug,hvasim_config=debug,info");
    }

    #[test]
    fn test_merge_list() {
        let mut flags = CrateDebugFlags::default();
        flags.merge_list("hvasim-config, hvasim ,");
        assert_eq!(
            flags.enabled_crates().collect::<Vec<_>>(),
            vec!["hvasim", "hvasim-config"]
        );

        let mut flags = CrateDebugFlags::default();
        flags.merge_list("all");
        assert_eq!(flags.enabled_crates().count(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_from_cli() {
        let flags = CrateDebugFlags::from_cli(&["hvasim_config".to_string()], false);
        assert!(flags.is_enabled("hvasim-config"));

        let flags = CrateDebugFlags::from_cli(&[], true);
        assert_eq!(flags.enabled_crates().count(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-hvasim-config".to_string()]);
        assert_eq!(flags.log_level("hvasim-config"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("hvasim"), tracing::Level::INFO);
    }
}
