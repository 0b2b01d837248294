// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # hvasim-observability
//!
//! Logging setup shared by the hvasim tools, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log file per run in addition to console output

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use init::*;

/// Known hvasim crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &["hvasim", "hvasim-config", "hvasim-observability"];
