// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output is always installed. With the `file-logging` feature and a
//! log directory, every run also writes a JSON log file:
//! ```text
//! ./logs/
//!   └── hvasim_20250101_120000.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Keeps file writers alive; logs are flushed when it is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_file: Option<PathBuf>,
}

impl LoggingGuard {
    /// Path of this run's log file, if file logging is active
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// File name for a run started now
pub fn run_log_file_name() -> String {
    format!("hvasim_{}.log", Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Initialize logging
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `log_dir` - Directory for the run's JSON log file (ignored without `file-logging`)
///
/// # Errors
///
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, log_dir: Option<PathBuf>) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(debug_flags.any_enabled())
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(&filter));

    let mut layers = vec![console_layer.boxed()];
    let mut guard = LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guard: None,
        log_file: None,
    };

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        let file_name = run_log_file_name();

        #[cfg(feature = "file-logging")]
        {
            let file_appender = tracing_appender::rolling::never(&dir, &file_name);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::new(&filter))
                .boxed();
            layers.push(file_layer);

            guard._file_guard = Some(file_guard);
            guard.log_file = Some(dir.join(&file_name));
        }

        #[cfg(not(feature = "file-logging"))]
        {
            eprintln!(
                "Warning: file logging is not compiled in; not writing {}",
                dir.join(&file_name).display()
            );
        }
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install the global tracing subscriber")?;

    Ok(guard)
}
