//! Tracing bootstrap.
//!
//! The host owns the console, so the subscriber writes to the configured
//! log file in append mode. Initialisation happens at most once per
//! process; later attempts (the host reloading the plugin) are no-ops.

use std::fs::OpenOptions;
use std::sync::Mutex;

use pathsuite_core::config::logging::LoggingConfig;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let writer = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
    {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!(
                "Failed to open plugin log file '{}': {}; logging to stderr",
                config.file, e
            );
            BoxMakeWriter::new(std::io::stderr)
        }
    };

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .try_init(),
    };
    result.is_ok()
}
