//! Logging configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Logging and tracing configuration.
///
/// The host application owns stdout/stderr, so plugin logs go to a file.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[validate(length(min = 1))]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    pub format: String,
    /// Path to the plugin log file.
    #[validate(length(min = 1))]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: default_file(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_file() -> String {
    std::env::temp_dir()
        .join("pathsuite-plugin.log")
        .to_string_lossy()
        .to_string()
}
