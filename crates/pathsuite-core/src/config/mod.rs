//! Plugin configuration schemas.
//!
//! The configuration is deserialized via the `config` crate from an
//! optional TOML file overlaid by `PATHSUITE__*` environment variables.
//! Every section falls back to defaults, so a host without any
//! configuration file still loads the plugin.

pub mod catalog;
pub mod host;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::catalog::CatalogConfig;
use self::host::HostConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PATHSUITE_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "pathsuite-plugin.toml";

/// Root plugin configuration.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Logging settings.
    #[validate(nested)]
    pub logging: LoggingConfig,
    /// Host variable names and transport limits.
    #[validate(nested)]
    pub host: HostConfig,
    /// Catalog settings.
    #[validate(nested)]
    pub catalog: CatalogConfig,
}

impl PluginConfig {
    /// Load configuration from the file named by `PATHSUITE_CONFIG`
    /// (or the default file name) and the environment.
    pub fn load() -> Result<Self, AppError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load configuration from an explicit file path and the environment.
    ///
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("PATHSUITE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded
            .validate()
            .map_err(|e| AppError::configuration(format!("Invalid configuration: {e}")))?;

        Ok(loaded)
    }
}
