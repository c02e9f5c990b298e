//! Per-session state shared by every action handler.

use std::path::PathBuf;
use std::sync::Arc;

use pathsuite_catalog::{CaseLockManager, CatalogPaths, LockSession};
use pathsuite_core::{AppResult, PluginConfig};
use pathsuite_plugin::{Args, HostTransport, Returns};
use tracing::debug;

/// Host access, configuration and the session's case locks.
#[derive(Debug)]
pub struct PluginContext {
    host: Arc<dyn HostTransport>,
    config: PluginConfig,
    locks: Arc<LockSession>,
}

impl PluginContext {
    /// Creates a context with an empty lock session.
    pub fn new(host: Arc<dyn HostTransport>, config: PluginConfig) -> Self {
        Self {
            host,
            config,
            locks: Arc::new(LockSession::new()),
        }
    }

    /// The host transport.
    pub fn host(&self) -> &dyn HostTransport {
        self.host.as_ref()
    }

    /// Argument slots.
    pub fn args(&self) -> Args<'_> {
        Args::new(self.host.as_ref())
    }

    /// Return slots.
    pub fn returns(&self) -> Returns<'_> {
        Returns::new(self.host.as_ref())
    }

    /// Loaded configuration.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Locks acquired during this session.
    pub fn locks(&self) -> &Arc<LockSession> {
        &self.locks
    }

    /// The active catalog, read from the host on every call.
    pub fn catalog_paths(&self) -> AppResult<CatalogPaths> {
        let root = self
            .host
            .get_text(&self.config.host.catalog_root_variable)?;
        Ok(CatalogPaths::from_host_text(&root))
    }

    /// Lock manager for the active catalog.
    pub fn lock_manager(&self) -> AppResult<CaseLockManager> {
        Ok(CaseLockManager::new(
            self.catalog_paths()?,
            self.locks.clone(),
        ))
    }

    /// Identity recorded in lock files.
    pub fn lock_identity(&self) -> AppResult<String> {
        Ok(self
            .host
            .get_text(&self.config.host.lock_identity_variable)?)
    }

    /// The application preferences folder. An empty host value means none.
    pub fn prefs_dir(&self) -> AppResult<Option<PathBuf>> {
        let dir = self
            .host
            .get_text(&self.config.host.prefs_path_variable)?;
        let dir = dir.trim();
        if dir.is_empty() {
            debug!("No preferences folder set");
            return Ok(None);
        }
        Ok(Some(PathBuf::from(dir)))
    }
}
