//! Advisory case locks.
//!
//! A lock is a `case.lock` file in the case folder, created with
//! create-if-absent so two sessions cannot both acquire it. The
//! [`LockSession`] remembers which locks this plugin session created, so
//! they can be released when the host shuts down. Locks left behind by a
//! crashed session stay on disk until removed by hand.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::paths::CatalogPaths;
use crate::verify::verify_case_name;

/// Timestamp format written to lock files.
pub const LOCK_TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Locks acquired by this plugin session.
#[derive(Debug, Default)]
pub struct LockSession {
    /// Lock file -> case name
    held: Mutex<BTreeMap<PathBuf, String>>,
}

impl LockSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the cases currently held, in lock-path order.
    pub fn held_cases(&self) -> Vec<String> {
        let held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        held.values().cloned().collect()
    }

    /// Whether no lock is held.
    pub fn is_empty(&self) -> bool {
        let held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        held.is_empty()
    }

    /// Deletes every lock file this session created and forgets them.
    ///
    /// Returns the number of files removed. Failures are logged and the
    /// sweep continues.
    pub fn sweep(&self) -> usize {
        let held = {
            let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *held)
        };

        let mut removed = 0;
        for (path, case) in held {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(case = %case, "Lock file already gone");
                }
                Err(e) => {
                    warn!(case = %case, path = %path.display(), error = %e, "Failed to release lock");
                }
            }
        }
        info!(removed = removed, "Released session locks");
        removed
    }

    fn insert(&self, path: PathBuf, case: &str) {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        held.insert(path, case.to_string());
    }

    fn remove(&self, path: &Path) -> bool {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(path).is_some()
    }
}

/// Result of a lock attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// The lock file was created by this call.
    Acquired,
    /// Someone else holds the lock.
    Held {
        /// Contents of the existing lock file.
        info: String,
    },
}

/// Locks and unlocks cases in one catalog.
#[derive(Debug, Clone)]
pub struct CaseLockManager {
    paths: CatalogPaths,
    session: Arc<LockSession>,
}

impl CaseLockManager {
    /// A manager for the catalog at `paths`, recording into `session`.
    pub fn new(paths: CatalogPaths, session: Arc<LockSession>) -> Self {
        Self { paths, session }
    }

    /// Tries to lock `case` on behalf of `holder`.
    pub fn lock(&self, case: &str, holder: &str) -> Result<LockOutcome, CatalogError> {
        let case = verify_case_name(case)?;
        if !self.paths.case_dir(case).is_dir() {
            return Err(CatalogError::CaseNotFound {
                case: case.to_string(),
            });
        }

        let path = self.paths.lock_file(case);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let info = fs::read_to_string(&path).unwrap_or_default();
                let info = if info.trim().is_empty() {
                    format!("The case {case} is locked by another session.")
                } else {
                    info
                };
                debug!(case = %case, "Case already locked");
                return Ok(LockOutcome::Held { info });
            }
            Err(e) => {
                return Err(CatalogError::io(
                    format!("Failed to create {}", path.display()),
                    e,
                ));
            }
        };

        let contents = format!(
            "User: {holder}\nLocked On: {}\nId:{}\n",
            Local::now().format(LOCK_TIMESTAMP_FORMAT),
            Uuid::new_v4()
        );
        if let Err(e) = file.write_all(contents.as_bytes()) {
            drop(file);
            let _ = fs::remove_file(&path);
            return Err(CatalogError::io(
                format!("Failed to write {}", path.display()),
                e,
            ));
        }

        self.session.insert(path, case);
        info!(case = %case, holder = %holder, "Case locked");
        Ok(LockOutcome::Acquired)
    }

    /// Releases `case`. Unlocking a case that is not locked is harmless.
    pub fn unlock(&self, case: &str) -> Result<(), CatalogError> {
        let case = verify_case_name(case)?;
        let path = self.paths.lock_file(case);
        let was_held = self.session.remove(&path);

        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(CatalogError::io(
                    format!("Failed to remove {}", path.display()),
                    e,
                ));
            }
        }
        info!(case = %case, was_held = was_held, "Case unlocked");
        Ok(())
    }
}
