//! Catalog lifecycle: detection, creation, opening and migration.
//!
//! A catalog is a directory of case folders. Current catalogs carry a
//! `.config` directory whose `HEAD` record names the layout version.
//! Legacy catalogs have no `.config`; they are recognized by the
//! `case.var` marker in case folders and are migrated on first open.
//!
//! Creating `.config` is the claim on a catalog: only the session that
//! creates it runs setup, and `HEAD` is written last. Another session
//! that finds `.config` without `HEAD` treats the catalog as
//! incompatible until setup completes. A create that fails after the
//! claim removes `.config` again, along with the root if it made it.

pub mod head;
pub mod migration;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::CatalogError;
use crate::paths::{CONFIG_DIR, CatalogPaths, backup_path, system_prefix_file};

pub use head::{CatalogHead, HeadDetails};

/// Layout version written by this release.
pub const CURRENT_VERSION: u32 = 1;

/// What is found at a catalog path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    /// Nothing exists at the path.
    Absent,
    /// The path exists but holds neither a head record nor legacy cases.
    Unrecognized,
    /// A pre-versioning catalog.
    LegacyUnversioned,
    /// A catalog with a readable head record at a supported version.
    Versioned {
        /// Layout version.
        version: u32,
    },
    /// A `.config` directory whose head is missing, unreadable or from
    /// an unsupported version.
    Incompatible {
        /// What is wrong.
        reason: String,
    },
}

/// Result of a successful open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Already at the current layout.
    Current,
    /// Migrated from the legacy layout.
    Migrated {
        /// Number of image files renamed.
        renamed: usize,
    },
}

/// A catalog rooted at a directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    paths: CatalogPaths,
}

impl Catalog {
    /// The catalog at `root`.
    pub fn at(root: impl AsRef<Path>) -> Self {
        Self {
            paths: CatalogPaths::new(root),
        }
    }

    /// The catalog described by `paths`.
    pub fn new(paths: CatalogPaths) -> Self {
        Self { paths }
    }

    /// Path layout of this catalog.
    pub fn paths(&self) -> &CatalogPaths {
        &self.paths
    }

    /// Classifies the catalog directory. Never modifies anything.
    pub fn state(&self) -> CatalogState {
        let root = self.paths.root();
        match fs::metadata(root) {
            Err(e) if e.kind() == ErrorKind::NotFound => return CatalogState::Absent,
            Err(e) => {
                return CatalogState::Incompatible {
                    reason: format!("cannot read catalog folder: {e}"),
                };
            }
            Ok(meta) if !meta.is_dir() => return CatalogState::Unrecognized,
            Ok(_) => {}
        }

        if self.paths.config_dir().exists() {
            return match CatalogHead::read(&self.paths.head_file()) {
                Ok(Some(head)) if head.details.version == CURRENT_VERSION => {
                    CatalogState::Versioned {
                        version: head.details.version,
                    }
                }
                Ok(Some(head)) => CatalogState::Incompatible {
                    reason: format!("unsupported layout version {}", head.details.version),
                },
                Ok(None) => CatalogState::Incompatible {
                    reason: "catalog record is missing".to_string(),
                },
                Err(e) => CatalogState::Incompatible {
                    reason: e.to_string(),
                },
            };
        }

        if self.has_legacy_cases() {
            CatalogState::LegacyUnversioned
        } else {
            CatalogState::Unrecognized
        }
    }

    /// Whether the catalog can be opened.
    pub fn is_valid(&self) -> bool {
        matches!(
            self.state(),
            CatalogState::LegacyUnversioned
                | CatalogState::Versioned {
                    version: CURRENT_VERSION
                }
        )
    }

    /// Creates a new catalog at the current layout.
    ///
    /// The root must not exist or be an empty directory. When `prefs_dir`
    /// holds a system accession prefix list, it is copied into the catalog
    /// and the source file is renamed with a `.bak` suffix.
    pub fn create(&self, prefs_dir: Option<&Path>) -> Result<CatalogHead, CatalogError> {
        let root = self.paths.root();
        let created_root = match fs::metadata(root) {
            Ok(meta) if !meta.is_dir() => {
                return Err(CatalogError::NotADirectory {
                    path: root.to_path_buf(),
                });
            }
            Ok(_) => {
                let mut entries = fs::read_dir(root).map_err(|e| {
                    CatalogError::io(format!("Failed to read {}", root.display()), e)
                })?;
                if entries.next().is_some() {
                    return Err(CatalogError::NotEmpty {
                        path: root.to_path_buf(),
                    });
                }
                false
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(root).map_err(|e| {
                    CatalogError::io(format!("Failed to create {}", root.display()), e)
                })?;
                true
            }
            Err(e) => {
                return Err(CatalogError::io(
                    format!("Failed to read {}", root.display()),
                    e,
                ));
            }
        };

        if !self.claim()? {
            return Err(self.busy());
        }
        match self.finish_setup(prefs_dir) {
            Ok(head) => {
                info!(catalog = %root.display(), uid = %head.details.uid, "Catalog created");
                Ok(head)
            }
            Err(e) => {
                self.discard_setup(created_root);
                Err(e)
            }
        }
    }

    /// Opens the catalog, migrating a legacy layout in place.
    pub fn open(&self, prefs_dir: Option<&Path>) -> Result<OpenOutcome, CatalogError> {
        let root = self.paths.root();
        match self.state() {
            CatalogState::Absent => Err(CatalogError::CatalogMissing {
                path: root.to_path_buf(),
            }),
            CatalogState::Versioned { .. } => Ok(OpenOutcome::Current),
            CatalogState::LegacyUnversioned => self.migrate(prefs_dir),
            CatalogState::Incompatible { reason } => {
                warn!(catalog = %root.display(), reason = %reason, "Incompatible catalog");
                Err(CatalogError::Incompatible {
                    path: root.to_path_buf(),
                    reason,
                })
            }
            CatalogState::Unrecognized => Err(CatalogError::Incompatible {
                path: root.to_path_buf(),
                reason: "no catalog record or legacy cases found".to_string(),
            }),
        }
    }

    fn migrate(&self, prefs_dir: Option<&Path>) -> Result<OpenOutcome, CatalogError> {
        let root = self.paths.root();
        if !self.claim()? {
            return Err(self.busy());
        }

        info!(catalog = %root.display(), "Migrating legacy catalog");
        let renamed = migration::strip_legacy_prefixes(&self.paths)?;
        let head = self.finish_setup(prefs_dir)?;
        info!(
            catalog = %root.display(),
            uid = %head.details.uid,
            renamed = renamed,
            "Catalog migrated"
        );
        Ok(OpenOutcome::Migrated { renamed })
    }

    /// Creates `.config`. Returns `false` if it already exists.
    fn claim(&self) -> Result<bool, CatalogError> {
        let dir = self.paths.config_dir();
        match fs::create_dir(&dir) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(CatalogError::io(
                format!("Failed to create {}", dir.display()),
                e,
            )),
        }
    }

    fn busy(&self) -> CatalogError {
        CatalogError::Incompatible {
            path: self.paths.root().to_path_buf(),
            reason: format!("{CONFIG_DIR} was created by another session"),
        }
    }

    fn finish_setup(&self, prefs_dir: Option<&Path>) -> Result<CatalogHead, CatalogError> {
        let imported = match prefs_dir {
            Some(prefs_dir) => self.import_system_prefixes(prefs_dir)?,
            None => None,
        };
        let head = CatalogHead::new_current();
        if let Err(e) = head.write(&self.paths.head_file()) {
            if let Some(source) = imported {
                restore_backup(&source);
            }
            return Err(e);
        }
        Ok(head)
    }

    /// Undoes a failed [`Catalog::create`] so the folder can be retried.
    fn discard_setup(&self, created_root: bool) {
        let config_dir = self.paths.config_dir();
        if let Err(e) = fs::remove_dir_all(&config_dir) {
            warn!(dir = %config_dir.display(), error = %e, "Failed to remove partial catalog setup");
            return;
        }
        if created_root {
            let root = self.paths.root();
            if let Err(e) = fs::remove_dir(root) {
                warn!(dir = %root.display(), error = %e, "Failed to remove catalog folder");
            }
        }
    }

    /// Copies the system prefix list into the catalog and renames the
    /// source. Returns the source path when a list was imported.
    fn import_system_prefixes(&self, prefs_dir: &Path) -> Result<Option<PathBuf>, CatalogError> {
        let source = system_prefix_file(prefs_dir);
        if !source.is_file() {
            return Ok(None);
        }

        let target = self.paths.accession_prefix_file();
        fs::copy(&source, &target).map_err(|e| {
            CatalogError::io(format!("Failed to copy {}", source.display()), e)
        })?;
        let backup = backup_path(&source);
        fs::rename(&source, &backup).map_err(|e| {
            CatalogError::io(format!("Failed to rename {}", source.display()), e)
        })?;
        info!(
            source = %source.display(),
            backup = %backup.display(),
            "Imported system accession prefixes"
        );
        Ok(Some(source))
    }

    fn has_legacy_cases(&self) -> bool {
        let Ok(entries) = fs::read_dir(self.paths.root()) else {
            return false;
        };
        entries.flatten().any(|entry| {
            entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|case| self.paths.legacy_case_marker(case).is_file())
        })
    }
}

fn restore_backup(source: &Path) {
    let backup = backup_path(source);
    if let Err(e) = fs::rename(&backup, source) {
        warn!(
            backup = %backup.display(),
            error = %e,
            "Failed to restore system accession prefixes"
        );
    }
}
