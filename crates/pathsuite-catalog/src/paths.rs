//! Canonical locations inside a catalog.

use std::path::{Path, PathBuf};

/// Reserved configuration directory at the catalog root.
pub const CONFIG_DIR: &str = ".config";
/// Catalog head record inside [`CONFIG_DIR`].
pub const HEAD_FILE: &str = "HEAD";
/// Per-case marker file of the legacy layout.
pub const LEGACY_CASE_MARKER: &str = "case.var";
/// Lock marker inside a case directory.
pub const LOCK_FILE: &str = "case.lock";
/// Accession prefix list.
pub const ACCESSION_PREFIX_FILE: &str = "AccessionPrefixes.txt";
/// Suffix appended to the system prefix list once imported.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Path arithmetic for one catalog root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    root: PathBuf,
}

impl CatalogPaths {
    /// Paths for the catalog at `root`.
    ///
    /// `.` components are dropped, so `C:\Catalog\.` and `C:\Catalog`
    /// name the same catalog.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().components().collect(),
        }
    }

    /// Parses a root received as host text.
    pub fn from_host_text(text: &str) -> Self {
        Self::new(Path::new(text.trim()))
    }

    /// The catalog root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/.config`
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// `<root>/.config/HEAD`
    pub fn head_file(&self) -> PathBuf {
        self.config_dir().join(HEAD_FILE)
    }

    /// `<root>/.config/AccessionPrefixes.txt`
    pub fn accession_prefix_file(&self) -> PathBuf {
        self.config_dir().join(ACCESSION_PREFIX_FILE)
    }

    /// `<root>/<case>`
    pub fn case_dir(&self, case: &str) -> PathBuf {
        self.root.join(case)
    }

    /// `<root>/<case>/<specimen>`
    pub fn specimen_dir(&self, case: &str, specimen: &str) -> PathBuf {
        self.case_dir(case).join(specimen)
    }

    /// `<root>/<case>/case.lock`
    pub fn lock_file(&self, case: &str) -> PathBuf {
        self.case_dir(case).join(LOCK_FILE)
    }

    /// `<root>/<case>/case.var`
    pub fn legacy_case_marker(&self, case: &str) -> PathBuf {
        self.case_dir(case).join(LEGACY_CASE_MARKER)
    }
}

/// The system-wide prefix list kept in the application preferences folder.
pub fn system_prefix_file(prefs_dir: &Path) -> PathBuf {
    prefs_dir.join(ACCESSION_PREFIX_FILE)
}

/// `path` with [`BACKUP_SUFFIX`] appended to its full file name.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}
