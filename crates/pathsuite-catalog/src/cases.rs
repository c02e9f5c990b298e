//! Case folder operations: rename and listings.

use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::paths::CatalogPaths;
use crate::verify::verify_case_name;

static IMAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\.(?:jpg|jpeg|jp2|jpg2)$").expect("valid regex")
});

/// Renames the case folder `old` to `new`.
///
/// Both names must be single case folder names; the configuration folder
/// and relative segments are refused.
pub fn rename_case(paths: &CatalogPaths, old: &str, new: &str) -> Result<(), CatalogError> {
    let new = verify_case_name(new)?;
    if old.trim().is_empty() {
        return Err(CatalogError::CaseNotFound {
            case: old.to_string(),
        });
    }
    let old = verify_case_name(old)?;
    let source = paths.case_dir(old);
    let target = paths.case_dir(new);

    if !source.is_dir() {
        return Err(CatalogError::CaseNotFound {
            case: old.to_string(),
        });
    }
    if target.exists() {
        return Err(CatalogError::CaseExists {
            case: new.to_string(),
        });
    }

    fs::rename(&source, &target).map_err(|source| CatalogError::UpdateFailed { source })?;
    info!(from = %old, to = %new, "Case renamed");
    Ok(())
}

/// Specimen folder names of `case`, sorted.
///
/// An unreadable or missing case lists as empty, as does a name that is
/// not a case folder.
pub fn specimen_list(paths: &CatalogPaths, case: &str) -> Vec<String> {
    let Some(case) = listable(case) else {
        return Vec::new();
    };
    let dir = paths.case_dir(case);
    let mut names: Vec<String> = read_names(&dir)
        .into_iter()
        .filter(|(_, is_dir)| *is_dir)
        .map(|(name, _)| name)
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    names
}

/// Numbered image files in `case/specimen`, sorted by number then name.
///
/// An unreadable or missing folder lists as empty.
pub fn specimen_images(paths: &CatalogPaths, case: &str, specimen: &str) -> Vec<String> {
    let (Some(case), Some(specimen)) = (listable(case), listable(specimen)) else {
        return Vec::new();
    };

    let dir = paths.specimen_dir(case, specimen);
    let mut images: Vec<(u64, String)> = read_names(&dir)
        .into_iter()
        .filter(|(_, is_dir)| !*is_dir)
        .filter_map(|(name, _)| {
            let number = IMAGE_NAME
                .captures(&name)?
                .get(1)?
                .as_str()
                .parse()
                .unwrap_or(u64::MAX);
            Some((number, name))
        })
        .collect();
    images.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });
    images.into_iter().map(|(_, name)| name).collect()
}

fn listable(name: &str) -> Option<&str> {
    match verify_case_name(name) {
        Ok(name) => Some(name),
        Err(e) => {
            warn!(name = %name, error = %e, "Refusing to list folder");
            None
        }
    }
}

fn read_names(dir: &Path) -> Vec<(String, bool)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                warn!(dir = %dir.display(), "Folder does not exist");
            } else {
                warn!(dir = %dir.display(), error = %e, "Failed to list folder");
            }
            return Vec::new();
        }
    };

    entries
        .flatten()
        .filter_map(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let name = entry.file_name().to_str()?.to_string();
            Some((name, is_dir))
        })
        .collect()
}
