//! One-way migration of legacy image names.
//!
//! Legacy catalogs stored images as `<case>.<specimen>.<seq>.jpg` even
//! though the file already sits in `<case>/<specimen>/`. Migration drops
//! the redundant prefix and normalizes the sequence number: alphabetic
//! sequences become decimal and zero padding is removed.
//!
//! Renames do not check for an existing file with the new name; on
//! platforms where rename replaces, the last rename wins.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};

use crate::alpha::{AlphaError, alpha_to_int};
use crate::error::CatalogError;
use crate::paths::{CONFIG_DIR, CatalogPaths};

/// Renames every legacy image two levels under the root.
///
/// Returns the number of files renamed.
pub fn strip_legacy_prefixes(paths: &CatalogPaths) -> Result<usize, CatalogError> {
    let mut renamed = 0;

    for (case, case_dir) in subdirectories(paths.root())? {
        if case == CONFIG_DIR {
            continue;
        }
        for (specimen, specimen_dir) in subdirectories(&case_dir)? {
            let pattern = match legacy_pattern(&case, &specimen) {
                Ok(pattern) => pattern,
                Err(e) => {
                    warn!(case = %case, specimen = %specimen, error = %e, "Skipping specimen");
                    continue;
                }
            };
            renamed += rename_specimen_images(&specimen_dir, &pattern)?;
        }
    }

    Ok(renamed)
}

/// The migrated name of `file_name` stored under `case/specimen`, or
/// `None` when the file is not a legacy image name.
pub fn migrated_name(case: &str, specimen: &str, file_name: &str) -> Option<String> {
    let pattern = legacy_pattern(case, specimen).ok()?;
    legacy_rest(&pattern, file_name).and_then(|rest| renumber(rest).ok())
}

fn legacy_pattern(case: &str, specimen: &str) -> Result<Regex, regex::Error> {
    let prefix = regex::escape(&format!("{case}.{specimen}."));
    Regex::new(&format!(
        r"(?i)^{prefix}(?P<rest>[\w-]+\.(?:jpg|jpeg|jpg2))$"
    ))
}

fn legacy_rest<'a>(pattern: &Regex, file_name: &'a str) -> Option<&'a str> {
    pattern
        .captures(file_name)
        .and_then(|caps| caps.name("rest"))
        .map(|m| m.as_str())
}

/// Normalizes the leading sequence token of `rest`.
fn renumber(rest: &str) -> Result<String, AlphaError> {
    let end = rest.find(['-', '.']).unwrap_or(rest.len());
    let (token, tail) = rest.split_at(end);

    let token = if !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic()) {
        alpha_to_int(token)?.to_string()
    } else if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        let stripped = token.trim_start_matches('0');
        let digits = if stripped.is_empty() { "0" } else { stripped };
        digits.to_string()
    } else {
        token.to_string()
    };

    Ok(format!("{token}{tail}"))
}

fn rename_specimen_images(dir: &Path, pattern: &Regex) -> Result<usize, CatalogError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CatalogError::io(format!("Failed to read {}", dir.display()), e))?;

    let mut renamed = 0;
    for entry in entries.flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(rest) = legacy_rest(pattern, name) else {
            continue;
        };
        let new_name = match renumber(rest) {
            Ok(new_name) => new_name,
            Err(e) => {
                warn!(file = %entry.path().display(), error = %e, "Leaving image name unchanged");
                continue;
            }
        };
        if new_name == name {
            continue;
        }

        let target = dir.join(&new_name);
        fs::rename(entry.path(), &target).map_err(|e| {
            CatalogError::io(format!("Failed to rename {}", entry.path().display()), e)
        })?;
        debug!(from = %name, to = %new_name, "Renamed legacy image");
        renamed += 1;
    }
    Ok(renamed)
}

fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>, CatalogError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CatalogError::io(format!("Failed to read {}", dir.display()), e))?;

    Ok(entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            Some((name, entry.path()))
        })
        .collect())
}
