//! Accession prefix list.
//!
//! One entry per line, `<prefix><delimiter><description>`. Both sides
//! are trimmed; lines without the delimiter are ignored. Duplicate
//! prefixes are allowed and the first one wins on lookup.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::CatalogError;

/// One line of the prefix list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessionPrefixEntry {
    /// Case-name prefix.
    pub prefix: String,
    /// Human-readable description.
    pub description: String,
}

/// The parsed prefix list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessionPrefixes {
    entries: Vec<AccessionPrefixEntry>,
}

impl AccessionPrefixes {
    /// Parses list text.
    pub fn parse(text: &str, delimiter: char) -> Self {
        let entries = text
            .lines()
            .filter_map(|line| {
                let (prefix, description) = line.split_once(delimiter)?;
                let prefix = prefix.trim();
                if prefix.is_empty() {
                    return None;
                }
                Some(AccessionPrefixEntry {
                    prefix: prefix.to_string(),
                    description: description.trim().to_string(),
                })
            })
            .collect();
        Self { entries }
    }

    /// Reads the list at `path`. A missing file is an empty list.
    pub fn load(path: &Path, delimiter: char) -> Result<Self, CatalogError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text, delimiter)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CatalogError::io(
                format!("Failed to read {}", path.display()),
                e,
            )),
        }
    }

    /// Description of the first entry whose prefix equals `prefix`.
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        let prefix = prefix.trim();
        self.entries
            .iter()
            .find(|entry| entry.prefix == prefix)
            .map(|entry| entry.description.as_str())
    }

    /// All descriptions, in file order.
    pub fn descriptions(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.description.as_str())
            .collect()
    }

    /// All entries, in file order.
    pub fn entries(&self) -> &[AccessionPrefixEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
