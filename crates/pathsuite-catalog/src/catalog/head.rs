//! The catalog head record, `.config/HEAD`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::CURRENT_VERSION;
use crate::error::CatalogError;

/// Persisted catalog identity and layout version.
///
/// Fields this version does not know about are kept and written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogHead {
    /// Layout details.
    pub details: HeadDetails,
    /// Unknown top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `details` object of the head record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadDetails {
    /// Layout version; absent means 0.
    #[serde(default)]
    pub version: u32,
    /// Catalog id, generated once and never reassigned.
    #[serde(default)]
    pub uid: String,
    /// Unknown fields inside `details`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogHead {
    /// A head for a new catalog at the current layout version.
    pub fn new_current() -> Self {
        Self {
            details: HeadDetails {
                version: CURRENT_VERSION,
                uid: Uuid::new_v4().to_string(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Reads the record at `path`. A missing file is `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<Self>, CatalogError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CatalogError::io(
                    format!("Failed to read {}", path.display()),
                    e,
                ));
            }
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| CatalogError::Head {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Writes the record to `path` through a temporary file, so readers
    /// never see a partial record.
    pub fn write(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| CatalogError::Head {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)
            .map_err(|e| CatalogError::io(format!("Failed to write {}", tmp.display()), e))?;
        fs::rename(&tmp, path)
            .map_err(|e| CatalogError::io(format!("Failed to write {}", path.display()), e))
    }
}
