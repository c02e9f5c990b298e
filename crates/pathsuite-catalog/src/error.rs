//! Errors raised by catalog, case and lock operations.
//!
//! Messages are written for the host UI: handlers pass them straight to
//! the result text slot.

use std::path::PathBuf;

use pathsuite_core::error::AppError;
use thiserror::Error;

use crate::alpha::AlphaError;
use crate::codec::DecodeError;

/// Unified error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    // --- Catalog lifecycle ---
    /// The catalog root does not exist.
    #[error("Unable to connect to the catalog. The catalog path does not exist on this system.")]
    CatalogMissing {
        /// The catalog root.
        path: PathBuf,
    },

    /// The directory is not a catalog this version can use.
    #[error("The image catalog is incompatible with this application version.")]
    Incompatible {
        /// The catalog root.
        path: PathBuf,
        /// What made the catalog unusable.
        reason: String,
    },

    /// Catalog creation target already has content.
    #[error("The destination folder must be an empty folder.")]
    NotEmpty {
        /// The rejected path.
        path: PathBuf,
    },

    /// Catalog creation target exists but is not a directory.
    #[error("The destination {path} is not a folder.")]
    NotADirectory {
        /// The rejected path.
        path: PathBuf,
    },

    /// The catalog record could not be parsed.
    #[error("The catalog record {path} is unreadable: {source}")]
    Head {
        /// Path of the record.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    // --- Cases ---
    /// The named case has no directory in the catalog.
    #[error("The case {case} could not be found in the catalog.")]
    CaseNotFound {
        /// Case name.
        case: String,
    },

    /// Rename target already exists.
    #[error("Cannot rename. The case {case} already exists in the catalog.")]
    CaseExists {
        /// Case name.
        case: String,
    },

    /// The catalog could not be written.
    #[error(
        "Unable to update the image catalog. Check your system to ensure that you have privileges to write to the catalog location."
    )]
    UpdateFailed {
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    // --- Names ---
    /// A file or case name failed verification.
    #[error("{reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An encoded path segment could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// An alphabetic sequence number could not be converted.
    #[error(transparent)]
    Alpha(#[from] AlphaError),

    // --- Generic ---
    /// Filesystem failure with the operation that hit it.
    #[error("{context}: {source}")]
    Io {
        /// What was being done.
        context: String,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Wraps an I/O error with a description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::CatalogMissing { .. } | CatalogError::CaseNotFound { .. } => {
                AppError::not_found(err.to_string())
            }
            CatalogError::Incompatible { .. } | CatalogError::Head { .. } => {
                AppError::incompatible(err.to_string())
            }
            CatalogError::NotEmpty { .. } | CatalogError::CaseExists { .. } => {
                AppError::conflict(err.to_string())
            }
            CatalogError::NotADirectory { .. }
            | CatalogError::InvalidName { .. }
            | CatalogError::Decode(_)
            | CatalogError::Alpha(_) => AppError::validation(err.to_string()),
            CatalogError::UpdateFailed { .. } | CatalogError::Io { .. } => {
                AppError::storage(err.to_string())
            }
        }
    }
}
