//! # pathsuite-catalog
//!
//! The on-disk image catalog:
//!
//! - Filename codec and name verification (`codec`, `verify`)
//! - Catalog layout, lifecycle and legacy migration (`paths`, `catalog`)
//! - Advisory case locks with session cleanup (`lock`)
//! - Case rename and specimen/image listings (`cases`)
//! - The accession prefix list (`accession`)

pub mod accession;
pub mod alpha;
pub mod cases;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod lock;
pub mod paths;
pub mod verify;

pub use accession::{AccessionPrefixEntry, AccessionPrefixes};
pub use catalog::{Catalog, CatalogHead, CatalogState, OpenOutcome};
pub use error::CatalogError;
pub use lock::{CaseLockManager, LockOutcome, LockSession};
pub use paths::CatalogPaths;
