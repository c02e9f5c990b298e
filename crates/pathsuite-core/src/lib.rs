//! # pathsuite-core
//!
//! Core crate for the PathSuite default plugin. Contains the unified
//! error system and the plugin configuration schema.
//!
//! This crate has **no** internal dependencies on other PathSuite crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::PluginConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
