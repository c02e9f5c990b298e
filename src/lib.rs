//! # pathsuite-default-plugin
//!
//! The default PathSuite host plugin: file-system helpers and image
//! catalog management exposed to the host's macro engine as numbered
//! actions.
//!
//! The host loads the library, calls [`exports::SpotPluginInit`] and from
//! then on drives the plugin through the returned callback.

pub mod actions;
pub mod context;
pub mod exports;
pub mod handlers;
pub mod logging;
pub mod plugin;

pub use actions::{PluginAction, register_all};
pub use context::PluginContext;
pub use plugin::{Plugin, current, handle_callback, install, uninstall};
