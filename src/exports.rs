//! The C entry points the host looks up when loading the library.

use std::sync::Arc;

use pathsuite_core::PluginConfig;
use pathsuite_plugin::ffi::abi::{HostActionFn, PluginCallbackFn, PluginInitFn};
use pathsuite_plugin::{CallbackReason, FfiHostTransport};
use tracing::{info, warn};

use crate::logging::init_logging;
use crate::plugin::{Plugin, handle_callback, install};

/// Plugin init export.
///
/// Loads configuration, starts logging, builds the plugin session and
/// hands the host the callback it should call for every event. Returns
/// `false` (refusing the load) when the host passes null pointers.
///
/// # Safety
/// `plugin_callback` and `user_data` must be null or valid for writes,
/// as guaranteed by the host's loader.
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub unsafe extern "C" fn SpotPluginInit(
    host_action: Option<HostActionFn>,
    handle: usize,
    _info: usize,
    plugin_callback: *mut Option<PluginCallbackFn>,
    user_data: *mut usize,
) -> bool {
    let Some(host_action) = host_action else {
        return false;
    };
    if plugin_callback.is_null() || user_data.is_null() {
        return false;
    }

    let (config, config_error) = match PluginConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (PluginConfig::default(), Some(e)),
    };
    init_logging(&config.logging);
    if let Some(e) = config_error {
        warn!(error = %e, "Using default configuration");
    }

    let transport = FfiHostTransport::new(host_action, handle, config.host.text_buffer_len);
    install(Plugin::new(Arc::new(transport), config));

    unsafe {
        *plugin_callback = Some(plugin_callback_entry);
        *user_data = 0;
    }
    info!(
        handle = handle,
        version = env!("CARGO_PKG_VERSION"),
        "Plugin loaded"
    );
    true
}

const _: PluginInitFn = SpotPluginInit;

unsafe extern "C" fn plugin_callback_entry(reason: u32, info: usize, _user_data: usize) {
    handle_callback(CallbackReason::from_raw(reason), info);
}
