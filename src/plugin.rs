//! The loaded plugin and its process-wide instance.
//!
//! The host loads the library once and then talks to it through a bare
//! callback, so the live instance sits in a static. It is installed by
//! the init export and dropped when the host announces unload; callbacks
//! arriving with no instance do nothing.

use std::sync::{Arc, RwLock};

use pathsuite_core::PluginConfig;
use pathsuite_plugin::{ActionDispatcher, CallbackReason, DispatchOutcome, HostTransport};
use tracing::{debug, info};

use crate::actions::register_all;
use crate::context::PluginContext;

static PLUGIN: RwLock<Option<Arc<Plugin>>> = RwLock::new(None);

/// A plugin session: the dispatcher with every action registered.
#[derive(Debug)]
pub struct Plugin {
    context: Arc<PluginContext>,
    dispatcher: ActionDispatcher,
}

impl Plugin {
    /// Builds a session over `host`.
    pub fn new(host: Arc<dyn HostTransport>, config: PluginConfig) -> Self {
        let diagnostic = config.host.diagnostic_variable.clone();
        let context = Arc::new(PluginContext::new(host.clone(), config));
        let dispatcher = ActionDispatcher::new(host, &diagnostic);
        register_all(&dispatcher, &context);
        Self {
            context,
            dispatcher,
        }
    }

    /// Shared handler state.
    pub fn context(&self) -> &Arc<PluginContext> {
        &self.context
    }

    /// The action dispatcher.
    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Handles one host callback.
    pub fn dispatch(&self, reason: CallbackReason, info: usize) -> DispatchOutcome {
        self.dispatcher.dispatch(reason, info)
    }
}

/// Makes `plugin` the process-wide instance, replacing any previous one.
pub fn install(plugin: Plugin) -> Arc<Plugin> {
    let plugin = Arc::new(plugin);
    let mut slot = PLUGIN.write().unwrap_or_else(|e| e.into_inner());
    if slot.replace(plugin.clone()).is_some() {
        info!("Replaced existing plugin instance");
    }
    plugin
}

/// The process-wide instance, if loaded.
pub fn current() -> Option<Arc<Plugin>> {
    PLUGIN.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Drops the process-wide instance. Returns whether one was loaded.
pub fn uninstall() -> bool {
    PLUGIN
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .take()
        .is_some()
}

/// Routes a host callback to the process-wide instance.
///
/// The instance is dropped after it handles `UnloadingPlugin`.
pub fn handle_callback(reason: CallbackReason, info: usize) -> DispatchOutcome {
    let Some(plugin) = current() else {
        debug!(reason = ?reason, "Callback with no loaded plugin");
        return DispatchOutcome::Ignored;
    };

    let outcome = plugin.dispatch(reason, info);
    if reason == CallbackReason::UnloadingPlugin {
        uninstall();
        info!("Plugin unloaded");
    }
    outcome
}
