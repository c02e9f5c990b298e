//! The single entry point the host calls for every plugin event.
//!
//! The dispatcher owns the action registry and the shutdown listeners.
//! Handler failures stop here: the message goes to the host's diagnostic
//! text variable and the host call returns normally.

use std::fmt;
use std::sync::{Arc, Mutex};

use pathsuite_core::AppResult;
use tracing::{debug, error, info, warn};

use super::registry::{ActionCode, ActionHandler, ActionRegistry, ClosureHandler};
use crate::ffi::abi::{
    CALLBACK_ACTION_CODE, CALLBACK_APPLICATION_CLOSING, CALLBACK_UNLOADING_PLUGIN,
};
use crate::host::transport::HostTransport;
use crate::host::variable::{HostValue, HostVariable};

/// Why the host called the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackReason {
    /// Run the action bound to the accompanying code.
    ActionCode,
    /// The plugin is about to be unloaded.
    UnloadingPlugin,
    /// The host application is shutting down.
    ApplicationClosing,
    /// Any reason this plugin does not handle.
    Other(u32),
}

impl CallbackReason {
    /// Decodes the raw reason passed to the plugin callback.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            CALLBACK_ACTION_CODE => Self::ActionCode,
            CALLBACK_UNLOADING_PLUGIN => Self::UnloadingPlugin,
            CALLBACK_APPLICATION_CLOSING => Self::ApplicationClosing,
            other => Self::Other(other),
        }
    }
}

/// What a dispatch call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran and returned `Ok`.
    Completed,
    /// The handler returned an error; the message was reported to the host.
    Failed(String),
    /// No handler is bound to the code.
    Unbound,
    /// The registry and shutdown listeners were cleared.
    Cleared,
    /// Shutdown listeners ran.
    ShutdownHandled,
    /// The reason is not one the dispatcher handles.
    Ignored,
}

/// Routes host callbacks to registered handlers.
pub struct ActionDispatcher {
    /// Host used to report handler failures.
    host: Arc<dyn HostTransport>,
    /// Text variable receiving failure messages.
    diagnostic: HostVariable,
    /// Bound action handlers.
    registry: ActionRegistry,
    /// Listeners run when the host application closes.
    shutdown_listeners: Mutex<Vec<Arc<dyn ActionHandler>>>,
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self
            .shutdown_listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len();
        f.debug_struct("ActionDispatcher")
            .field("diagnostic", &self.diagnostic.name())
            .field("registry", &self.registry)
            .field("shutdown_listeners", &listeners)
            .finish()
    }
}

impl ActionDispatcher {
    /// Creates a dispatcher reporting failures to `diagnostic_variable`.
    pub fn new(host: Arc<dyn HostTransport>, diagnostic_variable: &str) -> Self {
        Self {
            host,
            diagnostic: HostVariable::text(diagnostic_variable),
            registry: ActionRegistry::new(),
            shutdown_listeners: Mutex::new(Vec::new()),
        }
    }

    /// The handler registry.
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// The host this dispatcher reports to.
    pub fn host(&self) -> &Arc<dyn HostTransport> {
        &self.host
    }

    /// Binds `handler` to `code`, replacing any existing binding.
    pub fn register(&self, code: impl Into<ActionCode>, handler: Arc<dyn ActionHandler>) {
        self.registry.register(code.into(), handler);
    }

    /// Binds a closure to `code`.
    pub fn register_fn<F>(&self, code: impl Into<ActionCode>, name: &str, handler: F)
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.registry
            .register(code.into(), ClosureHandler::wrap(name, handler));
    }

    /// Removes the binding for `code`, if any.
    pub fn unregister(&self, code: impl Into<ActionCode>) -> bool {
        self.registry.unregister(code.into())
    }

    /// Adds a listener run on application shutdown.
    pub fn on_shutdown<F>(&self, name: &str, listener: F)
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        let mut listeners = self
            .shutdown_listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        listeners.push(ClosureHandler::wrap(name, listener));
    }

    /// Handles one host callback.
    pub fn dispatch(&self, reason: CallbackReason, info: usize) -> DispatchOutcome {
        match reason {
            CallbackReason::ActionCode => self.invoke(ActionCode(info)),
            CallbackReason::UnloadingPlugin => {
                self.clear();
                DispatchOutcome::Cleared
            }
            CallbackReason::ApplicationClosing => {
                self.run_shutdown_listeners();
                DispatchOutcome::ShutdownHandled
            }
            CallbackReason::Other(raw) => {
                debug!(reason = raw, "Ignoring host callback");
                DispatchOutcome::Ignored
            }
        }
    }

    /// Runs the handler bound to `code` inside the failure boundary.
    pub fn invoke(&self, code: ActionCode) -> DispatchOutcome {
        let Some(handler) = self.registry.get(code) else {
            debug!(code = %code, "No handler bound to action code");
            return DispatchOutcome::Unbound;
        };

        debug!(code = %code, handler = %handler.name(), "Invoking action");
        match handler.invoke() {
            Ok(()) => DispatchOutcome::Completed,
            Err(err) => {
                warn!(
                    code = %code,
                    handler = %handler.name(),
                    kind = %err.kind,
                    error = %err,
                    "Action failed"
                );
                let message = err.user_message().to_string();
                self.report(&message);
                DispatchOutcome::Failed(message)
            }
        }
    }

    /// Drops every handler and shutdown listener.
    pub fn clear(&self) {
        self.registry.clear();
        let mut listeners = self
            .shutdown_listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        listeners.clear();
    }

    fn run_shutdown_listeners(&self) {
        let listeners: Vec<Arc<dyn ActionHandler>> = self
            .shutdown_listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        info!(count = listeners.len(), "Running shutdown listeners");
        for listener in listeners {
            if let Err(err) = listener.invoke() {
                error!(listener = %listener.name(), error = %err, "Shutdown listener failed");
            }
        }
    }

    fn report(&self, message: &str) {
        let value = HostValue::Text(message.to_string());
        if let Err(err) = self.diagnostic.set(self.host.as_ref(), &value) {
            error!(
                variable = %self.diagnostic.name(),
                error = %err,
                "Failed to write action diagnostic"
            );
        }
    }
}
