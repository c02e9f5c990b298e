//! Action registry: handlers keyed by numeric action code.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use pathsuite_core::AppResult;
use tracing::{debug, info};

/// Opaque action code assigned by the host's scripting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionCode(pub usize);

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ActionCode {
    fn from(code: usize) -> Self {
        Self(code)
    }
}

/// A host-invokable operation.
///
/// Handlers take no arguments; they read parameters from and write
/// results to the host's argument slots.
pub trait ActionHandler: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Runs the action.
    fn invoke(&self) -> AppResult<()>;
}

/// A closure-based handler for quick handler creation.
pub struct ClosureHandler {
    /// Handler name.
    name: String,
    /// Handler function.
    handler: Box<dyn Fn() -> AppResult<()> + Send + Sync>,
}

impl fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("name", &self.name)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            handler: Box::new(handler),
        }
    }

    /// Wraps a closure into an `Arc<dyn ActionHandler>`.
    pub fn wrap<F>(name: &str, handler: F) -> Arc<dyn ActionHandler>
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        Arc::new(Self::new(name, handler))
    }
}

impl ActionHandler for ClosureHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self) -> AppResult<()> {
        (self.handler)()
    }
}

/// Registry of action handlers. At most one handler per code.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    /// Action code → handler.
    handlers: RwLock<HashMap<ActionCode, Arc<dyn ActionHandler>>>,
}

impl ActionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `code`, replacing any existing binding.
    pub fn register(&self, code: ActionCode, handler: Arc<dyn ActionHandler>) {
        let name = handler.name().to_string();
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = handlers.insert(code, handler) {
            debug!(code = %code, previous = %previous.name(), "Action handler replaced");
        }
        debug!(code = %code, handler = %name, "Action handler registered");
    }

    /// Removes the binding for `code`, if any.
    pub fn unregister(&self, code: ActionCode) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        handlers.remove(&code).is_some()
    }

    /// Removes every binding.
    pub fn clear(&self) {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        let count = handlers.len();
        handlers.clear();
        info!(count = count, "Action registry cleared");
    }

    /// Returns the handler bound to `code`.
    ///
    /// The handler is cloned out so the registry lock is released before
    /// it runs.
    pub fn get(&self, code: ActionCode) -> Option<Arc<dyn ActionHandler>> {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        handlers.get(&code).cloned()
    }

    /// Returns whether `code` is bound.
    pub fn contains(&self, code: ActionCode) -> bool {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        handlers.contains_key(&code)
    }

    /// Number of bound codes.
    pub fn len(&self) -> usize {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        handlers.len()
    }

    /// Returns whether no code is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All bound codes, ascending.
    pub fn codes(&self) -> Vec<ActionCode> {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        let mut codes: Vec<ActionCode> = handlers.keys().copied().collect();
        codes.sort();
        codes
    }
}
