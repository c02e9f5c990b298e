//! # pathsuite-plugin
//!
//! Plugin framework for hosting PathSuite actions inside the imaging
//! workstation. Provides:
//!
//! - The C ABI exchanged with the host on load (`ffi`)
//! - Typed access to host macro variables and the argument/return
//!   slot convention (`host`)
//! - The action dispatcher: a registry of handlers keyed by action code,
//!   the failure boundary, and shutdown listeners (`dispatch`)
//! - An in-memory host for tests (`host::mock`, feature `mock`)

pub mod dispatch;
pub mod ffi;
pub mod host;

pub use dispatch::dispatcher::{ActionDispatcher, CallbackReason, DispatchOutcome};
pub use dispatch::registry::{ActionCode, ActionHandler, ActionRegistry, ClosureHandler};
pub use host::error::HostError;
pub use host::slots::{Args, Returns, Slot};
pub use host::transport::{FfiHostTransport, HostTransport};
pub use host::variable::{HostValue, HostVariable, VariableType};
