//! Host variable access.
//!
//! The host exposes named macro variables of three wire types (text,
//! numeric, Boolean). Every read or write is a call into the host
//! process that can fail; failures surface as [`error::HostError`].

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod slots;
pub mod transport;
pub mod variable;
