//! Action dispatch: the handler registry and the host callback boundary.

pub mod dispatcher;
pub mod registry;
