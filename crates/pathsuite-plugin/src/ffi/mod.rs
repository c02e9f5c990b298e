//! C ABI shared with the host application.

pub mod abi;
pub mod safety;
