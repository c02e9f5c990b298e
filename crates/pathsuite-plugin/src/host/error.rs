//! Errors raised by host variable access.

use pathsuite_core::error::{AppError, ErrorKind};
use thiserror::Error;

use super::variable::VariableType;

/// Failure talking to the host or using a host variable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HostError {
    /// The host rejected or failed a variable read.
    #[error("Error getting {kind} macro variable named {name}")]
    GetFailed {
        /// Variable name.
        name: String,
        /// Wire type requested.
        kind: VariableType,
    },

    /// The host rejected or failed a variable write.
    #[error("Error setting {kind} macro variable named {name}")]
    SetFailed {
        /// Variable name.
        name: String,
        /// Wire type written.
        kind: VariableType,
    },

    /// Write attempted on a read-only variable.
    #[error("Illegal operation. The variable ({name}) is a read only variable")]
    ReadOnly {
        /// Variable name.
        name: String,
    },

    /// Value of the wrong type supplied for a variable.
    #[error("The variable ({name}) holds {expected} values, not {actual}")]
    TypeMismatch {
        /// Variable name.
        name: String,
        /// The variable's type.
        expected: VariableType,
        /// The type of the supplied value.
        actual: VariableType,
    },

    /// Text could not be parsed into the variable's type.
    #[error("Cannot convert '{text}' to a {kind} value for the variable ({name})")]
    Parse {
        /// Variable name.
        name: String,
        /// The variable's type.
        kind: VariableType,
        /// The rejected text.
        text: String,
    },

    /// The variable name cannot be passed across the C boundary.
    #[error("The variable name ({name}) contains a null character")]
    InvalidName {
        /// Variable name.
        name: String,
    },
}

impl From<HostError> for AppError {
    fn from(err: HostError) -> Self {
        let kind = match &err {
            HostError::ReadOnly { .. }
            | HostError::TypeMismatch { .. }
            | HostError::Parse { .. } => ErrorKind::Validation,
            HostError::GetFailed { .. }
            | HostError::SetFailed { .. }
            | HostError::InvalidName { .. } => ErrorKind::Host,
        };
        AppError::new(kind, err.to_string())
    }
}
