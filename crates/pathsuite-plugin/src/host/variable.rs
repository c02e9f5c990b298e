//! Typed host variables.
//!
//! A [`HostVariable`] is a closed set of variants, one per logical type
//! the host scripting engine knows about. Each variant knows how to read
//! and write itself through a [`HostTransport`]; integers travel as
//! numeric values on the wire.

use std::fmt;

use super::error::HostError;
use super::transport::HostTransport;

/// Logical type of a host variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Boolean flag.
    Bool,
    /// Text string.
    Text,
    /// Double-precision number.
    Numeric,
    /// 32-bit integer, stored by the host as a number.
    Integer,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "Boolean"),
            Self::Text => write!(f, "text"),
            Self::Numeric => write!(f, "numeric"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

/// A value read from or written to a host variable.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Boolean value.
    Bool(bool),
    /// Text value.
    Text(String),
    /// Numeric value.
    Numeric(f64),
    /// Integer value.
    Integer(i32),
}

impl HostValue {
    /// The logical type of this value.
    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::Bool(_) => VariableType::Bool,
            Self::Text(_) => VariableType::Text,
            Self::Numeric(_) => VariableType::Numeric,
            Self::Integer(_) => VariableType::Integer,
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(t) => write!(f, "{t}"),
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// A named host variable of a fixed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostVariable {
    /// Boolean variable.
    Bool {
        /// Variable name.
        name: String,
        /// Whether writes are rejected.
        read_only: bool,
    },
    /// Text variable.
    Text {
        /// Variable name.
        name: String,
        /// Whether writes are rejected.
        read_only: bool,
    },
    /// Numeric variable.
    Numeric {
        /// Variable name.
        name: String,
        /// Whether writes are rejected.
        read_only: bool,
    },
    /// Integer variable.
    Integer {
        /// Variable name.
        name: String,
        /// Whether writes are rejected.
        read_only: bool,
    },
}

impl HostVariable {
    /// A writable Boolean variable.
    pub fn bool(name: impl Into<String>) -> Self {
        Self::Bool {
            name: name.into(),
            read_only: false,
        }
    }

    /// A writable text variable.
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            read_only: false,
        }
    }

    /// A writable numeric variable.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::Numeric {
            name: name.into(),
            read_only: false,
        }
    }

    /// A writable integer variable.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::Integer {
            name: name.into(),
            read_only: false,
        }
    }

    /// Marks the variable read-only.
    pub fn into_read_only(self) -> Self {
        match self {
            Self::Bool { name, .. } => Self::Bool { name, read_only: true },
            Self::Text { name, .. } => Self::Text { name, read_only: true },
            Self::Numeric { name, .. } => Self::Numeric { name, read_only: true },
            Self::Integer { name, .. } => Self::Integer { name, read_only: true },
        }
    }

    /// The variable name.
    pub fn name(&self) -> &str {
        match self {
            Self::Bool { name, .. }
            | Self::Text { name, .. }
            | Self::Numeric { name, .. }
            | Self::Integer { name, .. } => name,
        }
    }

    /// Whether writes are rejected.
    pub fn is_read_only(&self) -> bool {
        match self {
            Self::Bool { read_only, .. }
            | Self::Text { read_only, .. }
            | Self::Numeric { read_only, .. }
            | Self::Integer { read_only, .. } => *read_only,
        }
    }

    /// The logical type of the variable.
    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::Bool { .. } => VariableType::Bool,
            Self::Text { .. } => VariableType::Text,
            Self::Numeric { .. } => VariableType::Numeric,
            Self::Integer { .. } => VariableType::Integer,
        }
    }

    /// Reads the current value from the host.
    ///
    /// Integer variables truncate the host's numeric value toward zero.
    pub fn get(&self, host: &dyn HostTransport) -> Result<HostValue, HostError> {
        Ok(match self {
            Self::Bool { name, .. } => HostValue::Bool(host.get_bool(name)?),
            Self::Text { name, .. } => HostValue::Text(host.get_text(name)?),
            Self::Numeric { name, .. } => HostValue::Numeric(host.get_numeric(name)?),
            Self::Integer { name, .. } => HostValue::Integer(host.get_numeric(name)? as i32),
        })
    }

    /// Writes a value to the host.
    ///
    /// Numeric variables accept integer values; integer variables accept
    /// numeric values rounded half away from zero. Any other type pairing
    /// is rejected.
    pub fn set(&self, host: &dyn HostTransport, value: &HostValue) -> Result<(), HostError> {
        if self.is_read_only() {
            return Err(HostError::ReadOnly {
                name: self.name().to_string(),
            });
        }

        match (self, value) {
            (Self::Bool { name, .. }, HostValue::Bool(b)) => host.set_bool(name, *b),
            (Self::Text { name, .. }, HostValue::Text(t)) => host.set_text(name, t),
            (Self::Numeric { name, .. }, HostValue::Numeric(n)) => host.set_numeric(name, *n),
            (Self::Numeric { name, .. }, HostValue::Integer(i)) => {
                host.set_numeric(name, f64::from(*i))
            }
            (Self::Integer { name, .. }, HostValue::Integer(i)) => {
                host.set_numeric(name, f64::from(*i))
            }
            (Self::Integer { name, .. }, HostValue::Numeric(n)) => host.set_numeric(name, n.round()),
            _ => Err(HostError::TypeMismatch {
                name: self.name().to_string(),
                expected: self.variable_type(),
                actual: value.variable_type(),
            }),
        }
    }

    /// Parses `text` into the variable's type and writes it.
    pub fn set_from_text(&self, host: &dyn HostTransport, text: &str) -> Result<(), HostError> {
        let parse_error = || HostError::Parse {
            name: self.name().to_string(),
            kind: self.variable_type(),
            text: text.to_string(),
        };
        let trimmed = text.trim();

        let value = match self {
            Self::Text { .. } => HostValue::Text(text.to_string()),
            Self::Bool { .. } => HostValue::Bool(parse_bool(trimmed).ok_or_else(parse_error)?),
            Self::Numeric { .. } => {
                HostValue::Numeric(trimmed.parse::<f64>().map_err(|_| parse_error())?)
            }
            Self::Integer { .. } => {
                HostValue::Integer(trimmed.parse::<i32>().map_err(|_| parse_error())?)
            }
        };
        self.set(host, &value)
    }
}

/// Accepts the spellings the host scripting engine uses for flags.
fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
