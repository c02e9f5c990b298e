//! In-memory host for development and testing.
//!
//! Simulates the host's variable table without a running application.
//! Reads of unknown variables fail the same way the host does, and any
//! name can be made to fail on demand.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::error::HostError;
use super::transport::HostTransport;
use super::variable::{HostValue, VariableType};

/// Mock host that keeps variables in a map.
#[derive(Debug, Default)]
pub struct MockHost {
    /// Variable table: name -> value
    values: Mutex<HashMap<String, HostValue>>,
    /// Names whose reads and writes are refused
    failing: Mutex<HashSet<String>>,
}

impl MockHost {
    /// Create an empty mock host
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MockHost::set_value`] for text
    pub fn with_text(self, name: &str, value: &str) -> Self {
        self.set_value(name, HostValue::Text(value.to_string()));
        self
    }

    /// Store a value directly, bypassing failure injection
    pub fn set_value(&self, name: &str, value: HostValue) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(name.to_string(), value);
    }

    /// Raw stored value
    pub fn value(&self, name: &str) -> Option<HostValue> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(name).cloned()
    }

    /// Stored text value, if the variable holds text
    pub fn text(&self, name: &str) -> Option<String> {
        match self.value(name)? {
            HostValue::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Stored Boolean value, if the variable holds one
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.value(name)? {
            HostValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Stored numeric value, if the variable holds a number
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match self.value(name)? {
            HostValue::Numeric(n) => Some(n),
            HostValue::Integer(i) => Some(f64::from(i)),
            _ => None,
        }
    }

    /// Make every read and write of `name` fail
    pub fn fail_on(&self, name: &str) {
        let mut failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        failing.insert(name.to_string());
    }

    /// Undo [`MockHost::fail_on`]
    pub fn recover(&self, name: &str) {
        let mut failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        failing.remove(name);
    }

    fn is_failing(&self, name: &str) -> bool {
        let failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        failing.contains(name)
    }

    fn read(&self, name: &str, kind: VariableType) -> Result<HostValue, HostError> {
        let failed = || HostError::GetFailed {
            name: name.to_string(),
            kind,
        };
        if self.is_failing(name) {
            tracing::debug!(variable = %name, "[MockHost] Injected read failure");
            return Err(failed());
        }
        self.value(name).ok_or_else(failed)
    }

    fn write(&self, name: &str, value: HostValue) -> Result<(), HostError> {
        if self.is_failing(name) {
            tracing::debug!(variable = %name, "[MockHost] Injected write failure");
            return Err(HostError::SetFailed {
                name: name.to_string(),
                kind: value.variable_type(),
            });
        }
        self.set_value(name, value);
        Ok(())
    }
}

impl HostTransport for MockHost {
    fn get_text(&self, name: &str) -> Result<String, HostError> {
        match self.read(name, VariableType::Text)? {
            HostValue::Text(t) => Ok(t),
            _ => Err(HostError::GetFailed {
                name: name.to_string(),
                kind: VariableType::Text,
            }),
        }
    }

    fn set_text(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.write(name, HostValue::Text(value.to_string()))
    }

    fn get_numeric(&self, name: &str) -> Result<f64, HostError> {
        match self.read(name, VariableType::Numeric)? {
            HostValue::Numeric(n) => Ok(n),
            HostValue::Integer(i) => Ok(f64::from(i)),
            _ => Err(HostError::GetFailed {
                name: name.to_string(),
                kind: VariableType::Numeric,
            }),
        }
    }

    fn set_numeric(&self, name: &str, value: f64) -> Result<(), HostError> {
        self.write(name, HostValue::Numeric(value))
    }

    fn get_bool(&self, name: &str) -> Result<bool, HostError> {
        match self.read(name, VariableType::Bool)? {
            HostValue::Bool(b) => Ok(b),
            _ => Err(HostError::GetFailed {
                name: name.to_string(),
                kind: VariableType::Bool,
            }),
        }
    }

    fn set_bool(&self, name: &str, value: bool) -> Result<(), HostError> {
        self.write(name, HostValue::Bool(value))
    }
}
