//! Argument and return slots.
//!
//! Actions receive up to five positional parameters through the host's
//! argument stack. Each slot exists as three typed variables
//! (`_argT{n}`, `_argB{n}` and `_argN{n}`); slot 5 doubles as the return
//! slot.

use std::fmt;

use super::error::HostError;
use super::transport::HostTransport;
use super::variable::{HostValue, HostVariable};

/// Index into the host argument stack, always in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    /// Number of slots the host exposes.
    pub const COUNT: u8 = 5;

    /// The slot actions write their primary result to.
    pub const RETURN: Slot = Slot::new(5);

    /// Creates a slot.
    ///
    /// # Panics
    /// Panics when `index` is outside `1..=5`. Slot indexes are fixed by
    /// each action's contract, so an out-of-range index is a programming
    /// error.
    pub const fn new(index: u8) -> Self {
        assert!(
            index >= 1 && index <= Self::COUNT,
            "invalid macro stack index"
        );
        Self(index)
    }

    /// The 1-based index.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Name of the slot's text variable.
    pub fn text_name(self) -> String {
        format!("_argT{}", self.0)
    }

    /// Name of the slot's Boolean variable.
    pub fn bool_name(self) -> String {
        format!("_argB{}", self.0)
    }

    /// Name of the slot's numeric variable.
    pub fn numeric_name(self) -> String {
        format!("_argN{}", self.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read access to the argument slots.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    host: &'a dyn HostTransport,
}

impl<'a> Args<'a> {
    /// Wraps a transport.
    pub fn new(host: &'a dyn HostTransport) -> Self {
        Self { host }
    }

    /// Text parameter at `index`.
    pub fn text(&self, index: u8) -> Result<String, HostError> {
        self.host.get_text(&Slot::new(index).text_name())
    }

    /// Boolean parameter at `index`.
    pub fn bool(&self, index: u8) -> Result<bool, HostError> {
        self.host.get_bool(&Slot::new(index).bool_name())
    }

    /// Numeric parameter at `index`.
    pub fn num(&self, index: u8) -> Result<f64, HostError> {
        self.host.get_numeric(&Slot::new(index).numeric_name())
    }
}

/// Write access to the argument slots, used for results.
#[derive(Debug, Clone, Copy)]
pub struct Returns<'a> {
    host: &'a dyn HostTransport,
}

impl<'a> Returns<'a> {
    /// Wraps a transport.
    pub fn new(host: &'a dyn HostTransport) -> Self {
        Self { host }
    }

    /// Writes text to the slot at `index`.
    pub fn text(&self, index: u8, value: impl Into<String>) -> Result<(), HostError> {
        HostVariable::text(Slot::new(index).text_name())
            .set(self.host, &HostValue::Text(value.into()))
    }

    /// Writes a Boolean to the slot at `index`.
    pub fn bool(&self, index: u8, value: bool) -> Result<(), HostError> {
        HostVariable::bool(Slot::new(index).bool_name()).set(self.host, &HostValue::Bool(value))
    }

    /// Writes a number to the slot at `index`.
    pub fn num(&self, index: u8, value: f64) -> Result<(), HostError> {
        HostVariable::numeric(Slot::new(index).numeric_name())
            .set(self.host, &HostValue::Numeric(value))
    }
}
