//! Host transport: the raw get/set calls into the host process.

use std::ffi::c_void;
use std::fmt;
use std::os::raw::c_char;

use tracing::trace;

use crate::ffi::abi::{
    FfiTextValue, FfiVariableMessage, HOST_REQUEST_GET_VARIABLE, HOST_REQUEST_SET_VARIABLE,
    HostActionFn, VARIABLE_BOOL, VARIABLE_NUMERIC, VARIABLE_TEXT,
};
use crate::ffi::safety::{string_to_c_string, text_from_buffer};

use super::error::HostError;
use super::variable::VariableType;

/// Typed get/set of named values in the host process.
///
/// Implementations must be callable from whichever thread the host uses
/// to invoke the plugin.
pub trait HostTransport: Send + Sync + fmt::Debug {
    /// Reads a text variable.
    fn get_text(&self, name: &str) -> Result<String, HostError>;
    /// Writes a text variable.
    fn set_text(&self, name: &str, value: &str) -> Result<(), HostError>;
    /// Reads a numeric variable.
    fn get_numeric(&self, name: &str) -> Result<f64, HostError>;
    /// Writes a numeric variable.
    fn set_numeric(&self, name: &str, value: f64) -> Result<(), HostError>;
    /// Reads a Boolean variable.
    fn get_bool(&self, name: &str) -> Result<bool, HostError>;
    /// Writes a Boolean variable.
    fn set_bool(&self, name: &str, value: bool) -> Result<(), HostError>;
}

/// Transport that calls the host through the action function pointer
/// received at load time.
#[derive(Clone, Copy)]
pub struct FfiHostTransport {
    /// Host action function.
    action: HostActionFn,
    /// Plugin handle assigned by the host; passed back on every call.
    handle: usize,
    /// Maximum text length read back, excluding the terminator.
    text_buffer_len: usize,
}

impl fmt::Debug for FfiHostTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FfiHostTransport")
            .field("handle", &self.handle)
            .field("text_buffer_len", &self.text_buffer_len)
            .finish()
    }
}

impl FfiHostTransport {
    /// Creates a transport over the host action function.
    pub fn new(action: HostActionFn, handle: usize, text_buffer_len: usize) -> Self {
        Self {
            action,
            handle,
            text_buffer_len,
        }
    }

    fn message(data_type: u32, name: *const c_char) -> FfiVariableMessage {
        FfiVariableMessage {
            data_type,
            name,
            text: FfiTextValue {
                buffer: std::ptr::null_mut(),
                capacity: 0,
                length: 0,
            },
            numeric: 0.0,
            boolean: 0,
        }
    }

    fn call(&self, request: u32, message: &mut FfiVariableMessage) -> bool {
        let ptr = message as *mut FfiVariableMessage as *mut c_void;
        unsafe { (self.action)(self.handle, request, 0, ptr) }
    }
}

impl HostTransport for FfiHostTransport {
    fn get_text(&self, name: &str) -> Result<String, HostError> {
        let c_name = c_name(name)?;
        let mut buffer = vec![0u8; self.text_buffer_len + 1];
        let mut message = Self::message(VARIABLE_TEXT, c_name.as_ptr());
        message.text.buffer = buffer.as_mut_ptr() as *mut c_char;
        message.text.capacity = buffer.len() as u32;

        if !self.call(HOST_REQUEST_GET_VARIABLE, &mut message) {
            return Err(HostError::GetFailed {
                name: name.to_string(),
                kind: VariableType::Text,
            });
        }

        // Never trust the host to terminate a full buffer.
        if let Some(last) = buffer.last_mut() {
            *last = 0;
        }
        let value = text_from_buffer(&buffer);
        trace!(variable = %name, len = value.len(), "Read host text variable");
        Ok(value)
    }

    fn set_text(&self, name: &str, value: &str) -> Result<(), HostError> {
        let c_name = c_name(name)?;
        // Host text cannot carry interior nulls; truncate at the first one.
        let printable = value.split('\0').next().unwrap_or_default();
        let c_value = string_to_c_string(printable).ok_or_else(|| HostError::SetFailed {
            name: name.to_string(),
            kind: VariableType::Text,
        })?;
        let bytes = c_value.as_bytes_with_nul();

        let mut message = Self::message(VARIABLE_TEXT, c_name.as_ptr());
        message.text.buffer = c_value.as_ptr() as *mut c_char;
        message.text.capacity = bytes.len() as u32;
        message.text.length = (bytes.len() - 1) as u32;

        if !self.call(HOST_REQUEST_SET_VARIABLE, &mut message) {
            return Err(HostError::SetFailed {
                name: name.to_string(),
                kind: VariableType::Text,
            });
        }
        Ok(())
    }

    fn get_numeric(&self, name: &str) -> Result<f64, HostError> {
        let c_name = c_name(name)?;
        let mut message = Self::message(VARIABLE_NUMERIC, c_name.as_ptr());
        if !self.call(HOST_REQUEST_GET_VARIABLE, &mut message) {
            return Err(HostError::GetFailed {
                name: name.to_string(),
                kind: VariableType::Numeric,
            });
        }
        Ok(message.numeric)
    }

    fn set_numeric(&self, name: &str, value: f64) -> Result<(), HostError> {
        let c_name = c_name(name)?;
        let mut message = Self::message(VARIABLE_NUMERIC, c_name.as_ptr());
        message.numeric = value;
        if !self.call(HOST_REQUEST_SET_VARIABLE, &mut message) {
            return Err(HostError::SetFailed {
                name: name.to_string(),
                kind: VariableType::Numeric,
            });
        }
        Ok(())
    }

    fn get_bool(&self, name: &str) -> Result<bool, HostError> {
        let c_name = c_name(name)?;
        let mut message = Self::message(VARIABLE_BOOL, c_name.as_ptr());
        if !self.call(HOST_REQUEST_GET_VARIABLE, &mut message) {
            return Err(HostError::GetFailed {
                name: name.to_string(),
                kind: VariableType::Bool,
            });
        }
        Ok(message.boolean != 0)
    }

    fn set_bool(&self, name: &str, value: bool) -> Result<(), HostError> {
        let c_name = c_name(name)?;
        let mut message = Self::message(VARIABLE_BOOL, c_name.as_ptr());
        message.boolean = i32::from(value);
        if !self.call(HOST_REQUEST_SET_VARIABLE, &mut message) {
            return Err(HostError::SetFailed {
                name: name.to_string(),
                kind: VariableType::Bool,
            });
        }
        Ok(())
    }
}

fn c_name(name: &str) -> Result<std::ffi::CString, HostError> {
    string_to_c_string(name).ok_or_else(|| HostError::InvalidName {
        name: name.to_string(),
    })
}
