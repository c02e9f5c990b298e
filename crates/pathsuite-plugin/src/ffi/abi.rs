//! FFI ABI definitions for the host plugin interface.
//!
//! The host loads the plugin library, calls its exported init function
//! with a host action function pointer, and receives back a callback
//! function pointer that it invokes for every action code and lifecycle
//! notification.

use std::ffi::c_void;
use std::os::raw::c_char;

/// Host request: read a macro variable.
pub const HOST_REQUEST_GET_VARIABLE: u32 = 1;
/// Host request: write a macro variable.
pub const HOST_REQUEST_SET_VARIABLE: u32 = 2;

/// Callback reason: the host is invoking an action code (`info` = code).
pub const CALLBACK_ACTION_CODE: u32 = 1;
/// Callback reason: the host is about to unload the plugin library.
pub const CALLBACK_UNLOADING_PLUGIN: u32 = 2;
/// Callback reason: the host application is closing.
pub const CALLBACK_APPLICATION_CLOSING: u32 = 3;

/// Wire type tag for a text variable.
pub const VARIABLE_TEXT: u32 = 0;
/// Wire type tag for a numeric (double) variable.
pub const VARIABLE_NUMERIC: u32 = 1;
/// Wire type tag for a Boolean variable.
pub const VARIABLE_BOOL: u32 = 2;

/// FFI-safe text value.
///
/// For reads the plugin supplies a zeroed buffer of `capacity` bytes and
/// the host fills it with a null-terminated string. For writes `buffer`
/// points at a null-terminated string owned by the plugin.
#[repr(C)]
pub struct FfiTextValue {
    /// Character buffer.
    pub buffer: *mut c_char,
    /// Buffer size in bytes, including the terminator.
    pub capacity: u32,
    /// Length of the string in bytes, excluding the terminator.
    pub length: u32,
}

/// FFI-safe get/set variable message passed with the variable requests.
#[repr(C)]
pub struct FfiVariableMessage {
    /// One of the `VARIABLE_*` wire type tags.
    pub data_type: u32,
    /// Variable name (null-terminated C string).
    pub name: *const c_char,
    /// Text payload, used when `data_type` is [`VARIABLE_TEXT`].
    pub text: FfiTextValue,
    /// Numeric payload, used when `data_type` is [`VARIABLE_NUMERIC`].
    pub numeric: f64,
    /// Boolean payload (non-zero = true), used when `data_type` is [`VARIABLE_BOOL`].
    pub boolean: i32,
}

/// Host action function handed to the plugin on load.
///
/// Returns `true` if the host completed the request.
pub type HostActionFn =
    unsafe extern "C" fn(handle: usize, request: u32, info: usize, message: *mut c_void) -> bool;

/// Plugin callback function handed back to the host on load.
pub type PluginCallbackFn = unsafe extern "C" fn(reason: u32, info: usize, user_data: usize);

/// Type signature of the init function every plugin library exports.
///
/// ```c
/// bool SpotPluginInit(host_action_func_t hostAction, uintptr_t handle, uintptr_t info,
///                     callback_func_t *pluginCallback, uintptr_t *userData);
/// ```
pub type PluginInitFn = unsafe extern "C" fn(
    host_action: Option<HostActionFn>,
    handle: usize,
    info: usize,
    callback: *mut Option<PluginCallbackFn>,
    user_data: *mut usize,
) -> bool;
