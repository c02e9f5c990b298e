//! Conversions between C strings and Rust strings at the host boundary.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Safely converts a C string pointer to a Rust `String`.
///
/// Returns `None` if the pointer is null. Invalid UTF-8 is replaced.
///
/// # Safety
/// A non-null `ptr` must point at a null-terminated string that stays
/// valid for the duration of the call.
pub unsafe fn c_str_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let text = unsafe { CStr::from_ptr(ptr) };
    Some(text.to_string_lossy().into_owned())
}

/// Converts a Rust string to a `CString`.
///
/// Returns `None` if the string contains null bytes.
pub fn string_to_c_string(s: &str) -> Option<CString> {
    CString::new(s).ok()
}

/// Reads a host-filled text buffer up to the first null byte.
///
/// A buffer without a terminator is read in full.
pub fn text_from_buffer(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|b| *b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).into_owned()
}
