//! Loads the plugin through its C entry point with a fake host.
//!
//! This is the only test that touches the process-wide plugin instance.

use std::collections::BTreeMap;
use std::ffi::c_void;
use std::sync::Mutex;

use pathsuite_default_plugin::exports::SpotPluginInit;
use pathsuite_default_plugin::{PluginAction, current};
use pathsuite_plugin::ffi::abi::{
    FfiVariableMessage, HOST_REQUEST_GET_VARIABLE, HOST_REQUEST_SET_VARIABLE, PluginCallbackFn,
    VARIABLE_BOOL, VARIABLE_NUMERIC, VARIABLE_TEXT,
};
use pathsuite_plugin::ffi::safety::c_str_to_string;

#[derive(Debug, Clone, PartialEq)]
enum Stored {
    Text(String),
    Numeric(f64),
    Bool(bool),
}

static HOST_VARIABLES: Mutex<BTreeMap<String, Stored>> = Mutex::new(BTreeMap::new());

fn store(name: &str, value: Stored) {
    HOST_VARIABLES
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .insert(name.to_string(), value);
}

fn stored(name: &str) -> Option<Stored> {
    HOST_VARIABLES
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .get(name)
        .cloned()
}

unsafe extern "C" fn fake_host(
    handle: usize,
    request: u32,
    _info: usize,
    message: *mut c_void,
) -> bool {
    assert_eq!(handle, 42, "plugin must pass its handle back");
    let message = unsafe { &mut *(message as *mut FfiVariableMessage) };
    let name = unsafe { c_str_to_string(message.name) }.unwrap_or_default();
    let mut variables = HOST_VARIABLES.lock().unwrap_or_else(|e| e.into_inner());

    match request {
        HOST_REQUEST_SET_VARIABLE => {
            let value = match message.data_type {
                VARIABLE_TEXT => {
                    Stored::Text(unsafe { c_str_to_string(message.text.buffer) }.unwrap_or_default())
                }
                VARIABLE_NUMERIC => Stored::Numeric(message.numeric),
                _ => Stored::Bool(message.boolean != 0),
            };
            variables.insert(name, value);
            true
        }
        HOST_REQUEST_GET_VARIABLE => match (variables.get(&name), message.data_type) {
            (Some(Stored::Text(text)), VARIABLE_TEXT) => {
                let count = text.len().min(message.text.capacity as usize - 1);
                unsafe {
                    std::ptr::copy_nonoverlapping(
                        text.as_ptr(),
                        message.text.buffer as *mut u8,
                        count,
                    );
                    *message.text.buffer.add(count) = 0;
                }
                message.text.length = count as u32;
                true
            }
            (Some(Stored::Numeric(n)), VARIABLE_NUMERIC) => {
                message.numeric = *n;
                true
            }
            (Some(Stored::Bool(b)), VARIABLE_BOOL) => {
                message.boolean = i32::from(*b);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

#[test]
fn test_load_invoke_unload_through_c_abi() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("slide.jpg");
    std::fs::write(&file, b"jpeg").expect("Failed to write file");

    let mut callback: Option<PluginCallbackFn> = None;
    let mut user_data: usize = usize::MAX;
    let loaded =
        unsafe { SpotPluginInit(Some(fake_host), 42, 0, &mut callback, &mut user_data) };
    assert!(loaded);
    assert!(current().is_some());
    let callback = callback.expect("callback must be set");

    store("_argT1", Stored::Text(file.to_string_lossy().to_string()));
    unsafe { callback(1, PluginAction::FileExists.code().0, user_data) };
    assert_eq!(stored("_argB5"), Some(Stored::Bool(true)));

    store("_argT1", Stored::Text("a/b".to_string()));
    unsafe { callback(1, PluginAction::EncodeForPath.code().0, user_data) };
    assert_eq!(stored("_argT5"), Some(Stored::Text("a%2Fb".to_string())));

    // Missing catalog variable: the failure lands in the diagnostic slot.
    store("_argT1", Stored::Text("case1".to_string()));
    unsafe { callback(1, PluginAction::LockCase.code().0, user_data) };
    match stored("TextVar1") {
        Some(Stored::Text(message)) => assert!(message.contains("MasterCatalogFolder")),
        other => panic!("unexpected diagnostic: {other:?}"),
    }

    unsafe { callback(2, 0, user_data) };
    assert!(current().is_none());

    // Calls after unload are ignored.
    store("_argB5", Stored::Bool(false));
    store("_argT1", Stored::Text(file.to_string_lossy().to_string()));
    unsafe { callback(1, PluginAction::FileExists.code().0, user_data) };
    assert_eq!(stored("_argB5"), Some(Stored::Bool(false)));
}

#[test]
fn test_init_rejects_null_host() {
    let mut callback: Option<PluginCallbackFn> = None;
    let mut user_data: usize = 0;
    let loaded = unsafe { SpotPluginInit(None, 1, 0, &mut callback, &mut user_data) };
    assert!(!loaded);
    assert!(callback.is_none());
}
