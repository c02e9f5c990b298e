//! Integration tests for the generic file actions.

use std::fs;
use std::path::MAIN_SEPARATOR;

use pathsuite_default_plugin::PluginAction;

use crate::helpers::TestPlugin;

#[test]
fn test_file_and_dir_exists() {
    let app = TestPlugin::new();
    let file = app.prefs_dir().join("a.txt");
    fs::write(&file, b"x").expect("seed");
    let file = file.to_string_lossy().to_string();
    let dir = app.prefs_dir().to_string_lossy().to_string();

    app.call(PluginAction::FileExists, &[&file]);
    assert_eq!(app.ret_bool(), Some(true));
    app.call(PluginAction::FileExists, &[&dir]);
    assert_eq!(app.ret_bool(), Some(false));
    app.call(PluginAction::DirExists, &[&dir]);
    assert_eq!(app.ret_bool(), Some(true));
    app.call(PluginAction::DirExists, &[&file]);
    assert_eq!(app.ret_bool(), Some(false));
    app.call(PluginAction::FileExists, &[""]);
    assert_eq!(app.ret_bool(), Some(false));
}

#[test]
fn test_create_directory_and_delete_file() {
    let app = TestPlugin::new();
    let nested = app.prefs_dir().join("x").join("y");

    app.call(PluginAction::CreateDirectory, &[&nested.to_string_lossy()]);
    assert_eq!(app.ret_bool(), Some(true));
    assert!(nested.is_dir());

    let file = nested.join("gone.txt");
    fs::write(&file, b"x").expect("seed");
    app.call(PluginAction::DeleteFile, &[&file.to_string_lossy()]);
    assert_eq!(app.ret_bool(), Some(true));
    assert!(!file.exists());

    app.call(PluginAction::DeleteFile, &[&file.to_string_lossy()]);
    assert_eq!(app.ret_bool(), Some(false));
    assert!(app.ret_text().is_some());
}

#[test]
fn test_convert_slashes() {
    let app = TestPlugin::new();
    app.call(PluginAction::ConvertSlashes, &["a/b\\c"]);
    let expected = format!("a{MAIN_SEPARATOR}b{MAIN_SEPARATOR}c");
    assert_eq!(app.ret_text(), Some(expected));
}

#[test]
fn test_verify_filename() {
    let app = TestPlugin::new();

    app.call(PluginAction::VerifyFileName, &["  Case 12 "]);
    assert_eq!(app.ret_bool(), Some(true));

    app.call(PluginAction::VerifyFileName, &["a|b"]);
    assert_eq!(app.ret_bool(), Some(false));
    assert!(app.ret_text().is_some_and(|t| t.contains('|')));

    app.call(PluginAction::VerifyFileName, &[""]);
    assert_eq!(app.ret_bool(), Some(false));
}

#[test]
fn test_encode_and_decode_for_path() {
    let app = TestPlugin::new();

    app.call(PluginAction::EncodeForPath, &["50% of a/b?"]);
    let encoded = app.ret_text().expect("encoded");
    assert_eq!(encoded, "50%% of a%2Fb%3F");

    app.call(PluginAction::DecodeFromPath, &[&encoded]);
    assert_eq!(app.ret_text().as_deref(), Some("50% of a/b?"));
    assert_eq!(app.ret_bool(), Some(true));

    app.call(PluginAction::DecodeFromPath, &["%G1"]);
    assert_eq!(app.ret_text().as_deref(), Some(""));
    assert_eq!(app.ret_bool(), Some(false));
}
