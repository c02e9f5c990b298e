//! Integration tests for catalog actions.

use std::fs;

use pathsuite_default_plugin::PluginAction;
use pathsuite_plugin::DispatchOutcome;

use crate::helpers::TestPlugin;

#[test]
fn test_create_then_validate_and_open() {
    let app = TestPlugin::new();
    app.create_catalog();

    let head = fs::read_to_string(app.catalog_root().join(".config").join("HEAD"))
        .expect("Failed to read HEAD");
    let head: serde_json::Value = serde_json::from_str(&head).expect("HEAD is JSON");
    assert_eq!(head["details"]["version"], 1);
    assert!(head["details"]["uid"].as_str().is_some_and(|uid| !uid.is_empty()));

    app.call(PluginAction::IsValidCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(true));

    let outcome = app.call(PluginAction::OpenCatalog, &[&app.catalog_arg()]);
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(app.ret_bool(), Some(true));
    assert_eq!(app.ret_text(), None);
}

#[test]
fn test_create_rejects_non_empty_folder() {
    let app = TestPlugin::new();
    fs::create_dir_all(app.catalog_root()).expect("mkdir");
    fs::write(app.catalog_root().join("readme.txt"), b"x").expect("seed");

    let outcome = app.call(PluginAction::CreateCatalog, &[&app.catalog_arg()]);
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(app.ret_bool(), Some(false));
    assert_eq!(
        app.ret_text().as_deref(),
        Some("The destination folder must be an empty folder.")
    );
    assert!(!app.catalog_root().join(".config").exists());
}

#[test]
fn test_create_imports_system_prefix_list() {
    let app = TestPlugin::new();
    fs::write(
        app.prefs_dir().join("AccessionPrefixes.txt"),
        "S-Surgical\nC-Cytology\n",
    )
    .expect("seed");

    app.create_catalog();
    assert!(
        app.catalog_root()
            .join(".config")
            .join("AccessionPrefixes.txt")
            .is_file()
    );
    assert!(app.prefs_dir().join("AccessionPrefixes.txt.bak").is_file());
    assert!(!app.prefs_dir().join("AccessionPrefixes.txt").exists());

    app.call(PluginAction::AccessionPrefixLookup, &["C"]);
    assert_eq!(app.ret_text().as_deref(), Some("Cytology"));
}

#[test]
fn test_open_missing_catalog() {
    let app = TestPlugin::new();
    app.call(PluginAction::OpenCatalog, &[&app.catalog_arg()]);

    assert_eq!(app.ret_bool(), Some(false));
    assert_eq!(
        app.ret_text().as_deref(),
        Some("Unable to connect to the catalog. The catalog path does not exist on this system.")
    );

    app.call(PluginAction::IsValidCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(false));
}

#[test]
fn test_open_migrates_legacy_catalog() {
    let app = TestPlugin::new();
    let case = app.make_case("C1", &["S1"]);
    fs::write(case.join("case.var"), b"").expect("marker");
    let specimen = case.join("S1");
    fs::write(specimen.join("C1.S1.AB.jpg"), b"a").expect("image");
    fs::write(specimen.join("C1.S1.007.jpg"), b"b").expect("image");

    app.call(PluginAction::IsValidCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(true));

    app.call(PluginAction::OpenCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(true), "{:?}", app.ret_text());
    assert!(specimen.join("28.jpg").is_file());
    assert!(specimen.join("7.jpg").is_file());
    assert!(!specimen.join("C1.S1.AB.jpg").exists());

    app.call(PluginAction::IsValidCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(true));

    app.call(PluginAction::SpecimenImageList, &["C1", "S1"]);
    assert_eq!(app.ret_text().as_deref(), Some("7.jpg\n28.jpg"));
    assert_eq!(app.ret_num(), Some(2.0));
}

#[test]
fn test_open_incompatible_catalog() {
    let app = TestPlugin::new();
    fs::create_dir_all(app.catalog_root().join(".config")).expect("mkdir");

    app.call(PluginAction::OpenCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(false));
    assert_eq!(
        app.ret_text().as_deref(),
        Some("The image catalog is incompatible with this application version.")
    );
}

#[test]
fn test_trailing_dot_in_catalog_path() {
    let app = TestPlugin::new();
    app.create_catalog();
    let dotted = format!("{}/.", app.catalog_arg());

    app.call(PluginAction::IsValidCatalog, &[&dotted]);
    assert_eq!(app.ret_bool(), Some(true));
}

#[test]
fn test_empty_catalog_path() {
    let app = TestPlugin::new();
    app.call(PluginAction::CreateCatalog, &["  "]);
    assert_eq!(app.ret_bool(), Some(false));
    assert_eq!(app.ret_text().as_deref(), Some("No catalog folder was given."));
}

#[test]
fn test_create_reports_unreadable_preferences_folder() {
    let app = TestPlugin::new();
    fs::write(app.prefs_dir().join("AccessionPrefixes.txt"), "S-Surgical\n").expect("seed");
    app.host.fail_on("PrefsFilePath");

    let outcome = app.call(PluginAction::CreateCatalog, &[&app.catalog_arg()]);
    assert!(matches!(outcome, DispatchOutcome::Failed(_)));
    assert!(!app.diagnostic().is_empty());
    assert_eq!(app.ret_bool(), None);
    assert!(!app.catalog_root().exists());
    assert!(app.prefs_dir().join("AccessionPrefixes.txt").is_file());

    app.host.recover("PrefsFilePath");
    app.create_catalog();
    assert!(app.prefs_dir().join("AccessionPrefixes.txt.bak").is_file());
}

#[test]
fn test_open_reports_unreadable_preferences_folder() {
    let app = TestPlugin::new();
    app.create_catalog();
    app.host.fail_on("PrefsFilePath");

    let outcome = app.call(PluginAction::OpenCatalog, &[&app.catalog_arg()]);
    assert!(matches!(outcome, DispatchOutcome::Failed(_)));
    assert!(!app.diagnostic().is_empty());
}

#[test]
fn test_create_retry_after_failed_setup() {
    let app = TestPlugin::new();
    let source = app.prefs_dir().join("AccessionPrefixes.txt");
    fs::write(&source, "S-Surgical\n").expect("seed");
    let blocker = app.prefs_dir().join("AccessionPrefixes.txt.bak");
    fs::create_dir_all(blocker.join("inner")).expect("blocker");

    app.call(PluginAction::CreateCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(false));
    assert!(!app.catalog_root().exists());

    fs::remove_dir_all(&blocker).expect("unblock");
    app.create_catalog();
    app.call(PluginAction::OpenCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(true));
}
