//! Integration tests for case, lock and accession prefix actions.

use std::fs;

use pathsuite_core::PluginConfig;
use pathsuite_default_plugin::PluginAction;
use pathsuite_plugin::DispatchOutcome;

use crate::helpers::{TEST_USER, TestPlugin};

#[test]
fn test_lock_is_exclusive_across_sessions() {
    let app = TestPlugin::new();
    app.create_catalog();
    app.make_case("case1", &[]);

    app.call(PluginAction::LockCase, &["case1"]);
    assert_eq!(app.ret_bool(), Some(true));
    assert_eq!(app.ret_text().as_deref(), Some(""));

    let other = app.second_session("someone-else");
    other.call(PluginAction::LockCase, &["case1"]);
    assert_eq!(other.ret_bool(), Some(false));
    let info = other.ret_text().expect("holder info");
    assert!(info.contains(&format!("User: {TEST_USER}")));
    assert!(info.contains("Locked On: "));
    assert!(info.contains("Id:"));

    app.call(PluginAction::UnlockCase, &["case1"]);
    other.call(PluginAction::LockCase, &["case1"]);
    assert_eq!(other.ret_bool(), Some(true));

    let marker = fs::read_to_string(app.catalog_root().join("case1").join("case.lock"))
        .expect("lock marker");
    assert!(marker.starts_with("User: someone-else\n"));
}

#[test]
fn test_unlock_unknown_case_is_harmless() {
    let app = TestPlugin::new();
    app.create_catalog();

    let outcome = app.call(PluginAction::UnlockCase, &["never-locked"]);
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(app.diagnostic(), "");
}

#[test]
fn test_lock_missing_case() {
    let app = TestPlugin::new();
    app.create_catalog();

    app.call(PluginAction::LockCase, &["ghost"]);
    assert_eq!(app.ret_bool(), Some(false));
    assert_eq!(
        app.ret_text().as_deref(),
        Some("The case ghost could not be found in the catalog.")
    );
}

#[test]
fn test_rename_case() {
    let app = TestPlugin::new();
    app.create_catalog();
    app.make_case("S24-1", &["A"]);
    app.make_case("S24-9", &[]);

    app.call(PluginAction::RenameCase, &["S24-1", "S24-9"]);
    assert_eq!(app.ret_bool(), Some(false));
    assert_eq!(
        app.ret_text().as_deref(),
        Some("Cannot rename. The case S24-9 already exists in the catalog.")
    );

    app.call(PluginAction::RenameCase, &["S24-7", "S24-8"]);
    assert_eq!(app.ret_bool(), Some(false));
    assert_eq!(
        app.ret_text().as_deref(),
        Some("The case S24-7 could not be found in the catalog.")
    );

    app.call(PluginAction::RenameCase, &["S24-1", "S24:2"]);
    assert_eq!(app.ret_bool(), Some(false));

    app.call(PluginAction::RenameCase, &["S24-1", "S24-2"]);
    assert_eq!(app.ret_bool(), Some(true));
    assert!(app.catalog_root().join("S24-2").join("A").is_dir());
}

#[test]
fn test_specimen_listings() {
    let app = TestPlugin::new();
    app.create_catalog();
    let case = app.make_case("case1", &["B", "A"]);
    for name in ["2.jpg", "10.jpg", "1.JPEG", "thumb.jpg"] {
        fs::write(case.join("A").join(name), b"x").expect("image");
    }

    app.call(PluginAction::SpecimenList, &["case1"]);
    assert_eq!(app.ret_text().as_deref(), Some("A\nB"));
    assert_eq!(app.ret_num(), Some(2.0));

    app.call(PluginAction::SpecimenImageList, &["case1", "A"]);
    assert_eq!(app.ret_text().as_deref(), Some("1.JPEG\n2.jpg\n10.jpg"));
    assert_eq!(app.ret_num(), Some(3.0));

    app.call(PluginAction::SpecimenImageList, &["case1", "missing"]);
    assert_eq!(app.ret_text().as_deref(), Some(""));
    assert_eq!(app.ret_num(), Some(0.0));
}

#[test]
fn test_accession_prefixes() {
    let app = TestPlugin::new();
    app.create_catalog();
    fs::write(
        app.catalog_root().join(".config").join("AccessionPrefixes.txt"),
        "S - Surgical\nC-Cytology\nS-Second surgical\n",
    )
    .expect("seed");

    app.call(PluginAction::AccessionPrefixLookup, &["S"]);
    assert_eq!(app.ret_text().as_deref(), Some("Surgical"));

    app.call(PluginAction::AccessionPrefixLookup, &["X"]);
    assert_eq!(app.ret_text().as_deref(), Some(""));

    app.call(PluginAction::AccessionPrefixEnumerate, &[]);
    assert_eq!(
        app.ret_text().as_deref(),
        Some("Surgical\nCytology\nSecond surgical")
    );
    assert_eq!(app.ret_num(), Some(3.0));
}

#[test]
fn test_accession_prefixes_with_colon_delimiter() {
    let mut config = PluginConfig::default();
    config.catalog.accession_prefix_delimiter = ':';
    let app = TestPlugin::with_config(config);
    app.create_catalog();
    fs::write(
        app.catalog_root().join(".config").join("AccessionPrefixes.txt"),
        "S:Surgical\n",
    )
    .expect("seed");

    app.call(PluginAction::AccessionPrefixLookup, &["S"]);
    assert_eq!(app.ret_text().as_deref(), Some("Surgical"));
}

#[test]
fn test_accession_prefixes_without_list() {
    let app = TestPlugin::new();
    app.create_catalog();

    app.call(PluginAction::AccessionPrefixEnumerate, &[]);
    assert_eq!(app.ret_text().as_deref(), Some(""));
    assert_eq!(app.ret_num(), Some(0.0));
}

#[test]
fn test_unreadable_prefix_list_reads_as_empty() {
    let app = TestPlugin::new();
    app.create_catalog();
    fs::create_dir_all(
        app.catalog_root()
            .join(".config")
            .join("AccessionPrefixes.txt")
            .join("inner"),
    )
    .expect("seed");

    let outcome = app.call(PluginAction::AccessionPrefixLookup, &["S"]);
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(app.ret_text().as_deref(), Some(""));
    assert_eq!(app.diagnostic(), "");

    app.call(PluginAction::AccessionPrefixEnumerate, &[]);
    assert_eq!(app.ret_text().as_deref(), Some(""));
    assert_eq!(app.ret_num(), Some(0.0));
}

#[test]
fn test_rename_cannot_touch_config_folder() {
    let app = TestPlugin::new();
    app.create_catalog();
    app.make_case("S24-1", &[]);

    app.call(PluginAction::RenameCase, &[".config", "stolen"]);
    assert_eq!(app.ret_bool(), Some(false));
    assert!(!app.catalog_root().join("stolen").exists());

    app.call(PluginAction::RenameCase, &["S24-1", ".config"]);
    assert_eq!(app.ret_bool(), Some(false));
    assert!(app.catalog_root().join("S24-1").is_dir());

    app.call(PluginAction::IsValidCatalog, &[&app.catalog_arg()]);
    assert_eq!(app.ret_bool(), Some(true));
}

#[test]
fn test_lock_cannot_escape_catalog() {
    let app = TestPlugin::new();
    app.create_catalog();

    for case in ["..", ".", ".config"] {
        let outcome = app.call(PluginAction::LockCase, &[case]);
        assert_eq!(outcome, DispatchOutcome::Completed);
        assert_eq!(app.ret_bool(), Some(false), "{case}");
        assert!(app.ret_text().is_some_and(|text| !text.is_empty()));
    }
    assert!(!app.dir.path().join("case.lock").exists());
    assert!(!app.catalog_root().join("case.lock").exists());
    assert!(!app.catalog_root().join(".config").join("case.lock").exists());
}

#[test]
fn test_unlock_refuses_reserved_names() {
    let app = TestPlugin::new();
    app.create_catalog();
    let outside = app.dir.path().join("case.lock");
    fs::write(&outside, b"not ours").expect("seed");

    let outcome = app.call(PluginAction::UnlockCase, &[".."]);
    assert!(matches!(outcome, DispatchOutcome::Failed(_)));
    assert!(!app.diagnostic().is_empty());
    assert!(outside.is_file());
}

#[test]
fn test_listings_refuse_reserved_names() {
    let app = TestPlugin::new();
    app.create_catalog();

    app.call(PluginAction::SpecimenList, &[".."]);
    assert_eq!(app.ret_text().as_deref(), Some(""));
    assert_eq!(app.ret_num(), Some(0.0));

    app.call(PluginAction::SpecimenImageList, &["..", "catalog"]);
    assert_eq!(app.ret_text().as_deref(), Some(""));
    assert_eq!(app.ret_num(), Some(0.0));
}
