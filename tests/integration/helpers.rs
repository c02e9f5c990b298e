//! Shared test helpers for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use pathsuite_core::PluginConfig;
use pathsuite_default_plugin::{Plugin, PluginAction};
use pathsuite_plugin::host::mock::MockHost;
use pathsuite_plugin::{CallbackReason, DispatchOutcome, HostValue};
use tempfile::TempDir;

/// Identity the mock host reports for lock files.
pub const TEST_USER: &str = "tester";

/// A plugin session over an in-memory host and a scratch catalog location.
pub struct TestPlugin {
    /// The in-memory host
    pub host: Arc<MockHost>,
    /// The plugin session under test
    pub plugin: Plugin,
    /// Scratch directory holding the catalog and preferences folders
    pub dir: Arc<TempDir>,
}

impl TestPlugin {
    /// Create a session with default configuration
    pub fn new() -> Self {
        Self::with_config(PluginConfig::default())
    }

    /// Create a session with the given configuration
    pub fn with_config(config: PluginConfig) -> Self {
        let dir = Arc::new(tempfile::tempdir().expect("Failed to create temp dir"));
        Self::build(dir, config)
    }

    /// A second, independent session over the same catalog (another
    /// workstation, as far as the plugin can tell)
    pub fn second_session(&self, user: &str) -> Self {
        let other = Self::build(self.dir.clone(), PluginConfig::default());
        other
            .host
            .set_value("MGR_strUserName", HostValue::Text(user.to_string()));
        other
    }

    fn build(dir: Arc<TempDir>, config: PluginConfig) -> Self {
        let prefs = dir.path().join("prefs");
        std::fs::create_dir_all(&prefs).expect("Failed to create prefs dir");
        let catalog = dir.path().join("catalog");

        let host = Arc::new(
            MockHost::new()
                .with_text("TextVar1", "")
                .with_text("MasterCatalogFolder", &catalog.to_string_lossy())
                .with_text("PrefsFilePath", &prefs.to_string_lossy())
                .with_text("MGR_strUserName", TEST_USER),
        );
        let plugin = Plugin::new(host.clone(), config);
        Self { host, plugin, dir }
    }

    /// Catalog root the host points at
    pub fn catalog_root(&self) -> PathBuf {
        self.dir.path().join("catalog")
    }

    /// Application preferences folder
    pub fn prefs_dir(&self) -> PathBuf {
        self.dir.path().join("prefs")
    }

    /// Catalog root as host text
    pub fn catalog_arg(&self) -> String {
        self.catalog_root().to_string_lossy().to_string()
    }

    /// Create the catalog through the plugin and assert it succeeded
    pub fn create_catalog(&self) {
        self.call(PluginAction::CreateCatalog, &[&self.catalog_arg()]);
        assert_eq!(self.ret_bool(), Some(true), "create failed: {:?}", self.ret_text());
    }

    /// Create case (and optional specimen) folders in the catalog
    pub fn make_case(&self, case: &str, specimens: &[&str]) -> PathBuf {
        let case_dir = self.catalog_root().join(case);
        std::fs::create_dir_all(&case_dir).expect("Failed to create case");
        for specimen in specimens {
            std::fs::create_dir_all(case_dir.join(specimen)).expect("Failed to create specimen");
        }
        case_dir
    }

    /// Invoke an action with text arguments in slots 1..
    ///
    /// Slot 5 is primed with values of the wrong type first, so the
    /// `ret_*` readers only see what the action wrote.
    pub fn call(&self, action: PluginAction, args: &[&str]) -> DispatchOutcome {
        for (i, arg) in args.iter().enumerate() {
            self.host
                .set_value(&format!("_argT{}", i + 1), HostValue::Text(arg.to_string()));
        }
        self.host.set_value("_argT5", HostValue::Bool(false));
        self.host.set_value("_argB5", HostValue::Text(String::new()));
        self.host.set_value("_argN5", HostValue::Text(String::new()));
        self.plugin
            .dispatch(CallbackReason::ActionCode, action.code().0)
    }

    /// Text written to slot 5
    pub fn ret_text(&self) -> Option<String> {
        self.host.text("_argT5")
    }

    /// Boolean written to slot 5
    pub fn ret_bool(&self) -> Option<bool> {
        self.host.bool("_argB5")
    }

    /// Number written to slot 5
    pub fn ret_num(&self) -> Option<f64> {
        self.host.numeric("_argN5")
    }

    /// Contents of the diagnostic variable
    pub fn diagnostic(&self) -> String {
        self.host.text("TextVar1").unwrap_or_default()
    }
}
