//! Host interop configuration: variable names and transport limits.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Names of the host variables the plugin reads or writes, plus
/// transport limits.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Maximum number of bytes read back for a single text variable.
    #[validate(range(min = 1, max = 65535))]
    pub text_buffer_len: usize,
    /// Text variable that receives failures caught at the dispatch boundary.
    #[validate(length(min = 1))]
    pub diagnostic_variable: String,
    /// Text variable holding the active catalog root directory.
    #[validate(length(min = 1))]
    pub catalog_root_variable: String,
    /// Text variable holding the host preferences directory.
    #[validate(length(min = 1))]
    pub prefs_path_variable: String,
    /// Text variable identifying the user recorded in case locks.
    #[validate(length(min = 1))]
    pub lock_identity_variable: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            text_buffer_len: 1024,
            diagnostic_variable: "TextVar1".to_string(),
            catalog_root_variable: "MasterCatalogFolder".to_string(),
            prefs_path_variable: "PrefsFilePath".to_string(),
            lock_identity_variable: "MGR_strUserName".to_string(),
        }
    }
}
