//! The action code table.
//!
//! Codes are fixed by the host macros that call them and must never be
//! renumbered.

use std::sync::Arc;

use pathsuite_core::AppResult;
use pathsuite_plugin::{ActionCode, ActionDispatcher};
use tracing::info;

use crate::context::PluginContext;
use crate::handlers::{accession, case, catalog, file};

/// Every action this plugin registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginAction {
    ConvertSlashes,
    CreateDirectory,
    DeleteFile,
    DirExists,
    FileExists,
    VerifyFileName,
    EncodeForPath,
    DecodeFromPath,
    RenameCase,
    AccessionPrefixLookup,
    LockCase,
    UnlockCase,
    SpecimenImageList,
    SpecimenList,
    AccessionPrefixEnumerate,
    CreateCatalog,
    OpenCatalog,
    IsValidCatalog,
}

type Handler = fn(&PluginContext) -> AppResult<()>;

impl PluginAction {
    /// All actions, in code order.
    pub const ALL: [PluginAction; 18] = [
        Self::ConvertSlashes,
        Self::CreateDirectory,
        Self::DeleteFile,
        Self::DirExists,
        Self::FileExists,
        Self::VerifyFileName,
        Self::EncodeForPath,
        Self::DecodeFromPath,
        Self::RenameCase,
        Self::AccessionPrefixLookup,
        Self::LockCase,
        Self::UnlockCase,
        Self::SpecimenImageList,
        Self::SpecimenList,
        Self::AccessionPrefixEnumerate,
        Self::CreateCatalog,
        Self::OpenCatalog,
        Self::IsValidCatalog,
    ];

    /// The host-facing action code.
    pub fn code(self) -> ActionCode {
        ActionCode(match self {
            Self::ConvertSlashes => 1,
            Self::CreateDirectory => 2,
            Self::DeleteFile => 3,
            Self::DirExists => 4,
            Self::FileExists => 5,
            Self::VerifyFileName => 7,
            Self::EncodeForPath => 8,
            Self::DecodeFromPath => 9,
            Self::RenameCase => 100,
            Self::AccessionPrefixLookup => 101,
            Self::LockCase => 102,
            Self::UnlockCase => 103,
            Self::SpecimenImageList => 104,
            Self::SpecimenList => 105,
            Self::AccessionPrefixEnumerate => 106,
            Self::CreateCatalog => 200,
            Self::OpenCatalog => 201,
            Self::IsValidCatalog => 202,
        })
    }

    /// Name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::ConvertSlashes => "convert-slashes",
            Self::CreateDirectory => "create-directory",
            Self::DeleteFile => "delete-file",
            Self::DirExists => "dir-exists",
            Self::FileExists => "file-exists",
            Self::VerifyFileName => "verify-filename",
            Self::EncodeForPath => "encode-for-path",
            Self::DecodeFromPath => "decode-from-path",
            Self::RenameCase => "rename-case",
            Self::AccessionPrefixLookup => "accession-prefix-lookup",
            Self::LockCase => "lock-case",
            Self::UnlockCase => "unlock-case",
            Self::SpecimenImageList => "get-specimen-image-list",
            Self::SpecimenList => "get-specimen-list",
            Self::AccessionPrefixEnumerate => "accession-prefix-enumerate",
            Self::CreateCatalog => "create-catalog",
            Self::OpenCatalog => "open-catalog",
            Self::IsValidCatalog => "is-valid-catalog",
        }
    }

    /// Looks up the action bound to `code`.
    pub fn from_code(code: ActionCode) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.code() == code)
    }

    fn handler(self) -> Handler {
        match self {
            Self::ConvertSlashes => file::convert_slashes,
            Self::CreateDirectory => file::create_directory,
            Self::DeleteFile => file::delete_file,
            Self::DirExists => file::dir_exists,
            Self::FileExists => file::file_exists,
            Self::VerifyFileName => file::verify_file_name,
            Self::EncodeForPath => file::encode_for_path,
            Self::DecodeFromPath => file::decode_from_path,
            Self::RenameCase => case::rename_case,
            Self::AccessionPrefixLookup => accession::lookup_prefix,
            Self::LockCase => case::lock_case,
            Self::UnlockCase => case::unlock_case,
            Self::SpecimenImageList => case::specimen_image_list,
            Self::SpecimenList => case::specimen_folder_list,
            Self::AccessionPrefixEnumerate => accession::enumerate_prefixes,
            Self::CreateCatalog => catalog::create_catalog,
            Self::OpenCatalog => catalog::open_catalog,
            Self::IsValidCatalog => catalog::is_valid_catalog,
        }
    }
}

impl From<PluginAction> for ActionCode {
    fn from(action: PluginAction) -> Self {
        action.code()
    }
}

/// Registers every action and the lock cleanup run at shutdown.
pub fn register_all(dispatcher: &ActionDispatcher, context: &Arc<PluginContext>) {
    for action in PluginAction::ALL {
        let ctx = context.clone();
        let run = action.handler();
        dispatcher.register_fn(action, action.name(), move || run(&ctx));
    }

    let locks = context.locks().clone();
    dispatcher.on_shutdown("release-case-locks", move || {
        locks.sweep();
        Ok(())
    });

    info!(
        actions = PluginAction::ALL.len(),
        "Plugin actions registered"
    );
}
