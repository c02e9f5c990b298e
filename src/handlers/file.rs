//! Generic file-system actions.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path};

use pathsuite_catalog::CatalogError;
use pathsuite_catalog::codec::{decode_str, encode_str};
use pathsuite_catalog::verify::verify_filename;
use pathsuite_core::AppResult;
use tracing::debug;

use super::report_outcome;
use crate::context::PluginContext;

/// `1`: replaces `/` and `\` with the platform separator.
pub fn convert_slashes(ctx: &PluginContext) -> AppResult<()> {
    let path = ctx.args().text(1)?;
    let converted: String = path
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    ctx.returns().text(5, converted)?;
    Ok(())
}

/// `2`: creates a folder and any missing parents.
pub fn create_directory(ctx: &PluginContext) -> AppResult<()> {
    let path = ctx.args().text(1)?;
    let result = if path.trim().is_empty() {
        Err(CatalogError::InvalidName {
            name: path.clone(),
            reason: "No folder name was given.".to_string(),
        })
    } else {
        fs::create_dir_all(path.trim())
            .map_err(|e| CatalogError::io(format!("Unable to create the folder {path}"), e))
    };
    report_outcome(&ctx.returns(), "create-directory", result)
}

/// `3`: deletes a regular file.
pub fn delete_file(ctx: &PluginContext) -> AppResult<()> {
    let path = ctx.args().text(1)?;
    let file = Path::new(&path);
    let result = if !file.is_file() {
        Err(CatalogError::io(
            format!("Unable to delete {path}"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        ))
    } else {
        fs::remove_file(file).map_err(|e| CatalogError::io(format!("Unable to delete {path}"), e))
    };
    report_outcome(&ctx.returns(), "delete-file", result)
}

/// `4`: whether the path is an existing folder.
pub fn dir_exists(ctx: &PluginContext) -> AppResult<()> {
    let path = ctx.args().text(1)?;
    let exists = !path.is_empty() && Path::new(&path).is_dir();
    debug!(path = %path, exists = exists, "Folder check");
    ctx.returns().bool(5, exists)?;
    Ok(())
}

/// `5`: whether the path is an existing regular file.
pub fn file_exists(ctx: &PluginContext) -> AppResult<()> {
    let path = ctx.args().text(1)?;
    let exists = !path.is_empty() && Path::new(&path).is_file();
    debug!(path = %path, exists = exists, "File check");
    ctx.returns().bool(5, exists)?;
    Ok(())
}

/// `7`: checks that a name is usable as a file or case name.
pub fn verify_file_name(ctx: &PluginContext) -> AppResult<()> {
    let name = ctx.args().text(1)?;
    let result = verify_filename(&name).map(|_| ());
    report_outcome(&ctx.returns(), "verify-filename", result)
}

/// `8`: escapes a name for use as a path segment.
pub fn encode_for_path(ctx: &PluginContext) -> AppResult<()> {
    let raw = ctx.args().text(1)?;
    ctx.returns().text(5, encode_str(&raw))?;
    Ok(())
}

/// `9`: reverses `encode_for_path`. Text is empty when decoding fails.
pub fn decode_from_path(ctx: &PluginContext) -> AppResult<()> {
    let encoded = ctx.args().text(1)?;
    let returns = ctx.returns();
    match decode_str(&encoded) {
        Ok(decoded) => {
            returns.text(5, decoded)?;
            returns.bool(5, true)?;
        }
        Err(e) => {
            debug!(input = %encoded, error = %e, "Decode failed");
            returns.text(5, "")?;
            returns.bool(5, false)?;
        }
    }
    Ok(())
}
