//! Catalog lifecycle actions.

use pathsuite_catalog::{Catalog, CatalogError, CatalogPaths, OpenOutcome};
use pathsuite_core::AppResult;
use tracing::info;

use super::report_outcome;
use crate::context::PluginContext;

fn catalog_arg(ctx: &PluginContext) -> AppResult<Result<Catalog, CatalogError>> {
    let root = ctx.args().text(1)?;
    if root.trim().is_empty() {
        return Ok(Err(CatalogError::InvalidName {
            name: root,
            reason: "No catalog folder was given.".to_string(),
        }));
    }
    Ok(Ok(Catalog::new(CatalogPaths::from_host_text(&root))))
}

/// `200`: creates a new, empty catalog.
pub fn create_catalog(ctx: &PluginContext) -> AppResult<()> {
    let result = match catalog_arg(ctx)? {
        Ok(catalog) => {
            let prefs_dir = ctx.prefs_dir()?;
            catalog.create(prefs_dir.as_deref()).map(|_| ())
        }
        Err(e) => Err(e),
    };
    report_outcome(&ctx.returns(), "create-catalog", result)
}

/// `201`: opens a catalog, migrating a legacy layout.
pub fn open_catalog(ctx: &PluginContext) -> AppResult<()> {
    let result = match catalog_arg(ctx)? {
        Ok(catalog) => {
            let prefs_dir = ctx.prefs_dir()?;
            catalog.open(prefs_dir.as_deref()).map(|outcome| {
                if let OpenOutcome::Migrated { renamed } = outcome {
                    info!(catalog = %catalog.paths().root().display(), renamed = renamed, "Opened after migration");
                }
            })
        }
        Err(e) => Err(e),
    };
    report_outcome(&ctx.returns(), "open-catalog", result)
}

/// `202`: whether the folder can be opened as a catalog.
pub fn is_valid_catalog(ctx: &PluginContext) -> AppResult<()> {
    let valid = match catalog_arg(ctx)? {
        Ok(catalog) => catalog.is_valid(),
        Err(_) => false,
    };
    ctx.returns().bool(5, valid)?;
    Ok(())
}
