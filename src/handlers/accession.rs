//! Accession prefix actions.

use pathsuite_catalog::AccessionPrefixes;
use pathsuite_core::AppResult;
use tracing::warn;

use super::report_list;
use crate::context::PluginContext;

/// The catalog's prefix list. An unreadable list is treated as empty.
fn load(ctx: &PluginContext) -> AppResult<AccessionPrefixes> {
    let paths = ctx.catalog_paths()?;
    let delimiter = ctx.config().catalog.accession_prefix_delimiter;
    match AccessionPrefixes::load(&paths.accession_prefix_file(), delimiter) {
        Ok(prefixes) => Ok(prefixes),
        Err(e) => {
            warn!(error = %e, "Failed to load accession prefixes");
            Ok(AccessionPrefixes::default())
        }
    }
}

/// `101`: description for a prefix; empty when unknown.
pub fn lookup_prefix(ctx: &PluginContext) -> AppResult<()> {
    let prefix = ctx.args().text(1)?;
    let prefixes = load(ctx)?;
    let description = prefixes.lookup(&prefix).unwrap_or_default().to_string();
    ctx.returns().text(5, description)?;
    Ok(())
}

/// `106`: every description in the list.
pub fn enumerate_prefixes(ctx: &PluginContext) -> AppResult<()> {
    let prefixes = load(ctx)?;
    report_list(&ctx.returns(), &prefixes.descriptions())
}
