//! Case actions. The catalog root comes from the host on every call.

use pathsuite_catalog::LockOutcome;
use pathsuite_catalog::cases::{rename_case as rename, specimen_images, specimen_list};
use pathsuite_core::AppResult;

use super::{report_list, report_outcome};
use crate::context::PluginContext;

/// `100`: renames a case folder.
pub fn rename_case(ctx: &PluginContext) -> AppResult<()> {
    let args = ctx.args();
    let old = args.text(1)?;
    let new = args.text(2)?;
    let paths = ctx.catalog_paths()?;
    report_outcome(&ctx.returns(), "rename-case", rename(&paths, &old, &new))
}

/// `102`: locks a case for this session.
pub fn lock_case(ctx: &PluginContext) -> AppResult<()> {
    let case = ctx.args().text(1)?;
    let manager = ctx.lock_manager()?;
    let holder = ctx.lock_identity()?;
    let returns = ctx.returns();

    match manager.lock(&case, &holder) {
        Ok(LockOutcome::Acquired) => {
            returns.text(5, "")?;
            returns.bool(5, true)?;
        }
        Ok(LockOutcome::Held { info }) => {
            returns.text(5, info)?;
            returns.bool(5, false)?;
        }
        Err(e) => report_outcome(&returns, "lock-case", Err(e))?,
    }
    Ok(())
}

/// `103`: releases a case lock.
pub fn unlock_case(ctx: &PluginContext) -> AppResult<()> {
    let case = ctx.args().text(1)?;
    ctx.lock_manager()?.unlock(&case)?;
    Ok(())
}

/// `104`: numbered images of a specimen.
pub fn specimen_image_list(ctx: &PluginContext) -> AppResult<()> {
    let args = ctx.args();
    let case = args.text(1)?;
    let specimen = args.text(2)?;
    let images = specimen_images(&ctx.catalog_paths()?, &case, &specimen);
    report_list(&ctx.returns(), &images)
}

/// `105`: specimen folders of a case.
pub fn specimen_folder_list(ctx: &PluginContext) -> AppResult<()> {
    let case = ctx.args().text(1)?;
    let specimens = specimen_list(&ctx.catalog_paths()?, &case);
    report_list(&ctx.returns(), &specimens)
}
