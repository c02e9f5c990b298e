//! Action handlers.
//!
//! Every handler reads its arguments from the host slots and writes its
//! results to slot 5. Expected failures (bad names, missing cases,
//! filesystem errors) become a `false` result with a message; only host
//! transport failures propagate to the dispatcher.

pub mod accession;
pub mod case;
pub mod catalog;
pub mod file;

use pathsuite_catalog::CatalogError;
use pathsuite_core::AppResult;
use pathsuite_plugin::{Returns, Slot};
use tracing::warn;

/// Writes a success flag, and the error message on failure, to slot 5.
pub(crate) fn report_outcome(
    returns: &Returns<'_>,
    action: &str,
    result: Result<(), CatalogError>,
) -> AppResult<()> {
    let slot = Slot::RETURN.index();
    match result {
        Ok(()) => returns.bool(slot, true)?,
        Err(e) => {
            warn!(action = action, error = %e, "Action rejected");
            returns.text(slot, e.to_string())?;
            returns.bool(slot, false)?;
        }
    }
    Ok(())
}

/// Writes a newline-joined list and its length to slot 5.
pub(crate) fn report_list<S: AsRef<str>>(returns: &Returns<'_>, items: &[S]) -> AppResult<()> {
    let slot = Slot::RETURN.index();
    let joined = items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join("\n");
    returns.text(slot, joined)?;
    returns.num(slot, items.len() as f64)?;
    Ok(())
}
