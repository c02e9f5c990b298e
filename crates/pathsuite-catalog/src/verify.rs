//! File and case name verification.

use crate::codec::RESERVED;
use crate::error::CatalogError;
use crate::paths::CONFIG_DIR;

/// Checks that `name` can be used as a single path segment.
///
/// Surrounding whitespace is ignored; the trimmed name is returned.
pub fn verify_filename(name: &str) -> Result<&str, CatalogError> {
    let trimmed = name.trim();
    let invalid = |reason: String| CatalogError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("The name cannot be empty.".to_string()));
    }
    if let Some(ch) = trimmed.chars().find(|c| c.is_ascii() && RESERVED.contains(&(*c as u8))) {
        return Err(invalid(format!(
            "The name cannot contain the character '{ch}'. The characters \\ / : * ? \" < > | are not allowed."
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(invalid(
            "The name cannot contain control characters.".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Checks that `name` names a case or specimen folder inside the catalog.
///
/// On top of [`verify_filename`], the relative segments `.` and `..` and the
/// catalog's own configuration folder are refused.
pub fn verify_case_name(name: &str) -> Result<&str, CatalogError> {
    let trimmed = verify_filename(name)?;
    if matches!(trimmed, "." | "..") || trimmed.eq_ignore_ascii_case(CONFIG_DIR) {
        return Err(CatalogError::InvalidName {
            name: name.to_string(),
            reason: format!("The name '{trimmed}' is reserved by the catalog."),
        });
    }
    Ok(trimmed)
}
