//! Image-catalog configuration.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Catalog behaviour settings.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Separator between prefix and description in `AccessionPrefixes.txt`.
    ///
    /// `-` in the current format, `:` in older installations.
    #[validate(custom(function = "validate_delimiter"))]
    pub accession_prefix_delimiter: char,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            accession_prefix_delimiter: '-',
        }
    }
}

fn validate_delimiter(delimiter: &char) -> Result<(), ValidationError> {
    if delimiter.is_whitespace() || delimiter.is_control() || *delimiter == '%' {
        return Err(ValidationError::new("invalid_delimiter"));
    }
    Ok(())
}
