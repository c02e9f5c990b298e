//! Alphabetic sequence numbers.
//!
//! Older catalogs numbered images with letters in bijective base 26,
//! the way spreadsheets name columns: `A`=1 .. `Z`=26, `AA`=27.

use thiserror::Error;

/// Failure converting an alphabetic sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphaError {
    /// Nothing to convert.
    #[error("Empty alphabetic sequence")]
    Empty,

    /// A character outside `A..=Z` (either case).
    #[error("Invalid character '{ch}' in alphabetic sequence")]
    InvalidDigit {
        /// The offending character.
        ch: char,
    },

    /// The value does not fit.
    #[error("Alphabetic sequence '{text}' is too large")]
    Overflow {
        /// The sequence.
        text: String,
    },
}

/// Converts an alphabetic sequence to its integer value. Case-insensitive.
pub fn alpha_to_int(text: &str) -> Result<u32, AlphaError> {
    if text.is_empty() {
        return Err(AlphaError::Empty);
    }

    text.chars().try_fold(0u32, |acc, ch| {
        if !ch.is_ascii_alphabetic() {
            return Err(AlphaError::InvalidDigit { ch });
        }
        let digit = u32::from(ch.to_ascii_uppercase() as u8 - b'A' + 1);
        acc.checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| AlphaError::Overflow {
                text: text.to_string(),
            })
    })
}

/// Converts an integer to its uppercase alphabetic sequence.
///
/// Zero has no representation and yields an empty string.
pub fn int_to_alpha(mut value: u32) -> String {
    let mut digits = Vec::new();
    while value > 0 {
        let rem = (value - 1) % 26;
        digits.push(char::from(b'A' + rem as u8));
        value = (value - 1) / 26;
    }
    digits.iter().rev().collect()
}
