//! Reversible escaping of characters that cannot appear in file names.
//!
//! Reserved characters and control bytes become `%XX` (two uppercase hex
//! digits of the byte); a literal `%` becomes `%%`. Everything else,
//! including non-ASCII UTF-8 bytes, is copied verbatim.

use thiserror::Error;

/// Escape marker.
pub const ESCAPE: u8 = b'%';

/// Characters that are never allowed in a path segment.
pub const RESERVED: &[u8] = b"\\/:*?\"<>|";

/// Malformed escape sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ends before the two hex digits of an escape.
    #[error("Incomplete escape sequence at position {position}")]
    Truncated {
        /// Byte offset of the escape marker.
        position: usize,
    },

    /// An escape is followed by something other than two hex digits.
    #[error("Invalid escape sequence at position {position}")]
    InvalidHex {
        /// Byte offset of the escape marker.
        position: usize,
    },

    /// The decoded bytes are not valid UTF-8.
    #[error("Decoded name is not valid text")]
    InvalidUtf8,
}

/// Whether `byte` must be escaped.
pub fn needs_escape(byte: u8) -> bool {
    byte < 0x20 || byte == 0x7F || RESERVED.contains(&byte)
}

/// Escapes every reserved, control and marker byte.
pub fn encode(raw: &[u8]) -> Vec<u8> {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = Vec::with_capacity(raw.len());
    for &byte in raw {
        if byte == ESCAPE {
            out.extend_from_slice(&[ESCAPE, ESCAPE]);
        } else if needs_escape(byte) {
            out.extend_from_slice(&[ESCAPE, HEX[(byte >> 4) as usize], HEX[(byte & 0x0F) as usize]]);
        } else {
            out.push(byte);
        }
    }
    out
}

/// Reverses [`encode`].
///
/// Lowercase hex digits are accepted.
pub fn decode(encoded: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(encoded.len());
    let mut i = 0;
    while i < encoded.len() {
        let byte = encoded[i];
        if byte != ESCAPE {
            out.push(byte);
            i += 1;
            continue;
        }

        match encoded.get(i + 1) {
            Some(&ESCAPE) => {
                out.push(ESCAPE);
                i += 2;
            }
            Some(&high) => {
                let low = *encoded
                    .get(i + 2)
                    .ok_or(DecodeError::Truncated { position: i })?;
                match (hex_value(high), hex_value(low)) {
                    (Some(h), Some(l)) => out.push((h << 4) | l),
                    _ => return Err(DecodeError::InvalidHex { position: i }),
                }
                i += 3;
            }
            None => return Err(DecodeError::Truncated { position: i }),
        }
    }
    Ok(out)
}

/// [`encode`] over text.
pub fn encode_str(raw: &str) -> String {
    // Only ASCII bytes are ever replaced, so the output stays valid UTF-8.
    String::from_utf8_lossy(&encode(raw.as_bytes())).into_owned()
}

/// [`decode`] over text.
pub fn decode_str(encoded: &str) -> Result<String, DecodeError> {
    String::from_utf8(decode(encoded.as_bytes())?).map_err(|_| DecodeError::InvalidUtf8)
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}
