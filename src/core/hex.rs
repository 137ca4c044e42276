//! # Byte/Hex Codec
//!
//! Bidirectional conversion between byte arrays and hex strings, used for
//! human-readable export and import of stored binary values.
//!
//! Encoding always emits lowercase digits, two per byte, high nibble first.
//! Decoding is case-insensitive.
//!
//! ## Usage
//! ```rust
//! use sanction_codec::core::hex;
//!
//! let text = hex::encode(&[0x00, 0xFF, 0x10]);
//! assert_eq!(text, "00ff10");
//! assert_eq!(hex::decode("00FF10").unwrap(), vec![0x00, 0xFF, 0x10]);
//! ```

use crate::error::{constants, CodecError, Result};
use ::hex::FromHexError;

/// Encode bytes as a lowercase hex string of exactly `2 * bytes.len()` characters.
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Decode a hex string into bytes.
///
/// Fails with [`CodecError::MalformedHex`] if the length is odd or any
/// character is outside `[0-9a-fA-F]`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    ::hex::decode(text).map_err(malformed)
}

/// Decode a hex string into a fixed-width array.
///
/// Malformed input is [`CodecError::MalformedHex`]; well-formed hex of the
/// wrong width is [`CodecError::InvalidLength`].
pub fn decode_fixed<const N: usize>(text: &str) -> Result<[u8; N]> {
    let bytes = decode(text)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| CodecError::InvalidLength {
        expected: width_label(N),
        actual,
    })
}

fn width_label(n: usize) -> &'static str {
    match n {
        4 => "4",
        8 => "8",
        16 => "16",
        _ => "fixed-width",
    }
}

fn malformed(err: FromHexError) -> CodecError {
    let reason = match err {
        FromHexError::OddLength => constants::ERR_ODD_HEX_LENGTH.to_string(),
        FromHexError::InvalidHexCharacter { c, index } => {
            format!("invalid character {c:?} at index {index}")
        }
        FromHexError::InvalidStringLength => "invalid string length".to_string(),
    };
    CodecError::MalformedHex { reason }
}
