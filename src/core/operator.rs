//! # Operator Codec
//!
//! Operators are stored in a 16-byte column. A player is stored as its UUID;
//! the console is stored as the all-zero sentinel below, which no player is
//! ever issued.
//!
//! ```text
//! Console        -> 00000000 00000000 00000000 00000000
//! Player(uuid)   -> uuid, big-endian
//! ```
//!
//! No code outside this module compares raw operator bytes.

use tracing::trace;
use uuid::Uuid;

use crate::core::hex;
use crate::core::uuid_bytes::{self, UUID_LEN};
use crate::error::Result;
use crate::model::Operator;

/// Reserved value of the `operator` column meaning [`Operator::Console`].
pub const CONSOLE_SENTINEL: [u8; UUID_LEN] = [0u8; UUID_LEN];

/// Encode an operator into its 16-byte column value.
pub fn encode(op: &Operator) -> [u8; UUID_LEN] {
    match op {
        Operator::Console => CONSOLE_SENTINEL,
        Operator::Player(uuid) => uuid_bytes::to_bytes(uuid),
    }
}

/// Decode a 16-byte column value.
///
/// Any other width is [`CodecError::InvalidLength`](crate::error::CodecError::InvalidLength).
pub fn decode(bytes: &[u8]) -> Result<Operator> {
    let uuid = uuid_bytes::from_bytes(bytes)?;
    if uuid.is_nil() {
        trace!("Operator column holds the console sentinel");
        return Ok(Operator::Console);
    }
    Ok(Operator::Player(uuid))
}

impl Operator {
    /// Player operator, or `None` for the nil UUID, which would collide with
    /// the console sentinel.
    pub fn player(uuid: Uuid) -> Option<Self> {
        (!uuid.is_nil()).then_some(Operator::Player(uuid))
    }

    /// Hex form of the stored bytes
    pub fn to_hex(&self) -> String {
        hex::encode(&encode(self))
    }

    /// Parse the hex form produced by [`Operator::to_hex`]
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes: [u8; UUID_LEN] = hex::decode_fixed(text)?;
        decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_console_is_sentinel() {
        assert_eq!(encode(&Operator::Console), [0u8; 16]);
        assert_eq!(decode(&[0u8; 16]).unwrap(), Operator::Console);
    }

    #[test]
    fn test_player_known_bytes() {
        let uuid = Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap();
        let bytes = encode(&Operator::Player(uuid));
        assert_eq!(
            bytes,
            [
                0x12, 0x3e, 0x45, 0x67, 0xe8, 0x9b, 0x12, 0xd3, 0xa4, 0x56, 0x42, 0x66, 0x14,
                0x17, 0x40, 0x00
            ]
        );
        assert_eq!(decode(&bytes).unwrap(), Operator::Player(uuid));
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(
            decode(&[1u8; 4]),
            Err(CodecError::InvalidLength { actual: 4, .. })
        ));
    }

    #[test]
    fn test_player_constructor_rejects_nil() {
        assert!(Operator::player(Uuid::nil()).is_none());
        assert!(Operator::player(Uuid::new_v4()).is_some());
    }

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(Operator::Console.to_hex(), "0".repeat(32));
        let op = Operator::Player(Uuid::new_v4());
        assert_eq!(Operator::from_hex(&op.to_hex()).unwrap(), op);
        assert_eq!(Operator::from_hex(&op.to_hex().to_uppercase()).unwrap(), op);
    }
}
