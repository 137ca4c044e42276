//! Canonical 16-byte UUID layout: most significant 8 bytes first, then the
//! least significant 8, both big-endian. This matches `Uuid::as_bytes`.

use crate::error::{CodecError, Result};
use uuid::Uuid;

/// Stored width of a UUID
pub const UUID_LEN: usize = 16;

#[inline]
pub fn to_bytes(uuid: &Uuid) -> [u8; UUID_LEN] {
    *uuid.as_bytes()
}

pub fn from_bytes(bytes: &[u8]) -> Result<Uuid> {
    let arr: [u8; UUID_LEN] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
        expected: "16",
        actual: bytes.len(),
    })?;
    Ok(Uuid::from_bytes(arr))
}
