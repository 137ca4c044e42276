//! # Timestamp Codec
//!
//! Order-preserving transform between signed millisecond instants and the
//! unsigned 64-bit values stored in `start`/`end` columns.
//!
//! Flipping the sign bit offsets the signed range `[i64::MIN, i64::MAX]`
//! onto `[0, u64::MAX]`, so an engine that compares unsigned integers (or
//! sorts the big-endian bytes) orders instants correctly, including
//! pre-epoch ones.
//!
//! ```text
//! i64::MIN -> 0x0000_0000_0000_0000
//!        0 -> 0x8000_0000_0000_0000
//! i64::MAX -> 0xFFFF_FFFF_FFFF_FFFF
//! ```

const SIGN_BIT: u64 = 1 << 63;

/// Encode a signed instant as its unsigned, order-preserving representation.
#[inline]
pub const fn encode(t: i64) -> u64 {
    (t as u64) ^ SIGN_BIT
}

/// Inverse of [`encode`].
#[inline]
pub const fn decode(u: u64) -> i64 {
    (u ^ SIGN_BIT) as i64
}

/// Encode as 8 big-endian bytes; byte order matches numeric order.
#[inline]
pub const fn encode_be_bytes(t: i64) -> [u8; 8] {
    encode(t).to_be_bytes()
}

/// Inverse of [`encode_be_bytes`].
#[inline]
pub const fn decode_be_bytes(bytes: [u8; 8]) -> i64 {
    decode(u64::from_be_bytes(bytes))
}
