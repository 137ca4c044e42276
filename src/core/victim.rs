//! # Victim Codec
//!
//! Players are stored as their 16-byte UUID, addresses as raw 4 or 16
//! address bytes. A 16-byte value is ambiguous between a UUID and an IPv6
//! address, so decoding always takes the [`VictimKind`] stored in the
//! `victim_type` column. Byte patterns are never used to guess.

use crate::core::uuid_bytes;
use crate::core::{address, hex};
use crate::error::Result;
use crate::model::{Victim, VictimKind};

/// Encode a victim into its column value.
pub fn encode(victim: &Victim) -> Vec<u8> {
    match victim {
        Victim::Player(uuid) => uuid_bytes::to_bytes(uuid).to_vec(),
        Victim::Address(ip) => address::encode(ip),
    }
}

/// Discriminant to store alongside [`encode`]'s output.
#[inline]
pub fn kind(victim: &Victim) -> VictimKind {
    victim.kind()
}

/// Decode a column value using its stored discriminant.
pub fn decode(bytes: &[u8], kind: VictimKind) -> Result<Victim> {
    match kind {
        VictimKind::Player => uuid_bytes::from_bytes(bytes).map(Victim::Player),
        VictimKind::Address => address::decode(bytes, None).map(Victim::Address),
    }
}

impl Victim {
    /// Hex form of the stored bytes. The kind is not included.
    pub fn to_hex(&self) -> String {
        hex::encode(&encode(self))
    }

    /// Parse the hex form produced by [`Victim::to_hex`]
    pub fn from_hex(kind: VictimKind, text: &str) -> Result<Self> {
        decode(&hex::decode(text)?, kind)
    }
}
