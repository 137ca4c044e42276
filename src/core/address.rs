//! # Address Codec
//!
//! Raw network address bytes: 4 for IPv4, 16 for IPv6, with no header or
//! length prefix. The byte count alone determines the family.

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Width of a stored IPv4 address
pub const IPV4_LEN: usize = 4;

/// Width of a stored IPv6 address
pub const IPV6_LEN: usize = 16;

/// Address family, used as an optional hint when decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Family of an existing address
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    /// Stored width for this family
    pub fn byte_len(self) -> usize {
        match self {
            AddressFamily::V4 => IPV4_LEN,
            AddressFamily::V6 => IPV6_LEN,
        }
    }

    fn label(self) -> &'static str {
        match self {
            AddressFamily::V4 => "4",
            AddressFamily::V6 => "16",
        }
    }
}

/// Raw address bytes in network order.
pub fn encode(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

/// Rebuild an address from 4 or 16 raw bytes.
///
/// When `hint` is given the length must agree with it; IPv4-mapped IPv6
/// addresses are not unwrapped.
pub fn decode(bytes: &[u8], hint: Option<AddressFamily>) -> Result<IpAddr> {
    if let Some(family) = hint {
        if bytes.len() != family.byte_len() {
            return Err(CodecError::InvalidLength {
                expected: family.label(),
                actual: bytes.len(),
            });
        }
    }

    if let Ok(octets) = <[u8; IPV4_LEN]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; IPV6_LEN]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }

    Err(CodecError::InvalidLength {
        expected: "4 or 16",
        actual: bytes.len(),
    })
}
