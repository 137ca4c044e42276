//! # Domain Model
//!
//! Identity values that flow through the codecs. All of them are immutable
//! and cheap to clone; none carries storage state.
//!
//! The enums are exhaustive on purpose: adding an operator or victim kind
//! fails compilation at every encode and decode site until it is handled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::{CodecError, Result};

/// The actor who issued an enforcement action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// The system itself
    Console,
    /// A specific player. Never the nil UUID, which is reserved for [`Operator::Console`].
    Player(Uuid),
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Console => f.write_str("console"),
            Operator::Player(uuid) => write!(f, "player:{uuid}"),
        }
    }
}

/// The entity an enforcement action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Victim {
    Player(Uuid),
    Address(IpAddr),
}

impl Victim {
    /// Discriminant stored next to the victim bytes
    pub fn kind(&self) -> VictimKind {
        match self {
            Victim::Player(_) => VictimKind::Player,
            Victim::Address(_) => VictimKind::Address,
        }
    }
}

impl fmt::Display for Victim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Victim::Player(uuid) => write!(f, "player:{uuid}"),
            Victim::Address(ip) => write!(f, "address:{ip}"),
        }
    }
}

/// Stored tag telling a 16-byte player UUID apart from a 16-byte IPv6 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictimKind {
    Player,
    Address,
}

impl VictimKind {
    /// Integer written to the `victim_type` column
    pub fn as_i32(self) -> i32 {
        match self {
            VictimKind::Player => 0,
            VictimKind::Address => 1,
        }
    }

    /// Parse a stored `victim_type` value
    pub fn from_i32(tag: i32) -> Result<Self> {
        match tag {
            0 => Ok(VictimKind::Player),
            1 => Ok(VictimKind::Address),
            other => Err(CodecError::UnknownDiscriminant(other)),
        }
    }
}

/// Jurisdiction an enforcement action applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Global,
    Server(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Server(name) => write!(f, "server:{name}"),
        }
    }
}

/// Resolver-defined storage key for a [`Scope`]. Opaque to the codecs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(pub String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signed milliseconds since the Unix epoch. Pre-epoch values are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(pub i64);

impl EpochMillis {
    /// Current wall-clock time
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Convert a `SystemTime`, flooring to whole milliseconds and saturating
    /// at the `i64` bounds.
    pub fn from_system_time(time: SystemTime) -> Self {
        let millis = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => {
                let before = before.duration();
                let mut whole = before.as_millis();
                if before.subsec_nanos() % 1_000_000 != 0 {
                    whole += 1;
                }
                i64::try_from(whole).map(|m| -m).unwrap_or(i64::MIN)
            }
        };
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_victim_kind_tags() {
        assert_eq!(VictimKind::Player.as_i32(), 0);
        assert_eq!(VictimKind::Address.as_i32(), 1);
        assert_eq!(VictimKind::from_i32(1).unwrap(), VictimKind::Address);
        assert!(matches!(
            VictimKind::from_i32(7),
            Err(CodecError::UnknownDiscriminant(7))
        ));
    }

    #[test]
    fn test_victim_kind_of_value() {
        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        assert_eq!(Victim::Address(ip).kind(), VictimKind::Address);
        assert_eq!(Victim::Player(Uuid::new_v4()).kind(), VictimKind::Player);
    }

    #[test]
    fn test_epoch_millis_before_epoch() {
        let time = UNIX_EPOCH - Duration::from_millis(1500);
        assert_eq!(EpochMillis::from_system_time(time), EpochMillis(-1500));
    }

    #[test]
    fn test_epoch_millis_floors_sub_millisecond() {
        let before = UNIX_EPOCH - Duration::from_micros(1500);
        assert_eq!(EpochMillis::from_system_time(before), EpochMillis(-2));

        let after = UNIX_EPOCH + Duration::from_micros(1500);
        assert_eq!(EpochMillis::from_system_time(after), EpochMillis(1));
    }

    #[test]
    fn test_json_forms() {
        let key = StorageKey::new("lobby");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"lobby\"");
        assert_eq!(serde_json::to_string(&EpochMillis(-7)).unwrap(), "-7");

        let victim = Victim::Address("10.0.0.9".parse().unwrap());
        let json = serde_json::to_string(&victim).unwrap();
        assert_eq!(serde_json::from_str::<Victim>(&json).unwrap(), victim);
    }

    #[test]
    fn test_display() {
        assert_eq!(Operator::Console.to_string(), "console");
        assert_eq!(Scope::Server("lobby".into()).to_string(), "server:lobby");
    }
}
