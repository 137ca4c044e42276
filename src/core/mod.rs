//! # Core Codecs
//!
//! Pure, stateless conversions between identity values and their stored
//! binary form. Every function here is safe to call from any thread.
//!
//! ## Components
//! - **hex**: byte array <-> lowercase hex string
//! - **timestamp**: signed instant <-> order-preserving unsigned value
//! - **address**: IP address <-> raw 4/16 bytes
//! - **uuid_bytes**: UUID <-> canonical 16-byte layout
//! - **operator**: operator <-> 16 bytes, with the console sentinel
//! - **victim**: victim <-> bytes, decoded with a stored discriminant
//!
//! ## Column Contract
//! ```text
//! operator     16 bytes      all-zero => console, else UUID
//! victim       4/16 bytes    UUID or raw address, per victim_type
//! victim_type  integer       0 = player, 1 = address
//! start/end    u64           millis offset by 2^63
//! ```

pub mod address;
pub mod hex;
pub mod operator;
pub mod timestamp;
pub mod uuid_bytes;
pub mod victim;
