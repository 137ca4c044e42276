//! # sanction-codec
//!
//! Binary identity codec for punishment storage.
//!
//! Converts operators, victims, scopes, network addresses and timestamps
//! into the fixed-width values stored in punishment tables, and back. The
//! byte layouts are a permanent on-disk contract; see [`core`] for the
//! column table.
//!
//! ## Modules
//! - [`core`]: the pure codecs
//! - [`model`]: identity value types
//! - [`scope`]: scope resolution through an injected [`scope::Scoper`]
//! - [`store`]: parameter binding, row reading, connection lifecycle
//! - [`config`], [`error`], [`utils`]: ambient plumbing
//!
//! ## Example
//! ```rust
//! use sanction_codec::core::operator;
//! use sanction_codec::model::Operator;
//!
//! let bytes = operator::encode(&Operator::Console);
//! assert_eq!(bytes, [0u8; 16]);
//! assert_eq!(operator::decode(&bytes).unwrap(), Operator::Console);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod scope;
pub mod store;
pub mod utils;

pub use error::{CodecError, Result};
pub use model::{EpochMillis, Operator, Scope, StorageKey, Victim, VictimKind};
