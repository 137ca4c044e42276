//! # Error Types
//!
//! Error handling for the identity codecs and the connection layer.
//!
//! Codecs either return a fully valid typed value or fail with one of the
//! variants below. Nothing is decoded on a best-effort basis.
//!
//! ## Error Categories
//! - **Decoding Errors**: malformed hex, wrong byte widths, unknown stored tags
//! - **Row Errors**: a column missing from a row, or holding the wrong type
//! - **Storage Errors**: connection acquisition failure, use after close
//! - **Configuration Errors**: loading or validation failures
//!
//! ## Example Usage
//! ```rust
//! use sanction_codec::core::hex;
//! use sanction_codec::error::{CodecError, Result};
//! use tracing::{error, info};
//!
//! fn parse(input: &str) -> Result<Vec<u8>> {
//!     hex::decode(input)
//! }
//!
//! match parse("0") {
//!     Ok(bytes) => info!(len = bytes.len(), "Decoded hex"),
//!     Err(CodecError::MalformedHex { reason }) => error!(%reason, "Bad hex"),
//!     Err(e) => error!(error = %e, "Unexpected failure"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Hex decoding
    pub const ERR_ODD_HEX_LENGTH: &str = "hex string has odd length";

    /// Connection errors
    pub const ERR_ACQUIRE_TIMEOUT: &str = "Timed out waiting for a connection";
}

// CodecError is the primary error type for all codec and storage operations
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed hex: {reason}")]
    MalformedHex { reason: String },

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: &'static str, actual: usize },

    #[error("Unknown victim discriminant: {0}")]
    UnknownDiscriminant(i32),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column {column} is not {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Connection source closed")]
    Closed,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Failure reported by a [`ConnectionProvider`](crate::store::ConnectionProvider).
///
/// Kept apart from [`CodecError`] so provider implementations never have to
/// construct codec-level variants; the connection source maps these into
/// [`CodecError::StorageUnavailable`].
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Pool exhausted")]
    Exhausted,

    #[error("Pool closed")]
    Closed,

    #[error("Backend unreachable: {0}")]
    Unreachable(String),
}

impl From<ProviderError> for CodecError {
    fn from(err: ProviderError) -> Self {
        CodecError::StorageUnavailable(err.to_string())
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
