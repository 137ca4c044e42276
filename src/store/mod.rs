//! # Storage Plumbing
//!
//! Where the codecs meet the relational store: binding typed values as
//! statement parameters, reading them back from rows, and managing the
//! connection source.
//!
//! ## Components
//! - **bind**: typed value -> [`SqlValue`]
//! - **row**: [`RowAccessor`] -> typed value
//! - **source**: [`ConnectionSource`], a close-once wrapper over an injected provider
//! - **pool**: [`BoundedPool`], a reference provider

pub mod bind;
pub mod pool;
pub mod row;
pub mod source;

pub use bind::{ParamBinder, SqlValue, ToSqlValue};
pub use pool::{BoundedPool, PooledConnection};
pub use row::{columns, MapRow, RowAccessor};
pub use source::{ConnectionProvider, ConnectionSource};
