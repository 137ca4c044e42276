//! # Row Reading
//!
//! Reads typed identity values out of a row that hands back raw column
//! values. The row accessor is supplied by the query layer; [`MapRow`] is
//! an in-memory implementation for tests and adapters.

use std::collections::HashMap;
use std::net::IpAddr;

use crate::core::{address, operator, timestamp, victim};
use crate::error::{CodecError, Result};
use crate::model::{EpochMillis, Operator, Scope, StorageKey, Victim, VictimKind};
use crate::scope::Scoper;
use crate::store::bind::SqlValue;

/// Column names of the punishment tables
pub mod columns {
    pub const OPERATOR: &str = "operator";
    pub const VICTIM: &str = "victim";
    pub const VICTIM_TYPE: &str = "victim_type";
    pub const SCOPE: &str = "scope";
    pub const START: &str = "start";
    pub const END: &str = "end";
    pub const ADDRESS: &str = "address";
}

/// Access to named columns of a single result row.
pub trait RowAccessor {
    fn get_bytes(&self, column: &str) -> Result<Vec<u8>>;
    fn get_u64(&self, column: &str) -> Result<u64>;
    fn get_i32(&self, column: &str) -> Result<i32>;
    fn get_string(&self, column: &str) -> Result<String>;
}

pub fn read_operator<R: RowAccessor + ?Sized>(row: &R) -> Result<Operator> {
    operator::decode(&row.get_bytes(columns::OPERATOR)?)
}

/// Reads `victim_type` first; the victim bytes are meaningless without it.
pub fn read_victim<R: RowAccessor + ?Sized>(row: &R) -> Result<Victim> {
    let kind = VictimKind::from_i32(row.get_i32(columns::VICTIM_TYPE)?)?;
    victim::decode(&row.get_bytes(columns::VICTIM)?, kind)
}

pub fn read_timestamp<R: RowAccessor + ?Sized>(row: &R, column: &str) -> Result<EpochMillis> {
    Ok(EpochMillis(timestamp::decode(row.get_u64(column)?)))
}

pub fn read_address<R: RowAccessor + ?Sized>(row: &R, column: &str) -> Result<IpAddr> {
    address::decode(&row.get_bytes(column)?, None)
}

pub fn read_scope<R: RowAccessor + ?Sized>(row: &R, scoper: &dyn Scoper) -> Result<Scope> {
    let key = StorageKey(row.get_string(columns::SCOPE)?);
    Ok(scoper.scope_for_key(&key))
}

/// Row backed by a map of column name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapRow {
    values: HashMap<String, SqlValue>,
}

impl MapRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: SqlValue) {
        self.values.insert(column.into(), value);
    }

    pub fn with(mut self, column: impl Into<String>, value: SqlValue) -> Self {
        self.insert(column, value);
        self
    }

    fn get(&self, column: &str) -> Result<&SqlValue> {
        self.values
            .get(column)
            .ok_or_else(|| CodecError::MissingColumn(column.to_string()))
    }

    fn type_error(column: &str, expected: &'static str) -> CodecError {
        CodecError::ColumnType {
            column: column.to_string(),
            expected,
        }
    }
}

impl RowAccessor for MapRow {
    fn get_bytes(&self, column: &str) -> Result<Vec<u8>> {
        match self.get(column)? {
            SqlValue::Bytes(bytes) => Ok(bytes.clone()),
            _ => Err(Self::type_error(column, "bytes")),
        }
    }

    fn get_u64(&self, column: &str) -> Result<u64> {
        match self.get(column)? {
            SqlValue::UnsignedBigInt(v) => Ok(*v),
            _ => Err(Self::type_error(column, "an unsigned bigint")),
        }
    }

    fn get_i32(&self, column: &str) -> Result<i32> {
        match self.get(column)? {
            SqlValue::Integer(v) => Ok(*v),
            _ => Err(Self::type_error(column, "an integer")),
        }
    }

    fn get_string(&self, column: &str) -> Result<String> {
        match self.get(column)? {
            SqlValue::Text(s) => Ok(s.clone()),
            _ => Err(Self::type_error(column, "text")),
        }
    }
}
