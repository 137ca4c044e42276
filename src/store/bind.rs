//! # Parameter Binding
//!
//! Turns typed identity values into the plain values a parameterized
//! statement accepts. The query layer binds [`SqlValue`]s and never sees
//! the domain types.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::core::{address, operator, timestamp, victim};
use crate::model::{EpochMillis, Operator, Scope, StorageKey, Victim, VictimKind};
use crate::scope::ScopeAdapter;

/// A value ready to bind into a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlValue {
    Bytes(Vec<u8>),
    UnsignedBigInt(u64),
    Integer(i32),
    Text(String),
}

/// Conversion into a bindable value
pub trait ToSqlValue {
    fn to_sql_value(&self) -> SqlValue;
}

impl ToSqlValue for Operator {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Bytes(operator::encode(self).to_vec())
    }
}

impl ToSqlValue for Victim {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Bytes(victim::encode(self))
    }
}

impl ToSqlValue for VictimKind {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Integer(self.as_i32())
    }
}

impl ToSqlValue for IpAddr {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Bytes(address::encode(self))
    }
}

impl ToSqlValue for EpochMillis {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::UnsignedBigInt(timestamp::encode(self.0))
    }
}

impl ToSqlValue for StorageKey {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.0.clone())
    }
}

/// Binds values, resolving scopes through the injected adapter.
#[derive(Debug, Clone)]
pub struct ParamBinder {
    scopes: ScopeAdapter,
}

impl ParamBinder {
    pub fn new(scopes: ScopeAdapter) -> Self {
        Self { scopes }
    }

    pub fn bind(&self, value: &dyn ToSqlValue) -> SqlValue {
        value.to_sql_value()
    }

    pub fn bind_scope(&self, scope: &Scope) -> SqlValue {
        self.scopes.encode(scope).to_sql_value()
    }

    /// `victim_type` and `victim` values, in that order
    pub fn bind_victim(&self, victim: &Victim) -> [SqlValue; 2] {
        [victim.kind().to_sql_value(), victim.to_sql_value()]
    }

    pub fn scopes(&self) -> &ScopeAdapter {
        &self.scopes
    }
}
