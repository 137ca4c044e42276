//! # Scope Adapter
//!
//! Scopes are stored as whatever key the injected [`Scoper`] assigns them.
//! The scoper owns the name <-> key mapping; the adapter only delegates and
//! keeps no name state of its own.

use std::sync::Arc;

use tracing::trace;

use crate::config::ScopeConfig;
use crate::model::{Scope, StorageKey};

/// Resolves scopes to storage keys and back.
pub trait Scoper: Send + Sync {
    /// Storage key for a scope
    fn resolve_key(&self, scope: &Scope) -> StorageKey;

    /// Scope for a stored key
    fn scope_for_key(&self, key: &StorageKey) -> Scope;
}

/// Encode a scope with the given resolver.
pub fn encode(scope: &Scope, scoper: &dyn Scoper) -> StorageKey {
    scoper.resolve_key(scope)
}

/// Binds scopes through an injected [`Scoper`].
#[derive(Clone)]
pub struct ScopeAdapter {
    scoper: Arc<dyn Scoper>,
}

impl ScopeAdapter {
    pub fn new(scoper: Arc<dyn Scoper>) -> Self {
        Self { scoper }
    }

    pub fn encode(&self, scope: &Scope) -> StorageKey {
        let key = encode(scope, self.scoper.as_ref());
        trace!(%scope, %key, "Resolved scope key");
        key
    }

    /// The injected resolver, for read paths that rebuild a [`Scope`]
    pub fn scoper(&self) -> &dyn Scoper {
        self.scoper.as_ref()
    }
}

impl std::fmt::Debug for ScopeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeAdapter").finish_non_exhaustive()
    }
}

/// Reference resolver: the global scope maps to a configured key, every
/// server scope maps to its own name.
///
/// A server literally named like the global key reads back as global.
#[derive(Debug, Clone)]
pub struct BasicScoper {
    global_key: String,
}

impl BasicScoper {
    pub fn new(global_key: impl Into<String>) -> Self {
        Self {
            global_key: global_key.into(),
        }
    }

    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(config.global_key.clone())
    }
}

impl Default for BasicScoper {
    fn default() -> Self {
        Self::from_config(&ScopeConfig::default())
    }
}

impl Scoper for BasicScoper {
    fn resolve_key(&self, scope: &Scope) -> StorageKey {
        match scope {
            Scope::Global => StorageKey::new(self.global_key.as_str()),
            Scope::Server(name) => StorageKey::new(name.as_str()),
        }
    }

    fn scope_for_key(&self, key: &StorageKey) -> Scope {
        if key.as_str() == self.global_key {
            Scope::Global
        } else {
            Scope::Server(key.as_str().to_string())
        }
    }
}
