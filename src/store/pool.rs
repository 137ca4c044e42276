//! # Bounded Connection Pool
//!
//! Reference [`ConnectionProvider`] that hands out connections made by a
//! user-supplied factory, at most `max_size` at a time.
//!
//! - Idle connections are reused before the factory is called again
//! - A [`PooledConnection`] returns itself to the idle list on drop
//! - Checkout waits on a semaphore when the pool is exhausted
//! - `close()` drops idle connections and rejects further checkouts
//!
//! ## Usage
//! ```rust,no_run
//! use sanction_codec::store::BoundedPool;
//!
//! # async fn run() {
//! let pool = BoundedPool::new(8, 4, || Ok(Vec::<u8>::new()));
//! let conn = pool.checkout().await.unwrap();
//! // Use connection...
//! // Connection automatically returned to pool on drop
//! # }
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, trace};

use crate::config::PoolConfig;
use crate::error::{CodecError, ProviderError};
use crate::store::source::ConnectionProvider;

type Factory<C> = dyn Fn() -> Result<C, ProviderError> + Send + Sync;

struct Shared<C> {
    idle: Mutex<Vec<C>>,
    idle_capacity: usize,
    permits: Arc<Semaphore>,
    closed: AtomicBool,
}

/// A checked-out connection that returns itself to the pool when dropped
pub struct PooledConnection<C> {
    conn: Option<C>,
    shared: Arc<Shared<C>>,
    _permit: OwnedSemaphorePermit,
}

impl<C> PooledConnection<C> {
    /// Detach the connection from the pool. Its slot is freed, but it will
    /// not be reused.
    pub fn into_inner(mut self) -> C {
        match self.conn.take() {
            Some(conn) => conn,
            None => unreachable!("pooled connection taken before drop"),
        }
    }
}

impl<C> Drop for PooledConnection<C> {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        // Checked under the idle lock so a concurrent shutdown cannot clear
        // the list between the check and the push.
        if let Ok(mut idle) = self.shared.idle.lock() {
            if !self.shared.closed.load(Ordering::Acquire) && idle.len() < self.shared.idle_capacity {
                idle.push(conn);
            }
        }
        // Otherwise, let it be dropped
    }
}

impl<C> std::ops::Deref for PooledConnection<C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        match self.conn.as_ref() {
            Some(conn) => conn,
            None => unreachable!("pooled connection taken before drop"),
        }
    }
}

impl<C> std::ops::DerefMut for PooledConnection<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self.conn.as_mut() {
            Some(conn) => conn,
            None => unreachable!("pooled connection taken before drop"),
        }
    }
}

/// Thread-safe bounded pool
pub struct BoundedPool<C> {
    shared: Arc<Shared<C>>,
    factory: Arc<Factory<C>>,
    max_size: usize,
}

impl<C: Send + 'static> BoundedPool<C> {
    /// Create a pool allowing `max_size` checked-out connections and keeping
    /// up to `idle_capacity` idle ones. `max_size` is clamped to
    /// `Semaphore::MAX_PERMITS`.
    pub fn new<F>(max_size: usize, idle_capacity: usize, factory: F) -> Self
    where
        F: Fn() -> Result<C, ProviderError> + Send + Sync + 'static,
    {
        let max_size = max_size.min(Semaphore::MAX_PERMITS);
        Self {
            shared: Arc::new(Shared {
                idle: Mutex::new(Vec::with_capacity(idle_capacity)),
                idle_capacity,
                permits: Arc::new(Semaphore::new(max_size)),
                closed: AtomicBool::new(false),
            }),
            factory: Arc::new(factory),
            max_size,
        }
    }

    /// Build a pool from validated configuration.
    pub fn from_config<F>(config: &PoolConfig, factory: F) -> Result<Self, CodecError>
    where
        F: Fn() -> Result<C, ProviderError> + Send + Sync + 'static,
    {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(CodecError::ConfigError(format!(
                "Invalid pool configuration:\n  - {}",
                errors.join("\n  - ")
            )));
        }
        Ok(Self::new(config.max_connections, config.idle_capacity, factory))
    }

    /// Check out a connection, waiting while the pool is exhausted.
    pub async fn checkout(&self) -> Result<PooledConnection<C>, ProviderError> {
        let permit = self
            .shared
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ProviderError::Closed)?;

        let reused = self.shared.idle.lock().ok().and_then(|mut idle| idle.pop());
        let conn = match reused {
            Some(conn) => {
                trace!("Reusing idle connection");
                conn
            }
            None => {
                trace!("Opening new connection");
                (self.factory)()?
            }
        };

        Ok(PooledConnection {
            conn: Some(conn),
            shared: self.shared.clone(),
            _permit: permit,
        })
    }

    /// Check out a connection only if one is free right now.
    pub fn try_checkout(&self) -> Result<PooledConnection<C>, ProviderError> {
        let permit = self
            .shared
            .permits
            .clone()
            .try_acquire_owned()
            .map_err(|e| match e {
                tokio::sync::TryAcquireError::Closed => ProviderError::Closed,
                tokio::sync::TryAcquireError::NoPermits => ProviderError::Exhausted,
            })?;

        let reused = self.shared.idle.lock().ok().and_then(|mut idle| idle.pop());
        let conn = match reused {
            Some(conn) => conn,
            None => (self.factory)()?,
        };

        Ok(PooledConnection {
            conn: Some(conn),
            shared: self.shared.clone(),
            _permit: permit,
        })
    }

    /// Number of idle connections ready for reuse
    pub fn available(&self) -> usize {
        self.shared.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    /// Number of connections currently checked out
    pub fn in_use(&self) -> usize {
        self.max_size
            .saturating_sub(self.shared.permits.available_permits())
    }

    /// Drop idle connections and reject further checkouts.
    pub fn shutdown(&self) {
        self.shared.closed.store(true, Ordering::Release);
        self.shared.permits.close();
        if let Ok(mut idle) = self.shared.idle.lock() {
            idle.clear();
        }
        debug!("Connection pool shut down");
    }
}

impl<C> Clone for BoundedPool<C> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            factory: self.factory.clone(),
            max_size: self.max_size,
        }
    }
}

#[async_trait]
impl<C: Send + 'static> ConnectionProvider for BoundedPool<C> {
    type Connection = PooledConnection<C>;

    async fn get_connection(&self) -> Result<PooledConnection<C>, ProviderError> {
        self.checkout().await
    }

    async fn close(&self) {
        self.shutdown();
    }
}
