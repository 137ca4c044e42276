//! # Connection Source
//!
//! Lifecycle wrapper around an injected [`ConnectionProvider`].
//!
//! The wrapper owns a closed flag behind an async `RwLock`: acquisitions
//! hold the read side for their whole duration and `close()` takes the
//! write side, so a close never overlaps an in-flight acquire and no
//! acquire starts against a closed provider. The provider's own `close()`
//! runs at most once.
//!
//! ## Usage
//! ```rust,no_run
//! use sanction_codec::store::{BoundedPool, ConnectionSource};
//! use std::time::Duration;
//!
//! # async fn run() -> sanction_codec::error::Result<()> {
//! let pool = BoundedPool::new(4, 4, || Ok(String::from("conn")));
//! let source = ConnectionSource::new(pool, Duration::from_secs(5));
//! let conn = source.acquire().await?;
//! drop(conn);
//! source.close().await;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::config::PoolConfig;
use crate::error::{constants, CodecError, ProviderError, Result};

/// Externally supplied pooled-connection provider.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Connection: Send;

    /// Obtain a connection. May wait for one to become free.
    async fn get_connection(&self) -> std::result::Result<Self::Connection, ProviderError>;

    /// Release the provider's resources. Not required to be idempotent.
    async fn close(&self);
}

pub struct ConnectionSource<P> {
    provider: P,
    closed: RwLock<bool>,
    default_timeout: Duration,
}

impl<P: ConnectionProvider> ConnectionSource<P> {
    pub fn new(provider: P, default_timeout: Duration) -> Self {
        Self {
            provider,
            closed: RwLock::new(false),
            default_timeout,
        }
    }

    pub fn from_config(provider: P, config: &PoolConfig) -> Self {
        Self::new(provider, config.acquire_timeout)
    }

    /// Acquire a connection using the configured timeout.
    pub async fn acquire(&self) -> Result<P::Connection> {
        self.acquire_with_timeout(self.default_timeout).await
    }

    /// Acquire a connection, waiting at most `timeout`.
    ///
    /// Provider failures and timeouts surface as
    /// [`CodecError::StorageUnavailable`] and are never retried here.
    #[instrument(skip(self))]
    pub async fn acquire_with_timeout(&self, timeout: Duration) -> Result<P::Connection> {
        let closed = self.closed.read().await;
        if *closed {
            return Err(CodecError::Closed);
        }

        match tokio::time::timeout(timeout, self.provider.get_connection()).await {
            Ok(Ok(conn)) => {
                debug!("Acquired connection");
                Ok(conn)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Connection provider failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(?timeout, "Timed out acquiring connection");
                Err(CodecError::StorageUnavailable(
                    constants::ERR_ACQUIRE_TIMEOUT.to_string(),
                ))
            }
        }
    }

    /// Close the provider. Safe to call any number of times.
    #[instrument(skip(self))]
    pub async fn close(&self) {
        let mut closed = self.closed.write().await;
        if *closed {
            debug!("Connection source already closed");
            return;
        }
        *closed = true;
        self.provider.close().await;
        debug!("Connection source closed");
    }

    pub async fn is_closed(&self) -> bool {
        *self.closed.read().await
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::pool::BoundedPool;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        handed_out: AtomicUsize,
        closes: AtomicUsize,
    }

    #[async_trait]
    impl ConnectionProvider for CountingProvider {
        type Connection = usize;

        async fn get_connection(&self) -> std::result::Result<usize, ProviderError> {
            Ok(self.handed_out.fetch_add(1, Ordering::SeqCst))
        }

        async fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct DownProvider;

    #[async_trait]
    impl ConnectionProvider for DownProvider {
        type Connection = ();

        async fn get_connection(&self) -> std::result::Result<(), ProviderError> {
            Err(ProviderError::Unreachable("connection refused".to_string()))
        }

        async fn close(&self) {}
    }

    struct StalledProvider;

    #[async_trait]
    impl ConnectionProvider for StalledProvider {
        type Connection = ();

        async fn get_connection(&self) -> std::result::Result<(), ProviderError> {
            std::future::pending().await
        }

        async fn close(&self) {}
    }

    #[tokio::test]
    async fn test_acquire_then_close() {
        let source = ConnectionSource::new(CountingProvider::default(), Duration::from_secs(1));
        assert_eq!(source.acquire().await.unwrap(), 0);
        assert_eq!(source.acquire().await.unwrap(), 1);

        source.close().await;
        assert!(source.is_closed().await);
        assert!(matches!(source.acquire().await, Err(CodecError::Closed)));
    }

    #[tokio::test]
    async fn test_close_twice_closes_provider_once() {
        let source = ConnectionSource::new(CountingProvider::default(), Duration::from_secs(1));
        source.close().await;
        source.close().await;
        assert_eq!(source.provider().closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_unavailable() {
        let source = ConnectionSource::new(DownProvider, Duration::from_secs(1));
        match source.acquire().await {
            Err(CodecError::StorageUnavailable(msg)) => assert!(msg.contains("refused")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let source = ConnectionSource::new(StalledProvider, Duration::from_secs(60));
        let result = source
            .acquire_with_timeout(Duration::from_millis(20))
            .await;
        match result {
            Err(CodecError::StorageUnavailable(msg)) => {
                assert_eq!(msg, constants::ERR_ACQUIRE_TIMEOUT)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_from_config_uses_acquire_timeout() {
        let config = PoolConfig {
            acquire_timeout: Duration::from_millis(20),
            ..PoolConfig::default()
        };
        let source = ConnectionSource::from_config(StalledProvider, &config);

        let started = tokio::time::Instant::now();
        assert!(matches!(
            source.acquire().await,
            Err(CodecError::StorageUnavailable(_))
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_from_config_with_pool_provider() {
        let config = PoolConfig::default();
        let pool = BoundedPool::from_config(&config, || Ok(7u8)).unwrap();
        let source = ConnectionSource::from_config(pool, &config);

        let conn = source.acquire().await.unwrap();
        assert_eq!(*conn, 7);
        assert_eq!(source.provider().in_use(), 1);
    }
}
