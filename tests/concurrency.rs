#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use sanction_codec::core::{hex, operator, timestamp};
use sanction_codec::error::{CodecError, ProviderError};
use sanction_codec::model::Operator;
use sanction_codec::store::{BoundedPool, ConnectionProvider, ConnectionSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use uuid::Uuid;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_codec_calls() {
    let mut tasks = JoinSet::new();
    for worker in 0..8u64 {
        tasks.spawn(async move {
            for i in 0..10_000u64 {
                let uuid = Uuid::from_u64_pair(worker + 1, i);
                let op = Operator::Player(uuid);
                let bytes = operator::encode(&op);
                assert_eq!(operator::decode(&bytes).unwrap(), op);
                assert_eq!(hex::decode(&hex::encode(&bytes)).unwrap(), bytes.to_vec());

                let t = (i as i64) - 5_000;
                assert_eq!(timestamp::decode(timestamp::encode(t)), t);
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
}

/// Provider that counts closes and takes a moment to hand out connections
#[derive(Default)]
struct SlowProvider {
    closes: AtomicUsize,
    served: AtomicUsize,
}

#[async_trait]
impl ConnectionProvider for SlowProvider {
    type Connection = ();

    async fn get_connection(&self) -> Result<(), ProviderError> {
        tokio::time::sleep(Duration::from_millis(2)).await;
        if self.closes.load(Ordering::SeqCst) > 0 {
            panic!("connection requested after close");
        }
        self.served.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn close_races_with_acquire() {
    let source = Arc::new(ConnectionSource::new(
        SlowProvider::default(),
        Duration::from_secs(5),
    ));

    let mut tasks = JoinSet::new();
    for _ in 0..64 {
        let source = source.clone();
        tasks.spawn(async move {
            match source.acquire().await {
                Ok(()) => true,
                Err(CodecError::Closed) => false,
                Err(e) => panic!("unexpected error: {e}"),
            }
        });
    }
    for _ in 0..4 {
        let source = source.clone();
        tasks.spawn(async move {
            source.close().await;
            false
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }

    assert_eq!(source.provider().closes.load(Ordering::SeqCst), 1);
    assert!(matches!(source.acquire().await, Err(CodecError::Closed)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exhausted_pool_times_out() {
    let pool = BoundedPool::new(2, 2, || Ok(()));
    let source = ConnectionSource::new(pool, Duration::from_millis(50));

    let first = source.acquire().await.unwrap();
    let second = source.acquire().await.unwrap();

    match source.acquire().await {
        Err(CodecError::StorageUnavailable(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("pool should be exhausted"),
    }

    drop(first);
    let third = source.acquire().await;
    assert!(third.is_ok());
    drop(second);

    source.close().await;
    assert!(matches!(source.acquire().await, Err(CodecError::Closed)));
}
