//! Cache Engine Module
//!
//! Thread-safe access API over [`CacheStore`], plus the lifecycle of the
//! background eviction task.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cache::{CacheStats, CacheStore, Payload, StatsRecorder, Value};
use crate::error::{CacheError, Result};
use crate::tasks::{effective_interval, spawn_eviction_task};

// == Cache ==
/// In-memory cache engine.
///
/// One reader-writer lock guards the whole store: lookups take the shared
/// lock, mutations take the exclusive lock for their full
/// check-then-modify sequence. Values handed out are copies.
#[derive(Debug)]
pub struct Cache {
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<StatsRecorder>,
    eviction_interval: Duration,
    shutdown: CancellationToken,
    eviction_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its eviction task.
    ///
    /// A zero `eviction_interval` falls back to
    /// [`crate::tasks::DEFAULT_EVICTION_INTERVAL`]; anything above
    /// [`crate::tasks::MAX_EVICTION_INTERVAL`] is clamped to it.
    ///
    /// # Panics
    /// Must be called from within a tokio runtime.
    pub fn new(eviction_interval: Duration) -> Self {
        let eviction_interval = effective_interval(eviction_interval);
        let store = Arc::new(RwLock::new(CacheStore::new()));
        let stats = Arc::new(StatsRecorder::new());
        let shutdown = CancellationToken::new();

        let handle = spawn_eviction_task(
            store.clone(),
            stats.clone(),
            eviction_interval,
            shutdown.clone(),
        );

        Self {
            store,
            stats,
            eviction_interval,
            shutdown,
            eviction_handle: Mutex::new(Some(handle)),
        }
    }

    /// Returns the interval the eviction task runs at.
    pub fn eviction_interval(&self) -> Duration {
        self.eviction_interval
    }

    // == Set ==
    /// Stores `value` at `key`, replacing any prior value of any shape.
    /// A zero `ttl` means the key never expires.
    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        self.store.write().await.set(key.into(), value, ttl);
    }

    // == Get ==
    /// Returns a copy of the value at `key`, or None if it is absent or
    /// expired.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let value = self.store.read().await.get(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Remove ==
    /// Deletes `key`. Removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) {
        self.store.write().await.remove(key);
    }

    // == Keys ==
    /// Returns all non-expired keys in no particular order.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    // == RPush ==
    /// Appends `value` to the list at `key`, creating the list if the key
    /// is absent or expired. `ttl` only applies when a list is created.
    pub async fn rpush(&self, key: &str, value: Payload, ttl: Duration) -> Result<()> {
        self.store.write().await.rpush(key, value, ttl)
    }

    // == LIndex ==
    /// Returns the list element at `index`, or `Payload::Null` past the end.
    pub async fn lindex(&self, key: &str, index: usize) -> Result<Payload> {
        let result = self.store.read().await.lindex(key, index);
        self.record_lookup(&result);
        result
    }

    // == HSet ==
    /// Merges `fields` into the hash at `key`, creating the hash if the key
    /// is absent or expired. `ttl` only applies when a hash is created.
    pub async fn hset(
        &self,
        key: &str,
        fields: HashMap<String, Payload>,
        ttl: Duration,
    ) -> Result<()> {
        self.store.write().await.hset(key, fields, ttl)
    }

    // == HGet ==
    /// Returns `field` of the hash at `key`, or `Payload::Null` if the
    /// field is missing.
    pub async fn hget(&self, key: &str, field: &str) -> Result<Payload> {
        let result = self.store.read().await.hget(key, field);
        self.record_lookup(&result);
        result
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let stored = self.store.read().await.len();
        self.stats.snapshot(stored)
    }

    /// Returns true if `key` is still physically stored, even when expired.
    pub async fn contains_raw(&self, key: &str) -> bool {
        self.store.read().await.contains_raw(key)
    }

    // == Shutdown ==
    /// Stops the eviction task and waits for it to exit.
    ///
    /// A sweep already in progress finishes first. Later calls return
    /// immediately. In-flight access calls are not affected.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();

        let handle = match self.eviction_handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Eviction task ended abnormally: {}", e);
            }
            info!("Cache shut down");
        }
    }

    fn record_lookup(&self, result: &Result<Payload>) {
        match result {
            Ok(_) => self.stats.record_hit(),
            Err(CacheError::NotFound(_)) => self.stats.record_miss(),
            Err(_) => {}
        }
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_cache() -> Cache {
        Cache::new(Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_new_default_eviction() {
        let cache = Cache::new(Duration::ZERO);
        assert_eq!(cache.eviction_interval(), crate::tasks::DEFAULT_EVICTION_INTERVAL);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_new_with_huge_interval_keeps_sweeper_alive() {
        let cache = Cache::new(Duration::MAX);
        assert_eq!(cache.eviction_interval(), crate::tasks::MAX_EVICTION_INTERVAL);

        tokio::time::sleep(Duration::from_millis(20)).await;
        {
            let guard = cache.eviction_handle.lock().unwrap();
            let handle = guard.as_ref().expect("handle present before shutdown");
            assert!(!handle.is_finished());
        }

        cache.set("k", Value::Scalar(json!(1)), Duration::ZERO).await;
        assert!(cache.get("k").await.is_some());

        cache.shutdown().await;
        assert!(cache.eviction_handle.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_set_with_ttl() {
        let cache = test_cache();

        cache
            .set("test-key", Value::Scalar(json!("test-value")), Duration::from_millis(100))
            .await;
        assert_eq!(
            cache.get("test-key").await,
            Some(Value::Scalar(json!("test-value")))
        );

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(cache.get("test-key").await.is_none());
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_remove_and_keys() {
        let cache = test_cache();

        for i in 0..3 {
            cache
                .set(format!("test-key-{}", i), Value::Scalar(json!(i)), Duration::from_secs(5))
                .await;
        }
        cache.remove("test-key-1").await;
        cache.remove("never-existed").await;

        let mut keys = cache.keys().await;
        keys.sort();
        assert_eq!(keys, vec!["test-key-0", "test-key-2"]);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_and_hash_operations() {
        let cache = test_cache();

        cache.rpush("list", json!(1), Duration::ZERO).await.unwrap();
        cache.rpush("list", json!(2), Duration::ZERO).await.unwrap();
        assert_eq!(cache.lindex("list", 1).await.unwrap(), json!(2));

        let fields: HashMap<String, Payload> = [("a".to_string(), json!(1))].into();
        cache.hset("hash", fields, Duration::ZERO).await.unwrap();
        assert_eq!(cache.hget("hash", "a").await.unwrap(), json!(1));

        let err = cache.rpush("hash", json!(3), Duration::ZERO).await.unwrap_err();
        assert!(err.is_wrong_type());
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_stats_track_reads() {
        let cache = test_cache();

        cache.set("k", Value::Scalar(json!(1)), Duration::ZERO).await;
        cache.get("k").await;
        cache.get("missing").await;
        let _ = cache.lindex("missing", 0).await;
        let _ = cache.hget("k", "field").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.stored_entries, 1);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_eviction_reclaims_expired_entries() {
        let cache = Cache::new(Duration::from_millis(50));

        cache
            .set("short", Value::Scalar(json!("v")), Duration::from_millis(30))
            .await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!cache.contains_raw("short").await);
        assert_eq!(cache.stats().await.evictions, 1);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_is_repeatable() {
        let cache = test_cache();

        cache.shutdown().await;
        cache.shutdown().await;

        // Access API keeps working after the eviction task stops
        cache.set("k", Value::Scalar(json!(1)), Duration::ZERO).await;
        assert!(cache.get("k").await.is_some());
    }
}
