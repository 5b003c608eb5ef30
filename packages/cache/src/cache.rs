// ABOUTME: Typed cache facade over a CacheStore
// ABOUTME: JSON-encodes values and implements read-through get_or_fetch

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{CacheStore, DisabledCache, MemoryCache};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to encode cache value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Shared handle to the configured cache backend
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryCache::new()))
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledCache))
    }

    /// Memory-backed when `enabled`, otherwise a cache that never stores
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::memory()
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    /// Cached value for `key`; a value that no longer decodes as `T` reads as a miss
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value).map_err(|source| CacheError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, raw, ttl).await;
        Ok(())
    }

    pub async fn delete(&self, key: &str) {
        self.store.delete(key).await;
    }

    /// Read-through lookup: a hit skips `fetch` entirely, a miss runs it and stores the result.
    /// Errors from `fetch` are returned and nothing is cached.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key).await {
            debug!("Cache hit: {}", key);
            return Ok(hit);
        }

        debug!("Cache miss: {}", key);
        let value = fetch().await?;
        if let Err(e) = self.set(key, &value, ttl).await {
            warn!("{}", e);
        }
        Ok(value)
    }

    /// `get_or_fetch` for lookups that cannot fail
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let result: Result<T, Infallible> = self
            .get_or_fetch(key, ttl, move || async move { Ok(compute().await) })
            .await;
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// `get_or_compute` that stores nothing when `is_fallback` flags the computed
    /// value as a placeholder, so the next lookup computes again
    pub async fn get_or_compute_unless<T, F, Fut, P>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
        is_fallback: P,
    ) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
        P: FnOnce(&T) -> bool,
    {
        if let Some(hit) = self.get(key).await {
            debug!("Cache hit: {}", key);
            return hit;
        }

        debug!("Cache miss: {}", key);
        let value = compute().await;
        if is_fallback(&value) {
            debug!("Not caching fallback value for {}", key);
        } else if let Err(e) = self.set(key, &value, ttl).await {
            warn!("{}", e);
        }
        value
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(120);

    async fn counted_fetch(calls: &AtomicUsize, value: u64) -> Result<u64, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl_skips_fetch() {
        let cache = Cache::memory();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch("players:10", TTL, || counted_fetch(&calls, 100))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        let second = cache
            .get_or_fetch("players:10", TTL, || counted_fetch(&calls, 200))
            .await
            .unwrap();

        assert_eq!(first, 100);
        assert_eq!(second, 100);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_runs_again_after_ttl() {
        let cache = Cache::memory();
        let calls = AtomicUsize::new(0);

        cache
            .get_or_fetch("players:10", TTL, || counted_fetch(&calls, 100))
            .await
            .unwrap();
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let refreshed = cache
            .get_or_fetch("players:10", TTL, || counted_fetch(&calls, 200))
            .await
            .unwrap();

        assert_eq!(refreshed, 200);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = Cache::memory();

        let err = cache
            .get_or_fetch::<u64, _, _, _>("lib:1", TTL, || async { Err("boom".to_string()) })
            .await
            .unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(cache.get::<u64>("lib:1").await, None);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_recomputes() {
        let cache = Cache::disabled();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            cache
                .get_or_fetch("players:10", TTL, || counted_fetch(&calls, 1))
                .await
                .unwrap();
        }

        assert!(!cache.is_enabled());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_undecodable_value_reads_as_miss() {
        let store = Arc::new(MemoryCache::new());
        store.set("store:10", "not json".to_string(), TTL).await;
        let cache = Cache::new(store);

        assert_eq!(cache.get::<Vec<String>>("store:10").await, None);

        let value = cache
            .get_or_compute("store:10", TTL, || async { vec!["fresh".to_string()] })
            .await;
        assert_eq!(value, vec!["fresh".to_string()]);
        assert_eq!(
            cache.get::<Vec<String>>("store:10").await,
            Some(vec!["fresh".to_string()])
        );
    }

    #[tokio::test]
    async fn test_delete_forces_refetch() {
        let cache = Cache::memory();
        let calls = AtomicUsize::new(0);

        cache
            .get_or_fetch("lib:1", TTL, || counted_fetch(&calls, 1))
            .await
            .unwrap();
        cache.delete("lib:1").await;
        cache
            .get_or_fetch("lib:1", TTL, || counted_fetch(&calls, 2))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fallback_value_is_not_cached() {
        let cache = Cache::memory();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_compute_unless(
                "store:10",
                TTL,
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    String::new()
                },
                |value: &String| value.is_empty(),
            )
            .await;
        assert_eq!(first, "");
        assert_eq!(cache.get::<String>("store:10").await, None);

        let second = cache
            .get_or_compute_unless(
                "store:10",
                TTL,
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    "Counter-Strike".to_string()
                },
                |value: &String| value.is_empty(),
            )
            .await;
        assert_eq!(second, "Counter-Strike");
        assert_eq!(
            cache.get::<String>("store:10").await.as_deref(),
            Some("Counter-Strike")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_flag() {
        assert!(Cache::from_flag(true).is_enabled());
        assert!(!Cache::from_flag(false).is_enabled());
    }
}
