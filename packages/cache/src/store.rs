// ABOUTME: Raw string key-value stores with per-entry expiry
// ABOUTME: In-memory backend on the tokio clock and a disabled backend that never stores

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Backend for the cache facade. Values are opaque strings.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Stored value, or `None` when absent or expired
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: String, ttl: Duration);

    async fn delete(&self, key: &str);

    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Process-local cache; entries vanish on restart
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, expired ones included until the next write or purge
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        drop_expired(&mut entries, Instant::now())
    }
}

fn drop_expired(entries: &mut HashMap<String, Entry>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now));
    let removed = before - entries.len();
    if removed > 0 {
        debug!("Purged {} expired cache entries", removed);
    }
    removed
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Expired: evict unless a writer refreshed it in between
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(Instant::now()))
        {
            entries.remove(key);
            debug!("Cache entry {} expired", key);
        }
        None
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        let now = Instant::now();
        let entry = Entry {
            value,
            expires_at: now + ttl,
        };
        let mut entries = self.entries.write().await;
        drop_expired(&mut entries, now);
        entries.insert(key.to_string(), entry);
    }

    async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Store used when caching is switched off; every read misses
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCache;

#[async_trait]
impl CacheStore for DisabledCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) {}

    async fn delete(&self, _key: &str) {}

    fn is_enabled(&self) -> bool {
        false
    }
}
