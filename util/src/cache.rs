//! Short-lived response cache shared across read-only aggregate endpoints.
//!
//! The cache is a plain key-value store with a per-entry TTL. Entries expire
//! unconditionally after their TTL and are never invalidated by writes, so
//! cached aggregates may lag the datastore by up to the TTL. Keys are the
//! request path plus query string.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct CacheEntry {
    body: String,
    expires_at: Instant,
}

/// Cloneable handle to the shared response cache.
#[derive(Clone, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `key` if a live entry exists.
    ///
    /// An expired entry is removed on the way out and treated as a miss.
    pub async fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Some(entry.body.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.entries.write().await.remove(key);
        None
    }

    /// Returns whether `key` currently holds a live entry, without cloning the body.
    ///
    /// Used by the telemetry middleware to record `cache_hit` before dispatch.
    pub async fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| entry.expires_at > now)
    }

    /// Stores `body` under `key` for `ttl`. Overwrites any previous entry.
    pub async fn put(&self, key: impl Into<String>, body: impl Into<String>, ttl: Duration) {
        let entry = CacheEntry {
            body: body.into(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Number of entries currently stored, live or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ResponseCache;
    use std::time::Duration;

    #[tokio::test]
    async fn miss_before_first_put() {
        let cache = ResponseCache::new();
        assert!(cache.get("/api/dashboard").await.is_none());
        assert!(!cache.contains("/api/dashboard").await);
    }

    #[tokio::test]
    async fn hit_within_ttl() {
        let cache = ResponseCache::new();
        cache
            .put("/api/dashboard", "{\"x\":1}", Duration::from_secs(300))
            .await;

        assert_eq!(cache.get("/api/dashboard").await.as_deref(), Some("{\"x\":1}"));
        assert!(cache.contains("/api/dashboard").await);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = ResponseCache::new();
        cache
            .put("/api/courses/popular", "[]", Duration::from_secs(900))
            .await;

        tokio::time::advance(Duration::from_secs(899)).await;
        assert!(cache.contains("/api/courses/popular").await);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!cache.contains("/api/courses/popular").await);
        assert!(cache.get("/api/courses/popular").await.is_none());
        // Expired entry is dropped on read.
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn put_overwrites_previous_entry() {
        let cache = ResponseCache::new();
        cache.put("k", "old", Duration::from_secs(60)).await;
        cache.put("k", "new", Duration::from_secs(60)).await;

        assert_eq!(cache.get("k").await.as_deref(), Some("new"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let cache = ResponseCache::new();
        cache
            .put("/api/dashboard", "dash", Duration::from_secs(300))
            .await;

        assert!(cache.get("/api/dashboard?x=1").await.is_none());
        assert_eq!(cache.get("/api/dashboard").await.as_deref(), Some("dash"));
    }
}
