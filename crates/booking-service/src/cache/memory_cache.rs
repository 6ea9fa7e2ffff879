//! In-memory cache implementation with LRU eviction.
//!
//! A single mutex guards the ordered map, so every operation is serialized
//! and concurrent writers to the same key resolve as last-writer-wins.
//! Expiry is lazy: an expired entry is removed when it is next read, or in
//! bulk by [`CacheStore::purge_expired`].

use super::CacheStore;
use async_trait::async_trait;
use booking_core::BookingResult;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: String, ttl: Duration) -> Self {
        // A TTL past the clock's range never expires
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };
        Self { value, expires_at }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Process-local cache store with TTL and optional LRU capacity bound.
pub struct MemoryCacheStore {
    entries: Mutex<LruCache<String, CacheEntry>>,
    capacity: usize,
    default_ttl: Duration,
}

impl MemoryCacheStore {
    /// Creates a store holding at most `capacity` entries (0 = unbounded).
    #[must_use]
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let entries = match NonZeroUsize::new(capacity) {
            Some(cap) => {
                info!("In-memory cache initialized with max size: {}", cap);
                LruCache::new(cap)
            }
            None => {
                info!("In-memory cache initialized with no size limit");
                LruCache::unbounded()
            }
        };

        Self {
            entries: Mutex::new(entries),
            capacity,
            default_ttl,
        }
    }

    /// Configured capacity (0 = unbounded).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// TTL applied when `set` is called without one.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> BookingResult<Option<String>> {
        let mut entries = self.entries.lock();

        let expired = match entries.peek(key) {
            Some(entry) => entry.is_expired(Instant::now()),
            None => {
                debug!("Cache miss for key '{}'", key);
                return Ok(None);
            }
        };

        if expired {
            entries.pop(key);
            debug!("Cache entry '{}' expired", key);
            return Ok(None);
        }

        // `get` promotes the key to most-recently-used
        let value = entries.get(key).map(|entry| entry.value.clone());
        debug!("Cache hit for key '{}'", key);
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> BookingResult<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value.to_string(), ttl);

        let mut entries = self.entries.lock();
        if let Some((evicted, _)) = entries.push(key.to_string(), entry) {
            if evicted != key {
                debug!("Evicted least recently used key '{}'", evicted);
            }
        }

        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> BookingResult<()> {
        let removed = self.entries.lock().pop(key).is_some();
        debug!("Deleted key '{}': {}", key, removed);
        Ok(())
    }

    async fn purge_expired(&self) -> BookingResult<usize> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        if !expired.is_empty() {
            debug!("Purged {} expired cache entries", expired.len());
        }
        Ok(expired.len())
    }

    async fn entry_count(&self) -> BookingResult<usize> {
        Ok(self.entries.lock().len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiry() {
        let cache = MemoryCacheStore::new(0, HOUR);
        cache.set("k", "v", Some(Duration::from_secs(1))).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));

        tokio::time::advance(Duration::from_millis(1001)).await;

        assert!(cache.get("k").await.unwrap().is_none());
        // The expired read removed the entry
        assert_eq!(cache.entry_count().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_expires() {
        let cache = MemoryCacheStore::new(0, HOUR);
        cache.set("k", "v", Some(Duration::ZERO)).await.unwrap();

        tokio::time::advance(Duration::from_secs(10 * 365 * 24 * 3600)).await;

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_ttl_never_expires() {
        let cache = MemoryCacheStore::new(0, Duration::from_secs(u64::MAX / 2));
        cache.set("default", "v", None).await.unwrap();
        cache.set("explicit", "v", Some(Duration::MAX)).await.unwrap();

        tokio::time::advance(Duration::from_secs(10 * 365 * 24 * 3600)).await;

        assert_eq!(cache.get("default").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.get("explicit").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.purge_expired().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_applies_when_omitted() {
        let cache = MemoryCacheStore::new(0, Duration::from_secs(60));
        cache.set("k", "v", None).await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lru_evicts_first_inserted() {
        let cache = MemoryCacheStore::new(3, HOUR);
        for key in ["a", "b", "c", "d"] {
            cache.set(key, key, None).await.unwrap();
        }

        assert!(cache.get("a").await.unwrap().is_none());
        for key in ["b", "c", "d"] {
            assert!(cache.get(key).await.unwrap().is_some(), "{key} should survive");
        }
        assert_eq!(cache.entry_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_read_protects_from_eviction() {
        let cache = MemoryCacheStore::new(3, HOUR);
        for key in ["a", "b", "c"] {
            cache.set(key, key, None).await.unwrap();
        }

        assert!(cache.get("a").await.unwrap().is_some());
        cache.set("d", "d", None).await.unwrap();

        assert!(cache.get("b").await.unwrap().is_none());
        assert!(cache.get("a").await.unwrap().is_some());
        assert!(cache.get("c").await.unwrap().is_some());
        assert!(cache.get("d").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_recency() {
        let cache = MemoryCacheStore::new(2, HOUR);
        cache.set("a", "1", None).await.unwrap();
        cache.set("b", "1", None).await.unwrap();
        cache.set("a", "2", None).await.unwrap();
        cache.set("c", "1", None).await.unwrap();

        assert!(cache.get("b").await.unwrap().is_none());
        assert_eq!(cache.get("a").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_entry_still_evicted_for_capacity() {
        let cache = MemoryCacheStore::new(1, HOUR);
        cache.set("pinned", "v", Some(Duration::ZERO)).await.unwrap();
        cache.set("other", "v", None).await.unwrap();

        assert!(cache.get("pinned").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unbounded_when_capacity_zero() {
        let cache = MemoryCacheStore::new(0, HOUR);
        for i in 0..1000 {
            cache.set(&format!("k{i}"), "v", None).await.unwrap();
        }
        assert_eq!(cache.entry_count().await.unwrap(), 1000);
        assert!(cache.get("k0").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = MemoryCacheStore::new(0, HOUR);
        cache.set("k", "v", None).await.unwrap();

        assert!(cache.delete("k").await.is_ok());
        assert!(cache.delete("k").await.is_ok());
        assert!(cache.delete("never-set").await.is_ok());
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = MemoryCacheStore::new(0, HOUR);
        cache.set("short1", "v", Some(Duration::from_secs(1))).await.unwrap();
        cache.set("short2", "v", Some(Duration::from_secs(1))).await.unwrap();
        cache.set("long", "v", None).await.unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(cache.purge_expired().await.unwrap(), 2);
        assert_eq!(cache.entry_count().await.unwrap(), 1);
        assert_eq!(cache.purge_expired().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_respect_capacity() {
        let cache = Arc::new(MemoryCacheStore::new(8, HOUR));

        let handles: Vec<_> = (0..16)
            .map(|task| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move {
                    for i in 0..50 {
                        let key = format!("t{task}-{i}");
                        cache.set(&key, "v", None).await.unwrap();
                        let _ = cache.get(&key).await.unwrap();
                        cache.set("shared", &key, None).await.unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert!(cache.entry_count().await.unwrap() <= 8);
        assert!(cache.get("shared").await.unwrap().is_some());
    }

    #[test]
    fn test_accessors() {
        let cache = MemoryCacheStore::new(5, HOUR);
        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.default_ttl(), HOUR);
        assert_eq!(cache.backend(), "memory");
    }
}
