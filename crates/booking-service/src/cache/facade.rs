//! Typed, best-effort access to the configured cache store.

use super::CacheStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Wraps a [`CacheStore`] with JSON (de)serialization.
///
/// A cache problem never fails a request: store errors and undecodable
/// entries are logged and reported as a miss, failed writes are dropped.
#[derive(Clone)]
pub struct CacheFacade {
    store: Arc<dyn CacheStore>,
}

impl CacheFacade {
    /// Creates a facade over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn CacheStore> {
        Arc::clone(&self.store)
    }

    /// Reads and decodes `key`.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Cache read for '{}' failed, treating as miss: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Cached value for '{}' is not decodable, treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Encodes and writes `value` under `key`.
    ///
    /// `ttl` follows [`CacheStore::set`]: `None` uses the store default.
    pub async fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not encode value for cache key '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, &raw, ttl).await {
            warn!("Cache write for '{}' failed: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::test_support::FailingStore;
    use booking_core::{Collection, StaffMember};

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_store_then_lookup() {
        let cache = CacheFacade::new(Arc::new(MemoryCacheStore::new(0, HOUR)));
        let staff = Collection::new(vec![StaffMember::new("s1", "a@b.c")]);

        cache.store("staff:all", &staff, None).await;
        let cached: Option<Collection<StaffMember>> = cache.lookup("staff:all").await;

        assert_eq!(cached, Some(staff));
    }

    #[tokio::test]
    async fn test_malformed_entry_is_a_miss() {
        let store = Arc::new(MemoryCacheStore::new(0, HOUR));
        store.set("staff:all", "{not json", None).await.unwrap();
        let cache = CacheFacade::new(store);

        let cached: Option<Collection<StaffMember>> = cache.lookup("staff:all").await;
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_store_errors_are_swallowed() {
        let cache = CacheFacade::new(Arc::new(FailingStore));

        cache.store("k", &vec![1, 2, 3], None).await;
        let cached: Option<Vec<i32>> = cache.lookup("k").await;

        assert!(cached.is_none());
    }
}
