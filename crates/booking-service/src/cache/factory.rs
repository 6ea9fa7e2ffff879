//! Chooses the cache backend at startup.

use super::{CacheStore, MemoryCacheStore, RedisCacheStore};
use booking_config::{CacheConfig, CacheKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the cache store selected by `config`.
///
/// Redis without a URL falls back to the in-memory store. An unreachable
/// Redis server does not fall back: the store stays in place and reports
/// errors, so every read is a miss.
pub async fn create_cache_store(config: &CacheConfig) -> Arc<dyn CacheStore> {
    match (config.kind, config.redis_url()) {
        (CacheKind::Redis, Some(url)) => {
            info!("Using Redis cache backend");
            Arc::new(RedisCacheStore::connect(url, config.default_ttl()).await)
        }
        (CacheKind::Redis, None) => {
            warn!("Redis cache requested without redis_url; falling back to in-memory cache");
            memory_store(config)
        }
        (CacheKind::Memory, _) => {
            info!("Using in-memory cache backend");
            memory_store(config)
        }
    }
}

fn memory_store(config: &CacheConfig) -> Arc<dyn CacheStore> {
    Arc::new(MemoryCacheStore::new(config.max_entries, config.default_ttl()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend() {
        let store = create_cache_store(&CacheConfig::default()).await;
        assert_eq!(store.backend(), "memory");
    }

    #[tokio::test]
    async fn test_redis_without_url_falls_back_to_memory() {
        let config = CacheConfig {
            kind: CacheKind::Redis,
            redis_url: Some("   ".to_string()),
            ..CacheConfig::default()
        };
        let store = create_cache_store(&config).await;
        assert_eq!(store.backend(), "memory");
    }

    #[tokio::test]
    async fn test_unreachable_redis_stays_redis() {
        let config = CacheConfig {
            kind: CacheKind::Redis,
            redis_url: Some("redis://127.0.0.1:1".to_string()),
            ..CacheConfig::default()
        };
        let store = create_cache_store(&config).await;
        assert_eq!(store.backend(), "redis");
        assert!(store.get("businesses:all").await.is_err());
    }
}
