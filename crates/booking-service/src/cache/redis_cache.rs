//! Redis-based cache implementation.

use super::CacheStore;
use async_trait::async_trait;
use booking_core::{BookingError, BookingResult};
use deadpool_redis::redis::{self, AsyncCommands};
use deadpool_redis::{Config, Pool, Runtime};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on the startup connectivity check.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Redis-backed cache store shared between gateway instances.
///
/// Expiry is delegated to Redis. When the startup check fails the store is
/// left without a pool for the rest of the process lifetime and every
/// operation reports a cache error, which the facade treats as a miss.
pub struct RedisCacheStore {
    pool: Option<Pool>,
    default_ttl: Duration,
}

impl RedisCacheStore {
    /// Builds a pool for `url` and verifies it with a `PING`.
    ///
    /// Never fails: an invalid URL or an unreachable server yields an
    /// unavailable store.
    pub async fn connect(url: &str, default_ttl: Duration) -> Self {
        info!("Connecting to Redis cache...");

        match tokio::time::timeout(CONNECT_TIMEOUT, Self::open_pool(url)).await {
            Ok(Ok(pool)) => {
                info!("Redis cache connection established");
                Self {
                    pool: Some(pool),
                    default_ttl,
                }
            }
            Ok(Err(e)) => {
                warn!("Redis cache unavailable, caching disabled: {}", e);
                Self::unavailable(default_ttl)
            }
            Err(_) => {
                warn!(
                    "Redis cache did not answer within {}s, caching disabled",
                    CONNECT_TIMEOUT.as_secs()
                );
                Self::unavailable(default_ttl)
            }
        }
    }

    /// Creates a store with no connection; every operation errors.
    #[must_use]
    pub const fn unavailable(default_ttl: Duration) -> Self {
        Self {
            pool: None,
            default_ttl,
        }
    }

    /// Whether the startup check succeeded.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.pool.is_some()
    }

    async fn open_pool(url: &str) -> BookingResult<Pool> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| BookingError::cache(format!("Failed to create Redis pool: {}", e)))?;

        let mut conn = pool
            .get()
            .await
            .map_err(|e| BookingError::cache(format!("Failed to get Redis connection: {}", e)))?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| BookingError::cache(format!("Redis PING failed: {}", e)))?;

        Ok(pool)
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> BookingResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                BookingError::cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(BookingError::cache("Redis cache is unavailable")),
        }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> BookingResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| BookingError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> BookingResult<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let mut conn = self.get_conn().await?;

        if ttl.is_zero() {
            conn.set::<_, _, ()>(key, value)
                .await
                .map_err(|e| BookingError::cache(format!("Failed to set key '{}': {}", key, e)))?;
            debug!("Cached key '{}' without expiry", key);
            return Ok(());
        }

        // Redis expiry has whole-second resolution
        let ttl_secs = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| BookingError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> BookingResult<()> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| BookingError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(())
    }

    async fn purge_expired(&self) -> BookingResult<usize> {
        // Redis evicts expired keys on its own
        Ok(0)
    }

    async fn entry_count(&self) -> BookingResult<usize> {
        let mut conn = self.get_conn().await?;
        redis::cmd("DBSIZE")
            .query_async::<usize>(&mut conn)
            .await
            .map_err(|e| BookingError::cache(format!("Failed to read key count: {}", e)))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
