//! Cache store trait for abstracted caching operations.

use booking_core::{BookingResult, Interface};
use async_trait::async_trait;
use std::time::Duration;

/// Key/value store with per-entry TTL.
///
/// Values are opaque strings (the facade stores JSON). Implementations must
/// never hand back an expired entry.
///
/// TTL semantics for [`set`](CacheStore::set):
/// - `None` uses the store's configured default TTL
/// - `Some(Duration::ZERO)` stores an entry that never expires by time
///   (a bounded store may still evict it for capacity)
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Get a raw value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get(&self, key: &str) -> BookingResult<Option<String>>;

    /// Set a raw value in the cache.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> BookingResult<()>;

    /// Delete a value from the cache. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> BookingResult<()>;

    /// Drop every expired entry, returning how many were removed.
    async fn purge_expired(&self) -> BookingResult<usize>;

    /// Number of entries currently held.
    async fn entry_count(&self) -> BookingResult<usize>;

    /// Short backend name for diagnostics.
    fn backend(&self) -> &'static str;
}
