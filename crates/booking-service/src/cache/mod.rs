//! Caching infrastructure for the service layer.
//!
//! A single [`CacheStore`] abstraction with two backends: a bounded
//! in-memory LRU store and a shared Redis store. The backend is chosen once
//! at startup by [`create_cache_store`] and handed to a [`CacheFacade`],
//! which owns the key scheme and makes every cache failure non-fatal.

mod cache_interface;
pub mod cache_keys;
mod facade;
mod factory;
mod memory_cache;
mod redis_cache;

pub use cache_interface::CacheStore;
pub use facade::CacheFacade;
pub use factory::create_cache_store;
pub use memory_cache::MemoryCacheStore;
pub use redis_cache::{RedisCacheStore, CONNECT_TIMEOUT};
