//! Application state for Axum handlers.

use booking_service::{BookingService, CacheStore};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<dyn BookingService>,
    /// The same store the booking service caches into; used for health.
    pub cache: Arc<dyn CacheStore>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(booking_service: Arc<dyn BookingService>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            booking_service,
            cache,
        }
    }
}
