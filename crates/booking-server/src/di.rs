//! Component wiring.
//!
//! Every component is built exactly once from the loaded configuration and
//! shared by reference; nothing is global.

use booking_config::AppConfig;
use booking_core::BookingResult;
use booking_graph::{GraphClient, PasswordCredentialProvider};
use booking_rest::AppState;
use booking_service::{
    create_cache_store, BookingService, BookingServiceImpl, CacheFacade, CacheStore,
    CredentialProvider, UpstreamSource,
};
use std::sync::Arc;
use tracing::info;

/// The application's long-lived components.
pub struct AppComponents {
    cache: Arc<dyn CacheStore>,
    booking_service: Arc<dyn BookingService>,
}

impl AppComponents {
    /// Builds every component from configuration.
    ///
    /// The cache backend is chosen here, once, for the process lifetime.
    pub async fn build(config: &AppConfig) -> BookingResult<Self> {
        let cache = create_cache_store(&config.cache).await;
        let upstream: Arc<dyn UpstreamSource> = Arc::new(GraphClient::new(&config.graph)?);
        let credentials: Arc<dyn CredentialProvider> =
            Arc::new(PasswordCredentialProvider::new(config.graph.clone())?);

        Ok(Self::assemble(cache, upstream, credentials, config))
    }

    /// Builds the service layer around already-constructed collaborators.
    pub fn assemble(
        cache: Arc<dyn CacheStore>,
        upstream: Arc<dyn UpstreamSource>,
        credentials: Arc<dyn CredentialProvider>,
        config: &AppConfig,
    ) -> Self {
        let booking_service: Arc<dyn BookingService> = Arc::new(BookingServiceImpl::new(
            upstream,
            credentials,
            CacheFacade::new(Arc::clone(&cache)),
            config.cache.staff_services_ttl(),
        ));

        info!(
            "Components ready (cache backend: {}, aggregate TTL: {}s)",
            cache.backend(),
            config.cache.staff_services_ttl_secs
        );

        Self {
            cache,
            booking_service,
        }
    }

    /// The shared cache store.
    pub fn cache(&self) -> Arc<dyn CacheStore> {
        Arc::clone(&self.cache)
    }

    /// The cache-aside booking service.
    pub fn booking_service(&self) -> Arc<dyn BookingService> {
        Arc::clone(&self.booking_service)
    }

    /// Application state for the HTTP layer.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.booking_service(), self.cache())
    }
}
