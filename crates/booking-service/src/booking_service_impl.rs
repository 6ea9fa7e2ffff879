//! Cache-aside booking service implementation.

use crate::aggregator::{build_aggregated_view, find_staff_by_email, services_for_staff, Aggregator};
use crate::booking_service::BookingService;
use crate::cache::{cache_keys, CacheFacade};
use crate::upstream::{CredentialProvider, UpstreamSource};
use async_trait::async_trait;
use booking_core::{
    AggregatedServiceView, BookingError, BookingResult, Business, Collection, Service,
    StaffMember,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Booking service that consults the cache before the booking API.
///
/// Listings are cached under the store's default TTL, the aggregated view
/// under `staff_services_ttl`. A listing built from a partial fan-out is
/// cached like a complete one; a not-found outcome is never cached.
pub struct BookingServiceImpl {
    aggregator: Aggregator,
    credentials: Arc<dyn CredentialProvider>,
    cache: CacheFacade,
    staff_services_ttl: Duration,
}

impl BookingServiceImpl {
    /// Creates a new booking service.
    pub fn new(
        upstream: Arc<dyn UpstreamSource>,
        credentials: Arc<dyn CredentialProvider>,
        cache: CacheFacade,
        staff_services_ttl: Duration,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(upstream),
            credentials,
            cache,
            staff_services_ttl,
        }
    }

    async fn cached_listing<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        self.cache
            .lookup::<Collection<T>>(key)
            .await
            .map(Collection::into_inner)
    }

    async fn remember_listing<T: Serialize>(&self, key: &str, items: Vec<T>) -> Vec<T> {
        let listing = Collection::new(items);
        self.cache.store(key, &listing, None).await;
        listing.into_inner()
    }
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    async fn list_businesses(&self) -> BookingResult<Vec<Business>> {
        let key = cache_keys::businesses();
        if let Some(businesses) = self.cached_listing(&key).await {
            return Ok(businesses);
        }

        let token = self.credentials.access_token().await?;
        let businesses = self.aggregator.list_businesses(&token).await?;

        info!("Fetched {} businesses", businesses.len());
        Ok(self.remember_listing(&key, businesses).await)
    }

    async fn list_staff(&self, business_id: Option<&str>) -> BookingResult<Vec<StaffMember>> {
        let key = cache_keys::staff(business_id);
        if let Some(staff) = self.cached_listing(&key).await {
            return Ok(staff);
        }

        let staff = match business_id {
            Some(id) => {
                let token = self.credentials.access_token().await?;
                self.aggregator.staff_for_business(&token, id).await?
            }
            None => {
                let businesses = self.list_businesses().await?;
                let token = self.credentials.access_token().await?;
                self.aggregator
                    .fan_out_staff(&token, &businesses)
                    .await
                    .into_items("staff")?
            }
        };

        debug!("Built staff listing '{}' with {} members", key, staff.len());
        Ok(self.remember_listing(&key, staff).await)
    }

    async fn list_services(&self, business_id: Option<&str>) -> BookingResult<Vec<Service>> {
        let key = cache_keys::services(business_id);
        if let Some(services) = self.cached_listing(&key).await {
            return Ok(services);
        }

        let services = match business_id {
            Some(id) => {
                let token = self.credentials.access_token().await?;
                self.aggregator.services_for_business(&token, id).await?
            }
            None => {
                let businesses = self.list_businesses().await?;
                let token = self.credentials.access_token().await?;
                self.aggregator
                    .fan_out_services(&token, &businesses)
                    .await
                    .into_items("services")?
            }
        };

        debug!("Built services listing '{}' with {} services", key, services.len());
        Ok(self.remember_listing(&key, services).await)
    }

    async fn find_staff_by_email(&self, email: &str) -> BookingResult<Option<StaffMember>> {
        let staff = self.list_staff(None).await?;
        Ok(find_staff_by_email(&staff, email).cloned())
    }

    async fn services_for_staff(&self, staff_id: &str) -> BookingResult<Vec<Service>> {
        let services = self.list_services(None).await?;
        Ok(services_for_staff(services, staff_id))
    }

    async fn aggregate_services_by_email(
        &self,
        email: &str,
    ) -> BookingResult<AggregatedServiceView> {
        let key = cache_keys::staff_services(email);
        if let Some(view) = self.cache.lookup::<AggregatedServiceView>(&key).await {
            return Ok(view);
        }

        let staff_member = self
            .find_staff_by_email(email)
            .await?
            .ok_or_else(|| BookingError::not_found("StaffMember", email))?;

        let services = self.list_services(None).await?;
        let businesses = self.list_businesses().await?;
        let view = build_aggregated_view(staff_member, services, &businesses);

        info!(
            "Aggregated {} business groups for '{}'",
            view.services_by_business.len(),
            email
        );
        self.cache
            .store(&key, &view, Some(self.staff_services_ttl))
            .await;
        Ok(view)
    }
}
