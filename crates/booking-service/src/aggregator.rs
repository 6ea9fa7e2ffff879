//! Per-business fan-out and the cross-business joins.
//!
//! The booking API only lists staff and services one business at a time.
//! The [`Aggregator`] issues those calls concurrently and collects one
//! outcome per business into a [`FanOutReport`]; turning a report into a
//! flat listing is where the skip-on-failure policy lives.
//!
//! The joins ([`find_staff_by_email`], [`services_for_staff`],
//! [`group_services_by_business`]) are pure so the service layer can run
//! them over cached listings.

use crate::upstream::UpstreamSource;
use booking_core::{
    AggregatedServiceView, BookingResult, Business, BusinessScoped, Service, ServicesByBusiness,
    StaffMember, UNKNOWN_BUSINESS_NAME,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of one per-business fetch.
#[derive(Debug)]
pub struct BusinessOutcome<T> {
    pub business_id: String,
    pub result: BookingResult<Vec<T>>,
}

/// Outcomes of a fan-out, in business-list order.
#[derive(Debug)]
pub struct FanOutReport<T> {
    outcomes: Vec<BusinessOutcome<T>>,
}

impl<T: BusinessScoped> FanOutReport<T> {
    /// Wraps per-business outcomes.
    #[must_use]
    pub fn new(outcomes: Vec<BusinessOutcome<T>>) -> Self {
        Self { outcomes }
    }

    /// Every outcome, successful or not.
    #[must_use]
    pub fn outcomes(&self) -> &[BusinessOutcome<T>] {
        &self.outcomes
    }

    /// Ids of the businesses whose fetch failed.
    #[must_use]
    pub fn failed_business_ids(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.business_id.as_str())
            .collect()
    }

    /// Flattens the report into one listing.
    ///
    /// Items are tagged with their business and keep upstream order.
    /// Skippable failures drop that business with a warning; any other
    /// failure fails the whole listing.
    pub fn into_items(self, kind: &str) -> BookingResult<Vec<T>> {
        let mut items = Vec::new();

        for outcome in self.outcomes {
            match outcome.result {
                Ok(batch) => {
                    items.extend(batch.into_iter().map(|mut item| {
                        item.tag_business(&outcome.business_id);
                        item
                    }));
                }
                Err(e) if e.is_skippable() => {
                    warn!(
                        "Skipping {} of business '{}': {}",
                        kind, outcome.business_id, e
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(items)
    }
}

/// Orchestrates upstream calls for multi-business views.
pub struct Aggregator {
    upstream: Arc<dyn UpstreamSource>,
}

impl Aggregator {
    /// Creates an aggregator over an upstream source.
    #[must_use]
    pub fn new(upstream: Arc<dyn UpstreamSource>) -> Self {
        Self { upstream }
    }

    /// Fetches the unscoped businesses listing.
    pub async fn list_businesses(&self, token: &str) -> BookingResult<Vec<Business>> {
        debug!("Fetching businesses from upstream");
        self.upstream.fetch_businesses(token).await
    }

    /// Fetches and tags the staff of one business. Failures propagate.
    pub async fn staff_for_business(
        &self,
        token: &str,
        business_id: &str,
    ) -> BookingResult<Vec<StaffMember>> {
        debug!("Fetching staff of business '{}'", business_id);
        let staff = self.upstream.fetch_staff(token, business_id).await?;
        Ok(tagged(staff, business_id))
    }

    /// Fetches and tags the services of one business. Failures propagate.
    pub async fn services_for_business(
        &self,
        token: &str,
        business_id: &str,
    ) -> BookingResult<Vec<Service>> {
        debug!("Fetching services of business '{}'", business_id);
        let services = self.upstream.fetch_services(token, business_id).await?;
        Ok(tagged(services, business_id))
    }

    /// Fetches the staff of every business concurrently.
    pub async fn fan_out_staff<'a>(
        &'a self,
        token: &'a str,
        businesses: &'a [Business],
    ) -> FanOutReport<StaffMember> {
        debug!("Fanning out staff fetch over {} businesses", businesses.len());
        fan_out(businesses, |id| self.upstream.fetch_staff(token, id)).await
    }

    /// Fetches the services of every business concurrently.
    pub async fn fan_out_services<'a>(
        &'a self,
        token: &'a str,
        businesses: &'a [Business],
    ) -> FanOutReport<Service> {
        debug!("Fanning out services fetch over {} businesses", businesses.len());
        fan_out(businesses, |id| self.upstream.fetch_services(token, id)).await
    }
}

async fn fan_out<'a, T, F, Fut>(businesses: &'a [Business], fetch: F) -> FanOutReport<T>
where
    T: BusinessScoped,
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = BookingResult<Vec<T>>> + 'a,
{
    // join_all yields results in input order
    let fetches = businesses.iter().map(|business| {
        let fetch = fetch(&business.id);
        async move {
            BusinessOutcome {
                business_id: business.id.clone(),
                result: fetch.await,
            }
        }
    });

    FanOutReport::new(join_all(fetches).await)
}

fn tagged<T: BusinessScoped>(mut items: Vec<T>, business_id: &str) -> Vec<T> {
    for item in &mut items {
        item.tag_business(business_id);
    }
    items
}

/// First staff member, in listing order, whose email matches ignoring case.
#[must_use]
pub fn find_staff_by_email<'a>(staff: &'a [StaffMember], email: &str) -> Option<&'a StaffMember> {
    staff.iter().find(|member| member.has_email(email))
}

/// Services the given staff member can perform, in listing order.
#[must_use]
pub fn services_for_staff(services: Vec<Service>, staff_id: &str) -> Vec<Service> {
    services
        .into_iter()
        .filter(|service| service.is_offered_by(staff_id))
        .collect()
}

/// Buckets services by owning business.
///
/// Buckets appear in the order their business is first seen among
/// `services`. Businesses missing from `businesses` get
/// [`UNKNOWN_BUSINESS_NAME`].
#[must_use]
pub fn group_services_by_business(
    services: Vec<Service>,
    businesses: &[Business],
) -> Vec<ServicesByBusiness> {
    let names: HashMap<&str, &str> = businesses
        .iter()
        .map(|b| (b.id.as_str(), b.display_name.as_str()))
        .collect();

    let mut groups: Vec<ServicesByBusiness> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for service in services {
        let business_id = service.business_id.clone().unwrap_or_default();

        let position = *positions.entry(business_id.clone()).or_insert_with(|| {
            let business_name = names.get(business_id.as_str()).map_or_else(
                || {
                    warn!("Business '{}' not in businesses listing", business_id);
                    UNKNOWN_BUSINESS_NAME.to_string()
                },
                |name| (*name).to_string(),
            );
            groups.push(ServicesByBusiness {
                business_id: business_id.clone(),
                business_name,
                services: Vec::new(),
            });
            groups.len() - 1
        });

        groups[position].services.push(service);
    }

    groups
}

/// Joins a resolved staff member with the services and businesses
/// listings.
#[must_use]
pub fn build_aggregated_view(
    staff_member: StaffMember,
    services: Vec<Service>,
    businesses: &[Business],
) -> AggregatedServiceView {
    let matched = services_for_staff(services, &staff_member.id);
    debug!(
        "Staff member '{}' offers {} services",
        staff_member.id,
        matched.len()
    );

    AggregatedServiceView {
        services_by_business: group_services_by_business(matched, businesses),
        staff_member,
    }
}
