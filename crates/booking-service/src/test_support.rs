//! In-memory fakes shared by the unit tests of this crate.

use crate::cache::CacheStore;
use crate::upstream::{CredentialProvider, UpstreamSource};
use async_trait::async_trait;
use booking_core::{BookingError, BookingResult, Business, Service, StaffMember};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Clone, Copy)]
enum Failure {
    Upstream,
    Unauthorized,
}

impl Failure {
    fn error(self, business_id: &str) -> BookingError {
        match self {
            Self::Upstream => {
                BookingError::upstream(500, format!("business {} unavailable", business_id))
            }
            Self::Unauthorized => BookingError::unauthorized("token rejected"),
        }
    }
}

/// Scripted booking API that counts calls.
#[derive(Default)]
pub(crate) struct FakeUpstream {
    businesses: Vec<Business>,
    staff: HashMap<String, Vec<StaffMember>>,
    services: HashMap<String, Vec<Service>>,
    failures: HashMap<String, Failure>,
    businesses_unavailable: bool,
    business_calls: AtomicUsize,
    staff_calls: AtomicUsize,
    service_calls: AtomicUsize,
}

impl FakeUpstream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_business(mut self, id: &str, name: &str) -> Self {
        self.businesses.push(Business::new(id, name));
        self
    }

    pub(crate) fn with_staff(mut self, business_id: &str, member: StaffMember) -> Self {
        self.staff
            .entry(business_id.to_string())
            .or_default()
            .push(member);
        self
    }

    pub(crate) fn with_service(mut self, business_id: &str, service: Service) -> Self {
        self.services
            .entry(business_id.to_string())
            .or_default()
            .push(service);
        self
    }

    /// Staff and services fetches for `business_id` fail with a 500.
    pub(crate) fn failing_business(mut self, business_id: &str) -> Self {
        self.failures
            .insert(business_id.to_string(), Failure::Upstream);
        self
    }

    /// Staff and services fetches for `business_id` fail as unauthorized.
    pub(crate) fn rejecting_business(mut self, business_id: &str) -> Self {
        self.failures
            .insert(business_id.to_string(), Failure::Unauthorized);
        self
    }

    /// The businesses listing fails with a 503.
    pub(crate) fn without_businesses_listing(mut self) -> Self {
        self.businesses_unavailable = true;
        self
    }

    pub(crate) fn business_calls(&self) -> usize {
        self.business_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn staff_calls(&self) -> usize {
        self.staff_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn service_calls(&self) -> usize {
        self.service_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.business_calls() + self.staff_calls() + self.service_calls()
    }

    fn check(&self, business_id: &str) -> BookingResult<()> {
        match self.failures.get(business_id) {
            Some(failure) => Err(failure.error(business_id)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UpstreamSource for FakeUpstream {
    async fn fetch_businesses(&self, _token: &str) -> BookingResult<Vec<Business>> {
        self.business_calls.fetch_add(1, Ordering::SeqCst);
        if self.businesses_unavailable {
            return Err(BookingError::upstream(503, "businesses unavailable"));
        }
        Ok(self.businesses.clone())
    }

    async fn fetch_staff(&self, _token: &str, business_id: &str) -> BookingResult<Vec<StaffMember>> {
        self.staff_calls.fetch_add(1, Ordering::SeqCst);
        self.check(business_id)?;
        Ok(self.staff.get(business_id).cloned().unwrap_or_default())
    }

    async fn fetch_services(&self, _token: &str, business_id: &str) -> BookingResult<Vec<Service>> {
        self.service_calls.fetch_add(1, Ordering::SeqCst);
        self.check(business_id)?;
        Ok(self.services.get(business_id).cloned().unwrap_or_default())
    }
}

/// Token source that either always succeeds or always fails.
pub(crate) struct FakeCredentials {
    reject: bool,
    calls: AtomicUsize,
}

impl FakeCredentials {
    pub(crate) fn valid() -> Self {
        Self {
            reject: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn unconfigured() -> Self {
        Self {
            reject: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for FakeCredentials {
    async fn access_token(&self) -> BookingResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(BookingError::unauthorized("authentication not configured"));
        }
        Ok("test-token".to_string())
    }
}

/// Cache store whose every operation fails.
pub(crate) struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> BookingResult<Option<String>> {
        Err(BookingError::cache("store offline"))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> BookingResult<()> {
        Err(BookingError::cache("store offline"))
    }

    async fn delete(&self, _key: &str) -> BookingResult<()> {
        Err(BookingError::cache("store offline"))
    }

    async fn purge_expired(&self) -> BookingResult<usize> {
        Err(BookingError::cache("store offline"))
    }

    async fn entry_count(&self) -> BookingResult<usize> {
        Err(BookingError::cache("store offline"))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
