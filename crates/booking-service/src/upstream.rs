//! Seams to the booking API.
//!
//! The service layer only sees these traits; the HTTP client and the token
//! flow live in `booking-graph`.

use async_trait::async_trait;
use booking_core::{BookingResult, Business, Interface, Service, StaffMember};

/// Supplies a bearer token for upstream calls.
#[async_trait]
pub trait CredentialProvider: Interface + Send + Sync {
    /// Returns a valid access token.
    ///
    /// Fails with `Unauthorized` when credentials are missing or rejected.
    async fn access_token(&self) -> BookingResult<String>;
}

/// Read access to the booking API.
///
/// Fetches are not tagged with their business; the aggregator does that.
#[async_trait]
pub trait UpstreamSource: Interface + Send + Sync {
    /// Lists every booking business visible to the token.
    async fn fetch_businesses(&self, token: &str) -> BookingResult<Vec<Business>>;

    /// Lists the staff of one business.
    async fn fetch_staff(&self, token: &str, business_id: &str) -> BookingResult<Vec<StaffMember>>;

    /// Lists the services of one business.
    async fn fetch_services(&self, token: &str, business_id: &str) -> BookingResult<Vec<Service>>;
}
