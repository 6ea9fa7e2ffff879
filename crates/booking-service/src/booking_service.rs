//! Booking service trait definition.

use async_trait::async_trait;
use booking_core::{
    AggregatedServiceView, BookingResult, Business, Interface, Service, StaffMember,
};

/// Read operations over the booking API, served cache-aside.
#[async_trait]
pub trait BookingService: Interface + Send + Sync {
    /// Lists every booking business.
    async fn list_businesses(&self) -> BookingResult<Vec<Business>>;

    /// Lists staff of one business, or of every business when `None`.
    ///
    /// The unscoped listing skips businesses whose fetch failed.
    async fn list_staff(&self, business_id: Option<&str>) -> BookingResult<Vec<StaffMember>>;

    /// Lists services of one business, or of every business when `None`.
    async fn list_services(&self, business_id: Option<&str>) -> BookingResult<Vec<Service>>;

    /// Finds a staff member by email, ignoring case.
    async fn find_staff_by_email(&self, email: &str) -> BookingResult<Option<StaffMember>>;

    /// Lists every service the staff member can perform.
    async fn services_for_staff(&self, staff_id: &str) -> BookingResult<Vec<Service>>;

    /// Builds the services of a staff member grouped by business.
    ///
    /// Fails with `NotFound` when no staff member has this email.
    async fn aggregate_services_by_email(&self, email: &str)
        -> BookingResult<AggregatedServiceView>;
}
