//! Cache key generators for consistent key naming.
//!
//! Every endpoint that caches a shape builds its key here, so the same
//! logical request always lands on the same key.

/// Identifier used when a request is not scoped to one business.
pub const ALL: &str = "all";

/// Category for the businesses listing.
pub const BUSINESSES: &str = "businesses";

/// Category for staff listings.
pub const STAFF: &str = "staff";

/// Category for service listings.
pub const SERVICES: &str = "services";

/// Category for the per-email aggregated services view.
pub const STAFF_SERVICES: &str = "staff_services";

/// Compose a key from a category and an optional identifier.
///
/// An absent identifier means "unscoped" and becomes [`ALL`].
#[must_use]
pub fn key_for(category: &str, identifier: Option<&str>) -> String {
    format!("{}:{}", category, identifier.unwrap_or(ALL))
}

/// Key for the businesses listing.
#[must_use]
pub fn businesses() -> String {
    key_for(BUSINESSES, None)
}

/// Key for the staff listing of one business, or of all businesses.
#[must_use]
pub fn staff(business_id: Option<&str>) -> String {
    key_for(STAFF, business_id)
}

/// Key for the service listing of one business, or of all businesses.
#[must_use]
pub fn services(business_id: Option<&str>) -> String {
    key_for(SERVICES, business_id)
}

/// Key for the aggregated services view of a staff email.
///
/// Emails match case-insensitively, so the key is lowercased.
#[must_use]
pub fn staff_services(email: &str) -> String {
    key_for(STAFF_SERVICES, Some(&email.to_lowercase()))
}
