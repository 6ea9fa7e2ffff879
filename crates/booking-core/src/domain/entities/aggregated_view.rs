//! Composite views derived by the aggregator.

use super::{Service, StaffMember};
use serde::{Deserialize, Serialize};

/// Placeholder name for a group whose business is missing from the
/// businesses listing.
pub const UNKNOWN_BUSINESS_NAME: &str = "Unknown Business";

/// The services of one business that a staff member can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesByBusiness {
    pub business_id: String,
    pub business_name: String,
    pub services: Vec<Service>,
}

/// Everything a staff member can be booked for, grouped by business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedServiceView {
    pub staff_member: StaffMember,
    pub services_by_business: Vec<ServicesByBusiness>,
}
