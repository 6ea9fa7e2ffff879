//! Staff member entity.

use super::{null_as_default, BusinessScoped, ExtraFields};
use serde::{Deserialize, Serialize};

/// A staff member of a booking business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// Unique identifier of the staff member.
    pub id: String,

    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    /// Email address; matched case-insensitively.
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_address: String,

    /// Role within the business (e.g. `administrator`, `externalGuest`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,

    /// Whether the staff member follows the business opening hours.
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_business_hours: bool,

    /// Owning business, stamped on by the aggregator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl StaffMember {
    /// Creates a staff member with only an id and an email address.
    #[must_use]
    pub fn new(id: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            email_address: email_address.into(),
            role: String::new(),
            use_business_hours: false,
            business_id: None,
            extra: ExtraFields::new(),
        }
    }

    /// Case-insensitive comparison against this member's email address.
    #[must_use]
    pub fn has_email(&self, email: &str) -> bool {
        self.email_address.to_lowercase() == email.to_lowercase()
    }
}

impl BusinessScoped for StaffMember {
    fn tag_business(&mut self, business_id: &str) {
        self.business_id = Some(business_id.to_string());
    }

    fn business_id(&self) -> Option<&str> {
        self.business_id.as_deref()
    }
}
