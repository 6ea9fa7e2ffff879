//! Booking business entity.

use super::{null_as_default, ExtraFields};
use serde::{Deserialize, Serialize};

/// A booking business (a bookable storefront with its own staff and services).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Unique identifier of the business.
    pub id: String,

    /// Display name shown to customers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    /// Free-form business category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_type: String,

    /// Contact phone number.
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,

    /// Contact email address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    /// Public web site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_site_url: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Business {
    /// Creates a business with only an id and a display name.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            business_type: String::new(),
            phone: String::new(),
            email: String::new(),
            web_site_url: None,
            extra: ExtraFields::new(),
        }
    }
}
