//! Bookable service entity.

use super::{null_as_default, BusinessScoped, ExtraFields};
use serde::{Deserialize, Serialize};

/// A service offered by a booking business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Unique identifier of the service.
    pub id: String,

    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default appointment length, passed through as the API sends it.
    #[serde(default)]
    pub default_duration: serde_json::Value,

    /// Owning business, stamped on by the aggregator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,

    /// Staff members able to perform this service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub staff_member_ids: Vec<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Service {
    /// Creates a service with an id and its assigned staff.
    #[must_use]
    pub fn new(id: impl Into<String>, staff_member_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: None,
            default_duration: serde_json::Value::Null,
            business_id: None,
            staff_member_ids,
            extra: ExtraFields::new(),
        }
    }

    /// Returns true if the given staff member can perform this service.
    #[must_use]
    pub fn is_offered_by(&self, staff_id: &str) -> bool {
        self.staff_member_ids.iter().any(|id| id == staff_id)
    }
}

impl BusinessScoped for Service {
    fn tag_business(&mut self, business_id: &str) {
        self.business_id = Some(business_id.to_string());
    }

    fn business_id(&self) -> Option<&str> {
        self.business_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_staff_ids_default_to_empty() {
        let service: Service = serde_json::from_value(json!({
            "id": "svc1",
            "displayName": "Consultation",
            "defaultDuration": "PT30M"
        }))
        .unwrap();
        assert!(service.staff_member_ids.is_empty());
        assert_eq!(service.default_duration, json!("PT30M"));
    }

    #[test]
    fn test_null_staff_ids_become_empty() {
        let service: Service =
            serde_json::from_value(json!({ "id": "svc1", "staffMemberIds": null })).unwrap();
        assert!(service.staff_member_ids.is_empty());
    }

    #[test]
    fn test_is_offered_by() {
        let service = Service::new("svc1", vec!["s1".to_string(), "s2".to_string()]);
        assert!(service.is_offered_by("s2"));
        assert!(!service.is_offered_by("s3"));
    }
}
