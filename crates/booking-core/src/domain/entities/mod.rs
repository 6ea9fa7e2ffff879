//! Domain entities.

mod aggregated_view;
mod business;
mod collection;
mod service;
mod staff_member;

pub use aggregated_view::*;
pub use business::*;
pub use collection::*;
pub use service::*;
pub use staff_member::*;

use serde::{Deserialize, Deserializer};

/// Extension fields the booking API sent that the gateway does not model.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// An entity fetched in the scope of a single business.
///
/// The booking API does not repeat the owning business on staff or service
/// records; the aggregator stamps it on after each per-business fetch.
pub trait BusinessScoped {
    /// Records the business this entity was fetched from.
    fn tag_business(&mut self, business_id: &str);

    /// Returns the recorded owning business, if any.
    fn business_id(&self) -> Option<&str>;
}

/// Reads an explicit JSON `null` as the type's default.
///
/// The booking API sends `null` for unset strings and lists.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
