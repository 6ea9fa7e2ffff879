//! Collection envelope used by the booking API and the gateway's responses.

use serde::{Deserialize, Serialize};

/// A `{"value": [...]}` list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// The items, in upstream order.
    pub value: Vec<T>,
}

impl<T> Collection<T> {
    /// Wraps a list of items.
    #[must_use]
    pub fn new(value: Vec<T>) -> Self {
        Self { value }
    }

    /// Unwraps the items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.value
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(value: Vec<T>) -> Self {
        Self::new(value)
    }
}
