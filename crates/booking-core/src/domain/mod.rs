//! # Booking Domain
//!
//! Read-only entities mirrored from the booking API, plus the composite
//! views the gateway derives from them.
//!
//! Upstream records are structured around the fields the gateway relies on;
//! anything else the API sends is kept in each entity's `extra` map so it
//! survives a round trip through the cache untouched.

pub mod entities;

pub use entities::*;
