//! # Booking Service
//!
//! Cache-aside aggregation layer for the booking gateway.
//!
//! - [`cache`]: interchangeable cache stores, key scheme, and the facade
//!   that makes caching best-effort
//! - [`aggregator`]: per-business fan-out and the cross-business joins
//! - [`BookingService`]: the operations handlers call, with the caching
//!   policy applied

pub mod aggregator;
pub mod booking_service;
pub mod booking_service_impl;
pub mod cache;
pub mod upstream;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::*;
pub use booking_service::*;
pub use booking_service_impl::*;
pub use cache::*;
pub use upstream::*;
