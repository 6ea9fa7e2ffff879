//! # Booking REST
//!
//! REST API layer using Axum for the booking gateway.
//! Provides the booking listings, the per-staff views and the health check.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
