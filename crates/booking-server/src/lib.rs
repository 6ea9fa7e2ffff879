//! # Booking Server Library
//!
//! Component wiring and startup utilities for the booking gateway binary.

pub mod di;
pub mod startup;
