//! # Booking Core
//!
//! Core types, domain entities, and error definitions shared by every
//! layer of the booking gateway.

pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use error::*;
pub use result::*;

// Re-export shaku so component traits share one `Interface` bound
pub use shaku::Interface;
