//! # Booking Config
//!
//! Configuration management for the booking gateway.
//! Layered configuration from files and environment variables, loaded
//! once at startup.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
