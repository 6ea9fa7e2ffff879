//! REST API controllers.

pub mod booking_controller;
pub mod health_controller;
pub mod staff_controller;

pub use health_controller::*;
