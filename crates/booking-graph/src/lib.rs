//! # Booking Graph
//!
//! HTTP implementations of the service layer's upstream seams:
//!
//! - [`GraphClient`]: reads businesses, staff and services from the
//!   booking API
//! - [`PasswordCredentialProvider`]: acquires and reuses bearer tokens via
//!   the resource-owner password grant

mod credentials;
mod graph_client;

pub use credentials::*;
pub use graph_client::*;
