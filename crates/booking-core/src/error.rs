//! Unified error types for all layers of the gateway.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the booking gateway.
///
/// Callers only ever observe two families of failure: authorization
/// failures (`Unauthorized`) and upstream/domain failures (everything
/// else). `Cache` errors are recovered inside the cache facade and are not
/// expected to reach a handler.
#[derive(Error, Debug)]
pub enum BookingError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Authentication Errors ============
    /// Credential acquisition failed or credentials are not configured
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ============ Infrastructure Errors ============
    /// The booking API rejected or failed a single fetch
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Cache backend error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Upstream { status, .. } => {
                if *status >= 400 && *status <= 599 {
                    *status
                } else {
                    502
                }
            }
            Self::Cache(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an upstream error.
    #[must_use]
    pub fn upstream<T: Into<String>>(status: u16, message: T) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if a fan-out may drop the failed item and carry on.
    ///
    /// Only per-call upstream failures qualify; authorization and internal
    /// failures abort the whole aggregate.
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Checks if this is a not-found outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `BookingError`.
    #[must_use]
    pub fn from_error(error: &BookingError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&BookingError> for ErrorResponse {
    fn from(error: &BookingError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(BookingError::not_found("StaffMember", "a@b.c").status_code(), 404);
        assert_eq!(BookingError::validation("bad email").status_code(), 400);
        assert_eq!(BookingError::unauthorized("not configured").status_code(), 401);
        assert_eq!(BookingError::cache("down").status_code(), 500);
        assert_eq!(BookingError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_upstream_status_passthrough() {
        assert_eq!(BookingError::upstream(403, "forbidden").status_code(), 403);
        assert_eq!(BookingError::upstream(503, "busy").status_code(), 503);
        assert_eq!(BookingError::upstream(200, "odd").status_code(), 502);
        assert_eq!(BookingError::upstream(0, "transport").status_code(), 502);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(BookingError::not_found("StaffMember", 1).error_code(), "NOT_FOUND");
        assert_eq!(BookingError::unauthorized("x").error_code(), "UNAUTHORIZED");
        assert_eq!(BookingError::upstream(500, "x").error_code(), "UPSTREAM_ERROR");
        assert_eq!(BookingError::cache("x").error_code(), "CACHE_ERROR");
        assert_eq!(
            BookingError::Configuration("x".to_string()).error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_only_upstream_errors_are_skippable() {
        assert!(BookingError::upstream(500, "boom").is_skippable());
        assert!(!BookingError::unauthorized("no token").is_skippable());
        assert!(!BookingError::not_found("Business", "b1").is_skippable());
        assert!(!BookingError::internal("bug").is_skippable());
    }

    #[test]
    fn test_not_found_is_distinct_from_upstream() {
        assert!(BookingError::not_found("StaffMember", "x").is_not_found());
        assert!(!BookingError::upstream(404, "missing").is_not_found());
    }

    #[test]
    fn test_error_response_from_error() {
        let err = BookingError::not_found("StaffMember", "jane@contoso.com");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("jane@contoso.com"));
    }

    #[test]
    fn test_error_response_from_ref() {
        let err = BookingError::upstream(502, "bad gateway");
        let response: ErrorResponse = ErrorResponse::from(&err);
        assert_eq!(response.code, "UPSTREAM_ERROR");
    }
}
