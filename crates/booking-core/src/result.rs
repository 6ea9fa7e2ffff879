//! Result type aliases for the booking gateway.

use crate::BookingError;

/// A specialized `Result` type for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;
