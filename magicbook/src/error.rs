//! Error types for booking and magic-link operations.

use crate::validate::FieldError;
use thiserror::Error;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Error taxonomy for the booking magic-link system.
///
/// The four user-visible categories map directly to HTTP semantics:
/// `NotFound` → 404, `Expired` → 410 Gone, `Validation` → 400 with itemized
/// field errors, everything else → 500 with details hidden from the caller.
/// `Expired` is never conflated with `NotFound`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookingError {
    /// Unknown booking id or magic-link token.
    #[error("Booking not found")]
    NotFound,

    /// Magic link is past its TTL.
    #[error("Magic link has expired")]
    Expired,

    /// Caller input rejected with field-level errors.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Durable store operation failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Notification delivery failed.
    ///
    /// Callers treat this as non-fatal; it never aborts a booking creation.
    #[error("Failed to deliver notification")]
    NotificationFailed,

    /// Unexpected failure (details logged server-side, not exposed).
    #[error("Internal error")]
    Internal,
}

impl BookingError {
    /// Returns `true` if this error is due to caller input rather than
    /// system failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::Expired | Self::Validation(_)
        )
    }

    /// Build a validation error from a list of field errors.
    #[must_use]
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}
