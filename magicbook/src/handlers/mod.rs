//! HTTP handlers.
//!
//! Thin axum handlers over the services. The error taxonomy maps to HTTP as:
//! `NotFound` → 404, `Expired` → 410 Gone (never conflated with 404),
//! `Validation` → 400 with itemized field errors, everything else → 500 with
//! details hidden from the caller and logged server-side. The browser
//! redirect path maps not-found/expired to error-URL redirects instead.

pub mod bookings;
pub mod magic_link;

use crate::error::BookingError;
use crate::validate::FieldError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Error code (for client error handling).
    code: &'static str,
    /// Human-readable error message.
    message: String,
    /// Field-level errors (validation failures only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

/// HTTP-facing error wrapper for [`BookingError`].
#[derive(Debug)]
pub struct ApiError(pub BookingError);

impl From<BookingError> for ApiError {
    fn from(error: BookingError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self.0 {
            BookingError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Booking not found".to_string(),
                Vec::new(),
            ),
            BookingError::Expired => (
                StatusCode::GONE,
                "LINK_EXPIRED",
                "Magic link has expired".to_string(),
                Vec::new(),
            ),
            BookingError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "Validation failed".to_string(),
                errors,
            ),
            other => {
                error!(error = %other, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = ErrorBody {
            code,
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}
