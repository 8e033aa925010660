//! Request validation.
//!
//! The validator is a collaborator that rejects malformed create/update
//! requests before they reach the lifecycle service, producing an itemized
//! list of field-level error messages (surfaced as 400 responses).

use crate::model::{CreateBookingRequest, PaymentStatus, PaymentUpdate};
use serde::{Deserialize, Serialize};

/// A single field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field (wire form).
    pub field: String,

    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a create-booking request.
///
/// Returns the empty vec when the request is well-formed.
#[must_use]
pub fn validate_create(request: &CreateBookingRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.user_name.trim().is_empty() {
        errors.push(FieldError::new("userName", "userName is required"));
    }

    if request.user_phone.trim().is_empty() {
        errors.push(FieldError::new("userPhone", "userPhone is required"));
    } else if !is_plausible_phone(&request.user_phone) {
        errors.push(FieldError::new(
            "userPhone",
            "userPhone must be a phone number in international format",
        ));
    }

    errors
}

/// Validate a payment update.
///
/// Business rules: `COMPLETED` requires `paymentId` and `amount`; any
/// `amount` requires a `currency`.
#[must_use]
pub fn validate_payment(update: &PaymentUpdate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if update.payment_status == PaymentStatus::Completed {
        if update.payment_id.as_deref().is_none_or(str::is_empty) {
            errors.push(FieldError::new(
                "paymentId",
                "paymentId is required when paymentStatus is COMPLETED",
            ));
        }
        if update.amount.is_none() {
            errors.push(FieldError::new(
                "amount",
                "amount is required when paymentStatus is COMPLETED",
            ));
        }
    }

    if let Some(amount) = update.amount {
        if amount < 0.0 {
            errors.push(FieldError::new("amount", "amount must not be negative"));
        }
        if update.currency.as_deref().is_none_or(str::is_empty) {
            errors.push(FieldError::new(
                "currency",
                "currency is required when amount is set",
            ));
        }
    }

    errors
}

/// Loose international phone check: optional leading `+`, then 7-15 digits,
/// ignoring spaces and dashes.
fn is_plausible_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: Vec<char> = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    (7..=15).contains(&digits.len()) && digits.iter().all(char::is_ascii_digit)
}
