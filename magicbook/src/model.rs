//! Booking data model.
//!
//! Domain types shared by the lifecycle service, the resolver and the
//! analytics recorder. All wire forms use camelCase field names and
//! SCREAMING_SNAKE_CASE enum values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique booking record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingRecordId(pub Uuid);

impl BookingRecordId {
    /// Generate a fresh record id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookingRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Appointment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    /// One-on-one consultation.
    Consultation,
    /// Guided tutorial session.
    Tutorial,
    /// Skills assessment.
    Assessment,
    /// Group session.
    GroupSession,
    /// Workshop.
    Workshop,
}

impl AppointmentType {
    /// Wire-form name of the appointment type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consultation => "CONSULTATION",
            Self::Tutorial => "TUTORIAL",
            Self::Assessment => "ASSESSMENT",
            Self::GroupSession => "GROUP_SESSION",
            Self::Workshop => "WORKSHOP",
        }
    }
}

/// Booking status.
///
/// Independent of [`PaymentStatus`]; no status implies a specific payment
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created, awaiting confirmation.
    PendingConfirmation,
    /// Confirmed by the operator.
    Confirmed,
    /// Cancelled.
    Cancelled,
    /// Appointment took place.
    Completed,
}

impl BookingStatus {
    /// Wire-form name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingConfirmation => "PENDING_CONFIRMATION",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }
}

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// No payment recorded yet.
    Pending,
    /// Payment completed.
    Completed,
    /// Payment attempt failed.
    Failed,
    /// Payment refunded.
    Refunded,
    /// Payment cancelled.
    Cancelled,
}

impl PaymentStatus {
    /// Wire-form name of the payment status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Refunded => "REFUNDED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// A booking record.
///
/// Created once by the lifecycle service; mutated only by confirm, payment
/// update and access tracking. `access_count` is monotonic and
/// `magic_link_expires_at` is immutable once set at creation
/// (`None` means the link never expires — legacy pre-expiration records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Opaque unique record id.
    pub id: BookingRecordId,

    /// Human-readable booking id (globally unique).
    pub booking_id: String,

    /// URL-safe magic-link lookup token (globally unique, fixed length).
    pub magic_link_token: String,

    /// Customer name.
    pub user_name: String,

    /// Customer phone (notification target).
    pub user_phone: String,

    /// Appointment type.
    pub appointment_type: AppointmentType,

    /// Appointment timestamp.
    pub appointment_date: DateTime<Utc>,

    /// Free-form booking details.
    #[serde(default)]
    pub booking_details: serde_json::Map<String, serde_json::Value>,

    /// Booking status.
    pub status: BookingStatus,

    /// Payment status.
    pub payment_status: PaymentStatus,

    /// External payment reference.
    pub payment_id: Option<String>,

    /// Payment amount.
    pub amount: Option<f64>,

    /// Payment currency (ISO 4217).
    pub currency: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Confirmation timestamp.
    pub confirmed_at: Option<DateTime<Utc>>,

    /// Last payment update timestamp.
    pub payment_updated_at: Option<DateTime<Utc>>,

    /// Last successful magic-link access.
    pub last_accessed_at: Option<DateTime<Utc>>,

    /// Magic-link expiration; `None` never expires.
    pub magic_link_expires_at: Option<DateTime<Utc>>,

    /// Number of successful magic-link resolutions.
    pub access_count: i64,
}

/// Access/interaction event tied to a booking.
///
/// Append-only; cascade-deleted with its owning booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Owning booking record id.
    pub booking_id: BookingRecordId,

    /// Free-form event tag (e.g. `magic_link_click`).
    pub event_type: String,

    /// Client user agent, when known.
    pub user_agent: Option<String>,

    /// Client IP address, when known.
    pub ip_address: Option<String>,

    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Input to [`crate::services::BookingService::create`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Customer name.
    pub user_name: String,

    /// Customer phone.
    pub user_phone: String,

    /// Appointment type.
    pub appointment_type: AppointmentType,

    /// Appointment timestamp.
    pub appointment_date: DateTime<Utc>,

    /// Free-form booking details.
    #[serde(default)]
    pub booking_details: serde_json::Map<String, serde_json::Value>,
}

/// Payment fields applied by [`crate::services::BookingService::update_payment`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    /// New payment status.
    pub payment_status: PaymentStatus,

    /// External payment reference.
    pub payment_id: Option<String>,

    /// Payment amount.
    pub amount: Option<f64>,

    /// Payment currency.
    pub currency: Option<String>,
}

/// Booking returned by the create operation, together with its link.
#[derive(Debug, Clone)]
pub struct CreatedBooking {
    /// The persisted booking.
    pub booking: Booking,

    /// Absolute magic-link URL sent to the customer.
    pub magic_link: String,
}

/// Read view of a booking with the derived expiration flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    /// The booking record.
    #[serde(flatten)]
    pub booking: Booking,

    /// Whether the magic link is past its TTL at read time.
    pub is_expired: bool,
}
