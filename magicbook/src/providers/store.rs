//! Booking store trait.
//!
//! Abstracts the durable record of bookings. Implementations must provide
//! per-call transactional consistency; no multi-entity transactions are
//! required by the core.

use crate::error::Result;
use crate::model::{Booking, BookingRecordId, BookingStatus, PaymentStatus};
use chrono::{DateTime, Utc};

/// Partial update applied to a booking.
///
/// Only set fields are written. Concurrent updates to the same booking are
/// last-writer-wins: there is no optimistic-lock version field.
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    /// New booking status.
    pub status: Option<BookingStatus>,

    /// Confirmation timestamp.
    pub confirmed_at: Option<DateTime<Utc>>,

    /// New payment status.
    pub payment_status: Option<PaymentStatus>,

    /// External payment reference (outer `Some` writes the field, inner
    /// `Option` is the stored value).
    pub payment_id: Option<Option<String>>,

    /// Payment amount.
    pub amount: Option<Option<f64>>,

    /// Payment currency.
    pub currency: Option<Option<String>>,

    /// Payment update timestamp.
    pub payment_updated_at: Option<DateTime<Utc>>,
}

/// Durable booking store.
///
/// # Implementation Notes
///
/// - `record_access` MUST be atomic (single UPDATE with an in-place
///   increment, or a mutex-protected map in memory). Read-modify-write
///   sequences lose counts under concurrent resolution.
/// - `booking_id` and `magic_link_token` are globally unique; `insert`
///   surfaces duplicate-key failures as store errors.
pub trait BookingStore: Send + Sync {
    /// Look a booking up by its magic-link token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn find_by_token(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<Booking>>> + Send;

    /// Look a booking up by its record id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn find_by_id(
        &self,
        id: BookingRecordId,
    ) -> impl std::future::Future<Output = Result<Option<Booking>>> + Send;

    /// Persist a freshly created booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails or a uniqueness
    /// constraint is violated.
    fn insert(
        &self,
        booking: Booking,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Apply a partial update, returning the updated booking.
    ///
    /// Returns `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn apply(
        &self,
        id: BookingRecordId,
        update: BookingUpdate,
    ) -> impl std::future::Future<Output = Result<Option<Booking>>> + Send;

    /// Atomically increment `access_count` and touch `last_accessed_at`.
    ///
    /// Returns the updated booking, or `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn record_access(
        &self,
        id: BookingRecordId,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Booking>>> + Send;

    /// Delete a booking together with its analytics events.
    ///
    /// Administrative operation; the core services never call it. Returns
    /// `true` when a booking was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn delete_cascade(
        &self,
        id: BookingRecordId,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}
