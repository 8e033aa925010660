//! Booking lifecycle service.
//!
//! Creates bookings and drives the two independent state machines (booking
//! status, payment status). Input validation happens in the caller via
//! [`crate::validate`]; this service assumes well-formed requests.

use crate::config::BookingConfig;
use crate::error::{BookingError, Result};
use crate::model::{
    Booking, BookingRecordId, BookingStatus, BookingView, CreateBookingRequest,
    CreatedBooking, PaymentStatus, PaymentUpdate,
};
use crate::providers::{BookingStore, BookingUpdate, Clock, Notifier};
use crate::{policy, utils};
use tracing::{info, warn};

/// Booking lifecycle service.
#[derive(Clone)]
pub struct BookingService<S, N, C>
where
    S: BookingStore,
    N: Notifier,
    C: Clock,
{
    store: S,
    notifier: N,
    clock: C,
    config: BookingConfig,
}

impl<S, N, C> BookingService<S, N, C>
where
    S: BookingStore,
    N: Notifier,
    C: Clock,
{
    /// Create a new lifecycle service.
    #[must_use]
    pub const fn new(store: S, notifier: N, clock: C, config: BookingConfig) -> Self {
        Self {
            store,
            notifier,
            clock,
            config,
        }
    }

    /// Create a booking.
    ///
    /// Generates a unique human-readable booking id and a URL-safe token,
    /// computes the magic-link expiration, persists the record and sends the
    /// link to the customer. Notification delivery is best-effort: a failed
    /// send is logged and never fails the creation.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Store`] if persisting the booking fails.
    pub async fn create(&self, request: CreateBookingRequest) -> Result<CreatedBooking> {
        let now = self.clock.now();
        let expires_at = policy::compute_expiration(now);

        let booking = Booking {
            id: BookingRecordId::new(),
            booking_id: utils::generate_booking_id(),
            magic_link_token: utils::generate_token(),
            user_name: request.user_name,
            user_phone: request.user_phone,
            appointment_type: request.appointment_type,
            appointment_date: request.appointment_date,
            booking_details: request.booking_details,
            status: BookingStatus::PendingConfirmation,
            payment_status: PaymentStatus::Pending,
            payment_id: None,
            amount: None,
            currency: None,
            created_at: now,
            confirmed_at: None,
            payment_updated_at: None,
            last_accessed_at: None,
            magic_link_expires_at: Some(expires_at),
            access_count: 0,
        };

        self.store.insert(booking.clone()).await?;

        let magic_link = self.config.magic_link(&booking.magic_link_token);
        info!(
            booking_id = %booking.booking_id,
            token = %booking.magic_link_token,
            expires_at = %expires_at,
            "Booking created"
        );

        let message = format!(
            "Hi {}! Your {} booking {} is in. Manage it here (valid {}): {}",
            booking.user_name,
            booking.appointment_type.as_str(),
            booking.booking_id,
            policy::format_remaining(booking.magic_link_expires_at, now),
            magic_link,
        );
        if let Err(error) = self
            .notifier
            .send_magic_link(&booking.user_phone, &message)
            .await
        {
            warn!(
                booking_id = %booking.booking_id,
                error = %error,
                "Magic link notification failed; continuing"
            );
        }

        Ok(CreatedBooking {
            booking,
            magic_link,
        })
    }

    /// Confirm a booking.
    ///
    /// Transitions status to `CONFIRMED` and stamps `confirmed_at` with the
    /// current instant, regardless of the current status: re-confirming an
    /// already confirmed booking succeeds and refreshes the timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown id,
    /// [`BookingError::Store`] on store failure.
    pub async fn confirm(&self, id: BookingRecordId) -> Result<Booking> {
        let now = self.clock.now();
        let update = BookingUpdate {
            status: Some(BookingStatus::Confirmed),
            confirmed_at: Some(now),
            ..BookingUpdate::default()
        };

        let booking = self
            .store
            .apply(id, update)
            .await?
            .ok_or(BookingError::NotFound)?;

        info!(booking_id = %booking.booking_id, "Booking confirmed");
        Ok(booking)
    }

    /// Update payment state.
    ///
    /// Overwrites the payment fields and stamps `payment_updated_at`.
    /// Concurrent updates are last-writer-wins. The COMPLETED/amount business
    /// rules are the validator's concern, not this method's.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown id,
    /// [`BookingError::Store`] on store failure.
    pub async fn update_payment(
        &self,
        id: BookingRecordId,
        payment: PaymentUpdate,
    ) -> Result<Booking> {
        let now = self.clock.now();
        let update = BookingUpdate {
            payment_status: Some(payment.payment_status),
            payment_id: Some(payment.payment_id),
            amount: Some(payment.amount),
            currency: Some(payment.currency),
            payment_updated_at: Some(now),
            ..BookingUpdate::default()
        };

        let booking = self
            .store
            .apply(id, update)
            .await?
            .ok_or(BookingError::NotFound)?;

        info!(
            booking_id = %booking.booking_id,
            payment_status = %booking.payment_status.as_str(),
            "Payment updated"
        );
        Ok(booking)
    }

    /// Fetch a booking with its derived expiration flag.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] for an unknown id,
    /// [`BookingError::Store`] on store failure.
    pub async fn get_by_id(&self, id: BookingRecordId) -> Result<BookingView> {
        let booking = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound)?;

        let is_expired = policy::is_expired(booking.magic_link_expires_at, self.clock.now());
        Ok(BookingView {
            booking,
            is_expired,
        })
    }
}
