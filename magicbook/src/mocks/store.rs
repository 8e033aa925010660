//! Mock booking store for testing.

use crate::error::{BookingError, Result};
use crate::model::{Booking, BookingRecordId};
use crate::providers::{BookingStore, BookingUpdate};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock booking store.
///
/// Mutex-protected in-memory map. `record_access` increments under the lock,
/// matching the atomic-increment contract of the trait.
#[derive(Debug, Clone, Default)]
pub struct MockBookingStore {
    bookings: Arc<Mutex<HashMap<BookingRecordId, Booking>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockBookingStore {
    /// Create a new mock booking store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a store error (for
    /// Internal-error path tests).
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    /// Number of stored bookings (for testing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    /// Whether the store is empty (for testing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a booking without going through the trait (for assertions).
    #[must_use]
    pub fn get(&self, id: BookingRecordId) -> Option<Booking> {
        self.bookings.lock().unwrap().get(&id).cloned()
    }

    fn check_fail(&self) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(BookingError::Store("mock store failure".to_string()));
        }
        Ok(())
    }
}

impl BookingStore for MockBookingStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>> {
        self.check_fail()?;
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .values()
            .find(|b| b.magic_link_token == token)
            .cloned())
    }

    async fn find_by_id(&self, id: BookingRecordId) -> Result<Option<Booking>> {
        self.check_fail()?;
        Ok(self.bookings.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, booking: Booking) -> Result<()> {
        self.check_fail()?;
        let mut bookings = self.bookings.lock().unwrap();

        let duplicate = bookings.values().any(|b| {
            b.booking_id == booking.booking_id
                || b.magic_link_token == booking.magic_link_token
        });
        if duplicate {
            return Err(BookingError::Store(
                "unique constraint violated".to_string(),
            ));
        }

        bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn apply(
        &self,
        id: BookingRecordId,
        update: BookingUpdate,
    ) -> Result<Option<Booking>> {
        self.check_fail()?;
        let mut bookings = self.bookings.lock().unwrap();

        let Some(booking) = bookings.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(status) = update.status {
            booking.status = status;
        }
        if let Some(confirmed_at) = update.confirmed_at {
            booking.confirmed_at = Some(confirmed_at);
        }
        if let Some(payment_status) = update.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(payment_id) = update.payment_id {
            booking.payment_id = payment_id;
        }
        if let Some(amount) = update.amount {
            booking.amount = amount;
        }
        if let Some(currency) = update.currency {
            booking.currency = currency;
        }
        if let Some(payment_updated_at) = update.payment_updated_at {
            booking.payment_updated_at = Some(payment_updated_at);
        }

        Ok(Some(booking.clone()))
    }

    async fn record_access(
        &self,
        id: BookingRecordId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        self.check_fail()?;
        let mut bookings = self.bookings.lock().unwrap();

        let Some(booking) = bookings.get_mut(&id) else {
            return Ok(None);
        };

        // Increment under the lock: this is the atomicity the trait demands.
        booking.access_count += 1;
        booking.last_accessed_at = Some(now);

        Ok(Some(booking.clone()))
    }

    async fn delete_cascade(&self, id: BookingRecordId) -> Result<bool> {
        self.check_fail()?;
        Ok(self.bookings.lock().unwrap().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppointmentType, BookingStatus, PaymentStatus};

    fn sample_booking(token: &str) -> Booking {
        Booking {
            id: BookingRecordId::new(),
            booking_id: format!("BK-{token}"),
            magic_link_token: token.to_string(),
            user_name: "Test User".to_string(),
            user_phone: "+1234567890".to_string(),
            appointment_type: AppointmentType::Consultation,
            appointment_date: Utc::now(),
            booking_details: serde_json::Map::new(),
            status: BookingStatus::PendingConfirmation,
            payment_status: PaymentStatus::Pending,
            payment_id: None,
            amount: None,
            currency: None,
            created_at: Utc::now(),
            confirmed_at: None,
            payment_updated_at: None,
            last_accessed_at: None,
            magic_link_expires_at: None,
            access_count: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_token() {
        let store = MockBookingStore::new();
        let booking = sample_booking("tokenAAAAAAA");
        store.insert(booking.clone()).await.unwrap();

        let found = store.find_by_token("tokenAAAAAAA").await.unwrap();
        assert_eq!(found, Some(booking));
        assert!(store.find_by_token("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_token() {
        let store = MockBookingStore::new();
        store.insert(sample_booking("tokenAAAAAAA")).await.unwrap();

        let result = store.insert(sample_booking("tokenAAAAAAA")).await;
        assert!(matches!(result, Err(BookingError::Store(_))));
    }

    #[tokio::test]
    async fn test_record_access_increments_atomically() {
        let store = MockBookingStore::new();
        let booking = sample_booking("tokenAAAAAAA");
        let id = booking.id;
        store.insert(booking).await.unwrap();

        let now = Utc::now();
        let (a, b) = tokio::join!(store.record_access(id, now), store.record_access(id, now));
        a.unwrap();
        b.unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.access_count, 2);
        assert_eq!(stored.last_accessed_at, Some(now));
    }

    #[tokio::test]
    async fn test_apply_unknown_id_returns_none() {
        let store = MockBookingStore::new();
        let result = store
            .apply(BookingRecordId::new(), BookingUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_apply_writes_only_set_fields() {
        let store = MockBookingStore::new();
        let booking = sample_booking("tokenAAAAAAA");
        let id = booking.id;
        store.insert(booking).await.unwrap();

        let updated = store
            .apply(
                id,
                BookingUpdate {
                    payment_status: Some(PaymentStatus::Failed),
                    ..BookingUpdate::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.payment_status, PaymentStatus::Failed);
        assert_eq!(updated.status, BookingStatus::PendingConfirmation);
        assert!(updated.payment_id.is_none());
    }

    #[tokio::test]
    async fn test_fail_toggle() {
        let store = MockBookingStore::new();
        store.set_fail(true);
        assert!(store.find_by_token("x").await.is_err());
        store.set_fail(false);
        assert!(store.find_by_token("x").await.unwrap().is_none());
    }
}
