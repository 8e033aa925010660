//! Analytics recorder.

use crate::error::Result;
use crate::model::{AnalyticsEvent, BookingRecordId};
use crate::providers::{AnalyticsStore, Clock};
use tracing::warn;

/// Appends access/interaction events and serves the recent-events query.
#[derive(Clone)]
pub struct AnalyticsRecorder<A, C>
where
    A: AnalyticsStore,
    C: Clock,
{
    analytics: A,
    clock: C,
}

impl<A, C> AnalyticsRecorder<A, C>
where
    A: AnalyticsStore,
    C: Clock,
{
    /// Create a new recorder.
    #[must_use]
    pub const fn new(analytics: A, clock: C) -> Self {
        Self { analytics, clock }
    }

    /// Append an event (foreground).
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::Store`] if the insert fails.
    pub async fn record(
        &self,
        booking_id: BookingRecordId,
        event_type: impl Into<String>,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> Result<()> {
        self.analytics
            .insert(AnalyticsEvent {
                booking_id,
                event_type: event_type.into(),
                user_agent,
                ip_address,
                timestamp: self.clock.now(),
            })
            .await
    }

    /// Append an event, downgrading failure to a warning.
    pub async fn record_best_effort(
        &self,
        booking_id: BookingRecordId,
        event_type: impl Into<String>,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) {
        if let Err(error) = self
            .record(booking_id, event_type, user_agent, ip_address)
            .await
        {
            warn!(
                booking_id = %booking_id,
                error = %error,
                "Failed to record analytics event; continuing"
            );
        }
    }

    /// Most-recent-first events for a booking, bounded by `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::Store`] if the query fails.
    pub async fn list_recent(
        &self,
        booking_id: BookingRecordId,
        limit: usize,
    ) -> Result<Vec<AnalyticsEvent>> {
        self.analytics.list_recent(booking_id, limit).await
    }
}
