//! Analytics store trait.

use crate::error::Result;
use crate::model::{AnalyticsEvent, BookingRecordId};

/// Append-only store of access/interaction events.
///
/// Rows are never mutated after insert. Events belong to a booking and are
/// removed with it on cascade delete.
pub trait AnalyticsStore: Send + Sync {
    /// Append an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails. Callers on the
    /// resolution path downgrade that failure to a warning; only the
    /// explicit track surface treats it as foreground.
    fn insert(
        &self,
        event: AnalyticsEvent,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Most-recent-first events for a booking, bounded by `limit`.
    ///
    /// Pure query; no cursor state is retained between calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn list_recent(
        &self,
        booking_id: BookingRecordId,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<AnalyticsEvent>>> + Send;
}
