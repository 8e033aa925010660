//! Mock analytics store for testing.

use crate::error::{BookingError, Result};
use crate::model::{AnalyticsEvent, BookingRecordId};
use crate::providers::AnalyticsStore;
use std::sync::{Arc, Mutex};

/// Mock analytics store.
///
/// Captures inserted events for assertions and can be told to fail, which is
/// how the best-effort isolation of the resolver is tested.
#[derive(Debug, Clone, Default)]
pub struct MockAnalyticsStore {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockAnalyticsStore {
    /// Create a new mock analytics store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert/query fail.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    /// All captured events, in insertion order (for testing).
    #[must_use]
    pub fn recorded(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of captured events (for testing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Whether no events were captured (for testing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_fail(&self) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(BookingError::Store("mock analytics failure".to_string()));
        }
        Ok(())
    }
}

impl AnalyticsStore for MockAnalyticsStore {
    async fn insert(&self, event: AnalyticsEvent) -> Result<()> {
        self.check_fail()?;
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn list_recent(
        &self,
        booking_id: BookingRecordId,
        limit: usize,
    ) -> Result<Vec<AnalyticsEvent>> {
        self.check_fail()?;
        let events = self.events.lock().unwrap();
        let mut matching: Vec<AnalyticsEvent> = events
            .iter()
            .filter(|e| e.booking_id == booking_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching.truncate(limit);
        Ok(matching)
    }
}
