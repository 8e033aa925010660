//! Mock notifier for testing.

use crate::error::{BookingError, Result};
use crate::providers::Notifier;
use std::sync::{Arc, Mutex};

/// Mock notifier.
///
/// Captures sent messages instead of delivering them; can simulate failure
/// to verify that notification errors never abort a booking creation.
#[derive(Debug, Clone)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    /// Whether to simulate success or failure.
    pub should_succeed: bool,
}

impl MockNotifier {
    /// Create a mock notifier that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_succeed: true,
        }
    }

    /// Create a mock notifier that fails every delivery.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_succeed: false,
        }
    }

    /// Captured `(phone, message)` pairs (for testing).
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    async fn send_magic_link(&self, user_phone: &str, message: &str) -> Result<()> {
        if !self.should_succeed {
            return Err(BookingError::NotificationFailed);
        }
        self.sent
            .lock()
            .unwrap()
            .push((user_phone.to_string(), message.to_string()));
        Ok(())
    }
}
