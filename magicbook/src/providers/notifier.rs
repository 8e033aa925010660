//! Notifier trait and console implementation.

use crate::error::Result;
use tracing::info;

/// Out-of-band delivery of the magic link to the customer (SMS or similar).
///
/// Delivery is best-effort: a failed notification never fails the booking
/// creation it accompanies.
pub trait Notifier: Send + Sync {
    /// Deliver a magic-link message to a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; callers log and continue.
    fn send_magic_link(
        &self,
        user_phone: &str,
        message: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Console notifier for development and testing.
///
/// Logs the message instead of sending it.
#[derive(Clone, Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Create a new console notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    async fn send_magic_link(&self, user_phone: &str, message: &str) -> Result<()> {
        info!(
            to = %user_phone,
            message = %message,
            "Magic link notification (development mode)"
        );
        println!("\n--- MAGIC LINK SMS ---");
        println!("To: {user_phone}");
        println!("{message}");
        println!("----------------------\n");
        Ok(())
    }
}
