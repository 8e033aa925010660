//! Booking service configuration.
//!
//! Configuration values are provided by the application, not hardcoded.

use crate::constants::DEFAULT_ANALYTICS_LIMIT;

/// Booking magic-link configuration.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Base URL the service is reachable at (e.g. "https://book.example.com").
    ///
    /// Magic links are formatted as: `{base_url}/redirect/{token}`.
    pub base_url: String,

    /// Destination URL successful redirects point at.
    ///
    /// Booking id, status and payment status are appended as query
    /// parameters.
    pub redirect_url: String,

    /// URL the redirect path falls back to on not-found/expired tokens.
    ///
    /// A `reason` query parameter distinguishes the two cases.
    pub error_url: String,

    /// Default number of events returned by the analytics query.
    ///
    /// Default: 50
    pub analytics_limit: usize,
}

impl BookingConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of this service (e.g. "https://book.example.com")
    /// * `redirect_url` - Destination clients are forwarded to
    #[must_use]
    pub fn new(base_url: String, redirect_url: String) -> Self {
        let error_url = format!("{base_url}/booking-error");
        Self {
            base_url,
            redirect_url,
            error_url,
            analytics_limit: DEFAULT_ANALYTICS_LIMIT,
        }
    }

    /// Set the error redirect destination.
    #[must_use]
    pub fn with_error_url(mut self, error_url: String) -> Self {
        self.error_url = error_url;
        self
    }

    /// Set the default analytics query limit.
    #[must_use]
    pub const fn with_analytics_limit(mut self, limit: usize) -> Self {
        self.analytics_limit = limit;
        self
    }

    /// Absolute magic-link URL for a token.
    #[must_use]
    pub fn magic_link(&self, token: &str) -> String {
        format!("{}/redirect/{token}", self.base_url)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self::new(
            "http://localhost:3000".to_string(),
            "http://localhost:3000/booking".to_string(),
        )
    }
}
