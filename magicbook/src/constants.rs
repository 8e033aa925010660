//! Booking constants.
//!
//! This module contains constant values used throughout the booking system.

/// Magic-link token length in characters.
///
/// Tokens are drawn from [`TOKEN_ALPHABET`] (64 symbols), so a 12-character
/// token has 64^12 possible values and collisions are negligible.
pub const TOKEN_LENGTH: usize = 12;

/// URL-safe alphabet tokens are drawn from (base64url symbol set).
pub const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Prefix for human-readable booking ids (e.g. `BK-9F3K2XQ7`).
pub const BOOKING_ID_PREFIX: &str = "BK";

/// Length of the random suffix of a human-readable booking id.
pub const BOOKING_ID_SUFFIX_LENGTH: usize = 8;

/// Default number of analytics events returned by the recent-events query.
pub const DEFAULT_ANALYTICS_LIMIT: usize = 50;

/// Event type identifiers recorded by the resolver.
pub mod event_types {
    /// Emitted on every successful magic-link resolution.
    pub const MAGIC_LINK_CLICK: &str = "magic_link_click";
}
