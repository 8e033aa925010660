//! Booking services.
//!
//! The three core components built over the provider traits:
//!
//! - [`BookingService`] — creates bookings and drives status/payment
//!   transitions.
//! - [`MagicLinkResolver`] — resolves tokens into redirects, previews or
//!   full payloads, tracking access.
//! - [`AnalyticsRecorder`] — appends and queries access events.

pub mod analytics;
pub mod lifecycle;
pub mod resolver;

pub use analytics::AnalyticsRecorder;
pub use lifecycle::BookingService;
pub use resolver::{AccessContext, MagicLinkResolver, PreviewPayload};
