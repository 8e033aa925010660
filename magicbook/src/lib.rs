//! # Magicbook
//!
//! Booking magic-link service. A magic link is a URL containing an opaque,
//! URL-safe token that resolves to a specific booking without additional
//! authentication. Tokens carry a fixed one-hour TTL; resolutions increment
//! an access counter and leave an analytics trail.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum handlers, router)
//!   └── services: BookingService · MagicLinkResolver · AnalyticsRecorder
//!         └── providers: BookingStore · AnalyticsStore · Notifier · Clock
//!               ├── mocks (in-memory, test-utils feature)
//!               └── stores::PostgresStore (postgres feature)
//! ```
//!
//! Policy (expiration math) is pure and clock-free; every service reads time
//! through the injected [`providers::Clock`].

pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod policy;
pub mod providers;
pub mod router;
pub mod services;
pub mod stores;
pub mod utils;
pub mod validate;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use config::BookingConfig;
pub use environment::Environment;
pub use error::{BookingError, Result};
pub use model::{
    AnalyticsEvent, AppointmentType, Booking, BookingRecordId, BookingStatus,
    CreateBookingRequest, PaymentStatus, PaymentUpdate,
};
pub use router::booking_router;
pub use services::{AnalyticsRecorder, BookingService, MagicLinkResolver};
