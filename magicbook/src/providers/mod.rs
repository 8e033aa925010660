//! Booking providers.
//!
//! This module defines traits for all external dependencies the booking core
//! uses. Providers are **interfaces**, not implementations: the services
//! depend on these traits and the application wires concrete implementations
//! in (`PostgresStore` in production, the in-memory mocks in tests, the
//! console notifier in development).
//!
//! Each store call is an independent transaction against the external
//! datastore; the core performs no cross-request locking and relies on the
//! store's own atomic increment primitive for `access_count` correctness
//! under concurrent resolution of the same token.

pub mod analytics;
pub mod clock;
pub mod notifier;
pub mod store;

pub use analytics::AnalyticsStore;
pub use clock::{Clock, SystemClock};
pub use notifier::{ConsoleNotifier, Notifier};
pub use store::{BookingStore, BookingUpdate};
