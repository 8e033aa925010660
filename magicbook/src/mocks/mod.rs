//! Mock providers for testing.
//!
//! In-memory implementations of every provider trait, deterministic and
//! fast. Gated by the default-on `test-utils` feature so downstream crates
//! can use them in their own tests.

pub mod analytics;
pub mod clock;
pub mod notifier;
pub mod store;

pub use analytics::MockAnalyticsStore;
pub use clock::MockClock;
pub use notifier::MockNotifier;
pub use store::MockBookingStore;
