//! Booking environment.
//!
//! Bundles all injected providers plus the configuration for dependency
//! injection into handlers and services.

use crate::config::BookingConfig;
use crate::providers::{AnalyticsStore, BookingStore, Clock, Notifier};
use crate::services::{AnalyticsRecorder, BookingService, MagicLinkResolver};

/// Booking environment.
///
/// Contains every external dependency the services need.
///
/// # Type Parameters
///
/// - `S`: booking store
/// - `A`: analytics store
/// - `N`: notifier
/// - `C`: clock
#[derive(Clone)]
pub struct Environment<S, A, N, C>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    /// Booking store.
    pub store: S,

    /// Analytics store.
    pub analytics: A,

    /// Notifier (SMS or similar).
    pub notifier: N,

    /// Clock.
    pub clock: C,

    /// Service configuration.
    pub config: BookingConfig,
}

impl<S, A, N, C> Environment<S, A, N, C>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    /// Create a new environment.
    #[must_use]
    pub const fn new(
        store: S,
        analytics: A,
        notifier: N,
        clock: C,
        config: BookingConfig,
    ) -> Self {
        Self {
            store,
            analytics,
            notifier,
            clock,
            config,
        }
    }

    /// Lifecycle service over this environment.
    #[must_use]
    pub fn booking_service(&self) -> BookingService<S, N, C> {
        BookingService::new(
            self.store.clone(),
            self.notifier.clone(),
            self.clock.clone(),
            self.config.clone(),
        )
    }

    /// Resolver over this environment.
    #[must_use]
    pub fn resolver(&self) -> MagicLinkResolver<S, A, C> {
        MagicLinkResolver::new(
            self.store.clone(),
            self.analytics.clone(),
            self.clock.clone(),
            self.config.clone(),
        )
    }

    /// Analytics recorder over this environment.
    #[must_use]
    pub fn recorder(&self) -> AnalyticsRecorder<A, C> {
        AnalyticsRecorder::new(self.analytics.clone(), self.clock.clone())
    }
}
