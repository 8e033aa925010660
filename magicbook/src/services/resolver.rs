//! Magic-link resolver.
//!
//! A resolution is a per-request state machine with three terminal exits:
//! not-found, expired, success. Expiration is evaluated against the injected
//! clock at resolution time; no grace period, no skew tolerance. Every path
//! — including the browser redirect — gates on expiry before producing a
//! result, with the expired exit always distinct from not-found.

use crate::config::BookingConfig;
use crate::constants::event_types;
use crate::error::{BookingError, Result};
use crate::model::Booking;
use crate::providers::{AnalyticsStore, BookingStore, Clock};
use crate::services::AnalyticsRecorder;
use crate::policy;
use serde::Serialize;
use tracing::debug;

/// Request-scoped client context recorded with access events.
#[derive(Debug, Clone, Default)]
pub struct AccessContext {
    /// Client user agent, when known.
    pub user_agent: Option<String>,

    /// Client IP address, when known.
    pub ip_address: Option<String>,
}

/// Preview payload returned by the preview surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPayload {
    /// Human-readable booking id.
    pub booking_id: String,

    /// Customer name.
    pub user_name: String,

    /// Appointment type (wire form).
    pub appointment_type: String,

    /// Appointment timestamp.
    pub appointment_date: chrono::DateTime<chrono::Utc>,

    /// Booking status (wire form).
    pub status: String,

    /// Payment status (wire form).
    pub payment_status: String,

    /// Canonical magic-link URL.
    pub magic_link: String,

    /// Human-readable remaining validity.
    pub expires_in: String,
}

/// Magic-link resolver.
#[derive(Clone)]
pub struct MagicLinkResolver<S, A, C>
where
    S: BookingStore,
    A: AnalyticsStore,
    C: Clock + Clone,
{
    store: S,
    recorder: AnalyticsRecorder<A, C>,
    clock: C,
    config: BookingConfig,
}

impl<S, A, C> MagicLinkResolver<S, A, C>
where
    S: BookingStore,
    A: AnalyticsStore,
    C: Clock + Clone,
{
    /// Create a new resolver.
    #[must_use]
    pub fn new(store: S, analytics: A, clock: C, config: BookingConfig) -> Self {
        Self {
            store,
            recorder: AnalyticsRecorder::new(analytics, clock.clone()),
            clock,
            config,
        }
    }

    /// Resolve a token into the browser-redirect target URL.
    ///
    /// Counts as an access: increments `access_count`, touches
    /// `last_accessed_at` and emits a best-effort `magic_link_click` event.
    ///
    /// # Errors
    ///
    /// [`BookingError::NotFound`] for an unknown token,
    /// [`BookingError::Expired`] past TTL, [`BookingError::Store`] on store
    /// failure. The HTTP layer maps the first two to error-URL redirects.
    pub async fn resolve_redirect(
        &self,
        token: &str,
        context: &AccessContext,
    ) -> Result<String> {
        let booking = self.resolve(token, context).await?;
        Ok(format!(
            "{}?bookingId={}&status={}&paymentStatus={}",
            self.config.redirect_url,
            booking.booking_id,
            booking.status.as_str(),
            booking.payment_status.as_str(),
        ))
    }

    /// Resolve a token into a preview payload.
    ///
    /// Counts as an access, like [`Self::resolve_redirect`].
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::resolve_redirect`]; the HTTP layer maps
    /// expired to 410 Gone, never 404.
    pub async fn resolve_preview(
        &self,
        token: &str,
        context: &AccessContext,
    ) -> Result<PreviewPayload> {
        let booking = self.resolve(token, context).await?;
        Ok(PreviewPayload {
            booking_id: booking.booking_id.clone(),
            user_name: booking.user_name.clone(),
            appointment_type: booking.appointment_type.as_str().to_string(),
            appointment_date: booking.appointment_date,
            status: booking.status.as_str().to_string(),
            payment_status: booking.payment_status.as_str().to_string(),
            magic_link: self.config.magic_link(&booking.magic_link_token),
            expires_in: policy::format_remaining(
                booking.magic_link_expires_at,
                self.clock.now(),
            ),
        })
    }

    /// Resolve a token into the full booking payload (magic-API path).
    ///
    /// Counts as an access. No derived `is_expired` flag is attached: the
    /// request already failed closed on expiry, so the flag would always be
    /// `false`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::resolve_redirect`].
    pub async fn resolve_full(
        &self,
        token: &str,
        context: &AccessContext,
    ) -> Result<Booking> {
        self.resolve(token, context).await
    }

    /// Look a token up and gate on expiry WITHOUT side effects.
    ///
    /// Used by the track and analytics surfaces: they are data-access paths
    /// and fail closed on expiry, but viewing analytics or recording a custom
    /// event is not a resolution and must not move `access_count`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::resolve_redirect`].
    pub async fn lookup_live(&self, token: &str) -> Result<Booking> {
        let booking = self
            .store
            .find_by_token(token)
            .await?
            .ok_or(BookingError::NotFound)?;

        if policy::is_expired(booking.magic_link_expires_at, self.clock.now()) {
            return Err(BookingError::Expired);
        }

        Ok(booking)
    }

    async fn resolve(&self, token: &str, context: &AccessContext) -> Result<Booking> {
        let booking = self.lookup_live(token).await?;
        let now = self.clock.now();

        let booking = self
            .store
            .record_access(booking.id, now)
            .await?
            // The booking vanished between lookup and increment; to the
            // caller that is an unknown token.
            .ok_or(BookingError::NotFound)?;

        debug!(
            booking_id = %booking.booking_id,
            access_count = booking.access_count,
            "Magic link resolved"
        );

        self.recorder
            .record_best_effort(
                booking.id,
                event_types::MAGIC_LINK_CLICK,
                context.user_agent.clone(),
                context.ip_address.clone(),
            )
            .await;

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockAnalyticsStore, MockBookingStore, MockClock, MockNotifier};
    use crate::model::CreateBookingRequest;
    use crate::services::BookingService;
    use chrono::{Duration, Utc};

    struct Fixture {
        store: MockBookingStore,
        analytics: MockAnalyticsStore,
        clock: MockClock,
        resolver: MagicLinkResolver<MockBookingStore, MockAnalyticsStore, MockClock>,
        token: String,
    }

    async fn fixture() -> Fixture {
        let store = MockBookingStore::new();
        let analytics = MockAnalyticsStore::new();
        let clock = MockClock::new();
        let config = BookingConfig::default();

        let service = BookingService::new(
            store.clone(),
            MockNotifier::new(),
            clock.clone(),
            config.clone(),
        );
        let created = service
            .create(CreateBookingRequest {
                user_name: "Test User".to_string(),
                user_phone: "+1234567890".to_string(),
                appointment_type: crate::model::AppointmentType::Consultation,
                appointment_date: Utc::now() + Duration::days(1),
                booking_details: serde_json::Map::new(),
            })
            .await
            .unwrap();

        let resolver = MagicLinkResolver::new(
            store.clone(),
            analytics.clone(),
            clock.clone(),
            config,
        );

        Fixture {
            store,
            analytics,
            clock,
            resolver,
            token: created.booking.magic_link_token,
        }
    }

    #[tokio::test]
    async fn test_n_resolutions_count_n_accesses() {
        let f = fixture().await;
        let context = AccessContext::default();

        for _ in 0..3 {
            f.resolver.resolve_full(&f.token, &context).await.unwrap();
        }

        let booking = f.store.find_by_token(&f.token).await.unwrap().unwrap();
        assert_eq!(booking.access_count, 3);
        assert_eq!(f.analytics.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_token_has_no_side_effects() {
        let f = fixture().await;

        let result = f
            .resolver
            .resolve_full("nope00000000", &AccessContext::default())
            .await;

        assert_eq!(result, Err(BookingError::NotFound));
        assert!(f.analytics.is_empty());
        let booking = f.store.find_by_token(&f.token).await.unwrap().unwrap();
        assert_eq!(booking.access_count, 0);
    }

    #[tokio::test]
    async fn test_expired_token_is_gone_not_missing() {
        let f = fixture().await;
        f.clock.advance(Duration::hours(1) + Duration::seconds(1));

        let result = f
            .resolver
            .resolve_preview(&f.token, &AccessContext::default())
            .await;

        assert_eq!(result, Err(BookingError::Expired));
        assert!(f.analytics.is_empty());
    }

    #[tokio::test]
    async fn test_redirect_path_gates_on_expiry_too() {
        let f = fixture().await;
        f.clock.advance(Duration::hours(2));

        let result = f
            .resolver
            .resolve_redirect(&f.token, &AccessContext::default())
            .await;
        assert_eq!(result, Err(BookingError::Expired));
    }

    #[tokio::test]
    async fn test_boundary_instant_still_resolves() {
        let f = fixture().await;
        // Exactly at expires_at: not expired.
        f.clock.advance(Duration::hours(1));

        let result = f
            .resolver
            .resolve_full(&f.token, &AccessContext::default())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_redirect_target_carries_booking_state() {
        let f = fixture().await;

        let target = f
            .resolver
            .resolve_redirect(&f.token, &AccessContext::default())
            .await
            .unwrap();

        let booking = f.store.find_by_token(&f.token).await.unwrap().unwrap();
        assert_eq!(
            target,
            format!(
                "http://localhost:3000/booking?bookingId={}&status=PENDING_CONFIRMATION&paymentStatus=PENDING",
                booking.booking_id
            )
        );
    }

    #[tokio::test]
    async fn test_preview_includes_link_and_remaining_time() {
        let f = fixture().await;

        let preview = f
            .resolver
            .resolve_preview(&f.token, &AccessContext::default())
            .await
            .unwrap();

        assert_eq!(preview.magic_link, format!("http://localhost:3000/redirect/{}", f.token));
        assert_eq!(preview.expires_in, "1h 0m");
        assert_eq!(preview.status, "PENDING_CONFIRMATION");
    }

    #[tokio::test]
    async fn test_analytics_failure_does_not_fail_resolution() {
        let f = fixture().await;
        f.analytics.set_fail(true);

        let context = AccessContext {
            user_agent: Some("Mozilla/5.0 (Test)".to_string()),
            ip_address: Some("203.0.113.1".to_string()),
        };
        let booking = f.resolver.resolve_full(&f.token, &context).await.unwrap();
        assert_eq!(booking.access_count, 1);
    }

    #[tokio::test]
    async fn test_click_event_carries_client_context() {
        let f = fixture().await;

        let context = AccessContext {
            user_agent: Some("Mozilla/5.0 (Test)".to_string()),
            ip_address: Some("203.0.113.1".to_string()),
        };
        f.resolver.resolve_full(&f.token, &context).await.unwrap();

        let events = f.analytics.recorded();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "magic_link_click");
        assert_eq!(events[0].user_agent.as_deref(), Some("Mozilla/5.0 (Test)"));
        assert_eq!(events[0].ip_address.as_deref(), Some("203.0.113.1"));
    }

    #[tokio::test]
    async fn test_click_event_is_stamped_with_the_injected_clock() {
        let f = fixture().await;
        f.clock.advance(Duration::minutes(10));

        f.resolver
            .resolve_full(&f.token, &AccessContext::default())
            .await
            .unwrap();

        let events = f.analytics.recorded();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp, f.clock.now());
    }

    #[tokio::test]
    async fn test_lookup_live_has_no_side_effects() {
        let f = fixture().await;

        f.resolver.lookup_live(&f.token).await.unwrap();

        let booking = f.store.find_by_token(&f.token).await.unwrap().unwrap();
        assert_eq!(booking.access_count, 0);
        assert!(booking.last_accessed_at.is_none());
        assert!(f.analytics.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_booking_without_expiration_always_resolves() {
        let f = fixture().await;
        let booking = f.store.find_by_token(&f.token).await.unwrap().unwrap();

        // Simulate a pre-expiration record.
        let mut legacy = booking.clone();
        legacy.id = crate::model::BookingRecordId::new();
        legacy.booking_id = "BK-LEGACY01".to_string();
        legacy.magic_link_token = "legacy000000".to_string();
        legacy.magic_link_expires_at = None;
        f.store.insert(legacy).await.unwrap();

        f.clock.advance(Duration::days(365));
        let result = f
            .resolver
            .resolve_full("legacy000000", &AccessContext::default())
            .await;
        assert!(result.is_ok());
    }
}
