//! End-to-end flows across the lifecycle service, resolver and recorder.

use chrono::{Duration, Utc};
use magicbook::mocks::{MockAnalyticsStore, MockBookingStore, MockClock, MockNotifier};
use magicbook::providers::BookingStore;
use magicbook::services::AccessContext;
use magicbook::{
    AppointmentType, BookingConfig, BookingError, CreateBookingRequest, Environment,
    PaymentStatus, PaymentUpdate,
};
use std::sync::Arc;

type TestEnvironment =
    Environment<MockBookingStore, MockAnalyticsStore, MockNotifier, MockClock>;

fn test_env() -> Arc<TestEnvironment> {
    Arc::new(Environment::new(
        MockBookingStore::new(),
        MockAnalyticsStore::new(),
        MockNotifier::new(),
        MockClock::new(),
        BookingConfig::default(),
    ))
}

fn request() -> CreateBookingRequest {
    CreateBookingRequest {
        user_name: "Test User".to_string(),
        user_phone: "+1234567890".to_string(),
        appointment_type: AppointmentType::Consultation,
        appointment_date: Utc::now() + Duration::days(1),
        booking_details: serde_json::Map::new(),
    }
}

#[tokio::test]
async fn access_count_equals_number_of_successful_resolutions() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();
    let token = created.booking.magic_link_token;
    let resolver = env.resolver();
    let context = AccessContext::default();

    resolver.resolve_redirect(&token, &context).await.unwrap();
    resolver.resolve_preview(&token, &context).await.unwrap();
    let booking = resolver.resolve_full(&token, &context).await.unwrap();

    // All three surfaces count; no skips.
    assert_eq!(booking.access_count, 3);
    assert_eq!(env.analytics.len(), 3);
    assert!(env
        .analytics
        .recorded()
        .iter()
        .all(|e| e.event_type == "magic_link_click"));
}

#[tokio::test]
async fn expired_one_second_past_ttl_is_gone_not_missing() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();
    let token = created.booking.magic_link_token;

    env.clock.advance(Duration::hours(1) + Duration::seconds(1));

    let result = env
        .resolver()
        .resolve_full(&token, &AccessContext::default())
        .await;
    assert_eq!(result, Err(BookingError::Expired));

    let unknown = env
        .resolver()
        .resolve_full("missing00000", &AccessContext::default())
        .await;
    assert_eq!(unknown, Err(BookingError::NotFound));
}

#[tokio::test]
async fn expiry_does_not_touch_counters_or_analytics() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();
    let token = created.booking.magic_link_token.clone();

    env.clock.advance(Duration::hours(2));
    let _ = env
        .resolver()
        .resolve_preview(&token, &AccessContext::default())
        .await;

    let stored = env.store.get(created.booking.id).unwrap();
    assert_eq!(stored.access_count, 0);
    assert!(stored.last_accessed_at.is_none());
    assert!(env.analytics.is_empty());
}

#[tokio::test]
async fn confirm_then_resolve_reflects_new_status_in_redirect() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();

    env.booking_service()
        .confirm(created.booking.id)
        .await
        .unwrap();

    let target = env
        .resolver()
        .resolve_redirect(&created.booking.magic_link_token, &AccessContext::default())
        .await
        .unwrap();
    assert!(target.contains("status=CONFIRMED"));
    assert!(target.contains("paymentStatus=PENDING"));
}

#[tokio::test]
async fn payment_and_status_machines_stay_independent() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();

    let updated = env
        .booking_service()
        .update_payment(
            created.booking.id,
            PaymentUpdate {
                payment_status: PaymentStatus::Refunded,
                payment_id: Some("pay_9".to_string()),
                amount: Some(10.0),
                currency: Some("EUR".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.payment_status, PaymentStatus::Refunded);
    assert_eq!(
        updated.status,
        magicbook::BookingStatus::PendingConfirmation
    );
}

#[tokio::test]
async fn expiration_is_immutable_across_mutations() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();
    let expires_at = created.booking.magic_link_expires_at;

    env.booking_service()
        .confirm(created.booking.id)
        .await
        .unwrap();
    env.resolver()
        .resolve_full(&created.booking.magic_link_token, &AccessContext::default())
        .await
        .unwrap();

    let stored = env
        .store
        .find_by_id(created.booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.magic_link_expires_at, expires_at);
}

#[tokio::test]
async fn track_and_analytics_flow() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();
    let id = created.booking.id;

    let recorder = env.recorder();
    recorder
        .record(id, "details_view", Some("UA".to_string()), None)
        .await
        .unwrap();
    env.clock.advance(Duration::seconds(30));
    recorder.record(id, "share_click", None, None).await.unwrap();

    let events = recorder.list_recent(id, 50).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, "share_click");
    assert_eq!(events[1].event_type, "details_view");

    // Custom events are not resolutions.
    let stored = env.store.get(id).unwrap();
    assert_eq!(stored.access_count, 0);
}

#[tokio::test]
async fn delete_cascade_removes_booking() {
    let env = test_env();
    let created = env.booking_service().create(request()).await.unwrap();

    assert!(env.store.delete_cascade(created.booking.id).await.unwrap());
    assert!(!env.store.delete_cascade(created.booking.id).await.unwrap());
    let result = env
        .resolver()
        .resolve_full(&created.booking.magic_link_token, &AccessContext::default())
        .await;
    assert_eq!(result, Err(BookingError::NotFound));
}
