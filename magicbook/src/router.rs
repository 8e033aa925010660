//! Router composition.
//!
//! Composes all booking and magic-link handlers into a single Axum router.

use crate::environment::Environment;
use crate::handlers::{bookings, magic_link};
use crate::providers::{AnalyticsStore, BookingStore, Clock, Notifier};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create the booking router with all endpoints.
///
/// # Routes
///
/// ## Lifecycle
/// - `POST /api/bookings` - Create a booking (201)
/// - `GET /api/bookings/:id` - Fetch by record id
/// - `POST /api/bookings/confirm/:id` - Confirm (idempotent)
/// - `PUT /api/bookings/payment/:id` - Update payment state
///
/// ## Magic link
/// - `GET /api/magic/:token` - Full payload (404/410 on miss/expiry)
/// - `GET /redirect/:token` - Browser redirect (302, error URL on failure)
/// - `GET /api/preview/:token` - Preview payload
/// - `POST /api/track/:token` - Record a custom event
/// - `GET /api/analytics/:token` - Recent access events
pub fn booking_router<S, A, N, C>(env: Arc<Environment<S, A, N, C>>) -> Router
where
    S: BookingStore + Clone + 'static,
    A: AnalyticsStore + Clone + 'static,
    N: Notifier + Clone + 'static,
    C: Clock + Clone + 'static,
{
    Router::new()
        // Lifecycle routes
        .route("/api/bookings", post(bookings::create_booking::<S, A, N, C>))
        .route("/api/bookings/:id", get(bookings::get_booking::<S, A, N, C>))
        .route(
            "/api/bookings/confirm/:id",
            post(bookings::confirm_booking::<S, A, N, C>),
        )
        .route(
            "/api/bookings/payment/:id",
            put(bookings::update_payment::<S, A, N, C>),
        )
        // Magic link routes
        .route("/api/magic/:token", get(magic_link::get_by_token::<S, A, N, C>))
        .route("/redirect/:token", get(magic_link::redirect::<S, A, N, C>))
        .route("/api/preview/:token", get(magic_link::preview::<S, A, N, C>))
        .route("/api/track/:token", post(magic_link::track::<S, A, N, C>))
        .route(
            "/api/analytics/:token",
            get(magic_link::analytics::<S, A, N, C>),
        )
        .with_state(env)
}
