//! Booking lifecycle handlers.

use crate::environment::Environment;
use crate::error::BookingError;
use crate::handlers::ApiError;
use crate::model::{
    Booking, BookingRecordId, BookingView, CreateBookingRequest, PaymentUpdate,
};
use crate::providers::{AnalyticsStore, BookingStore, Clock, Notifier};
use crate::validate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Response after creating a booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    /// Human-readable booking id.
    pub booking_id: String,

    /// Opaque record id.
    pub uuid: Uuid,

    /// Magic-link token.
    pub magic_link_id: String,

    /// Absolute magic-link URL.
    pub magic_link: String,

    /// Initial booking status (wire form).
    pub status: String,
}

/// Create a booking.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// ```
///
/// Returns `201 Created` with the booking id, record uuid, token and
/// absolute magic link, or `400` with itemized field errors.
pub async fn create_booking<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let errors = validate::validate_create(&request);
    if !errors.is_empty() {
        return Err(BookingError::validation(errors).into());
    }

    let created = env.booking_service().create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking_id: created.booking.booking_id.clone(),
            uuid: created.booking.id.0,
            magic_link_id: created.booking.magic_link_token.clone(),
            magic_link: created.magic_link,
            status: created.booking.status.as_str().to_string(),
        }),
    ))
}

/// Fetch a booking by record id, with its derived `isExpired` flag.
///
/// # Endpoint
///
/// ```text
/// GET /api/bookings/:id
/// ```
pub async fn get_booking<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let view = env
        .booking_service()
        .get_by_id(BookingRecordId(id))
        .await?;
    Ok(Json(view))
}

/// Confirm a booking (idempotent re-confirm allowed).
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings/confirm/:id
/// ```
pub async fn confirm_booking<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let booking = env.booking_service().confirm(BookingRecordId(id)).await?;
    Ok(Json(booking))
}

/// Update payment state.
///
/// # Endpoint
///
/// ```text
/// PUT /api/bookings/payment/:id
/// ```
///
/// Business rules enforced before the store is touched: `COMPLETED` requires
/// `paymentId` and `amount`; any `amount` requires a `currency`.
pub async fn update_payment<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(id): Path<Uuid>,
    Json(update): Json<PaymentUpdate>,
) -> Result<Json<Booking>, ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let errors = validate::validate_payment(&update);
    if !errors.is_empty() {
        return Err(BookingError::validation(errors).into());
    }

    let booking = env
        .booking_service()
        .update_payment(BookingRecordId(id), update)
        .await?;
    Ok(Json(booking))
}
