//! Magic-link resolution handlers.
//!
//! The five token-addressed surfaces: full payload, browser redirect,
//! preview, custom event tracking and the analytics query. All gate on
//! expiry; only the first three count as resolutions (access increment plus
//! `magic_link_click` event).

use crate::environment::Environment;
use crate::error::BookingError;
use crate::extract::{ClientIp, UserAgent};
use crate::handlers::ApiError;
use crate::model::{AnalyticsEvent, Booking};
use crate::providers::{AnalyticsStore, BookingStore, Clock, Notifier};
use crate::services::{AccessContext, PreviewPayload};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Fetch the full booking payload by token (magic-API path).
///
/// # Endpoint
///
/// ```text
/// GET /api/magic/:token
/// ```
///
/// Counts as an access. `200` with the booking, `404` unknown token, `410`
/// expired. No `isExpired` flag in the payload: the request fails closed on
/// expiry, so it would always be false.
pub async fn get_by_token<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(token): Path<String>,
    client_ip: ClientIp,
    user_agent: UserAgent,
) -> Result<Json<Booking>, ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let context = AccessContext {
        user_agent: user_agent.0,
        ip_address: client_ip.0,
    };
    let booking = env.resolver().resolve_full(&token, &context).await?;
    Ok(Json(booking))
}

/// Browser redirect: `302` to the destination URL on success, `302` to the
/// error URL with a `reason` parameter on unknown or expired tokens.
///
/// # Endpoint
///
/// ```text
/// GET /redirect/:token
/// ```
///
/// Counts as an access. Expired links redirect with `reason=expired` — the
/// redirect path gates on expiry exactly like the API paths.
pub async fn redirect<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(token): Path<String>,
    client_ip: ClientIp,
    user_agent: UserAgent,
) -> Result<Response, ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let context = AccessContext {
        user_agent: user_agent.0,
        ip_address: client_ip.0,
    };

    let target = match env.resolver().resolve_redirect(&token, &context).await {
        Ok(target) => target,
        Err(BookingError::NotFound) => {
            info!(token = %token, "Redirect for unknown token");
            format!("{}?reason=not-found", env.config.error_url)
        }
        Err(BookingError::Expired) => {
            info!(token = %token, "Redirect for expired token");
            format!("{}?reason=expired", env.config.error_url)
        }
        Err(other) => return Err(other.into()),
    };

    Ok(found(&target))
}

/// `302 Found` response (legacy browser-redirect semantics, not axum's 303/307
/// helpers).
fn found(target: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, target.to_string())]).into_response()
}

/// Preview payload by token.
///
/// # Endpoint
///
/// ```text
/// GET /api/preview/:token
/// ```
///
/// Counts as an access. `200` with booking summary, canonical link and
/// human-readable remaining validity; `404`/`410` otherwise.
pub async fn preview<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(token): Path<String>,
    client_ip: ClientIp,
    user_agent: UserAgent,
) -> Result<Json<PreviewPayload>, ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let context = AccessContext {
        user_agent: user_agent.0,
        ip_address: client_ip.0,
    };
    let payload = env.resolver().resolve_preview(&token, &context).await?;
    Ok(Json(payload))
}

/// Request to record a custom interaction event.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    /// Free-form event tag.
    pub event_type: String,
}

/// Response after recording an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    /// Recorded event tag.
    pub event_type: String,
}

/// Record a custom interaction event against the booking behind a token.
///
/// # Endpoint
///
/// ```text
/// POST /api/track/:token
/// ```
///
/// Foreground record: a failed insert surfaces as `500`. Gates on expiry but
/// does NOT count as an access (no increment, no implicit click event).
pub async fn track<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(token): Path<String>,
    client_ip: ClientIp,
    user_agent: UserAgent,
    Json(request): Json<TrackRequest>,
) -> Result<(StatusCode, Json<TrackResponse>), ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let booking = env.resolver().lookup_live(&token).await?;

    env.recorder()
        .record(booking.id, request.event_type.clone(), user_agent.0, client_ip.0)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TrackResponse {
            event_type: request.event_type,
        }),
    ))
}

/// Analytics summary for the booking behind a token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Human-readable booking id.
    pub booking_id: String,

    /// Total successful resolutions of the token.
    pub access_count: i64,

    /// Last successful access, if any.
    pub last_accessed_at: Option<DateTime<Utc>>,

    /// Most-recent-first events, bounded by the configured limit.
    pub events: Vec<AnalyticsEvent>,
}

/// Recent analytics events for the booking behind a token.
///
/// # Endpoint
///
/// ```text
/// GET /api/analytics/:token
/// ```
///
/// Data-access path: gates on expiry (`410`) but does not count as an
/// access.
pub async fn analytics<S, A, N, C>(
    State(env): State<Arc<Environment<S, A, N, C>>>,
    Path(token): Path<String>,
) -> Result<Json<AnalyticsResponse>, ApiError>
where
    S: BookingStore + Clone,
    A: AnalyticsStore + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    let booking = env.resolver().lookup_live(&token).await?;
    let events = env
        .recorder()
        .list_recent(booking.id, env.config.analytics_limit)
        .await?;

    Ok(Json(AnalyticsResponse {
        booking_id: booking.booking_id,
        access_count: booking.access_count,
        last_accessed_at: booking.last_accessed_at,
        events,
    }))
}
