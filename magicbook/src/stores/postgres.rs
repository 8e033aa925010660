//! PostgreSQL-backed booking and analytics store.
//!
//! Uses runtime-bound queries rather than the `query!` macros so the
//! workspace builds without a live `DATABASE_URL`. The `record_access`
//! increment is a single UPDATE (`access_count = access_count + 1`), which
//! is the atomicity the [`BookingStore`] contract requires; analytics rows
//! cascade-delete through the foreign key.

use crate::error::{BookingError, Result};
use crate::model::{
    AnalyticsEvent, AppointmentType, Booking, BookingRecordId, BookingStatus,
    PaymentStatus,
};
use crate::providers::{AnalyticsStore, BookingStore, BookingUpdate};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

/// PostgreSQL store implementing both [`BookingStore`] and
/// [`AnalyticsStore`].
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and run pending migrations.
    ///
    /// # Errors
    ///
    /// Returns a store error if the connection or a migration fails.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(store_err)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| BookingError::Store(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (migrations are the caller's concern).
    #[must_use]
    pub const fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_err(error: sqlx::Error) -> BookingError {
    BookingError::Store(error.to_string())
}

fn appointment_type_from_str(s: &str) -> Result<AppointmentType> {
    match s {
        "CONSULTATION" => Ok(AppointmentType::Consultation),
        "TUTORIAL" => Ok(AppointmentType::Tutorial),
        "ASSESSMENT" => Ok(AppointmentType::Assessment),
        "GROUP_SESSION" => Ok(AppointmentType::GroupSession),
        "WORKSHOP" => Ok(AppointmentType::Workshop),
        other => Err(BookingError::Store(format!(
            "unknown appointment type: {other}"
        ))),
    }
}

fn status_from_str(s: &str) -> Result<BookingStatus> {
    match s {
        "PENDING_CONFIRMATION" => Ok(BookingStatus::PendingConfirmation),
        "CONFIRMED" => Ok(BookingStatus::Confirmed),
        "CANCELLED" => Ok(BookingStatus::Cancelled),
        "COMPLETED" => Ok(BookingStatus::Completed),
        other => Err(BookingError::Store(format!("unknown status: {other}"))),
    }
}

fn payment_status_from_str(s: &str) -> Result<PaymentStatus> {
    match s {
        "PENDING" => Ok(PaymentStatus::Pending),
        "COMPLETED" => Ok(PaymentStatus::Completed),
        "FAILED" => Ok(PaymentStatus::Failed),
        "REFUNDED" => Ok(PaymentStatus::Refunded),
        "CANCELLED" => Ok(PaymentStatus::Cancelled),
        other => Err(BookingError::Store(format!(
            "unknown payment status: {other}"
        ))),
    }
}

fn booking_from_row(row: &PgRow) -> Result<Booking> {
    let appointment_type: String = row.try_get("appointment_type").map_err(store_err)?;
    let status: String = row.try_get("status").map_err(store_err)?;
    let payment_status: String = row.try_get("payment_status").map_err(store_err)?;
    let details: serde_json::Value = row.try_get("booking_details").map_err(store_err)?;
    let booking_details = match details {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    Ok(Booking {
        id: BookingRecordId(row.try_get::<Uuid, _>("id").map_err(store_err)?),
        booking_id: row.try_get("booking_id").map_err(store_err)?,
        magic_link_token: row.try_get("magic_link_token").map_err(store_err)?,
        user_name: row.try_get("user_name").map_err(store_err)?,
        user_phone: row.try_get("user_phone").map_err(store_err)?,
        appointment_type: appointment_type_from_str(&appointment_type)?,
        appointment_date: row.try_get("appointment_date").map_err(store_err)?,
        booking_details,
        status: status_from_str(&status)?,
        payment_status: payment_status_from_str(&payment_status)?,
        payment_id: row.try_get("payment_id").map_err(store_err)?,
        amount: row.try_get("amount").map_err(store_err)?,
        currency: row.try_get("currency").map_err(store_err)?,
        created_at: row.try_get("created_at").map_err(store_err)?,
        confirmed_at: row.try_get("confirmed_at").map_err(store_err)?,
        payment_updated_at: row.try_get("payment_updated_at").map_err(store_err)?,
        last_accessed_at: row.try_get("last_accessed_at").map_err(store_err)?,
        magic_link_expires_at: row.try_get("magic_link_expires_at").map_err(store_err)?,
        access_count: row.try_get("access_count").map_err(store_err)?,
    })
}

const BOOKING_COLUMNS: &str = "id, booking_id, magic_link_token, user_name, user_phone, \
     appointment_type, appointment_date, booking_details, status, payment_status, \
     payment_id, amount, currency, created_at, confirmed_at, payment_updated_at, \
     last_accessed_at, magic_link_expires_at, access_count";

impl BookingStore for PostgresStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE magic_link_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn find_by_id(&self, id: BookingRecordId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn insert(&self, booking: Booking) -> Result<()> {
        sqlx::query(
            "INSERT INTO bookings (id, booking_id, magic_link_token, user_name, user_phone, \
             appointment_type, appointment_date, booking_details, status, payment_status, \
             payment_id, amount, currency, created_at, confirmed_at, payment_updated_at, \
             last_accessed_at, magic_link_expires_at, access_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)",
        )
        .bind(booking.id.0)
        .bind(&booking.booking_id)
        .bind(&booking.magic_link_token)
        .bind(&booking.user_name)
        .bind(&booking.user_phone)
        .bind(booking.appointment_type.as_str())
        .bind(booking.appointment_date)
        .bind(serde_json::Value::Object(booking.booking_details.clone()))
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_id)
        .bind(booking.amount)
        .bind(&booking.currency)
        .bind(booking.created_at)
        .bind(booking.confirmed_at)
        .bind(booking.payment_updated_at)
        .bind(booking.last_accessed_at)
        .bind(booking.magic_link_expires_at)
        .bind(booking.access_count)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn apply(
        &self,
        id: BookingRecordId,
        update: BookingUpdate,
    ) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "UPDATE bookings SET \
             status = COALESCE($2, status), \
             confirmed_at = COALESCE($3, confirmed_at), \
             payment_status = COALESCE($4, payment_status), \
             payment_id = CASE WHEN $5 THEN $6 ELSE payment_id END, \
             amount = CASE WHEN $7 THEN $8 ELSE amount END, \
             currency = CASE WHEN $9 THEN $10 ELSE currency END, \
             payment_updated_at = COALESCE($11, payment_updated_at) \
             WHERE id = $1 \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id.0)
        .bind(update.status.map(BookingStatus::as_str))
        .bind(update.confirmed_at)
        .bind(update.payment_status.map(PaymentStatus::as_str))
        .bind(update.payment_id.is_some())
        .bind(update.payment_id.flatten())
        .bind(update.amount.is_some())
        .bind(update.amount.flatten())
        .bind(update.currency.is_some())
        .bind(update.currency.flatten())
        .bind(update.payment_updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn record_access(
        &self,
        id: BookingRecordId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        // Single UPDATE: the increment is atomic server-side.
        let row = sqlx::query(&format!(
            "UPDATE bookings SET access_count = access_count + 1, last_accessed_at = $2 \
             WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id.0)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn delete_cascade(&self, id: BookingRecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected() > 0)
    }
}

impl AnalyticsStore for PostgresStore {
    async fn insert(&self, event: AnalyticsEvent) -> Result<()> {
        sqlx::query(
            "INSERT INTO booking_analytics (booking_id, event_type, user_agent, ip_address, event_timestamp) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(event.booking_id.0)
        .bind(&event.event_type)
        .bind(&event.user_agent)
        .bind(&event.ip_address)
        .bind(event.timestamp)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn list_recent(
        &self,
        booking_id: BookingRecordId,
        limit: usize,
    ) -> Result<Vec<AnalyticsEvent>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            "SELECT booking_id, event_type, user_agent, ip_address, event_timestamp \
             FROM booking_analytics WHERE booking_id = $1 \
             ORDER BY event_timestamp DESC LIMIT $2",
        )
        .bind(booking_id.0)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.iter()
            .map(|row| {
                Ok(AnalyticsEvent {
                    booking_id: BookingRecordId(
                        row.try_get::<Uuid, _>("booking_id").map_err(store_err)?,
                    ),
                    event_type: row.try_get("event_type").map_err(store_err)?,
                    user_agent: row.try_get("user_agent").map_err(store_err)?,
                    ip_address: row.try_get("ip_address").map_err(store_err)?,
                    timestamp: row.try_get("event_timestamp").map_err(store_err)?,
                })
            })
            .collect()
    }
}
