//! Magic-link expiration policy.
//!
//! Pure functions, no I/O. Every caller passes `now` explicitly (the rest of
//! the system obtains it from an injected [`crate::providers::Clock`]), so
//! expiration logic is deterministic and testable without real-time waits.
//!
//! An absent expiration (`None`) is treated as permanently valid. This is
//! deliberate backward compatibility for records created before expiration
//! existed, not a bug: the two states (no TTL vs not-yet-expired) are kept
//! unambiguous by the explicit `Option`.

use chrono::{DateTime, Duration, Utc};

/// Fixed magic-link time-to-live.
#[must_use]
pub fn magic_link_ttl() -> Duration {
    Duration::hours(1)
}

/// Compute the expiration instant for a link created at `now`.
#[must_use]
pub fn compute_expiration(now: DateTime<Utc>) -> DateTime<Utc> {
    now + magic_link_ttl()
}

/// Whether a link is expired at `now`.
///
/// `false` when `expires_at` is absent (non-expiring legacy link).
/// The boundary instant is not expired: expiry requires `now > expires_at`.
#[must_use]
pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expires_at {
        Some(expires_at) => now > expires_at,
        None => false,
    }
}

/// Time left before expiry, clamped at zero.
///
/// `None` means unbounded (the link never expires).
#[must_use]
pub fn remaining(
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<Duration> {
    expires_at.map(|expires_at| (expires_at - now).max(Duration::zero()))
}

/// Human-readable remaining time: `"No expiration"`, `"Expired"`,
/// `"{h}h {m}m"` or `"{m}m"`.
#[must_use]
pub fn format_remaining(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match remaining(expires_at, now) {
        None => "No expiration".to_string(),
        Some(left) if left <= Duration::zero() => "Expired".to_string(),
        Some(left) => {
            let hours = left.num_hours();
            let minutes = left.num_minutes() % 60;
            if hours > 0 {
                format!("{hours}h {minutes}m")
            } else {
                format!("{minutes}m")
            }
        }
    }
}
