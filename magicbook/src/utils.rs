//! Identifier generation helpers.

use crate::constants::{
    BOOKING_ID_PREFIX, BOOKING_ID_SUFFIX_LENGTH, TOKEN_ALPHABET, TOKEN_LENGTH,
};
use rand::Rng;

/// Generate a URL-safe magic-link token of fixed length.
///
/// Drawn uniformly from the 64-symbol URL-safe alphabet; at length 12 the
/// collision probability across realistic booking volumes is negligible, so
/// uniqueness is not re-checked against the store.
#[must_use]
pub fn generate_token() -> String {
    random_string(TOKEN_LENGTH, TOKEN_ALPHABET)
}

/// Generate a human-readable booking id (e.g. `BK-9F3K2XQ7`).
///
/// Uses an uppercase alphanumeric suffix without visually ambiguous symbols.
#[must_use]
pub fn generate_booking_id() -> String {
    const SUFFIX_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";
    format!(
        "{BOOKING_ID_PREFIX}-{}",
        random_string(BOOKING_ID_SUFFIX_LENGTH, SUFFIX_ALPHABET)
    )
}

fn random_string(length: usize, alphabet: &[u8]) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}
