use chrono::{DateTime, Utc};

use crate::localize::parse_instant;

/// Whether a race is currently live: true iff `now` is strictly after the
/// race start instant. Equal instants are not live.
///
/// `now` is always passed in rather than read from the system clock, so
/// callers can pin it for deterministic testing. An unparseable instant is
/// treated as not yet live.
pub fn is_live(datetime: &str, now: DateTime<Utc>) -> bool {
    match parse_instant(datetime) {
        Some(start) => now > start,
        None => false,
    }
}
