use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an ISO-8601 instant, assuming UTC when no offset is present.
///
/// Tries RFC 3339 first, then falls back to a bare `YYYY-MM-DDTHH:MM:SS`
/// naive timestamp interpreted as UTC, since the upstream scraper emits both.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
        .ok()
}

/// Localize a race start instant into the viewer's timezone and format it
/// as e.g. "Mar 4, 6:30 pm" (abbreviated month, no-pad day, 12-hour clock).
///
/// Returns None when the instant does not parse; the render layer substitutes
/// the placeholder so a bad timestamp never aborts the surrounding row.
pub fn local_race_time(datetime: &str, tz: Tz) -> Option<String> {
    let instant = parse_instant(datetime)?;
    let local = instant.with_timezone(&tz);
    Some(local.format("%b %-d, %-I:%M %P").to_string())
}
