use chrono::DateTime;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Watermark value meaning "never notified".
pub const NEVER_UPDATED: Timestamp = 0;

/// Feed timestamps look like `2024-01-10T00:00:00.000Z` or
/// `2024-01-10T09:30:00.000+02:00`.
const FEED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Parses a feed `<updated>` value into epoch milliseconds.
///
/// Returns `None` for anything that does not match the feed's
/// ISO-8601-with-offset layout.
pub fn parse_feed_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    let normalized = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(prefix) => format!("{prefix}+00:00"),
        None => raw.to_string(),
    };
    DateTime::parse_from_str(&normalized, FEED_TIME_FORMAT)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
