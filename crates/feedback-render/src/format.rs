use jiff::tz::{self, TimeZone};
use jiff::{civil, Timestamp};
use tracing::{debug, warn};

/// Submission times are shown in UTC+8 regardless of where the client is.
pub const DISPLAY_OFFSET_HOURS: i8 = 8;

const DISPLAY_LAYOUT: &str = "%Y/%m/%d %H:%M:%S";

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count: `0 B`, `512 B`, `1.5 KB`, `1.0 MB`.
///
/// Sizes of a kilobyte or more get one decimal place. GB is the largest unit.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", SIZE_UNITS[unit])
}

pub fn display_zone() -> TimeZone {
    TimeZone::fixed(tz::offset(DISPLAY_OFFSET_HOURS))
}

/// Parse a client-supplied timestamp.
///
/// Strings are RFC 3339 instants, or civil date-times without an offset
/// which are read as UTC. Numbers are milliseconds since the Unix epoch.
pub fn parse_timestamp(value: &serde_json::Value) -> Option<Timestamp> {
    match value {
        serde_json::Value::String(s) => parse_timestamp_text(s.trim()),
        serde_json::Value::Number(n) => {
            let millis = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })?;
            Timestamp::from_millisecond(millis).ok()
        }
        _ => None,
    }
}

fn parse_timestamp_text(s: &str) -> Option<Timestamp> {
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Some(ts);
    }
    let datetime: civil::DateTime = s.parse().ok()?;
    datetime
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Format an instant as `YYYY/MM/DD HH:MM:SS` in UTC+8.
pub fn format_instant(instant: Timestamp) -> String {
    instant
        .to_zoned(display_zone())
        .strftime(DISPLAY_LAYOUT)
        .to_string()
}

/// Format the submission time, falling back to `now` when the client sent
/// nothing usable. Never fails.
pub fn format_submitted_at(value: Option<&serde_json::Value>, now: Timestamp) -> String {
    let instant = match value {
        None => {
            debug!("no submission timestamp, using current time");
            now
        }
        Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
            warn!(timestamp = %raw, "unparseable submission timestamp, using current time");
            now
        }),
    };
    format_instant(instant)
}
