// src/utils/time.rs

//! Calendar arithmetic in the upstream's fixed UTC+8 timezone.
//!
//! Every day boundary in this crate is computed here, with the offset passed
//! explicitly rather than read from the host.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// Offset of the upstream's local time from UTC, in seconds.
pub const TARGET_OFFSET_SECS: i32 = 8 * 3600;

/// Canonical display layout for event times.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    CANONICAL_FORMAT,
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// The fixed UTC+8 offset.
pub fn target_offset() -> FixedOffset {
    FixedOffset::east_opt(TARGET_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Convert a millisecond epoch into UTC+8 local time.
pub fn from_millis(ms: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&target_offset()))
}

/// Calendar date of an instant in UTC+8.
pub fn local_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&target_offset()).date_naive()
}

/// 23:59:59 UTC+8 on the given day.
pub fn end_of_day(day: NaiveDate) -> Option<DateTime<Utc>> {
    day.and_hms_opt(23, 59, 59)?
        .and_local_timezone(target_offset())
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render in the canonical layout.
pub fn format_canonical(dt: DateTime<FixedOffset>) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

/// Parse a wall-clock string as UTC+8 local time.
///
/// Accepts the canonical layout and a few common variants; date-only values
/// resolve to midnight.
pub fn parse_local(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    naive.and_local_timezone(target_offset()).single()
}

/// Shortest all-digit value read as a millisecond epoch (1973 onwards).
const MIN_EPOCH_MILLIS_DIGITS: usize = 12;

/// Canonicalize a free-form time value.
///
/// Eight digits are a compact `YYYYMMDD` date, twelve or more a millisecond
/// epoch. Other digit runs and anything unparseable yield `None`.
pub fn canonicalize(text: &str) -> Option<String> {
    let text = text.trim();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return match text.len() {
            8 => NaiveDate::parse_from_str(text, "%Y%m%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .and_then(|naive| naive.and_local_timezone(target_offset()).single())
                .map(format_canonical),
            len if len >= MIN_EPOCH_MILLIS_DIGITS => text
                .parse::<i64>()
                .ok()
                .and_then(from_millis)
                .map(format_canonical),
            _ => None,
        };
    }
    parse_local(text).map(format_canonical)
}
