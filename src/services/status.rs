// src/services/status.rs

//! Status annotations derived from event timestamps.
//!
//! Both functions are pure in `(item, now)`; all day boundaries are taken in
//! UTC+8 through [`crate::utils::time`].

use chrono::{DateTime, Utc};

use crate::models::{EndedStatus, RawEventItem};
use crate::utils::time;

/// Appended to the name of a cancelled event.
pub const CANCELLED_MARKER: &str = "(已取消)";

/// Appended while the event is running.
pub const IN_PROGRESS_MARKER: &str = "(进行中)";

/// Marker for an event starting `days` calendar days from today.
pub fn starts_in_marker(days: i64) -> String {
    format!("(还有{days}天开始)")
}

/// Suffix describing where `now` sits relative to the event dates.
///
/// Empty when there is no start time, when the event is over, or when it
/// started earlier today but outside its date range.
pub fn status_suffix(item: &RawEventItem, now: DateTime<Utc>) -> String {
    let Some(enter) = item.enter_time.and_then(time::from_millis) else {
        return String::new();
    };
    let end = item
        .end_time
        .and_then(time::from_millis)
        .unwrap_or(enter);

    let enter_day = enter.date_naive();
    let end_day = end.date_naive();

    let Some(close) = time::end_of_day(end_day) else {
        return String::new();
    };
    if now.timestamp() > close.timestamp() {
        return String::new();
    }

    let today = time::local_day(now);
    if enter_day <= today && today <= end_day {
        return IN_PROGRESS_MARKER.to_string();
    }

    if now < enter.with_timezone(&Utc) {
        let days = (enter_day - today).num_days();
        if days > 0 {
            return starts_in_marker(days);
        }
    }

    String::new()
}

/// Coarse lifecycle label.
///
/// Priority: the `enabled` enum, then the end date, then the explicit flag.
pub fn ended_label(item: &RawEventItem, now: DateTime<Utc>) -> EndedStatus {
    match item.enabled {
        Some(1) => return EndedStatus::Ended,
        Some(2) => return EndedStatus::InPreparation,
        Some(5) => return EndedStatus::Cancelled,
        _ => {}
    }

    let past_end = item
        .end_time
        .filter(|ms| *ms > 0)
        .and_then(time::from_millis)
        .and_then(|end| time::end_of_day(end.date_naive()))
        .is_some_and(|close| now.timestamp() > close.timestamp());
    if past_end {
        return EndedStatus::Ended;
    }

    if item.ended == Some(true) {
        return EndedStatus::Ended;
    }

    EndedStatus::NotEnded
}
