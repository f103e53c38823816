//! Merge raw items into one time-ordered record list.

use chrono::{DateTime, Utc};

use crate::models::{EventRecord, RawEventItem};
use crate::services::RecordNormalizer;
use crate::utils::time;

/// Normalize every item and sort by event time, earliest first.
///
/// Records whose time is empty or unparseable go last. The sort is stable, so
/// equal times keep their page order.
pub fn aggregate(
    items: Vec<RawEventItem>,
    normalizer: &RecordNormalizer,
    now: DateTime<Utc>,
) -> Vec<EventRecord> {
    let mut records: Vec<EventRecord> = items
        .iter()
        .map(|item| normalizer.normalize(item, now))
        .collect();
    records.sort_by_cached_key(sort_key);
    records
}

fn sort_key(record: &EventRecord) -> i64 {
    time::parse_local(&record.time)
        .map(|t| t.timestamp())
        .unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 4, 0, 0).unwrap()
    }

    fn item(id: i64, start_time: Option<&str>) -> RawEventItem {
        RawEventItem {
            id: Some(id),
            start_time: start_time.map(str::to_string),
            ..RawEventItem::default()
        }
    }

    fn ids(records: &[EventRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sorted_ascending_with_missing_last() {
        let items = vec![
            item(1, None),
            item(2, Some("2026-12-01 10:00:00")),
            item(3, Some("garbage")),
            item(4, Some("2026-11-01 10:00:00")),
            item(5, None),
        ];
        let records = aggregate(items, &RecordNormalizer::default(), now());
        assert_eq!(ids(&records), vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn test_equal_times_keep_input_order() {
        let items = vec![
            item(7, Some("2026-11-01 10:00:00")),
            item(3, Some("2026-11-01 10:00:00")),
            item(9, Some("2026-10-30 10:00:00")),
            item(1, Some("2026-11-01 10:00:00")),
        ];
        let records = aggregate(items, &RecordNormalizer::default(), now());
        assert_eq!(ids(&records), vec![9, 7, 3, 1]);
    }

    #[test]
    fn test_enter_time_and_start_time_compare_together() {
        let enter = RawEventItem {
            id: Some(1),
            // 2026-11-01 02:00:00 UTC+8
            enter_time: Some(1_793_469_600_000),
            ..RawEventItem::default()
        };
        let items = vec![enter, item(2, Some("2026-11-01 01:00:00"))];
        let records = aggregate(items, &RecordNormalizer::default(), now());
        assert_eq!(ids(&records), vec![2, 1]);
        assert_eq!(records[1].time, "2026-11-01 02:00:00");
    }

    #[test]
    fn test_compact_start_date_sorts_by_calendar() {
        let items = vec![
            item(1, Some("2026-10-30 10:00:00")),
            item(2, Some("20261102")),
        ];
        let records = aggregate(items, &RecordNormalizer::default(), now());
        assert_eq!(ids(&records), vec![1, 2]);
        assert_eq!(records[1].time, "2026-11-02 00:00:00");
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(Vec::new(), &RecordNormalizer::default(), now()).is_empty());
    }
}
