// src/services/normalizer.rs

//! Raw upstream item to canonical record conversion.

use chrono::{DateTime, Utc};

use crate::models::{EventRecord, NormalizerConfig, RawEventItem, Venue};
use crate::services::status::{self, CANCELLED_MARKER};
use crate::utils::time;
use crate::utils::url::{absolutize, strip_query};

/// Type shown when upstream does not provide one.
pub const DEFAULT_EVENT_TYPE: &str = "综合展";

/// Builds [`EventRecord`]s. Never fails; missing fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    config: NormalizerConfig,
}

impl RecordNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn normalize(&self, item: &RawEventItem, now: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: item.id.unwrap_or(0),
            name: annotated_name(item, now),
            tag: item.tag.clone().unwrap_or_default(),
            location: location(item),
            address: item.enter_address.clone().unwrap_or_default(),
            url: item
                .id
                .map(|id| format!("{}{}", self.config.event_url_base, id))
                .unwrap_or_default(),
            event_type: self.event_type(item),
            wanna_go_count: item.wanna_go_count.unwrap_or(0),
            circle_count: item.circle_count.unwrap_or(0),
            doujinshi_count: item.doujinshi_count.unwrap_or(0),
            time: event_time(item),
            app_logo_pic_url: self.app_logo_url(item),
            logo_pic_url: self.image_url(item.logo_pic_url.as_deref()),
            ended: status::ended_label(item, now),
            venue: Venue::from_flag(item.is_online),
        }
    }

    fn event_type(&self, item: &RawEventItem) -> String {
        match item.event_type.as_deref() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ if self.config.infer_type => classify_type(item).to_string(),
            _ => DEFAULT_EVENT_TYPE.to_string(),
        }
    }

    fn image_url(&self, path: Option<&str>) -> String {
        path.map(|p| absolutize(&self.config.image_cdn_base, p))
            .unwrap_or_default()
    }

    /// Falls back to the query-stripped logo when the app logo is empty.
    fn app_logo_url(&self, item: &RawEventItem) -> String {
        let url = self.image_url(item.app_logo_pic_url.as_deref());
        if !url.is_empty() {
            return url;
        }
        match item.logo_pic_url.as_deref() {
            Some(logo) => absolutize(&self.config.image_cdn_base, &strip_query(logo)),
            None => String::new(),
        }
    }
}

/// Name with the cancellation or status marker, each at most once.
fn annotated_name(item: &RawEventItem, now: DateTime<Utc>) -> String {
    let mut name = item.name.clone().unwrap_or_default();

    if item.is_cancelled() {
        if !name.contains(CANCELLED_MARKER) {
            name.push_str(CANCELLED_MARKER);
        }
        return name;
    }

    let suffix = status::status_suffix(item, now);
    if !suffix.is_empty() && !name.contains(&suffix) {
        name.push_str(&suffix);
    }
    name
}

fn location(item: &RawEventItem) -> String {
    let mut location = item.prov_name.clone().unwrap_or_default();
    for part in [&item.city_name, &item.area_name].into_iter().flatten() {
        location.push(' ');
        location.push_str(part);
    }
    location.trim().to_string()
}

fn event_time(item: &RawEventItem) -> String {
    item.enter_time
        .and_then(time::from_millis)
        .map(time::format_canonical)
        .or_else(|| item.start_time.as_deref().and_then(time::canonicalize))
        .unwrap_or_default()
}

/// Guess the event type from the `evmtype` code, then from the tag.
pub fn classify_type(item: &RawEventItem) -> &'static str {
    if let Some(code) = item.evmtype {
        return match code {
            0 => "综合展",
            1 => "ONLY",
            2 => "茶会",
            3 => "漫展",
            _ => "其他",
        };
    }

    if let Some(tag) = item.tag.as_deref() {
        let tag = tag.to_uppercase();
        if tag.contains("ONLY") {
            return "ONLY";
        }
        if tag.contains("茶会") || tag.contains("茶话会") {
            return "茶会";
        }
        if tag.contains("综合展") {
            return "综合展";
        }
    }

    DEFAULT_EVENT_TYPE
}
