//! Upstream event items and the canonical records built from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the upstream `result.list` array.
///
/// Every field is optional. Wrong-typed values decode as `None` instead of
/// failing the item.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEventItem {
    #[serde(deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub tag: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub event_type: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub evmtype: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub prov_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub area_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub enter_address: Option<String>,

    /// Event start, milliseconds since the epoch
    #[serde(deserialize_with = "lenient::int")]
    pub enter_time: Option<i64>,
    /// Event end, milliseconds since the epoch
    #[serde(deserialize_with = "lenient::int")]
    pub end_time: Option<i64>,
    /// Free-form start time, used when `enter_time` is missing
    #[serde(deserialize_with = "lenient::text")]
    pub start_time: Option<String>,

    /// 1 = ended, 2 = in preparation, 5 = cancelled
    #[serde(deserialize_with = "lenient::int")]
    pub enabled: Option<i64>,
    #[serde(deserialize_with = "lenient::flag")]
    pub ended: Option<bool>,
    #[serde(deserialize_with = "lenient::int")]
    pub is_online: Option<i64>,

    #[serde(deserialize_with = "lenient::int")]
    pub wanna_go_count: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub circle_count: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub doujinshi_count: Option<i64>,

    #[serde(deserialize_with = "lenient::text")]
    pub app_logo_pic_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub logo_pic_url: Option<String>,
}

impl RawEventItem {
    /// Decode one list entry; anything that is not an object yields an empty item.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            log::debug!("Treating undecodable list entry as empty: {}", e);
            Self::default()
        })
    }

    pub fn is_cancelled(&self) -> bool {
        self.enabled == Some(5)
    }
}

/// Coarse lifecycle classification shown next to each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndedStatus {
    #[serde(rename = "已结束")]
    Ended,
    #[serde(rename = "筹备中")]
    InPreparation,
    #[serde(rename = "已取消")]
    Cancelled,
    #[serde(rename = "未结束")]
    NotEnded,
}

/// Online or on-site event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Venue {
    #[serde(rename = "线上")]
    Online,
    #[serde(rename = "线下")]
    Offline,
}

impl Venue {
    pub fn from_flag(is_online: Option<i64>) -> Self {
        if is_online == Some(1) {
            Venue::Online
        } else {
            Venue::Offline
        }
    }
}

/// A normalized event, ready for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: i64,

    /// Upstream name plus status marker
    pub name: String,

    pub tag: String,

    /// Province, city and area separated by spaces
    pub location: String,

    pub address: String,

    /// Detail page link, empty without an id
    pub url: String,

    #[serde(rename = "type")]
    pub event_type: String,

    pub wanna_go_count: i64,
    pub circle_count: i64,
    pub doujinshi_count: i64,

    /// `YYYY-MM-DD HH:MM:SS` in UTC+8, or empty
    pub time: String,

    pub app_logo_pic_url: String,
    pub logo_pic_url: String,

    pub ended: EndedStatus,

    #[serde(rename = "isOnline")]
    pub venue: Venue,
}

/// Tolerant field decoders for upstream JSON.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number, or a string holding a number.
    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(as_int(&Value::deserialize(d)?))
    }

    /// String, or a number rendered as text.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Literal booleans only.
    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(Value::deserialize(d)?.as_bool())
    }

    pub fn as_int(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
            }
            _ => None,
        }
    }
}

pub(crate) use lenient::as_int;
