// src/handler.rs

//! Inbound request handling shared by the CLI and Lambda entry points.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SearchError;
use crate::models::Envelope;
use crate::pipeline::SearchService;

/// Inbound search request.
///
/// Non-string fields decode as absent, so a malformed payload still reaches
/// [`handle`] and gets an envelope.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchRequest {
    /// Search keyword
    #[serde(default, deserialize_with = "string_or_empty")]
    pub msg: String,

    /// Diagnostic passthrough: `raw` or `response`
    #[serde(default, deserialize_with = "string_or_none")]
    pub debug: Option<String>,
}

impl SearchRequest {
    /// Decode a raw event payload; anything that is not an object is an empty request.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            log::debug!("Treating undecodable request as empty: {}", e);
            Self::default()
        })
    }
}

fn string_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(string_or_none(d)?.unwrap_or_default())
}

/// Diagnostic passthrough mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugMode {
    /// Normal search
    Off,
    /// First page list and total, undecoded
    Raw,
    /// First page body, untouched
    Response,
}

impl DebugMode {
    /// Unknown values fall back to a normal search.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("raw") => DebugMode::Raw,
            Some("response") => DebugMode::Response,
            _ => DebugMode::Off,
        }
    }
}

/// Answer one request; always produces an envelope.
pub async fn handle(service: &SearchService, request: &SearchRequest) -> Envelope {
    let keyword = request.msg.trim();
    let result = match DebugMode::parse(request.debug.as_deref()) {
        DebugMode::Off => service
            .search(keyword)
            .await
            .map(|records| Envelope::success(keyword, records)),
        DebugMode::Response => service
            .first_page_body(keyword)
            .await
            .map(Envelope::raw_response),
        DebugMode::Raw => service
            .first_page(keyword)
            .await
            .map(|page| Envelope::raw_data(page.total, page.list)),
    };

    result.unwrap_or_else(|error| {
        log::log!(failure_level(&error), "Search for '{}' failed: {}", keyword, error);
        Envelope::failure(&error)
    })
}

/// Caller mistakes are not service errors.
fn failure_level(error: &SearchError) -> log::Level {
    if error.code() >= 500 {
        log::Level::Error
    } else {
        log::Level::Warn
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::error::FetchError;
    use crate::pipeline::testing::{CountingPacer, ScriptedFetcher, page_body};
    use crate::pipeline::Paginator;
    use crate::services::RecordNormalizer;

    fn service(fetcher: &Arc<ScriptedFetcher>) -> SearchService {
        let paginator = Paginator::new(fetcher.clone(), Arc::new(CountingPacer::default()));
        SearchService::new(paginator, RecordNormalizer::default())
    }

    fn request(msg: &str, debug: Option<&str>) -> SearchRequest {
        SearchRequest {
            msg: msg.to_string(),
            debug: debug.map(str::to_string),
        }
    }

    #[test]
    fn test_debug_mode_parse() {
        assert_eq!(DebugMode::parse(None), DebugMode::Off);
        assert_eq!(DebugMode::parse(Some("raw")), DebugMode::Raw);
        assert_eq!(DebugMode::parse(Some("response")), DebugMode::Response);
        assert_eq!(DebugMode::parse(Some("verbose")), DebugMode::Off);
    }

    #[test]
    fn test_request_defaults() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.msg.is_empty());
        assert!(req.debug.is_none());
    }

    #[test]
    fn test_request_tolerates_wrong_types() {
        let req = SearchRequest::from_value(json!({ "msg": 123, "debug": true }));
        assert!(req.msg.is_empty());
        assert!(req.debug.is_none());

        let req = SearchRequest::from_value(json!({ "msg": "cp", "debug": ["raw"] }));
        assert_eq!(req.msg, "cp");
        assert!(req.debug.is_none());

        let req = SearchRequest::from_value(json!("cp"));
        assert!(req.msg.is_empty());
    }

    #[test]
    fn test_failure_level_by_status() {
        let invalid = SearchError::InvalidInput("blank".into());
        assert_eq!(failure_level(&invalid), log::Level::Warn);

        let upstream = SearchError::UpstreamFailure(FetchError::transport(1, "refused"));
        assert_eq!(failure_level(&upstream), log::Level::Error);
    }

    #[tokio::test]
    async fn test_wrong_typed_msg_is_400() {
        let fetcher = Arc::new(ScriptedFetcher::new(Vec::new()));
        let req = SearchRequest::from_value(json!({ "msg": 123 }));
        let envelope = handle(&service(&fetcher), &req).await;
        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({ "code": 400, "msg": "请提供搜索关键词", "data": [] })
        );
        assert!(fetcher.requested_pages().is_empty());
    }

    #[tokio::test]
    async fn test_empty_keyword_is_400() {
        let fetcher = Arc::new(ScriptedFetcher::new(Vec::new()));
        let envelope = handle(&service(&fetcher), &request("", None)).await;
        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({ "code": 400, "msg": "请提供搜索关键词", "data": [] })
        );
        assert!(fetcher.requested_pages().is_empty());
    }

    #[tokio::test]
    async fn test_search_success_envelope() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(page_body(12, &[1])),
            Err("timeout".to_string()),
        ]));
        let envelope = handle(&service(&fetcher), &request(" cp ", None)).await;
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(value["code"], 200);
        assert_eq!(value["msg"], "cp");
        assert_eq!(value["data"][0]["id"], 1);
        assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_transport_failure_envelope() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Err("refused".to_string())]));
        let envelope = handle(&service(&fetcher), &request("cp", None)).await;
        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({ "code": 500, "msg": "获取数据失败", "data": [] })
        );
    }

    #[tokio::test]
    async fn test_debug_response_returns_body() {
        let body = page_body(50, &[1]);
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(body.clone())]));
        let envelope = handle(&service(&fetcher), &request("cp", Some("response"))).await;
        assert_eq!(envelope, Envelope::raw_response(body));
        assert_eq!(fetcher.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_debug_raw_returns_first_list() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page_body(50, &[7]))]));
        let envelope = handle(&service(&fetcher), &request("cp", Some("raw"))).await;
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(value["total"], 50);
        assert_eq!(value["raw_data"], json!([{ "id": 7, "name": "event 7" }]));
        assert_eq!(fetcher.requested_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_debug_raw_decode_failure_is_500() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(r#"{"code":1}"#.to_string())]));
        let envelope = handle(&service(&fetcher), &request("cp", Some("raw"))).await;
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(value["code"], 500);
        assert_eq!(value["msg"], "JSON解析失败");
        assert_eq!(value["debug_info"], json!({ "code": 1 }));
    }
}
