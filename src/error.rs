// src/error.rs

//! Unified error handling for the search service.
//!
//! - `AppError`: configuration, client construction and transport plumbing
//! - `FetchError`: pagination failures that abort a search
//! - `SearchError`: what the search entry point hands back to its caller

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Failure while paging through upstream results.
///
/// Only first-page failures surface as this type; later pages are dropped.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network, DNS, TLS or timeout failure
    #[error("transport failure on page {page}: {message}")]
    TransportFailure { page: u32, message: String },

    /// Body is not JSON or lacks `result.list`
    #[error("malformed response on page {page}: {reason}")]
    MalformedResponse {
        page: u32,
        reason: String,
        /// Leading part of the raw body
        snippet: String,
        /// The decoded document, when the body was valid JSON
        decoded: Option<Value>,
    },
}

impl FetchError {
    pub fn transport(page: u32, error: impl fmt::Display) -> Self {
        Self::TransportFailure {
            page,
            message: error.to_string(),
        }
    }
}

/// Error returned by the search entry point.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Empty or whitespace-only keyword
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The first page could not be fetched or decoded
    #[error("upstream failure: {0}")]
    UpstreamFailure(#[from] FetchError),
}

impl SearchError {
    /// Status code used in the response envelope.
    pub fn code(&self) -> u16 {
        match self {
            SearchError::InvalidInput(_) => 400,
            SearchError::UpstreamFailure(_) => 500,
        }
    }

    /// Message shown to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            SearchError::InvalidInput(_) => "请提供搜索关键词",
            SearchError::UpstreamFailure(FetchError::TransportFailure { .. }) => "获取数据失败",
            SearchError::UpstreamFailure(FetchError::MalformedResponse { .. }) => "JSON解析失败",
        }
    }

    /// Diagnostic payload attached to decode failures.
    pub fn debug_info(&self) -> Option<Value> {
        match self {
            SearchError::UpstreamFailure(FetchError::MalformedResponse {
                decoded, snippet, ..
            }) => Some(
                decoded
                    .clone()
                    .unwrap_or_else(|| Value::String(snippet.clone())),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err = SearchError::InvalidInput("empty keyword".into());
        assert_eq!(err.code(), 400);
        assert_eq!(err.public_message(), "请提供搜索关键词");
        assert!(err.debug_info().is_none());
    }

    #[test]
    fn test_transport_failure_maps_to_500() {
        let err = SearchError::from(FetchError::transport(1, "connection refused"));
        assert_eq!(err.code(), 500);
        assert_eq!(err.public_message(), "获取数据失败");
        assert!(err.debug_info().is_none());
    }

    #[test]
    fn test_malformed_response_carries_debug_info() {
        let err = SearchError::from(FetchError::MalformedResponse {
            page: 1,
            reason: "missing result.list".into(),
            snippet: "{\"code\":-1}".into(),
            decoded: Some(serde_json::json!({ "code": -1 })),
        });
        assert_eq!(err.code(), 500);
        assert_eq!(err.public_message(), "JSON解析失败");
        assert_eq!(err.debug_info(), Some(serde_json::json!({ "code": -1 })));
    }

    #[test]
    fn test_undecodable_body_falls_back_to_snippet() {
        let err = SearchError::from(FetchError::MalformedResponse {
            page: 1,
            reason: "expected value".into(),
            snippet: "<html>".into(),
            decoded: None,
        });
        assert_eq!(err.debug_info(), Some(Value::String("<html>".into())));
    }
}
