// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER};

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;

/// Create the asynchronous client used for upstream list requests.
///
/// Sends the browser header profile the upstream expects, follows redirects
/// and decodes gzip/brotli/deflate bodies.
pub fn create_async_client(config: &FetcherConfig) -> Result<reqwest::Client> {
    if config.accept_invalid_certs {
        log::warn!("TLS certificate verification is disabled for upstream requests");
    }

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(default_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?;
    Ok(client)
}

fn default_headers(config: &FetcherConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        HeaderName::from_static("errorwrap"),
        HeaderValue::from_static("json"),
    );
    headers.insert(ORIGIN, header_value("origin", &config.origin)?);
    headers.insert(REFERER, header_value("referer", &config.referer)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("accept_language", &config.accept_language)?,
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-site"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    Ok(headers)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::config(format!("fetcher.{field} is not a valid header: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_profile() {
        let headers = default_headers(&FetcherConfig::default()).unwrap();
        assert_eq!(headers[ORIGIN], "https://cp.allcpp.cn");
        assert_eq!(headers[REFERER], "https://cp.allcpp.cn/");
        assert_eq!(headers["sec-fetch-site"], "same-site");
        assert_eq!(headers["errorwrap"], "json");
    }

    #[test]
    fn test_invalid_header_is_config_error() {
        let config = FetcherConfig {
            referer: "bad\nvalue".to_string(),
            ..FetcherConfig::default()
        };
        assert!(matches!(default_headers(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_create_client() {
        assert!(create_async_client(&FetcherConfig::default()).is_ok());
    }
}
