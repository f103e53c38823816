//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream HTTP settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Page pacing settings
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Record normalization settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        Url::parse(&self.fetcher.base_url).map_err(|e| {
            AppError::validation(format!(
                "fetcher.base_url '{}' is not a valid URL: {}",
                self.fetcher.base_url, e
            ))
        })?;
        if self.normalizer.event_url_base.trim().is_empty() {
            return Err(AppError::validation("normalizer.event_url_base is empty"));
        }
        Ok(())
    }
}

/// Upstream HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Event list endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification.
    ///
    /// The upstream host has served certificate chains that fail strict
    /// verification; enable only when searches fail for that reason.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// `Origin` header
    #[serde(default = "defaults::origin")]
    pub origin: String,

    /// `Referer` header
    #[serde(default = "defaults::referer")]
    pub referer: String,

    /// `Accept-Language` header
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Upstream `time` query parameter (time window filter)
    #[serde(default = "defaults::time_filter")]
    pub time_filter: u32,

    /// Upstream `sort` query parameter
    #[serde(default = "defaults::sort")]
    pub sort: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            accept_invalid_certs: false,
            origin: defaults::origin(),
            referer: defaults::referer(),
            accept_language: defaults::accept_language(),
            time_filter: defaults::time_filter(),
            sort: defaults::sort(),
        }
    }
}

/// Pacing between page requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Delay after each page beyond the first, in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Record normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Guess the event type from `evmtype`/tag when upstream omits it
    #[serde(default)]
    pub infer_type: bool,

    /// Prefix for event detail links; the event id is appended
    #[serde(default = "defaults::event_url_base")]
    pub event_url_base: String,

    /// Prefix for relative image paths
    #[serde(default = "defaults::image_cdn_base")]
    pub image_cdn_base: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            infer_type: false,
            event_url_base: defaults::event_url_base(),
            image_cdn_base: defaults::image_cdn_base(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level (overridden by `RUST_LOG`)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Fetcher defaults
    pub fn base_url() -> String {
        "https://www.allcpp.cn/allcpp/event/eventMainListV2.do".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/143.0.0.0 Safari/537.36 Edg/143.0.0.0"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn origin() -> String {
        "https://cp.allcpp.cn".into()
    }
    pub fn referer() -> String {
        "https://cp.allcpp.cn/".into()
    }
    pub fn accept_language() -> String {
        "zh-CN,zh;q=0.9,en;q=0.8,en-GB;q=0.7,en-US;q=0.6".into()
    }
    pub fn time_filter() -> u32 {
        8
    }
    pub fn sort() -> u32 {
        1
    }

    // Pagination defaults
    pub fn request_delay() -> u64 {
        300
    }

    // Normalizer defaults
    pub fn event_url_base() -> String {
        "https://www.allcpp.cn/allcpp/event/event.do?event=".into()
    }
    pub fn image_cdn_base() -> String {
        "https://imagecdn3.allcpp.cn/upload".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetcher.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetcher.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.fetcher.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn tls_verification_is_on_by_default() {
        assert!(!Config::default().fetcher.accept_invalid_certs);
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[pagination]\nrequest_delay_ms = 0\n\n[normalizer]\ninfer_type = true\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.pagination.request_delay_ms, 0);
        assert!(config.normalizer.infer_type);
        assert_eq!(config.fetcher.timeout_secs, 30);
        assert_eq!(
            config.normalizer.image_cdn_base,
            "https://imagecdn3.allcpp.cn/upload"
        );
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.pagination.request_delay_ms, 300);
    }
}
