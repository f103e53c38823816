// src/services/fetcher.rs

//! Upstream page retrieval.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::FetcherConfig;
use crate::utils::http::create_async_client;
use crate::utils::url::list_page_url;

/// Retrieves one page of raw search results.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page` (1-based) of `page_size` items for `keyword`.
    ///
    /// Returns the response body as text; decoding is the caller's job.
    async fn fetch_page(&self, keyword: &str, page: u32, page_size: u32) -> Result<String>;
}

/// [`PageFetcher`] backed by the upstream HTTP list endpoint.
pub struct HttpPageFetcher {
    config: FetcherConfig,
    client: Client,
}

impl HttpPageFetcher {
    /// Create a fetcher with a client built from `config`.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = create_async_client(&config)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, keyword: &str, page: u32, page_size: u32) -> Result<String> {
        let url = list_page_url(
            &self.config.base_url,
            self.config.time_filter,
            self.config.sort,
            keyword,
            page,
            page_size,
        )?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::debug!("Page {} answered with HTTP {}", page, status);
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_invalid_base_url_fails_before_sending() {
        let config = FetcherConfig {
            base_url: "::not a url".to_string(),
            ..FetcherConfig::default()
        };
        let fetcher = HttpPageFetcher::new(config).unwrap();
        let result = fetcher.fetch_page("cp", 1, 10).await;
        assert!(matches!(result, Err(AppError::Url(_))));
    }
}
