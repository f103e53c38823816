// src/pipeline/search.rs

//! Top-level keyword search.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Result, SearchError};
use crate::models::{Config, EventRecord};
use crate::pipeline::aggregate::aggregate;
use crate::pipeline::paginate::{DecodedPage, Paginator, decode_page};
use crate::pipeline::pacing::FixedDelay;
use crate::services::{HttpPageFetcher, RecordNormalizer};

/// Paginates, normalizes and sorts the results for one keyword.
///
/// Holds no per-search state; one instance can serve concurrent searches.
#[derive(Clone)]
pub struct SearchService {
    paginator: Paginator,
    normalizer: RecordNormalizer,
}

impl SearchService {
    pub fn new(paginator: Paginator, normalizer: RecordNormalizer) -> Self {
        Self {
            paginator,
            normalizer,
        }
    }

    /// Wire the HTTP fetcher and fixed-delay pacing from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpPageFetcher::new(config.fetcher.clone())?;
        let pacer = FixedDelay::from_config(&config.pagination);
        let paginator = Paginator::new(Arc::new(fetcher), Arc::new(pacer));
        Ok(Self::new(
            paginator,
            RecordNormalizer::new(config.normalizer.clone()),
        ))
    }

    /// Search with status annotations relative to the current time.
    pub async fn search(&self, keyword: &str) -> std::result::Result<Vec<EventRecord>, SearchError> {
        self.run(keyword, None).await
    }

    /// Search with status annotations relative to `now`.
    pub async fn search_at(
        &self,
        keyword: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<Vec<EventRecord>, SearchError> {
        self.run(keyword, Some(now)).await
    }

    /// Raw body of the first result page.
    pub async fn first_page_body(&self, keyword: &str) -> std::result::Result<String, SearchError> {
        let keyword = validate_keyword(keyword)?;
        Ok(self.paginator.fetch_first(keyword).await?)
    }

    /// First result page, decoded but not normalized.
    pub async fn first_page(&self, keyword: &str) -> std::result::Result<DecodedPage, SearchError> {
        let body = self.first_page_body(keyword).await?;
        Ok(decode_page(&body, 1)?)
    }

    async fn run(
        &self,
        keyword: &str,
        now: Option<DateTime<Utc>>,
    ) -> std::result::Result<Vec<EventRecord>, SearchError> {
        let keyword = validate_keyword(keyword)?;
        let outcome = self.paginator.fetch_all(keyword).await?;

        log::info!(
            "Search '{}': {} items from {}/{} page(s), {} dropped",
            keyword,
            outcome.items.len(),
            outcome.pages_succeeded,
            outcome.page_count.max(1),
            outcome.page_failures
        );

        let now = now.unwrap_or_else(Utc::now);
        Ok(aggregate(outcome.items, &self.normalizer, now))
    }
}

/// Trimmed keyword, rejecting blank input.
pub fn validate_keyword(keyword: &str) -> std::result::Result<&str, SearchError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(SearchError::InvalidInput(
            "search keyword is empty".to_string(),
        ));
    }
    Ok(keyword)
}
