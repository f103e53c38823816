// src/pipeline/paginate.rs

//! Sequential pagination over the upstream list endpoint.
//!
//! Page 1 decides the page count and is the only page whose failure aborts
//! the search. Later pages that fail are dropped and the run continues.

use std::sync::Arc;

use serde_json::Value;

use crate::error::FetchError;
use crate::models::{RawEventItem, as_int};
use crate::pipeline::pacing::RequestPacer;
use crate::services::PageFetcher;

/// Items per upstream page.
pub const PAGE_SIZE: u32 = 10;

/// Characters of the raw body kept for diagnostics.
const SNIPPET_LEN: usize = 512;

/// One decoded upstream page.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPage {
    /// `result.total`, 0 when absent or non-numeric
    pub total: i64,
    /// `result.list` exactly as received
    pub list: Value,
}

impl DecodedPage {
    /// List entries as raw items; a non-array list has none.
    pub fn into_items(self) -> Vec<RawEventItem> {
        match self.list {
            Value::Array(entries) => entries.into_iter().map(RawEventItem::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// Summary of a pagination run.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Raw items in page order
    pub items: Vec<RawEventItem>,
    pub total: i64,
    pub page_count: u32,
    pub pages_succeeded: u32,
    pub page_failures: u32,
}

/// Drives a [`PageFetcher`] across all pages of a search.
#[derive(Clone)]
pub struct Paginator {
    fetcher: Arc<dyn PageFetcher>,
    pacer: Arc<dyn RequestPacer>,
}

impl Paginator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, pacer: Arc<dyn RequestPacer>) -> Self {
        Self { fetcher, pacer }
    }

    /// Fetch every page for `keyword`, sequentially.
    pub async fn fetch_all(&self, keyword: &str) -> Result<FetchOutcome, FetchError> {
        let body = self.fetch_first(keyword).await?;
        let first = decode_page(&body, 1)?;

        let total = first.total;
        let page_count = page_count(total);
        log::debug!(
            "Search '{}': {} results across {} page(s)",
            keyword,
            total,
            page_count
        );

        let mut outcome = FetchOutcome {
            items: first.into_items(),
            total,
            page_count,
            pages_succeeded: 1,
            page_failures: 0,
        };

        for page in 2..=page_count {
            match self.fetch_decoded(keyword, page).await {
                Ok(decoded) => {
                    outcome.pages_succeeded += 1;
                    outcome.items.extend(decoded.into_items());
                }
                Err(error) => {
                    outcome.page_failures += 1;
                    log::warn!(
                        "Dropping page {}/{} for '{}': {}",
                        page,
                        page_count,
                        keyword,
                        error
                    );
                }
            }

            self.pacer.pause().await;
        }

        Ok(outcome)
    }

    /// Raw body of page 1.
    pub async fn fetch_first(&self, keyword: &str) -> Result<String, FetchError> {
        self.fetcher
            .fetch_page(keyword, 1, PAGE_SIZE)
            .await
            .map_err(|e| FetchError::transport(1, e))
    }

    async fn fetch_decoded(&self, keyword: &str, page: u32) -> Result<DecodedPage, FetchError> {
        let body = self
            .fetcher
            .fetch_page(keyword, page, PAGE_SIZE)
            .await
            .map_err(|e| FetchError::transport(page, e))?;
        decode_page(&body, page)
    }
}

/// Number of pages needed for `total` results.
pub fn page_count(total: i64) -> u32 {
    if total <= 0 {
        return 0;
    }
    let pages = (total + i64::from(PAGE_SIZE) - 1) / i64::from(PAGE_SIZE);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Decode a page body; `result.list` must be present and non-null.
pub fn decode_page(body: &str, page: u32) -> Result<DecodedPage, FetchError> {
    let document: Value = serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse {
        page,
        reason: e.to_string(),
        snippet: snippet(body),
        decoded: None,
    })?;

    let list = match document.pointer("/result/list") {
        Some(list) if !list.is_null() => list.clone(),
        _ => {
            return Err(FetchError::MalformedResponse {
                page,
                reason: "missing result.list".to_string(),
                snippet: snippet(body),
                decoded: Some(document),
            });
        }
    };

    let total = document
        .pointer("/result/total")
        .and_then(as_int)
        .unwrap_or(0);

    Ok(DecodedPage { total, list })
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LEN).collect()
}
