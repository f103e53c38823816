// src/utils/url.rs

//! URL manipulation utilities.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::Result;

static QUERY_SUFFIX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\?.*$").ok());

/// Prefix a relative path with the CDN base; absolute URLs pass through.
///
/// # Examples
/// ```
/// use allcpp_search::utils::url::absolutize;
///
/// assert_eq!(
///     absolutize("https://cdn.example.com/upload", "/a/b.jpg"),
///     "https://cdn.example.com/upload/a/b.jpg"
/// );
/// assert_eq!(absolutize("https://cdn.example.com/upload", ""), "");
/// ```
pub fn absolutize(cdn_base: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with("http") {
        path.to_string()
    } else {
        format!("{cdn_base}{path}")
    }
}

/// Drop everything from the first `?` onward.
pub fn strip_query(url: &str) -> String {
    match QUERY_SUFFIX.as_ref() {
        Some(re) => re.replace(url, "").into_owned(),
        None => url.split('?').next().unwrap_or(url).to_string(),
    }
}

/// Build the upstream list URL for one page.
pub fn list_page_url(
    base_url: &str,
    time_filter: u32,
    sort: u32,
    keyword: &str,
    page: u32,
    page_size: u32,
) -> Result<Url> {
    let url = Url::parse_with_params(
        base_url,
        &[
            ("time", time_filter.to_string()),
            ("sort", sort.to_string()),
            ("keyword", keyword.to_string()),
            ("pageNo", page.to_string()),
            ("pageSize", page_size.to_string()),
        ],
    )?;
    Ok(url)
}
