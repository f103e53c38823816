//! Service layer for the search pipeline.
//!
//! - Upstream page retrieval (`PageFetcher`, `HttpPageFetcher`)
//! - Record normalization (`RecordNormalizer`)
//! - Status annotations (`status`)

mod fetcher;
mod normalizer;
pub mod status;

pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use normalizer::{DEFAULT_EVENT_TYPE, RecordNormalizer, classify_type};
