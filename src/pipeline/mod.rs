//! Search pipeline.
//!
//! - `paginate`: walk upstream pages for a keyword
//! - `pacing`: delay policy between page requests
//! - `aggregate`: normalize and time-sort the merged items
//! - `search`: the entry point tying them together

pub mod aggregate;
pub mod pacing;
pub mod paginate;
pub mod search;

pub use aggregate::aggregate;
pub use pacing::{FixedDelay, NoDelay, RequestPacer};
pub use paginate::{DecodedPage, FetchOutcome, PAGE_SIZE, Paginator};
pub use search::SearchService;
