// src/models/mod.rs

//! Domain models for the search service.
//!
//! - `config`: TOML configuration
//! - `event`: upstream items and canonical records
//! - `response`: JSON envelopes returned to callers

mod config;
mod event;
mod response;

// Re-export all public types
pub use config::{Config, FetcherConfig, LoggingConfig, NormalizerConfig, PaginationConfig};
pub use event::{EndedStatus, EventRecord, RawEventItem, Venue};
pub(crate) use event::as_int;
pub use response::Envelope;
