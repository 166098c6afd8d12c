//! Event catalog ingestion: one bounded fetch, shape resolution, venue
//! matching and normalization into a canonical model, with a fixed sample
//! dataset served whenever any of that fails.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod format;
pub mod infra;
pub mod logging;
pub mod normalize;
pub mod observability;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use config::{FeedConfig, Mode, TransformPolicy};
pub use error::{FeedError, Result};
pub use pipeline::{EventsFeed, FetchOutcome, FetchState};
pub use types::{Event, EventsEnvelope, FetchResult, Venue};
