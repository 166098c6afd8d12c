use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Transport seam for the orchestrator.
///
/// Implementations perform exactly one bounded GET and classify failures as
/// `FeedError::Timeout`, `FeedError::HttpStatus` or `FeedError::Transport`.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}
