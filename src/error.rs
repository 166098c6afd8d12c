use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("HTTP error! status: {status} ({url})")]
    HttpStatus { url: String, status: u16 },

    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Unknown data structure, top-level keys: {keys:?}")]
    UnknownShape { keys: Vec<String> },

    #[error("Error transforming event {index}: {cause}")]
    Transform { index: usize, cause: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Short stable label, used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Timeout { .. } => "timeout",
            FeedError::HttpStatus { .. } => "http_status",
            FeedError::Transport { .. } => "transport",
            FeedError::UnknownShape { .. } => "unknown_shape",
            FeedError::Transform { .. } => "transform",
            FeedError::Config(_) => "config",
            FeedError::Toml(_) => "toml",
            FeedError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
