use crate::constants::{
    DEFAULT_API_URL, DEFAULT_CORS_PROXY_URL, DEFAULT_DEV_URL, ENV_API_URL, ENV_BASE_URL,
    ENV_CORS_PROXY, ENV_DEV_URL, ENV_MODE, ENV_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS,
};
use crate::error::{FeedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Selects which endpoint `FeedConfig::endpoint` resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl FromStr for Mode {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(FeedError::Config(format!("unknown mode '{}'", other))),
        }
    }
}

/// What the orchestrator does when a single event fails to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformPolicy {
    /// Abandon the whole batch and serve the fallback dataset.
    #[default]
    AbortBatch,
    /// Log and drop the failing event, keep the rest.
    SkipEvent,
}

/// Injected configuration for one `EventsFeed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub mode: Mode,
    pub api_url: String,
    /// `None` or an empty string sends production requests straight to `api_url`.
    pub cors_proxy_url: Option<String>,
    pub dev_url: String,
    /// Base for relative URLs; without it a relative endpoint cannot be fetched.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub transform_policy: TransformPolicy,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            api_url: DEFAULT_API_URL.to_string(),
            cors_proxy_url: Some(DEFAULT_CORS_PROXY_URL.to_string()),
            dev_url: DEFAULT_DEV_URL.to_string(),
            base_url: None,
            timeout_secs: REQUEST_TIMEOUT_SECS,
            transform_policy: TransformPolicy::default(),
        }
    }
}

impl FeedConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FeedConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `EVENTS_FEED_*` environment variables.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup, keyed by the `EVENTS_FEED_*` names.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_MODE) {
            self.mode = mode.parse()?;
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(proxy) = lookup(ENV_CORS_PROXY) {
            self.cors_proxy_url = Some(proxy);
        }
        if let Some(url) = lookup(ENV_DEV_URL) {
            self.dev_url = url;
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs.trim().parse().map_err(|e| {
                FeedError::Config(format!("{} must be an integer: {}", ENV_TIMEOUT_SECS, e))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(FeedError::Config("timeout_secs must be greater than zero".into()));
        }
        if self.api_url.trim().is_empty() {
            return Err(FeedError::Config("api_url must not be empty".into()));
        }
        Ok(())
    }

    /// The URL the pipeline fetches in the configured mode.
    pub fn endpoint(&self) -> String {
        match self.mode {
            Mode::Development => self.dev_url.clone(),
            Mode::Production => match self.cors_proxy_url.as_deref().map(str::trim) {
                Some(proxy) if !proxy.is_empty() => {
                    format!("{}{}", proxy, urlencoding::encode(&self.api_url))
                }
                _ => self.api_url.clone(),
            },
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
