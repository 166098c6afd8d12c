use crate::app::ports::HttpClientPort;
use crate::config::FeedConfig;
use crate::constants::{ACCEPT_JSON, USER_AGENT};
use crate::error::{FeedError, Result};
use crate::observability::metrics;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// reqwest-backed client that gives every GET a hard deadline.
///
/// The deadline covers connect, headers and body. When it fires the request
/// future is dropped, which aborts the exchange; a late response is never read.
pub struct ReqwestHttp {
    client: reqwest::Client,
    timeout: Duration,
    base_url: Option<Url>,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            timeout,
            base_url: None,
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let mut http = Self::new(config.timeout())?;
        if let Some(base) = config.base_url.as_deref() {
            let base = Url::parse(base).map_err(|e| {
                FeedError::Config(format!("invalid base_url '{}': {}", base, e))
            })?;
            http = http.with_base_url(base);
        }
        Ok(http)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URLs pass through; relative ones are joined onto `base_url`.
    fn resolve(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(url).map_err(|e| FeedError::Transport {
                    url: url.to_string(),
                    message: format!("cannot join onto {}: {}", base, e),
                }),
                None => Err(FeedError::Transport {
                    url: url.to_string(),
                    message: "relative URL given but no base_url is configured".into(),
                }),
            },
            Err(e) => Err(FeedError::Transport {
                url: url.to_string(),
                message: format!("malformed URL: {}", e),
            }),
        }
    }

    async fn exchange(&self, target: Url) -> Result<Value> {
        let url = target.to_string();
        let resp = self
            .client
            .get(target)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| FeedError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| FeedError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "HTTP response received");

        serde_json::from_slice(&bytes).map_err(|e| FeedError::Transport {
            url,
            message: format!("response body is not valid JSON: {}", e),
        })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let target = self.resolve(url)?;
        info!(url = %target, timeout_secs = self.timeout.as_secs_f64(), "HTTP GET");

        let started = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, self.exchange(target.clone())).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Timeout {
                url: target.to_string(),
                after: self.timeout,
            }),
        };
        metrics::fetch::duration(started.elapsed().as_secs_f64());

        match &outcome {
            Ok(_) => metrics::fetch::success(),
            Err(e) => {
                warn!(url = %target, kind = e.kind(), "HTTP GET failed: {}", e);
                metrics::fetch::error(e.kind());
            }
        }
        outcome
    }
}
