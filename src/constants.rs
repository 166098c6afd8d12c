//! Endpoint and request constants shared by the config layer and the HTTP client.

/// Upstream event catalog.
pub const DEFAULT_API_URL: &str =
    "https://teg-coding-challenge.s3.ap-southeast-2.amazonaws.com/events/event-data.json";

/// Prefix for the CORS proxy used in production; the upstream URL is
/// percent-encoded and appended.
pub const DEFAULT_CORS_PROXY_URL: &str = "https://corsproxy.io/?";

/// Development endpoint, relative to the dev server.
pub const DEFAULT_DEV_URL: &str = "/api/events/event-data.json";

/// Hard bound on one fetch, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const ACCEPT_JSON: &str = "application/json";

pub const USER_AGENT: &str = concat!("events_feed/", env!("CARGO_PKG_VERSION"));

/// Name given to events that carry neither `name` nor `title`.
pub const UNNAMED_EVENT: &str = "Unnamed Event";

/// Prefix of the synthetic id given to events without one.
pub const SYNTHETIC_ID_PREFIX: &str = "event-";

// Environment overrides read by `FeedConfig::apply_env`
pub const ENV_MODE: &str = "EVENTS_FEED_MODE";
pub const ENV_API_URL: &str = "EVENTS_FEED_API_URL";
pub const ENV_CORS_PROXY: &str = "EVENTS_FEED_CORS_PROXY";
pub const ENV_DEV_URL: &str = "EVENTS_FEED_DEV_URL";
pub const ENV_BASE_URL: &str = "EVENTS_FEED_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "EVENTS_FEED_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "EVENTS_FEED_LOG_DIR";
