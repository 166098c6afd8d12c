//! Metrics for the events feed.
//!
//! Everything goes through the `metrics` facade. Nothing is exported from
//! here: without an installed recorder the calls are no-ops.

use std::fmt;

/// All metric names used in the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    FetchSuccess,
    FetchError,
    FetchDuration,
    PipelineSuccess,
    PipelineFallback,
    EventsNormalized,
    EventsSkipped,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::FetchSuccess => "events_feed_fetch_success_total",
            MetricName::FetchError => "events_feed_fetch_error_total",
            MetricName::FetchDuration => "events_feed_fetch_duration_seconds",
            MetricName::PipelineSuccess => "events_feed_pipeline_success_total",
            MetricName::PipelineFallback => "events_feed_pipeline_fallback_total",
            MetricName::EventsNormalized => "events_feed_events_normalized_total",
            MetricName::EventsSkipped => "events_feed_events_skipped_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod fetch {
    use super::MetricName;

    pub fn success() {
        ::metrics::counter!(MetricName::FetchSuccess.as_str()).increment(1);
    }

    /// `kind` is `FeedError::kind()` of the failure.
    pub fn error(kind: &'static str) {
        ::metrics::counter!(MetricName::FetchError.as_str(), "kind" => kind).increment(1);
    }

    pub fn duration(secs: f64) {
        ::metrics::histogram!(MetricName::FetchDuration.as_str()).record(secs);
    }
}

pub mod pipeline {
    use super::MetricName;

    pub fn success(events: usize) {
        ::metrics::counter!(MetricName::PipelineSuccess.as_str()).increment(1);
        ::metrics::counter!(MetricName::EventsNormalized.as_str()).increment(events as u64);
    }

    pub fn fallback(kind: &'static str) {
        ::metrics::counter!(MetricName::PipelineFallback.as_str(), "kind" => kind).increment(1);
    }

    pub fn event_skipped() {
        ::metrics::counter!(MetricName::EventsSkipped.as_str()).increment(1);
    }
}
