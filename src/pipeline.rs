use crate::app::ports::HttpClientPort;
use crate::config::{FeedConfig, TransformPolicy};
use crate::error::{FeedError, Result};
use crate::fallback::fallback_data;
use crate::infra::ReqwestHttp;
use crate::normalize::{match_venue, normalize_event};
use crate::observability::metrics;
use crate::parser;
use crate::types::{Event, EventsEnvelope, FetchResult};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Lifecycle of one `EventsFeed::run` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
    Success,
    Fallback,
}

impl FetchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, FetchState::Success | FetchState::Fallback)
    }

    /// `Idle -> Fetching -> {Success, Fallback}`; nothing leaves a terminal state.
    pub fn can_transition_to(self, next: FetchState) -> bool {
        matches!(
            (self, next),
            (FetchState::Idle, FetchState::Fetching)
                | (FetchState::Fetching, FetchState::Success)
                | (FetchState::Fetching, FetchState::Fallback)
        )
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchState::Idle => "idle",
            FetchState::Fetching => "fetching",
            FetchState::Success => "success",
            FetchState::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Canonical events from one payload, plus any events dropped under
/// `TransformPolicy::SkipEvent`.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub events: Vec<Event>,
    pub skipped: Vec<FeedError>,
}

/// Full record of a run. Callers that only need the data use
/// `EventsFeed::fetch_events`.
#[derive(Debug)]
pub struct FetchOutcome {
    pub result: FetchResult,
    pub state: FetchState,
    /// Why the run fell back; `None` on success.
    pub error: Option<FeedError>,
    pub skipped: Vec<FeedError>,
}

/// Resolve the payload shape, match venues and normalize every event.
///
/// Under `TransformPolicy::AbortBatch` the first failing event fails the whole
/// batch.
pub fn normalize_payload(raw: Value, policy: TransformPolicy) -> Result<NormalizedBatch> {
    let payload = parser::resolve(raw)?;
    let venues = payload.venues.as_deref();
    let mut batch = NormalizedBatch {
        events: Vec::with_capacity(payload.events.len()),
        skipped: Vec::new(),
    };

    for (index, raw_event) in payload.events.iter().enumerate() {
        let venue = match_venue(raw_event, venues);
        match normalize_event(raw_event, venue, index) {
            Ok(event) => batch.events.push(event),
            Err(e) => match policy {
                TransformPolicy::AbortBatch => return Err(e),
                TransformPolicy::SkipEvent => {
                    warn!(index, "Skipping event that failed to normalize: {}", e);
                    metrics::pipeline::event_skipped();
                    batch.skipped.push(e);
                }
            },
        }
    }

    Ok(batch)
}

/// The degraded-mode result.
pub fn fallback_result() -> FetchResult {
    FetchResult {
        data: fallback_data().clone(),
        is_fallback: true,
    }
}

/// One fetch-and-normalize cycle per call, never failing: any error becomes
/// the fallback dataset.
pub struct EventsFeed {
    config: FeedConfig,
    client: Arc<dyn HttpClientPort>,
}

impl EventsFeed {
    /// Feed backed by the bounded reqwest client.
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = ReqwestHttp::from_config(&config)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: FeedConfig, client: Arc<dyn HttpClientPort>) -> Self {
        Self { config, client }
    }

    pub async fn fetch_events(&self) -> FetchResult {
        self.run().await.result
    }

    #[instrument(skip(self), fields(url = %self.config.endpoint()))]
    pub async fn run(&self) -> FetchOutcome {
        let url = self.config.endpoint();
        let mut state = FetchState::Idle;

        advance(&mut state, FetchState::Fetching);
        info!("Attempting to fetch events");

        match self.attempt(&url).await {
            Ok(batch) => {
                advance(&mut state, FetchState::Success);
                info!(
                    events = batch.events.len(),
                    skipped = batch.skipped.len(),
                    "Successfully transformed events from API"
                );
                metrics::pipeline::success(batch.events.len());
                FetchOutcome {
                    result: FetchResult {
                        data: EventsEnvelope::new(batch.events),
                        is_fallback: false,
                    },
                    state,
                    error: None,
                    skipped: batch.skipped,
                }
            }
            Err(e) => {
                advance(&mut state, FetchState::Fallback);
                error!(kind = e.kind(), "API fetch or transform failed: {}", e);
                warn!("Using fallback data instead");
                metrics::pipeline::fallback(e.kind());
                FetchOutcome {
                    result: fallback_result(),
                    state,
                    error: Some(e),
                    skipped: Vec::new(),
                }
            }
        }
    }

    async fn attempt(&self, url: &str) -> Result<NormalizedBatch> {
        let raw = self.client.get_json(url).await?;
        debug!("API call successful, resolving payload");
        normalize_payload(raw, self.config.transform_policy)
    }
}

fn advance(state: &mut FetchState, next: FetchState) {
    debug_assert!(state.can_transition_to(next), "{} -> {}", state, next);
    debug!(from = %state, to = %next, "Fetch state transition");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn state_machine_has_no_retry_edge() {
        use FetchState::*;
        assert!(Idle.can_transition_to(Fetching));
        assert!(Fetching.can_transition_to(Success));
        assert!(Fetching.can_transition_to(Fallback));
        assert!(!Fallback.can_transition_to(Fetching));
        assert!(!Success.can_transition_to(Fetching));
        assert!(!Idle.can_transition_to(Success));
        assert!(Success.is_terminal() && Fallback.is_terminal());
        assert!(!Idle.is_terminal() && !Fetching.is_terminal());
    }

    #[test]
    fn one_bad_event_aborts_the_batch() {
        let raw = json!({ "events": [{ "id": 1 }, null, { "id": 3 }] });
        match normalize_payload(raw, TransformPolicy::AbortBatch) {
            Err(FeedError::Transform { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected Transform error, got {other:?}"),
        }
    }

    #[test]
    fn skip_policy_keeps_remaining_events() {
        let raw = json!({ "events": [{ "id": 1 }, null, { "id": 3 }] });
        let batch = normalize_payload(raw, TransformPolicy::SkipEvent).unwrap();
        let ids: Vec<&str> = batch.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(batch.skipped.len(), 1);
    }

    #[test]
    fn synthetic_ids_follow_source_position() {
        let raw = json!([{ "name": "a" }, { "id": 9 }, { "name": "c" }]);
        let batch = normalize_payload(raw, TransformPolicy::AbortBatch).unwrap();
        let ids: Vec<&str> = batch.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["event-0", "9", "event-2"]);
    }

    #[test]
    fn many_events_share_one_venue() {
        let raw = json!({
            "events": [
                { "id": 1, "venueId": 100 },
                { "id": 2, "venueId": 100 },
                { "id": 3, "venueId": 200 }
            ],
            "venues": [{ "id": 100, "name": "Shared Hall" }]
        });
        let batch = normalize_payload(raw, TransformPolicy::AbortBatch).unwrap();
        let names: Vec<Option<&str>> = batch
            .events
            .iter()
            .map(|e| e.venue().map(|v| v.name.as_str()))
            .collect();
        assert_eq!(names, [Some("Shared Hall"), Some("Shared Hall"), None]);
    }

    #[test]
    fn fallback_result_is_flagged() {
        let result = fallback_result();
        assert!(result.is_fallback);
        assert_eq!(&result.data, fallback_data());
    }
}
