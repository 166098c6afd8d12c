use async_trait::async_trait;
use events_feed::app::ports::HttpClientPort;
use events_feed::fallback::fallback_data;
use events_feed::types::NamedPlace;
use events_feed::{EventsFeed, FeedConfig, FeedError, FetchState, Result, TransformPolicy};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// What the stub transport answers with.
#[derive(Clone)]
enum Canned {
    Json(Value),
    Status(u16),
    Transport,
    Timeout,
}

struct StubHttp {
    canned: Canned,
    requests: Mutex<Vec<String>>,
}

impl StubHttp {
    fn new(canned: Canned) -> Arc<Self> {
        Arc::new(Self {
            canned,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClientPort for StubHttp {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(url.to_string());
        match &self.canned {
            Canned::Json(value) => Ok(value.clone()),
            Canned::Status(status) => Err(FeedError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            Canned::Transport => Err(FeedError::Transport {
                url: url.to_string(),
                message: "connection reset by peer".into(),
            }),
            Canned::Timeout => Err(FeedError::Timeout {
                url: url.to_string(),
                after: Duration::from_secs(10),
            }),
        }
    }
}

fn stub_feed(canned: Canned) -> (EventsFeed, Arc<StubHttp>) {
    stub_feed_with(FeedConfig::default(), canned)
}

fn stub_feed_with(config: FeedConfig, canned: Canned) -> (EventsFeed, Arc<StubHttp>) {
    let stub = StubHttp::new(canned);
    (EventsFeed::with_client(config, stub.clone()), stub)
}

fn sample_payload() -> Value {
    json!({
        "events": [
            { "id": 1, "name": "Test Event", "startDate": "2025-11-15T19:00:00Z", "venueId": 100 }
        ],
        "venues": [
            { "id": 100, "name": "Test Venue", "city": "Sydney", "state": "NSW" }
        ]
    })
}

#[tokio::test]
async fn test_transforms_events_with_matched_venue() {
    let (feed, stub) = stub_feed(Canned::Json(sample_payload()));
    let result = feed.fetch_events().await;

    assert!(!result.is_fallback);
    assert_eq!(stub.request_count(), 1);
    assert_eq!(
        serde_json::to_value(&result.data).unwrap(),
        json!({
            "_embedded": {
                "events": [{
                    "id": "1",
                    "name": "Test Event",
                    "dates": { "start": { "dateTime": "2025-11-15T19:00:00Z" } },
                    "_embedded": {
                        "venues": [{
                            "id": "100",
                            "name": "Test Venue",
                            "city": { "name": "Sydney" },
                            "state": { "name": "NSW" }
                        }]
                    }
                }]
            }
        })
    );
}

#[tokio::test]
async fn test_matches_each_event_to_its_venue() {
    let payload = json!({
        "events": [
            { "id": 1, "name": "Event 1", "venueId": 101, "startDate": "2025-11-15T19:00:00Z" },
            { "id": 2, "name": "Event 2", "venueId": 102, "startDate": "2025-11-16T19:00:00Z" }
        ],
        "venues": [
            { "id": 101, "name": "Venue A", "city": "Melbourne" },
            { "id": 102, "name": "Venue B", "city": "Brisbane" }
        ]
    });
    let (feed, _) = stub_feed(Canned::Json(payload));
    let result = feed.fetch_events().await;

    let events = result.data.events();
    assert_eq!(events[0].venue().unwrap().name, "Venue A");
    assert_eq!(events[0].venue().unwrap().city, Some(NamedPlace::new("Melbourne")));
    assert_eq!(events[1].venue().unwrap().name, "Venue B");
}

#[tokio::test]
async fn test_one_event_per_raw_event_in_order() {
    let payload = json!([
        { "id": "c", "name": "Third" },
        { "id": "a", "name": "First" },
        { "title": "Untitled id" },
    ]);
    let (feed, _) = stub_feed(Canned::Json(payload));
    let result = feed.fetch_events().await;

    assert!(!result.is_fallback);
    let ids: Vec<&str> = result.data.events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "event-2"]);
    assert_eq!(result.data.events()[2].name, "Untitled id");
}

#[tokio::test]
async fn test_missing_venues_array_leaves_events_bare() {
    let payload = json!({
        "events": [{ "id": 1, "name": "Test Event", "venueId": 100 }],
        "venues": null
    });
    let (feed, _) = stub_feed(Canned::Json(payload));
    let result = feed.fetch_events().await;

    assert!(!result.is_fallback);
    assert!(result.data.events()[0].embedded.is_none());
}

#[tokio::test]
async fn test_unmatched_venue_id_leaves_event_bare() {
    let payload = json!({
        "events": [{ "id": 1, "venueId": 999 }, { "id": 2, "venueId": "100" }],
        "venues": [{ "id": 100, "name": "Test Venue" }]
    });
    let (feed, _) = stub_feed(Canned::Json(payload));
    let result = feed.fetch_events().await;

    assert!(!result.is_fallback);
    assert!(result.data.events().iter().all(|e| e.venue().is_none()));
}

#[tokio::test]
async fn test_three_shapes_agree_apart_from_venues() {
    let events = json!([
        { "id": 1, "name": "One", "startDate": "2025-11-15T19:00:00Z", "venueId": 100 },
        { "id": 2, "title": "Two", "dates": { "start": { "dateTime": "2025-11-16T19:00:00Z" } } }
    ]);
    let venues = json!([{ "id": 100, "name": "Hall" }]);

    let (array_feed, _) = stub_feed(Canned::Json(events.clone()));
    let (field_feed, _) = stub_feed(Canned::Json(json!({ "events": events.clone(), "venues": venues })));
    let (embedded_feed, _) = stub_feed(Canned::Json(json!({ "_embedded": { "events": events } })));

    let from_array = array_feed.fetch_events().await;
    let from_field = field_feed.fetch_events().await;
    let from_embedded = embedded_feed.fetch_events().await;

    assert!(!from_array.is_fallback && !from_field.is_fallback && !from_embedded.is_fallback);
    assert_eq!(from_array, from_embedded);
    assert!(from_array.data.events().iter().all(|e| e.embedded.is_none()));

    let mut stripped = from_field.data.clone().into_events();
    assert_eq!(stripped[0].venue().map(|v| v.name.as_str()), Some("Hall"));
    for event in &mut stripped {
        event.embedded = None;
    }
    assert_eq!(stripped, from_array.data.into_events());
}

#[tokio::test]
async fn test_every_failure_kind_falls_back() {
    let cases = [
        Canned::Status(404),
        Canned::Status(500),
        Canned::Transport,
        Canned::Timeout,
        Canned::Json(json!({ "invalid": "data" })),
        Canned::Json(Value::Null),
        Canned::Json(json!("just a string")),
        Canned::Json(json!({ "events": [{ "id": 1 }, null] })),
    ];

    for canned in cases {
        let (feed, _) = stub_feed(canned);
        let outcome = feed.run().await;
        assert_eq!(outcome.state, FetchState::Fallback);
        assert!(outcome.result.is_fallback);
        assert_eq!(&outcome.result.data, fallback_data());
        assert!(outcome.error.is_some());
    }
}

#[tokio::test]
async fn test_fallback_records_cause() {
    let (feed, _) = stub_feed(Canned::Json(json!({ "invalid": "data" })));
    let outcome = feed.run().await;
    match outcome.error {
        Some(FeedError::UnknownShape { keys }) => assert_eq!(keys, ["invalid"]),
        other => panic!("expected UnknownShape, got {other:?}"),
    }

    let (feed, _) = stub_feed(Canned::Status(503));
    let outcome = feed.run().await;
    assert!(matches!(outcome.error, Some(FeedError::HttpStatus { status: 503, .. })));
}

#[tokio::test]
async fn test_skip_policy_serves_remaining_events() {
    let config = FeedConfig {
        transform_policy: TransformPolicy::SkipEvent,
        ..FeedConfig::default()
    };
    let (feed, _) = stub_feed_with(config, Canned::Json(json!({ "events": [{ "id": 1 }, null, { "id": 3 }] })));
    let outcome = feed.run().await;

    assert_eq!(outcome.state, FetchState::Success);
    assert!(!outcome.result.is_fallback);
    assert_eq!(outcome.result.data.len(), 2);
    assert_eq!(outcome.skipped.len(), 1);
}

#[tokio::test]
async fn test_repeated_runs_fetch_fresh_and_agree() {
    let (feed, stub) = stub_feed(Canned::Json(sample_payload()));
    let first = feed.fetch_events().await;
    let second = feed.fetch_events().await;

    assert_eq!(first, second);
    assert_eq!(stub.request_count(), 2);
}

#[tokio::test]
async fn test_requests_configured_endpoint() {
    let config = FeedConfig {
        cors_proxy_url: None,
        api_url: "https://events.example.com/feed.json".into(),
        ..FeedConfig::default()
    };
    let (feed, stub) = stub_feed_with(config, Canned::Json(json!([])));
    let result = feed.fetch_events().await;

    assert!(!result.is_fallback);
    assert!(result.data.is_empty());
    assert_eq!(
        *stub.requests.lock().unwrap(),
        ["https://events.example.com/feed.json"]
    );
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/event-data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let config = FeedConfig {
        api_url: format!("{}/events/event-data.json", server.uri()),
        cors_proxy_url: None,
        ..FeedConfig::default()
    };
    let result = EventsFeed::new(config).unwrap().fetch_events().await;

    assert!(!result.is_fallback);
    assert_eq!(result.data.events()[0].name, "Test Event");
}

#[tokio::test]
async fn test_end_to_end_404_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = FeedConfig {
        api_url: format!("{}/events/event-data.json", server.uri()),
        cors_proxy_url: None,
        ..FeedConfig::default()
    };
    let result = EventsFeed::new(config).unwrap().fetch_events().await;

    assert!(result.is_fallback);
    assert_eq!(&result.data, fallback_data());
}
