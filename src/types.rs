use serde::{Deserialize, Serialize};

/// Raw event as received from the source; no field is guaranteed present.
pub type RawEvent = serde_json::Value;

/// Raw venue as received from the source.
pub type RawVenue = serde_json::Value;

/// `{ "name": ... }` wrapper used for venue city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPlace {
    pub name: String,
}

impl NamedPlace {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
}

/// Canonical venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<NamedPlace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<NamedPlace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    /// Verbatim source string; empty when the source gave none.
    #[serde(rename = "dateTime")]
    pub date_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDates {
    pub start: EventDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Holds at most one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedVenues {
    pub venues: Vec<Venue>,
}

/// Canonical event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub dates: EventDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedVenues>,
}

impl Event {
    pub fn venue(&self) -> Option<&Venue> {
        self.embedded.as_ref().and_then(|e| e.venues.first())
    }

    pub fn start_date_time(&self) -> &str {
        &self.dates.start.date_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedEvents {
    pub events: Vec<Event>,
}

/// Collection envelope, serialised as `{"_embedded": {"events": [...]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsEnvelope {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedEvents,
}

impl EventsEnvelope {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            embedded: EmbeddedEvents { events },
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.embedded.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.embedded.events
    }

    pub fn len(&self) -> usize {
        self.embedded.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embedded.events.is_empty()
    }
}

/// What `EventsFeed::fetch_events` hands its callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub data: EventsEnvelope,
    /// True iff `data` is the fallback dataset.
    pub is_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_serializes_with_source_field_names() {
        let event = Event {
            id: "1".into(),
            name: "Test Event".into(),
            dates: EventDates {
                start: EventDate {
                    date_time: "2025-11-15T19:00:00Z".into(),
                },
                timezone: None,
            },
            info: None,
            event_type: Some("concert".into()),
            embedded: Some(EmbeddedVenues {
                venues: vec![Venue {
                    id: "100".into(),
                    name: "Test Venue".into(),
                    city: Some(NamedPlace::new("Sydney")),
                    state: None,
                    address: None,
                    postal_code: Some("2000".into()),
                    timezone: None,
                }],
            }),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "name": "Test Event",
                "dates": { "start": { "dateTime": "2025-11-15T19:00:00Z" } },
                "type": "concert",
                "_embedded": {
                    "venues": [{
                        "id": "100",
                        "name": "Test Venue",
                        "city": { "name": "Sydney" },
                        "postalCode": "2000"
                    }]
                }
            })
        );
        assert_eq!(event.venue().map(|v| v.name.as_str()), Some("Test Venue"));
    }

    #[test]
    fn fetch_result_uses_is_fallback_key() {
        let result = FetchResult {
            data: EventsEnvelope::new(vec![]),
            is_fallback: true,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({ "data": { "_embedded": { "events": [] } }, "isFallback": true })
        );
    }
}
