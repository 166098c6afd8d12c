//! Sample catalog served whenever the live pipeline cannot produce a result.
//!
//! The dataset is built once per process and never mutated; callers receive
//! clones.

use crate::types::{
    Address, EmbeddedVenues, Event, EventDate, EventDates, EventsEnvelope, NamedPlace, Venue,
};
use once_cell::sync::Lazy;

static FALLBACK_DATA: Lazy<EventsEnvelope> = Lazy::new(|| {
    EventsEnvelope::new(vec![
        sample_event(
            "fallback-1",
            "Sample Concert Event",
            "2025-11-15T19:00:00Z",
            "Australia/Sydney",
            sample_venue("venue-1", "Sample Arena", "Sydney", "NSW", "123 Sample Street", "2000"),
            "This is fallback data displayed because the API is currently unavailable. The application remains functional with sample events.",
        ),
        sample_event(
            "fallback-2",
            "Sample Sports Event",
            "2025-11-20T18:30:00Z",
            "Australia/Melbourne",
            sample_venue("venue-2", "Sample Stadium", "Melbourne", "VIC", "456 Example Avenue", "3000"),
            "Another sample event from fallback data to demonstrate the app functionality.",
        ),
        sample_event(
            "fallback-3",
            "Sample Theater Performance",
            "2025-11-25T20:00:00Z",
            "Australia/Brisbane",
            sample_venue("venue-1", "Sample Arena", "Brisbane", "QLD", "789 Demo Road", "4000"),
            "Experience world-class entertainment in this fallback example.",
        ),
        sample_event(
            "fallback-4",
            "Sample Music Festival",
            "2025-12-01T14:00:00Z",
            "Australia/Perth",
            sample_venue("venue-3", "Sample Park", "Perth", "WA", "321 Test Boulevard", "6000"),
            "Join us for an amazing outdoor music festival with multiple stages and artists.",
        ),
    ])
});

/// The fixed fallback envelope.
pub fn fallback_data() -> &'static EventsEnvelope {
    &FALLBACK_DATA
}

fn sample_event(
    id: &str,
    name: &str,
    date_time: &str,
    timezone: &str,
    venue: Venue,
    info: &str,
) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        dates: EventDates {
            start: EventDate {
                date_time: date_time.to_string(),
            },
            timezone: Some(timezone.to_string()),
        },
        info: Some(info.to_string()),
        event_type: None,
        embedded: Some(EmbeddedVenues {
            venues: vec![venue],
        }),
    }
}

fn sample_venue(
    id: &str,
    name: &str,
    city: &str,
    state: &str,
    line1: &str,
    postal_code: &str,
) -> Venue {
    Venue {
        id: id.to_string(),
        name: name.to_string(),
        city: Some(NamedPlace::new(city)),
        state: Some(NamedPlace::new(state)),
        address: Some(Address {
            line1: line1.to_string(),
        }),
        postal_code: Some(postal_code.to_string()),
        timezone: None,
    }
}
