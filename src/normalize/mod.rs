//! Maps raw events and venues onto the canonical model.

pub mod rules;
pub mod venue;

pub use venue::match_venue;

use crate::constants::{SYNTHETIC_ID_PREFIX, UNNAMED_EVENT};
use crate::error::{FeedError, Result};
use crate::parser::json_type;
use crate::types::{
    Address, EmbeddedVenues, Event, EventDate, EventDates, NamedPlace, RawEvent, RawVenue, Venue,
};
use rules::first_match;

/// Normalize one raw event. `index` is its position in the source list and
/// names the synthetic id when the event has none.
pub fn normalize_event(raw: &RawEvent, venue: Option<&RawVenue>, index: usize) -> Result<Event> {
    if !raw.is_object() {
        return Err(FeedError::Transform {
            index,
            cause: format!("expected an object, found {}", json_type(raw)),
        });
    }

    let id = first_match(rules::EVENT_ID, raw)
        .unwrap_or_else(|| format!("{}{}", SYNTHETIC_ID_PREFIX, index));
    let name = first_match(rules::EVENT_NAME, raw).unwrap_or_else(|| UNNAMED_EVENT.to_string());
    let date_time = first_match(rules::EVENT_START, raw).unwrap_or_default();
    let timezone = venue
        .and_then(|v| first_match(rules::VENUE_TIMEZONE, v))
        .or_else(|| first_match(rules::EVENT_TIMEZONE, raw));

    Ok(Event {
        id,
        name,
        dates: EventDates {
            start: EventDate { date_time },
            timezone,
        },
        info: first_match(rules::EVENT_INFO, raw),
        event_type: first_match(rules::EVENT_TYPE, raw),
        embedded: venue.map(|v| EmbeddedVenues {
            venues: vec![normalize_venue(v)],
        }),
    })
}

pub fn normalize_venue(raw: &RawVenue) -> Venue {
    Venue {
        id: first_match(rules::VENUE_ID, raw).unwrap_or_default(),
        name: first_match(rules::VENUE_NAME, raw).unwrap_or_default(),
        city: first_match(rules::VENUE_CITY, raw).map(NamedPlace::new),
        state: first_match(rules::VENUE_STATE, raw).map(NamedPlace::new),
        address: first_match(rules::VENUE_ADDRESS, raw).map(|line1| Address { line1 }),
        postal_code: first_match(rules::VENUE_POSTAL_CODE, raw),
        timezone: first_match(rules::VENUE_TIMEZONE, raw),
    }
}
