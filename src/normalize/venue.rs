use crate::types::{RawEvent, RawVenue};
use serde_json::Value;

/// Find the venue an event references via `venueId`.
///
/// Ids are compared in their JSON type: `100` matches `100` and `100.0` but
/// not `"100"`.
/// Returns the first match; `None` without venues, without a usable
/// `venueId`, or when nothing matches.
pub fn match_venue<'a>(raw_event: &RawEvent, venues: Option<&'a [RawVenue]>) -> Option<&'a RawVenue> {
    let venues = venues?;
    let venue_id = raw_event.get("venueId").filter(|id| is_scalar_id(id))?;
    venues
        .iter()
        .find(|venue| venue.get("id").is_some_and(|id| ids_equal(id, venue_id)))
}

fn ids_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => {
            x.as_f64() == y.as_f64()
        }
        _ => a == b,
    }
}

fn is_scalar_id(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}
