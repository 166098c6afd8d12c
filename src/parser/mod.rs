//! Classifies a raw payload into one of the known source shapes.
//!
//! Shapes are checked in a fixed order, first match wins:
//!
//! 1. a bare array of events
//! 2. an object with an `events` array, optionally with a `venues` array
//! 3. an object whose `_embedded` object holds an `events` array
//!
//! Anything else fails closed with `FeedError::UnknownShape`.

use crate::error::{FeedError, Result};
use crate::types::{RawEvent, RawVenue};
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceShape {
    /// `[ event, ... ]`
    Array { events: Vec<RawEvent> },
    /// `{ "events": [...], "venues": [...]? }`
    EventsField {
        events: Vec<RawEvent>,
        venues: Option<Vec<RawVenue>>,
    },
    /// `{ "_embedded": { "events": [...] } }`
    Embedded { events: Vec<RawEvent> },
}

/// Events and venues pulled out of a resolved shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedPayload {
    pub events: Vec<RawEvent>,
    pub venues: Option<Vec<RawVenue>>,
}

impl SourceShape {
    pub fn resolve(raw: Value) -> Result<Self> {
        match raw {
            Value::Array(events) => Ok(SourceShape::Array { events }),
            Value::Object(map) => Self::resolve_object(map),
            other => {
                debug!("Root value is {}, not an object or array", json_type(&other));
                Err(FeedError::UnknownShape { keys: Vec::new() })
            }
        }
    }

    fn resolve_object(mut map: Map<String, Value>) -> Result<Self> {
        let keys = sorted_keys(&map);

        if let Some(Value::Array(events)) = map.remove("events") {
            // A non-array `venues` is treated as absent
            let venues = match map.remove("venues") {
                Some(Value::Array(venues)) => Some(venues),
                _ => None,
            };
            return Ok(SourceShape::EventsField { events, venues });
        }

        if let Some(Value::Object(mut embedded)) = map.remove("_embedded") {
            if let Some(Value::Array(events)) = embedded.remove("events") {
                return Ok(SourceShape::Embedded { events });
            }
        }

        Err(FeedError::UnknownShape { keys })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceShape::Array { .. } => "array",
            SourceShape::EventsField { .. } => "events_field",
            SourceShape::Embedded { .. } => "embedded",
        }
    }

    pub fn event_count(&self) -> usize {
        match self {
            SourceShape::Array { events }
            | SourceShape::EventsField { events, .. }
            | SourceShape::Embedded { events } => events.len(),
        }
    }

    pub fn into_payload(self) -> ResolvedPayload {
        match self {
            SourceShape::Array { events } | SourceShape::Embedded { events } => ResolvedPayload {
                events,
                venues: None,
            },
            SourceShape::EventsField { events, venues } => ResolvedPayload { events, venues },
        }
    }
}

/// Resolve and flatten in one step.
pub fn resolve(raw: Value) -> Result<ResolvedPayload> {
    let shape = SourceShape::resolve(raw)?;
    debug!(
        shape = shape.name(),
        events = shape.event_count(),
        "Resolved source shape"
    );
    Ok(shape.into_payload())
}

fn sorted_keys(map: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
