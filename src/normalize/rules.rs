//! Ordered extraction rules, one table per canonical field.
//!
//! Each table lists the source locations tried for a field, highest precedence
//! first. A location contributes only if its value is acceptable for the rule
//! (see [`Accept`]); otherwise the next rule is tried.

use serde_json::{Number, Value};

/// How a found value is turned into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Non-empty strings only.
    Text,
    /// Non-empty strings, numbers and booleans. Whole floats render without a
    /// fraction, so `1.0` and `1e3` give `"1"` and `"1000"`.
    Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub path: &'static [&'static str],
    pub accept: Accept,
}

impl Rule {
    pub const fn text(path: &'static [&'static str]) -> Self {
        Self {
            path,
            accept: Accept::Text,
        }
    }

    pub const fn identifier(path: &'static [&'static str]) -> Self {
        Self {
            path,
            accept: Accept::Identifier,
        }
    }

    /// Walk `path` through nested objects. Any non-object along the way misses.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.path
            .iter()
            .try_fold(value, |current, segment| current.as_object()?.get(*segment))
    }

    pub fn extract(&self, value: &Value) -> Option<String> {
        let found = self.lookup(value)?;
        match (self.accept, found) {
            (_, Value::String(s)) if !s.is_empty() => Some(s.clone()),
            (Accept::Identifier, Value::Number(n)) => Some(number_text(n)),
            (Accept::Identifier, Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_INT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// First acceptable value across `rules`, in order.
pub fn first_match(rules: &[Rule], value: &Value) -> Option<String> {
    rules.iter().find_map(|rule| rule.extract(value))
}

pub const EVENT_ID: &[Rule] = &[Rule::identifier(&["id"])];

pub const EVENT_NAME: &[Rule] = &[Rule::text(&["name"]), Rule::text(&["title"])];

pub const EVENT_START: &[Rule] = &[
    Rule::text(&["startDate"]),
    Rule::text(&["dates", "start", "dateTime"]),
    Rule::text(&["dateTime"]),
];

/// Only consulted when the matched venue has no timezone.
pub const EVENT_TIMEZONE: &[Rule] = &[Rule::text(&["timezone"])];

pub const EVENT_INFO: &[Rule] = &[Rule::text(&["description"]), Rule::text(&["info"])];

pub const EVENT_TYPE: &[Rule] = &[Rule::text(&["type"])];

pub const VENUE_ID: &[Rule] = &[Rule::identifier(&["id"])];

pub const VENUE_NAME: &[Rule] = &[Rule::text(&["name"])];

pub const VENUE_CITY: &[Rule] = &[Rule::text(&["city"])];

pub const VENUE_STATE: &[Rule] = &[Rule::text(&["state"])];

pub const VENUE_ADDRESS: &[Rule] = &[Rule::text(&["address"])];

pub const VENUE_POSTAL_CODE: &[Rule] = &[Rule::text(&["postcode"]), Rule::text(&["postalCode"])];

pub const VENUE_TIMEZONE: &[Rule] = &[Rule::text(&["timezone"])];
