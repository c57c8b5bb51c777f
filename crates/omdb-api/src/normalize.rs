//! Response normalization.
//!
//! OMDb answers with `PascalCase`/`camelCase` keys (`Title`, `imdbID`,
//! `totalSeasons`) and occasionally with look-alike dash characters in
//! text fields. Every payload is rebuilt bottom-up with `snake_case` keys
//! and plain ASCII hyphens.

use serde_json::{Map, Value};

use crate::error::{OmdbError, Result};

/// A normalized response object.
pub type Payload = Map<String, Value>;

/// Code points rewritten to `-`.
pub const HYPHENS: [char; 28] = [
    '\u{002d}', '\u{007e}', '\u{00ad}', '\u{058a}', '\u{05be}', '\u{1400}', '\u{1806}',
    '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2053}',
    '\u{207b}', '\u{208b}', '\u{2212}', '\u{2e17}', '\u{2e3a}', '\u{2e3b}', '\u{301c}',
    '\u{3030}', '\u{30a0}', '\u{fe31}', '\u{fe32}', '\u{fe58}', '\u{fe63}', '\u{ff0d}',
];

/// Converts a `camelCase` / `PascalCase` key to `snake_case`.
///
/// An underscore goes before an uppercase letter only when its left or
/// right neighbour is lowercase, so acronym runs stay together:
/// `imdbID` -> `imdb_id`, `IMDBRating` -> `imdb_rating`.
#[must_use]
pub fn camel_to_snake(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len().saturating_add(4));

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev_lower = chars.get(i.saturating_sub(1)).is_some_and(|p| p.is_lowercase());
            let next_lower = chars
                .get(i.saturating_add(1))
                .is_some_and(|n| n.is_lowercase());
            if prev_lower || next_lower {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Replaces every [`HYPHENS`] code point with an ASCII `-`.
#[must_use]
pub fn clean_up_hyphens(input: &str) -> String {
    input
        .chars()
        .map(|c| if HYPHENS.contains(&c) { '-' } else { c })
        .collect()
}

/// Normalizes a decoded response body.
///
/// # Errors
///
/// Returns `OmdbError::UnexpectedType` if `value` is not a JSON object.
pub fn normalize_payload(value: Value) -> Result<Payload> {
    match value {
        Value::Object(map) => Ok(normalize_map(map)),
        other => Err(OmdbError::UnexpectedType(json_type_name(&other))),
    }
}

/// Rebuilds `map` with normalized keys, children first.
///
/// Keys are visited in sorted order; if two source keys collapse to the
/// same normalized key, the later one in that order wins.
#[must_use]
pub fn normalize_map(map: Map<String, Value>) -> Payload {
    let mut entries: Vec<(String, Value)> = map.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = Payload::new();
    for (key, value) in entries {
        out.insert(camel_to_snake(&key), normalize_value(value));
    }
    out
}

fn normalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map)),
        // Only objects inside arrays are normalized; scalars pass through as-is.
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(normalize_map(map)),
                    other => other,
                })
                .collect(),
        ),
        Value::String(s) => Value::String(clean_up_hyphens(&s)),
        other => other,
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
