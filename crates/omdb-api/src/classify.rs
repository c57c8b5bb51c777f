//! Upstream error classification.
//!
//! OMDb reports failures in-band as `{"Response": "False", "Error": "..."}`
//! with HTTP 200. The error text is the only signal, so it is matched
//! against a fixed table; unknown strings fall through to
//! `OmdbError::Upstream`.

use serde_json::Value;

use crate::error::{OmdbError, Result};
use crate::normalize::Payload;
use crate::params::QueryParams;

/// Classified upstream failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Search matched too many titles.
    TooManyResults,
    /// Requested movie, series, episode or id does not exist.
    NoResults,
    /// Daily request quota exhausted.
    LimitReached,
    /// Key rejected upstream.
    InvalidApiKey,
}

/// Lowercased upstream error text -> kind.
pub const KNOWN_ERRORS: &[(&str, ErrorKind)] = &[
    ("too many results.", ErrorKind::TooManyResults),
    ("movie not found!", ErrorKind::NoResults),
    ("series or season not found!", ErrorKind::NoResults),
    ("series not found!", ErrorKind::NoResults),
    ("series or episode not found!", ErrorKind::NoResults),
    ("incorrect imdb id.", ErrorKind::NoResults),
    ("request limit reached!", ErrorKind::LimitReached),
    ("invalid api key!", ErrorKind::InvalidApiKey),
];

/// Looks up the kind for an upstream error string (case-insensitive).
#[must_use]
pub fn lookup_error_kind(error: &str) -> Option<ErrorKind> {
    let needle = error.to_lowercase();
    KNOWN_ERRORS
        .iter()
        .find(|(text, _)| *text == needle)
        .map(|(_, kind)| *kind)
}

/// Returns `true` if a normalized payload carries `response == "False"`.
#[must_use]
pub fn is_failure(payload: &Payload) -> bool {
    matches!(payload.get("response"), Some(Value::String(s)) if s == "False")
}

/// Converts an upstream failure payload into a classified error.
///
/// `params` are the parameters of the request that produced `payload`;
/// `api_key` is the configured key.
///
/// # Errors
///
/// Returns the classified error when `payload` reports `response == "False"`.
pub fn check_response(payload: &Payload, params: &QueryParams, api_key: &str) -> Result<()> {
    if !is_failure(payload) {
        return Ok(());
    }

    let raw = payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default();
    tracing::warn!(error = raw, "OMDb API reported failure");

    let err = match lookup_error_kind(raw) {
        Some(ErrorKind::TooManyResults) => OmdbError::TooManyResults {
            error: String::from(raw),
            params: params.clone(),
        },
        Some(ErrorKind::NoResults) => OmdbError::NoResults {
            error: String::from(raw),
            params: params.clone(),
        },
        Some(ErrorKind::LimitReached) => OmdbError::LimitReached {
            api_key: String::from(api_key),
        },
        Some(ErrorKind::InvalidApiKey) => OmdbError::InvalidApiKey {
            api_key: String::from(api_key),
        },
        None => OmdbError::Upstream(String::from(raw)),
    };
    Err(err)
}

/// Runs [`check_response`] on every mapping inside `payload`, itself included.
///
/// Nested mappings and mappings inside arrays are checked before the mapping
/// that holds them, in key order, so the innermost failure is reported.
///
/// # Errors
///
/// Returns the classified error of the first failing mapping.
pub fn check_tree(payload: &Payload, params: &QueryParams, api_key: &str) -> Result<()> {
    for value in payload.values() {
        check_nested(value, params, api_key)?;
    }
    check_response(payload, params, api_key)
}

fn check_nested(value: &Value, params: &QueryParams, api_key: &str) -> Result<()> {
    match value {
        Value::Object(map) => check_tree(map, params, api_key),
        Value::Array(items) => items
            .iter()
            .filter(|item| item.is_object())
            .try_for_each(|item| check_nested(item, params, api_key)),
        _ => Ok(()),
    }
}
