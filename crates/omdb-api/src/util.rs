//! Integer coercion and paging helpers.

use serde_json::Value;

use crate::normalize::Payload;

/// Maximum number of search results OMDb returns per page.
pub const PAGE_SIZE: u32 = 10;

/// Coerces a payload field to a non-negative count; anything unusable is 0.
///
/// OMDb sends counts as strings (`"totalResults": "11"`).
pub fn count_field(payload: &Payload, key: &str) -> u32 {
    match payload.get(key) {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        _ => 0,
    }
}

/// Number of pages needed for `total_results` results.
pub const fn page_count(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}
