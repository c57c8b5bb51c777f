//! Client library for the OMDb API.
//!
//! Builds query parameters, issues requests against `https://www.omdbapi.com/`,
//! normalizes response keys to `snake_case`, aggregates paginated searches and
//! maps upstream error strings to typed errors.

/// `OmdbApi` trait definition.
mod api;
/// Upstream error-string classification.
pub mod classify;
/// `OmdbClient` implementation.
mod client;
/// Validated client configuration.
pub mod config;
/// Error taxonomy.
mod error;
/// Response key and string normalization.
pub mod normalize;
/// Query parameter types.
pub mod params;
/// Integer coercion and paging helpers.
mod util;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{OmdbClient, OmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use config::{OmdbConfig, Timeout};
#[allow(clippy::module_name_repetitions)]
pub use error::{OmdbError, Result};
pub use normalize::Payload;
pub use params::{EpisodeParams, GetParams, ParamValue, QueryParams, SearchParams};
