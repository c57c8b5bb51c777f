//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::Result;
use crate::normalize::Payload;
use crate::params::{EpisodeParams, GetParams, SearchParams};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Searches titles (`s=`), aggregating every page when `pull_all` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails or, in strict mode, the API
    /// reports a failure.
    async fn search(&self, params: &SearchParams) -> Result<Payload>;

    /// Fetches a single title by IMDb id (preferred) or title.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::MissingSelector` if neither selector is set, or a
    /// request/upstream error.
    async fn get(&self, params: &GetParams) -> Result<Payload>;

    /// Searches movies only (`type=movie`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::search`].
    async fn search_movie(&self, params: &SearchParams) -> Result<Payload>;

    /// Searches series only (`type=series`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::search`].
    async fn search_series(&self, params: &SearchParams) -> Result<Payload>;

    /// Fetches a movie (`type=movie`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    async fn get_movie(&self, params: &GetParams) -> Result<Payload>;

    /// Fetches a series (`type=series`).
    ///
    /// With `pull_episodes`, every season `1..=total_seasons` is fetched in
    /// order and stored under `seasons` keyed by season number.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`], for the series or any season request.
    async fn get_series(&self, params: &GetParams, pull_episodes: bool) -> Result<Payload>;

    /// Fetches an episode (`type=episode`, `Season`, `Episode`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    async fn get_episode(&self, params: &EpisodeParams) -> Result<Payload>;

    /// Fetches every episode of one season.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    async fn get_episodes(&self, params: &GetParams, season: Option<u32>) -> Result<Payload>;
}
