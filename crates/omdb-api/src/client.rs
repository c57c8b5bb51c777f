//! `OmdbClient` - OMDb API client implementation.

use std::fmt::Display;

use reqwest::Client;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::api::LocalOmdbApi;
use crate::classify::check_tree;
use crate::config::{OmdbConfig, Timeout};
use crate::error::{OmdbError, Result};
use crate::normalize::{Payload, normalize_payload};
use crate::params::{EpisodeParams, GetParams, QueryParams, SearchParams};
use crate::util::{PAGE_SIZE, count_field, page_count};

/// Default OMDb endpoint.
const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// OMDb API client.
///
/// Requests are issued one at a time; multi-page searches and season pulls
/// await each response before sending the next request.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client; `None` once closed.
    http_client: Option<Client>,
    /// Endpoint URL.
    base_url: Url,
    /// API key, timeout and strict flag.
    config: OmdbConfig,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    timeout: Option<String>,
    strict: Option<bool>,
    user_agent: Option<String>,
    config: Option<OmdbConfig>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: None,
            strict: None,
            user_agent: None,
            config: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required unless a config is given).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the timeout in seconds from any numeric-like value (default: 5).
    #[must_use]
    pub fn timeout(mut self, timeout: impl Display) -> Self {
        self.timeout = Some(timeout.to_string());
        self
    }

    /// Sets strict mode (default: `true`).
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Sets the User-Agent (default: `omdb-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Starts from a loaded config; explicit builder values override it.
    #[must_use]
    pub fn config(mut self, config: OmdbConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `timeout` is not a positive number.
    /// - `api_key` is missing or empty.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let timeout = self.timeout.as_deref().map(Timeout::parse).transpose()?;

        let mut config = match (self.config, self.api_key) {
            (Some(mut config), Some(key)) => {
                config.set_api_key(key)?;
                config
            }
            (Some(config), None) => config,
            (None, key) => OmdbConfig::new(key.unwrap_or_default())?,
        };
        if let Some(timeout) = timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(strict) = self.strict {
            config.set_strict(strict);
        }

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));
        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()?;

        Ok(OmdbClient {
            http_client: Some(http_client),
            base_url,
            config,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Creates a client with the default timeout and strict mode on.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty or the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &OmdbConfig {
        &self.config
    }

    /// API key sent with every request.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.config.api_key()
    }

    /// Replaces the API key.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidApiKey` if `api_key` is empty.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> Result<()> {
        self.config.set_api_key(api_key)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Timeout {
        self.config.timeout()
    }

    /// Replaces the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidTimeout` if the value is not a positive number.
    pub fn set_timeout(&mut self, timeout: impl Display) -> Result<()> {
        self.config.set_timeout(timeout)
    }

    /// Whether upstream failures become errors.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.config.strict()
    }

    /// Sets strict mode.
    pub const fn set_strict(&mut self, strict: bool) {
        self.config.set_strict(strict);
    }

    /// Releases the HTTP client. Later requests fail with `OmdbError::Closed`.
    pub fn close(&mut self) {
        if self.http_client.take().is_some() {
            tracing::debug!("OMDb client closed");
        }
    }

    /// Returns `true` after [`Self::close`].
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.http_client.is_none()
    }

    /// Sends one GET request and returns the normalized payload.
    ///
    /// In strict mode an upstream `Response: "False"` at any nesting level
    /// becomes a classified error.
    #[instrument(skip_all)]
    async fn fetch(&self, params: &QueryParams) -> Result<Payload> {
        let http_client = self.http_client.as_ref().ok_or(OmdbError::Closed)?;

        let request = http_client
            .get(self.base_url.clone())
            .query(&params.to_query_pairs())
            .timeout(self.config.timeout().as_duration())
            .build()?;

        tracing::debug!(
            params = ?params.keys().collect::<Vec<_>>(),
            "OMDb API request"
        );

        let response = http_client.execute(request).await?;
        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        let payload = normalize_payload(value)?;

        if self.config.strict() {
            check_tree(&payload, params, self.config.api_key())?;
        }
        Ok(payload)
    }
}

/// `type=<kind>` followed by the caller's extension parameters.
fn with_type(kind: &str, extra: &QueryParams) -> QueryParams {
    let mut params = QueryParams::new().with("type", kind);
    params.merge(extra);
    params
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all)]
    async fn search(&self, params: &SearchParams) -> Result<Payload> {
        let mut query = QueryParams::new()
            .with("s", params.query.as_str())
            .with("page", 1_u32)
            .with("apikey", self.config.api_key());
        if !params.pull_all {
            query.insert("page", params.page);
        }
        query.merge(&params.extra);

        let mut results = self.fetch(&query).await?;

        let total_results = count_field(&results, "total_results");
        if !params.pull_all || total_results <= PAGE_SIZE {
            return Ok(results);
        }

        let pages = page_count(total_results);
        tracing::info!(total_results, pages, "OMDb search spans multiple pages");

        let mut collected = match results.remove("search") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        for page in 2..=pages {
            query.insert("page", page);
            let mut data = self.fetch(&query).await?;
            if let Some(Value::Array(items)) = data.remove("search") {
                collected.extend(items);
            }
        }
        results.insert(String::from("search"), Value::Array(collected));

        Ok(results)
    }

    #[instrument(skip_all)]
    async fn get(&self, params: &GetParams) -> Result<Payload> {
        let mut query = params
            .selector_params(self.config.api_key())
            .ok_or(OmdbError::MissingSelector)?;
        query.merge(&params.extra);

        self.fetch(&query).await
    }

    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchParams) -> Result<Payload> {
        let movie = SearchParams {
            extra: with_type("movie", &params.extra),
            ..params.clone()
        };
        self.search(&movie).await
    }

    #[instrument(skip_all)]
    async fn search_series(&self, params: &SearchParams) -> Result<Payload> {
        let series = SearchParams {
            extra: with_type("series", &params.extra),
            ..params.clone()
        };
        self.search(&series).await
    }

    #[instrument(skip_all)]
    async fn get_movie(&self, params: &GetParams) -> Result<Payload> {
        let movie = GetParams {
            extra: with_type("movie", &params.extra),
            ..params.clone()
        };
        self.get(&movie).await
    }

    #[instrument(skip_all)]
    async fn get_series(&self, params: &GetParams, pull_episodes: bool) -> Result<Payload> {
        let series = GetParams {
            extra: with_type("series", &params.extra),
            ..params.clone()
        };
        let mut result = self.get(&series).await?;
        if !pull_episodes {
            return Ok(result);
        }

        let total_seasons = count_field(&result, "total_seasons");
        tracing::info!(total_seasons, "pulling OMDb series seasons");

        // Season requests carry only the series selector.
        let selector = params.selector_only();
        let mut seasons = Payload::new();
        for season in 1..=total_seasons {
            let episodes = self.get_episodes(&selector, Some(season)).await?;
            seasons.insert(season.to_string(), Value::Object(episodes));
        }
        result.insert(String::from("seasons"), Value::Object(seasons));

        Ok(result)
    }

    #[instrument(skip_all)]
    async fn get_episode(&self, params: &EpisodeParams) -> Result<Payload> {
        let mut extra = QueryParams::new().with("type", "episode");
        if let Some(season) = params.season {
            extra.insert("Season", season);
        }
        if let Some(episode) = params.episode {
            extra.insert("Episode", episode);
        }
        extra.merge(&params.series.extra);

        let lookup = GetParams {
            extra,
            ..params.series.clone()
        };
        self.get(&lookup).await
    }

    #[instrument(skip_all)]
    async fn get_episodes(&self, params: &GetParams, season: Option<u32>) -> Result<Payload> {
        let episodes = EpisodeParams {
            series: params.clone(),
            season,
            episode: None,
        };
        self.get_episode(&episodes).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::float_cmp)]

    use std::time::Duration;

    use wiremock::matchers::{header, method, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::params::ParamValue;

    const MOVIE_JSON: &str = include_str!("../../../fixtures/omdb/get_despicable_me.json");
    const PAGE1_JSON: &str =
        include_str!("../../../fixtures/omdb/search_band_of_brothers_page1.json");
    const PAGE2_JSON: &str =
        include_str!("../../../fixtures/omdb/search_band_of_brothers_page2.json");
    const SNOWY_JSON: &str =
        include_str!("../../../fixtures/omdb/search_man_from_snowy_river.json");
    const EPISODE_JSON: &str =
        include_str!("../../../fixtures/omdb/episode_band_of_brothers_s1e5.json");

    fn client_for(server: &MockServer) -> OmdbClient {
        OmdbClient::builder()
            .base_url(format!("{}/", server.uri()).parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = OmdbClient::new("test-key").unwrap();

        // Assert
        assert_eq!(client.api_key(), "test-key");
        assert_eq!(client.timeout().as_secs_f64(), 5.0);
        assert!(client.strict());
        assert!(!client.is_closed());
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_requires_api_key() {
        // Arrange & Act
        let result = OmdbClient::builder().build();

        // Assert
        assert!(matches!(result, Err(OmdbError::InvalidApiKey { .. })));
    }

    #[test]
    fn test_builder_rejects_non_numeric_timeout() {
        // Arrange & Act
        let err = OmdbClient::builder()
            .api_key("test-key")
            .timeout("test")
            .build()
            .unwrap_err();

        // Assert
        assert_eq!(
            err.to_string(),
            "OMDB Timeout must be a float or convertable to float! test provided"
        );
    }

    #[test]
    fn test_builder_overrides_config() {
        // Arrange
        let config = OmdbConfig::new("from-config").unwrap();

        // Act
        let client = OmdbClient::builder()
            .config(config)
            .timeout(12)
            .strict(false)
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.api_key(), "from-config");
        assert_eq!(client.timeout().as_secs_f64(), 12.0);
        assert!(!client.strict());
    }

    #[test]
    fn test_setters_revalidate() {
        // Arrange
        let mut client = OmdbClient::new("test-key").unwrap();

        // Act
        let bad_timeout = client.set_timeout("later");
        let bad_key = client.set_api_key("");
        client.set_timeout("2.5").unwrap();
        client.set_strict(false);

        // Assert
        assert!(bad_timeout.is_err());
        assert!(bad_key.is_err());
        assert_eq!(client.api_key(), "test-key");
        assert_eq!(client.timeout().as_secs_f64(), 2.5);
        assert!(!client.strict());
    }

    #[tokio::test]
    async fn test_get_by_title_normalizes_keys() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("t", "Despicable Me"))
            .and(query_param("apikey", "test-key"))
            .and(header("user-agent", "test/0.0.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOVIE_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let res = client
            .get(&GetParams::new().title("Despicable Me"))
            .await
            .unwrap();

        // Assert
        assert_eq!(res["imdb_id"], "tt1323594");
        assert_eq!(res["title"], "Despicable Me");
        assert_eq!(res["rated"], "PG");
        assert_eq!(res["box_office"], "$251,513,985");
        assert_eq!(res["ratings"][0]["source"], "Internet Movie Database");
    }

    #[tokio::test]
    async fn test_get_prefers_imdbid_over_title() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("i", "tt1323594"))
            .and(query_param_is_missing("t"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOVIE_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let res = client
            .get(&GetParams::new().title("Despicable Me").imdbid("tt1323594"))
            .await
            .unwrap();

        // Assert
        assert_eq!(res["imdb_id"], "tt1323594");
    }

    #[tokio::test]
    async fn test_get_without_selector_sends_nothing() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOVIE_JSON))
            .expect(0)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client.get(&GetParams::new()).await.unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::MissingSelector));
        assert_eq!(err.to_string(), "Either title or imdbid is required!");
    }

    #[tokio::test]
    async fn test_get_extra_params_override() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("t", "Despicable Me"))
            .and(query_param("plot", "full"))
            .and(query_param("type", "series"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOVIE_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let params = GetParams::new()
            .title("Despicable Me")
            .extra(QueryParams::new().with("plot", "full").with("type", "series"));

        // Act & Assert (extension `type` wins over the movie preset)
        client.get_movie(&params).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_paginates_all_results() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("s", "Band of Brothers"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE1_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("s", "Band of Brothers"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE2_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let res = client
            .search(&SearchParams::new("Band of Brothers"))
            .await
            .unwrap();

        // Assert
        assert_eq!(res["total_results"], "11");
        let items = res["search"].as_array().unwrap();
        assert_eq!(items.len(), 11);
        assert_eq!(items[0]["imdb_id"], "tt0185906");
        assert_eq!(items[10]["title"], "Band of Brothers: Points");
    }

    #[tokio::test]
    async fn test_search_single_page_is_unchanged() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("s", "Man From Snowy River"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SNOWY_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let res = client
            .search(&SearchParams::new("Man From Snowy River"))
            .await
            .unwrap();

        // Assert
        assert_eq!(res["total_results"], "3");
        assert_eq!(res["search"].as_array().unwrap().len(), 3);
        assert_eq!(res["search"][2]["year"], "1994-1996");
        assert_eq!(res.len(), 3);
    }

    #[tokio::test]
    async fn test_search_single_page_request() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE2_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let params = SearchParams::new("Band of Brothers").pull_all(false).page(2);

        // Act
        let res = client.search(&params).await.unwrap();

        // Assert
        assert_eq!(res["total_results"], "11");
        assert_eq!(res["search"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_extra_params_override_builtins() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("s", "Man From Snowy River"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SNOWY_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let extra = QueryParams::new()
            .with("s", "Man From Snowy River")
            .with("page", 3_u32);
        let params = SearchParams::new("Band of Brothers").extra(extra);

        // Act
        let res = client.search(&params).await.unwrap();

        // Assert
        assert_eq!(res["total_results"], "3");
    }

    #[tokio::test]
    async fn test_search_series_sets_type() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("s", "Man From Snowy River"))
            .and(query_param("type", "series"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SNOWY_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act & Assert
        client
            .search_series(&SearchParams::new("Man From Snowy River"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_episode_sends_season_and_episode() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("t", "Band of Brothers"))
            .and(query_param("type", "episode"))
            .and(query_param("Season", "1"))
            .and(query_param("Episode", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EPISODE_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let params = EpisodeParams::new(GetParams::new().title("Band of Brothers"))
            .season(1)
            .episode(5);

        // Act
        let res = client.get_episode(&params).await.unwrap();

        // Assert
        assert_eq!(res["title"], "Crossroads");
        assert_eq!(res["series_id"], "tt0185906");
        assert!(res["plot"].as_str().unwrap().contains(" - "));
    }

    #[tokio::test]
    async fn test_get_episode_omits_absent_filters() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("type", "episode"))
            .and(query_param_is_missing("Season"))
            .and(query_param_is_missing("Episode"))
            .respond_with(ResponseTemplate::new(200).set_body_string(EPISODE_JSON))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let params = EpisodeParams::new(GetParams::new().title("Band of Brothers"));

        // Act & Assert
        client.get_episode(&params).await.unwrap();
    }

    #[tokio::test]
    async fn test_not_found_raises_no_results() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"Response":"False","Error":"Movie not found!"}"#),
            )
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client
            .get(&GetParams::new().title("Random Movie Title"))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::NoResults { .. }));
        assert_eq!(err.error_message(), Some("Movie not found!"));
        let params = err.params().unwrap();
        assert_eq!(params.get("t"), Some(&ParamValue::from("Random Movie Title")));
        assert_eq!(params.get("apikey"), Some(&ParamValue::from("test-key")));
    }

    #[tokio::test]
    async fn test_too_many_results_carries_request_params() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"Response":"False","Error":"Too many results."}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client.search(&SearchParams::new("A")).await.unwrap_err();

        // Assert
        let expected = QueryParams::new()
            .with("s", "A")
            .with("page", 1_u32)
            .with("apikey", "test-key");
        assert!(matches!(err, OmdbError::TooManyResults { .. }));
        assert_eq!(err.params(), Some(&expected));
    }

    #[tokio::test]
    async fn test_limit_reached_carries_api_key() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"Response":"False","Error":"Request limit reached!"}"#),
            )
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client.search(&SearchParams::new("order")).await.unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::LimitReached { .. }));
        assert_eq!(err.api_key(), Some("test-key"));
    }

    #[tokio::test]
    async fn test_nested_failure_raises_in_strict_mode() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"Title":"X","Response":"True","Inner":{"Response":"False","Error":"Movie not found!"}}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client
            .get(&GetParams::new().title("X"))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::NoResults { .. }));
        assert_eq!(err.error_message(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn test_nested_failure_passes_through_when_not_strict() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"Title":"X","Response":"True","Inner":{"Response":"False","Error":"Movie not found!"}}"#,
            ))
            .mount(&mock_server)
            .await;
        let mut client = client_for(&mock_server);
        client.set_strict(false);

        // Act
        let res = client.get(&GetParams::new().title("X")).await.unwrap();

        // Assert
        assert_eq!(res["inner"]["error"], "Movie not found!");
    }

    #[tokio::test]
    async fn test_non_strict_passes_failure_through() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"Response":"False","Error":"Movie not found!"}"#),
            )
            .mount(&mock_server)
            .await;
        let mut client = client_for(&mock_server);
        client.set_strict(false);

        // Act
        let res = client
            .get(&GetParams::new().title("Random Movie Title"))
            .await
            .unwrap();

        // Assert
        assert_eq!(res["response"], "False");
        assert_eq!(res["error"], "Movie not found!");
    }

    #[tokio::test]
    async fn test_non_object_body_is_type_error() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client
            .get(&GetParams::new().title("x"))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::UnexpectedType("array")));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client
            .get(&GetParams::new().title("x"))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::Decode(_)));
    }

    #[tokio::test]
    async fn test_timeout_propagates_transport_error() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(MOVIE_JSON)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;
        let mut client = client_for(&mock_server);
        client.set_timeout(0.05).unwrap();

        // Act
        let err = client
            .get(&GetParams::new().title("Despicable Me"))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_closed_client_refuses_requests() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOVIE_JSON))
            .expect(0)
            .mount(&mock_server)
            .await;
        let mut client = client_for(&mock_server);

        // Act
        client.close();
        let err = client
            .get(&GetParams::new().title("Despicable Me"))
            .await
            .unwrap_err();

        // Assert
        assert!(client.is_closed());
        assert!(matches!(err, OmdbError::Closed));
    }
}
