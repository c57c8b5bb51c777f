//! `OmdbError` - every failure the client can surface.

use crate::params::QueryParams;

/// Errors returned by the OMDb client.
///
/// Local validation failures (`InvalidTimeout`, `InvalidApiKey`,
/// `MissingSelector`) are always returned. Upstream-signaled failures
/// (`NoResults`, `TooManyResults`, `LimitReached`, `InvalidApiKey`,
/// `Upstream`) are only produced in strict mode.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum OmdbError {
    /// Timeout value is not convertible to a positive float.
    #[error("OMDB Timeout must be a float or convertable to float! {0} provided")]
    InvalidTimeout(String),

    /// API key failed local validation or was rejected upstream.
    #[error("Invalid API Key ({api_key}) provided")]
    InvalidApiKey {
        /// The offending API key.
        api_key: String,
    },

    /// Neither `title` nor `imdbid` was supplied to a lookup.
    #[error("Either title or imdbid is required!")]
    MissingSelector,

    /// Response body parsed, but is not a JSON object.
    #[error("Expecting JSON object, received {0}")]
    UnexpectedType(&'static str),

    /// Upstream could not find the requested entity.
    #[error("message: {error}\tparams: {params}")]
    NoResults {
        /// Raw upstream error text.
        error: String,
        /// Parameters of the failing request.
        params: QueryParams,
    },

    /// Upstream refused a search whose match set is too broad.
    #[error("message: {error}\tparams: {params}")]
    TooManyResults {
        /// Raw upstream error text.
        error: String,
        /// Parameters of the failing request.
        params: QueryParams,
    },

    /// Request quota for the API key is exhausted.
    #[error("Limit reached for API Key: {api_key}")]
    LimitReached {
        /// The configured API key.
        api_key: String,
    },

    /// Upstream failure string not present in the classification table.
    #[error("An unknown exception was returned: {0}")]
    Upstream(String),

    /// The client was closed with [`crate::OmdbClient::close`].
    #[error("OMDb client is closed")]
    Closed,

    /// Transport failure, including request timeouts.
    #[error("OMDb request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not valid JSON.
    #[error("failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl OmdbError {
    /// Raw upstream error text for `NoResults`, `TooManyResults` and `Upstream`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::NoResults { error, .. }
            | Self::TooManyResults { error, .. }
            | Self::Upstream(error) => Some(error.as_str()),
            _ => None,
        }
    }

    /// Request parameters attached to `NoResults` and `TooManyResults`.
    #[must_use]
    pub const fn params(&self) -> Option<&QueryParams> {
        match self {
            Self::NoResults { params, .. } | Self::TooManyResults { params, .. } => Some(params),
            _ => None,
        }
    }

    /// API key attached to `LimitReached` and `InvalidApiKey`.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Self::LimitReached { api_key } | Self::InvalidApiKey { api_key } => {
                Some(api_key.as_str())
            }
            _ => None,
        }
    }
}

/// Result alias using [`OmdbError`].
pub type Result<T> = std::result::Result<T, OmdbError>;
