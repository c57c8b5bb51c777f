//! `OmdbConfig` - validated client configuration and its loaders.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::error::{OmdbError, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// Per-request timeout in seconds (finite, strictly positive).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Timeout(f64);

impl Timeout {
    /// Parses any numeric-like value (`5`, `2.5`, `"10"`).
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidTimeout` if the value does not convert to a
    /// finite positive float.
    pub fn parse(value: impl Display) -> Result<Self> {
        let text = value.to_string();
        match text.trim().parse::<f64>() {
            Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(Self(secs)),
            _ => Err(OmdbError::InvalidTimeout(text)),
        }
    }

    /// Seconds as a float.
    #[must_use]
    pub const fn as_secs_f64(self) -> f64 {
        self.0
    }

    /// As a `Duration` for the transport.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::try_from_secs_f64(self.0).unwrap_or(Duration::MAX)
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_SECS)
    }
}

/// Client configuration.
///
/// Every setter re-validates; an invalid value leaves the previous one in place.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbConfig {
    api_key: String,
    timeout: Timeout,
    strict: bool,
}

impl OmdbConfig {
    /// Creates a config with the default timeout (5 s) and strict mode on.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidApiKey` if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let mut config = Self {
            api_key: String::new(),
            timeout: Timeout::default(),
            strict: true,
        };
        config.set_api_key(api_key)?;
        Ok(config)
    }

    /// API key sent as `apikey`.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sets the API key.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidApiKey` if `api_key` is empty or blank.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> Result<()> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OmdbError::InvalidApiKey { api_key });
        }
        self.api_key = api_key;
        Ok(())
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Timeout {
        self.timeout
    }

    /// Sets the request timeout from any numeric-like value.
    ///
    /// # Errors
    ///
    /// Returns `OmdbError::InvalidTimeout` if the value is not a positive float.
    pub fn set_timeout(&mut self, timeout: impl Display) -> Result<()> {
        self.timeout = Timeout::parse(timeout)?;
        Ok(())
    }

    /// Replaces the timeout with an already validated value.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether upstream failures become errors.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    /// Sets strict mode.
    pub const fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Loads config from a TOML file.
    ///
    /// ```toml
    /// api_key = "abcd1234"
    /// timeout = 10      # or "10"
    /// strict = false
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a value
    /// fails validation.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parses config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value fails validation.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let raw: ConfigFile = toml::from_str(content).context("invalid OMDb config TOML")?;
        let mut config = Self::new(raw.api_key)?;
        if let Some(timeout) = raw.timeout {
            config.set_timeout(timeout)?;
        }
        if let Some(strict) = raw.strict {
            config.set_strict(strict);
        }
        Ok(config)
    }

    /// Reads `OMDB_API_KEY` (required), `OMDB_TIMEOUT` and `OMDB_STRICT`.
    ///
    /// # Errors
    ///
    /// Returns an error if `OMDB_API_KEY` is unset or any value is invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key =
            std::env::var("OMDB_API_KEY").context("OMDB_API_KEY environment variable is required")?;
        let timeout = std::env::var("OMDB_TIMEOUT").ok();
        let strict = std::env::var("OMDB_STRICT").ok();
        Self::from_parts(api_key, timeout.as_deref(), strict.as_deref())
    }

    fn from_parts(
        api_key: String,
        timeout: Option<&str>,
        strict: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut config = Self::new(api_key)?;
        if let Some(timeout) = timeout {
            config.set_timeout(timeout)?;
        }
        if let Some(strict) = strict {
            config.set_strict(parse_bool(strict)?);
        }
        Ok(config)
    }
}

/// On-disk TOML shape.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    api_key: String,
    #[serde(default)]
    timeout: Option<TimeoutSetting>,
    #[serde(default)]
    strict: Option<bool>,
}

/// `timeout` may be written as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeoutSetting {
    Number(f64),
    Text(String),
}

impl Display for TimeoutSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean value for OMDB_STRICT: {other}"),
    }
}
