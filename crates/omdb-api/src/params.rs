//! OMDb API request parameter types.

use std::fmt;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// String value.
    Text(String),
    /// Integer value.
    Int(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// Ordered query parameter mapping.
///
/// Keys keep their first insertion position; inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Overlays `other` on top of `self`; entries from `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Renders entries as `reqwest` query pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&str, String)> {
        self.iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                ParamValue::Text(s) => write!(f, "'{key}': '{s}'")?,
                ParamValue::Int(n) => write!(f, "'{key}': {n}")?,
            }
        }
        f.write_str("}")
    }
}

/// Parameters for a title search (`s=`).
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search query (required).
    pub query: String,
    /// Fetch every page (default: `true`). When set, `page` is ignored.
    pub pull_all: bool,
    /// Page to fetch when `pull_all` is `false` (default: 1).
    pub page: u32,
    /// Extension parameters; override built-ins on collision.
    pub extra: QueryParams,
}

impl SearchParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            pull_all: true,
            page: 1,
            extra: QueryParams::new(),
        }
    }

    /// Sets whether every result page is fetched.
    #[must_use]
    pub const fn pull_all(mut self, pull_all: bool) -> Self {
        self.pull_all = pull_all;
        self
    }

    /// Sets the single page to fetch.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the extension parameters.
    #[must_use]
    pub fn extra(mut self, extra: QueryParams) -> Self {
        self.extra = extra;
        self
    }
}

/// Parameters for a lookup by title (`t=`) or IMDb id (`i=`).
#[derive(Debug, Clone, Default)]
pub struct GetParams {
    /// Title selector.
    pub title: Option<String>,
    /// IMDb id selector; takes priority over `title`.
    pub imdbid: Option<String>,
    /// Extension parameters; override built-ins on collision.
    pub extra: QueryParams,
}

impl GetParams {
    /// Creates empty lookup params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title selector.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the IMDb id selector.
    #[must_use]
    pub fn imdbid(mut self, imdbid: impl Into<String>) -> Self {
        self.imdbid = Some(imdbid.into());
        self
    }

    /// Sets the extension parameters.
    #[must_use]
    pub fn extra(mut self, extra: QueryParams) -> Self {
        self.extra = extra;
        self
    }

    /// Same selector, no extension parameters.
    #[must_use]
    pub(crate) fn selector_only(&self) -> Self {
        Self {
            title: self.title.clone(),
            imdbid: self.imdbid.clone(),
            extra: QueryParams::new(),
        }
    }

    /// Adds `apikey` and the selector (`i` preferred over `t`).
    ///
    /// Empty strings count as absent.
    pub(crate) fn selector_params(&self, api_key: &str) -> Option<QueryParams> {
        let mut params = QueryParams::new().with("apikey", api_key);
        let non_empty = |s: &&String| !s.is_empty();
        if let Some(imdbid) = self.imdbid.as_ref().filter(non_empty) {
            params.insert("i", imdbid);
        } else if let Some(title) = self.title.as_ref().filter(non_empty) {
            params.insert("t", title);
        } else {
            return None;
        }
        Some(params)
    }
}

/// Parameters for an episode lookup.
///
/// `None` is the only "absent" value: `Some(0)` is sent to the API.
#[derive(Debug, Clone, Default)]
pub struct EpisodeParams {
    /// Series selector and extension parameters.
    pub series: GetParams,
    /// Season number filter.
    pub season: Option<u32>,
    /// Episode number filter.
    pub episode: Option<u32>,
}

impl EpisodeParams {
    /// Creates episode params for the given series.
    #[must_use]
    pub const fn new(series: GetParams) -> Self {
        Self {
            series,
            season: None,
            episode: None,
        }
    }

    /// Sets the season filter.
    #[must_use]
    pub const fn season(mut self, season: u32) -> Self {
        self.season = Some(season);
        self
    }

    /// Sets the episode filter.
    #[must_use]
    pub const fn episode(mut self, episode: u32) -> Self {
        self.episode = Some(episode);
        self
    }
}
