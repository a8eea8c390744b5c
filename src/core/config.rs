use super::error::{Error, Result};
use crate::index::model::ScreenshotRule;
use crate::search::matcher::MatchOptions;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default location of the index document, relative to the site root
pub const DEFAULT_INDEX_PATH: &str = "docs/find/index.json";

/// Number of hits shown by default
pub const DEFAULT_LIMIT: usize = 6;

/// Quiescence window before a typed query is ranked
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Timeout for fetching a remote index
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the index document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    Url(Url),
    File(PathBuf),
}

impl IndexSource {
    /// Interpret `raw` as an http(s) URL when possible, otherwise as a file path
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => IndexSource::Url(url),
            _ => IndexSource::File(PathBuf::from(raw)),
        }
    }
}

impl Default for IndexSource {
    fn default() -> Self {
        IndexSource::File(PathBuf::from(DEFAULT_INDEX_PATH))
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSource::Url(url) => write!(f, "{}", url),
            IndexSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Configuration for dsfind
#[derive(Debug, Clone)]
pub struct Config {
    /// Index document location
    pub source: IndexSource,
    /// Maximum number of hits rendered
    pub limit: usize,
    /// HTTP request timeout for remote sources
    pub timeout: Duration,
    /// Debounce window used by the interactive search box
    pub debounce: Duration,
    /// Matching policy handed to the ranker
    pub match_options: MatchOptions,
    /// Image assignment rules applied after loading
    pub screenshots: Vec<ScreenshotRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: IndexSource::default(),
            limit: DEFAULT_LIMIT,
            timeout: DEFAULT_TIMEOUT,
            debounce: DEFAULT_DEBOUNCE,
            match_options: MatchOptions::default(),
            screenshots: ScreenshotRule::defaults(),
        }
    }
}

impl Config {
    /// Create a configuration reading the index from `source`
    pub fn new(source: Option<&str>) -> Self {
        Self {
            source: source.map(IndexSource::parse).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Reject settings the adapters cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::Config("limit must be at least 1".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be non-zero".to_string()));
        }
        if self.debounce.is_zero() {
            return Err(Error::Config("debounce window must be non-zero".to_string()));
        }
        Ok(())
    }
}
