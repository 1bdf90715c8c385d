//! Service configuration
//!
//! The service string is validated once into a [`FeedSource`]; nothing
//! downstream compares configuration strings again.

use std::time::Duration;

use url::Url;

use crate::tmdb::DEFAULT_BASE_URL;

/// Refresh cadence when none is configured
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(120 * 60);

const DEFAULT_NAME: &str = "posterfy";

/// Selectable upstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Tmdb,
    Fandango,
}

impl std::str::FromStr for ServiceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tmdb" => Ok(ServiceKind::Tmdb),
            "fandango" => Ok(ServiceKind::Fandango),
            other => Err(ConfigError::UnknownService(other.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKind::Tmdb => f.write_str("tmdb"),
            ServiceKind::Fandango => f.write_str("fandango"),
        }
    }
}

/// Validated upstream settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// TMDB JSON API
    Tmdb {
        /// API root, e.g. `https://api.themoviedb.org/3`
        base_url: Url,
        /// v3 API key
        api_key: String,
    },
    /// Fandango RSS feeds (fixed URLs)
    Fandango,
}

impl FeedSource {
    pub fn kind(&self) -> ServiceKind {
        match self {
            FeedSource::Tmdb { .. } => ServiceKind::Tmdb,
            FeedSource::Fandango => ServiceKind::Fandango,
        }
    }
}

/// Configuration for a Posterfy instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterfyConfig {
    /// Instance name, reported alongside the snapshot
    pub name: String,
    /// Upstream feeds to poll
    pub source: FeedSource,
    /// Time between refresh cycles
    pub scan_interval: Duration,
}

impl PosterfyConfig {
    /// TMDB configuration with default name and interval
    pub fn tmdb(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            source: FeedSource::Tmdb {
                base_url,
                api_key: api_key.into(),
            },
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Fandango configuration with default name and interval
    pub fn fandango() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            source: FeedSource::Fandango,
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - POSTERFY_NAME: instance name (default "posterfy")
    /// - POSTERFY_SERVICE: "tmdb" (default) or "fandango"
    /// - TMDB_API_KEY: required for the tmdb service
    /// - TMDB_BASE_URL: API root (default https://api.themoviedb.org/3)
    /// - POSTERFY_SCAN_INTERVAL_MINS: refresh interval (default 120)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = lookup("POSTERFY_NAME")
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let kind = match lookup("POSTERFY_SERVICE") {
            Some(service) => service.parse::<ServiceKind>()?,
            None => ServiceKind::Tmdb,
        };

        let source = match kind {
            ServiceKind::Tmdb => {
                let api_key = lookup("TMDB_API_KEY")
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ConfigError::MissingVar("TMDB_API_KEY"))?;
                let raw_url = lookup("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                FeedSource::Tmdb {
                    base_url: parse_base_url(&raw_url)?,
                    api_key,
                }
            }
            ServiceKind::Fandango => FeedSource::Fandango,
        };

        let scan_interval = match lookup("POSTERFY_SCAN_INTERVAL_MINS") {
            Some(raw) => {
                let minutes: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    field: "POSTERFY_SCAN_INTERVAL_MINS",
                    error: format!("'{}' is not a whole number of minutes", raw),
                })?;
                if minutes == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "POSTERFY_SCAN_INTERVAL_MINS",
                        error: "interval must be positive".to_string(),
                    });
                }
                let secs = minutes.checked_mul(60).ok_or_else(|| ConfigError::InvalidValue {
                    field: "POSTERFY_SCAN_INTERVAL_MINS",
                    error: format!("{} minutes is too long an interval", minutes),
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_SCAN_INTERVAL,
        };

        Ok(Self {
            name,
            source,
            scan_interval,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field: "TMDB_BASE_URL",
        error: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidValue {
            field: "TMDB_BASE_URL",
            error: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Unknown service type '{0}' (expected tmdb or fandango)")]
    UnknownService(String),

    #[error("Invalid value for {field}: {error}")]
    InvalidValue { field: &'static str, error: String },
}
