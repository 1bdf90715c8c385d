//! Platform and category vocabulary for movie records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Services a movie record can originate from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// The Movie Database - theatrical listings
    #[serde(rename = "tmdb")]
    Tmdb,
    /// Netflix streaming catalogue (via TMDB discover)
    #[serde(rename = "netflix")]
    Netflix,
    /// Amazon Prime Video streaming catalogue (via TMDB discover)
    #[serde(rename = "prime")]
    Prime,
    /// HBO Max streaming catalogue (via TMDB discover)
    #[serde(rename = "hbomax")]
    HboMax,
    /// Fandango RSS feeds
    #[serde(rename = "Fandango")]
    Fandango,
}

impl Platform {
    /// Identifier as it appears in serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Tmdb => "tmdb",
            Platform::Netflix => "netflix",
            Platform::Prime => "prime",
            Platform::HboMax => "hbomax",
            Platform::Fandango => "Fandango",
        }
    }

    /// TMDB watch-provider id for streaming platforms
    pub fn watch_provider_id(&self) -> Option<u32> {
        match self {
            Platform::Netflix => Some(8),
            Platform::Prime => Some(9),
            Platform::HboMax => Some(384),
            Platform::Tmdb | Platform::Fandango => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a movie appears in the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ComingSoon,
    InTheaters,
    Streaming,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ComingSoon => "coming_soon",
            Category::InTheaters => "in_theaters",
            Category::Streaming => "streaming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
