//! Normalized movie record shared by every feed

use serde::{Deserialize, Serialize};

use crate::{Category, Platform};

/// A movie entry produced by one of the upstream feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Originating service
    pub platform: Platform,
    /// Why the movie is listed
    pub category: Category,
    /// Display title
    pub title: String,
    /// ISO `YYYY-MM-DD` release date, copied verbatim from the source.
    /// RSS-sourced records never carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Absolute poster image URL
    pub poster: String,
}

impl MovieRecord {
    pub fn new(
        platform: Platform,
        category: Category,
        title: impl Into<String>,
        release_date: Option<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            category,
            title: title.into(),
            release_date,
            poster: poster.into(),
        }
    }
}
