//! Feed descriptors and per-service feed plans

use chrono::{Months, NaiveDate};

use posterfy_core::{Category, MovieRecord, Platform};

use crate::config::{FeedSource, PosterfyConfig};
use crate::error::FeedError;
use crate::fetcher::{PayloadFormat, RawPayload};
use crate::{fandango, tmdb};

/// Streaming platforms polled through TMDB discover, in feed order.
/// Disney+ (provider 337) is left out: its discover data is unreliable.
const STREAMING_PLATFORMS: [Platform; 3] = [Platform::Netflix, Platform::Prime, Platform::HboMax];

/// Parser used for a feed's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    TmdbJson,
    FandangoRss,
}

impl ExtractorKind {
    /// Body encoding the fetcher should decode
    pub fn payload_format(&self) -> PayloadFormat {
        match self {
            ExtractorKind::TmdbJson => PayloadFormat::Json,
            ExtractorKind::FandangoRss => PayloadFormat::Xml,
        }
    }

    /// Run the matching extractor over a fetched payload
    pub fn extract(
        &self,
        payload: &RawPayload,
        platform: Platform,
        category: Category,
    ) -> Result<Vec<MovieRecord>, FeedError> {
        match (self, payload) {
            (ExtractorKind::TmdbJson, RawPayload::Json(value)) => {
                tmdb::extract_json(value, platform, category)
            }
            (ExtractorKind::FandangoRss, RawPayload::Xml(xml)) => {
                fandango::extract_rss(xml, platform, category)
            }
            (kind, _) => Err(FeedError::Decode(format!(
                "{:?} extractor received a {:?} payload",
                kind,
                payload_format_of(payload)
            ))),
        }
    }
}

fn payload_format_of(payload: &RawPayload) -> PayloadFormat {
    match payload {
        RawPayload::Json(_) => PayloadFormat::Json,
        RawPayload::Xml(_) => PayloadFormat::Xml,
    }
}

/// One upstream feed for a refresh cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDescriptor {
    pub platform: Platform,
    pub category: Category,
    pub url: String,
    pub kind: ExtractorKind,
}

impl FeedDescriptor {
    pub fn new(platform: Platform, category: Category, url: impl Into<String>, kind: ExtractorKind) -> Self {
        Self {
            platform,
            category,
            url: url.into(),
            kind,
        }
    }
}

/// Ordered feeds to poll for a cycle running on `today`.
///
/// Streaming queries only cover releases from one calendar month before
/// `today`, so the plan is rebuilt every cycle.
pub fn feed_plan(config: &PosterfyConfig, today: NaiveDate) -> Result<Vec<FeedDescriptor>, FeedError> {
    match &config.source {
        FeedSource::Tmdb { base_url, api_key } => {
            let released_since = today.checked_sub_months(Months::new(1)).unwrap_or(NaiveDate::MIN);

            let mut feeds = vec![
                FeedDescriptor::new(
                    Platform::Tmdb,
                    Category::ComingSoon,
                    tmdb::upcoming_url(base_url, api_key)?,
                    ExtractorKind::TmdbJson,
                ),
                FeedDescriptor::new(
                    Platform::Tmdb,
                    Category::InTheaters,
                    tmdb::now_playing_url(base_url, api_key)?,
                    ExtractorKind::TmdbJson,
                ),
            ];

            for platform in STREAMING_PLATFORMS {
                let Some(provider_id) = platform.watch_provider_id() else {
                    continue;
                };
                feeds.push(FeedDescriptor::new(
                    platform,
                    Category::Streaming,
                    tmdb::streaming_url(base_url, api_key, provider_id, released_since)?,
                    ExtractorKind::TmdbJson,
                ));
            }

            Ok(feeds)
        }
        FeedSource::Fandango => Ok(vec![
            FeedDescriptor::new(
                Platform::Fandango,
                Category::ComingSoon,
                fandango::COMING_SOON_FEED_URL,
                ExtractorKind::FandangoRss,
            ),
            FeedDescriptor::new(
                Platform::Fandango,
                Category::InTheaters,
                fandango::NEW_RELEASES_FEED_URL,
                ExtractorKind::FandangoRss,
            ),
        ]),
    }
}
