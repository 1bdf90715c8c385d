//! Movie feed clients and normalization
//!
//! This crate turns upstream movie listings into uniform [`MovieRecord`]s:
//! - TMDB: JSON discover / movie list endpoints (theatrical and streaming)
//! - Fandango: RSS feeds for coming-soon and newly released movies
//!
//! [`MovieRecord`]: posterfy_core::MovieRecord

pub mod config;
pub mod error;
pub mod fandango;
pub mod feeds;
pub mod fetcher;
pub mod image;
pub mod tmdb;

pub use config::{ConfigError, FeedSource, PosterfyConfig, ServiceKind, DEFAULT_SCAN_INTERVAL};
pub use error::{FeedError, FeedErrorKind};
pub use fandango::extract_rss;
pub use feeds::{feed_plan, ExtractorKind, FeedDescriptor};
pub use fetcher::{Fetcher, HttpFetcher, PayloadFormat, RawPayload};
pub use image::normalize_image_url;
pub use tmdb::extract_json;
