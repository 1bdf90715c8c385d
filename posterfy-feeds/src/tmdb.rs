//! TMDB movie list extraction and query construction

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use posterfy_core::{Category, MovieRecord, Platform};

use crate::error::FeedError;

/// Default TMDB v3 API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Image host prefix for w780 posters
pub const TMDB_IMAGE_PREFIX: &str = "https://image.tmdb.org/t/p/w780";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One entry of a TMDB `results` list (fields we read)
#[derive(Debug, Deserialize)]
struct TmdbResult {
    adult: bool,
    video: bool,
    original_language: String,
    release_date: String,
    #[serde(default)]
    poster_path: Option<String>,
    title: String,
}

impl TmdbResult {
    fn is_listable(&self) -> bool {
        !self.adult && !self.video && self.original_language == "en" && self.poster_path.is_some()
    }
}

/// Extract movie records from a TMDB list payload.
///
/// Items must be non-adult, non-video, English-language and have a poster.
/// When the payload carries `dates.minimum`, only items released strictly
/// after it are kept; without it no date bound applies. Malformed items are
/// skipped; a payload without a `results` list is an error.
pub fn extract_json(
    payload: &Value,
    platform: Platform,
    category: Category,
) -> Result<Vec<MovieRecord>, FeedError> {
    let min_date = minimum_date(payload)?;

    let results = payload
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::Schema("payload has no results list".to_string()))?;

    let mut movies = Vec::new();

    for (index, raw) in results.iter().enumerate() {
        let item = match TmdbResult::deserialize(raw) {
            Ok(item) => item,
            Err(e) => {
                warn!("Skipping malformed {} result #{}: {}", platform, index, e);
                continue;
            }
        };

        if !item.is_listable() {
            continue;
        }

        let release_date = match NaiveDate::parse_from_str(&item.release_date, DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                warn!(
                    "Skipping {} result '{}' with bad release date '{}': {}",
                    platform, item.title, item.release_date, e
                );
                continue;
            }
        };

        if min_date.is_some_and(|min| release_date <= min) {
            continue;
        }

        let Some(poster_path) = item.poster_path else {
            continue;
        };

        movies.push(MovieRecord::new(
            platform,
            category,
            item.title,
            Some(item.release_date),
            format!("{}{}", TMDB_IMAGE_PREFIX, poster_path),
        ));
    }

    debug!(
        "Extracted {} of {} {}/{} results",
        movies.len(),
        results.len(),
        platform,
        category
    );
    Ok(movies)
}

/// Lower release-date bound from `dates.minimum`, if the payload has one
fn minimum_date(payload: &Value) -> Result<Option<NaiveDate>, FeedError> {
    let minimum = match payload.get("dates").and_then(|dates| dates.get("minimum")) {
        None | Some(Value::Null) => return Ok(None),
        Some(minimum) => minimum,
    };

    let raw = minimum
        .as_str()
        .ok_or_else(|| FeedError::Schema(format!("dates.minimum is not a string: {}", minimum)))?;

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| FeedError::Schema(format!("dates.minimum '{}' is not a date: {}", raw, e)))
}

/// `movie/upcoming` list URL
pub fn upcoming_url(base_url: &Url, api_key: &str) -> Result<String, FeedError> {
    movie_list_url(base_url, "movie/upcoming", api_key)
}

/// `movie/now_playing` list URL
pub fn now_playing_url(base_url: &Url, api_key: &str) -> Result<String, FeedError> {
    movie_list_url(base_url, "movie/now_playing", api_key)
}

fn movie_list_url(base_url: &Url, path: &str, api_key: &str) -> Result<String, FeedError> {
    build_url(
        base_url,
        path,
        &[("api_key", api_key), ("language", "en-US"), ("page", "1")],
    )
}

/// Discover query for recent flat-rate releases on one watch provider
pub fn streaming_url(
    base_url: &Url,
    api_key: &str,
    provider_id: u32,
    released_since: NaiveDate,
) -> Result<String, FeedError> {
    let provider = provider_id.to_string();
    let since = released_since.format(DATE_FORMAT).to_string();

    build_url(
        base_url,
        "discover/movie",
        &[
            ("api_key", api_key),
            ("language", "en-US"),
            ("sort_by", "popularity.asc"),
            ("include_adult", "false"),
            ("include_video", "false"),
            ("page", "1"),
            ("primary_release_date.gte", &since),
            ("with_original_language", "en"),
            ("with_watch_providers", &provider),
            ("watch_region", "US"),
            ("with_watch_monetization_types", "flatrate"),
        ],
    )
}

fn build_url(base_url: &Url, path: &str, params: &[(&str, &str)]) -> Result<String, FeedError> {
    let endpoint = format!("{}/{}", base_url.as_str().trim_end_matches('/'), path);
    Url::parse_with_params(&endpoint, params)
        .map(String::from)
        .map_err(|e| FeedError::InvalidConfig(format!("bad TMDB url {}: {}", endpoint, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(title: &str, release_date: &str) -> Value {
        json!({
            "adult": false,
            "video": false,
            "original_language": "en",
            "poster_path": format!("/{}.jpg", title),
            "title": title,
            "release_date": release_date
        })
    }

    #[test]
    fn test_in_theaters_scenario() {
        let payload = json!({
            "dates": {"minimum": "2024-01-01"},
            "results": [{
                "adult": false,
                "video": false,
                "original_language": "en",
                "poster_path": "/a.jpg",
                "title": "X",
                "release_date": "2024-02-01"
            }]
        });

        let movies = extract_json(&payload, Platform::Tmdb, Category::InTheaters).unwrap();
        assert_eq!(
            movies,
            vec![MovieRecord::new(
                Platform::Tmdb,
                Category::InTheaters,
                "X",
                Some("2024-02-01".to_string()),
                "https://image.tmdb.org/t/p/w780/a.jpg",
            )]
        );
    }

    #[test]
    fn test_excluded_items() {
        let mut adult = item("adult", "2024-02-01");
        adult["adult"] = json!(true);
        let mut video = item("video", "2024-02-01");
        video["video"] = json!(true);
        let mut french = item("french", "2024-02-01");
        french["original_language"] = json!("fr");
        let mut no_poster = item("noposter", "2024-02-01");
        no_poster["poster_path"] = Value::Null;

        let payload = json!({
            "results": [adult, video, french, no_poster, item("kept", "2024-02-01")]
        });

        let movies = extract_json(&payload, Platform::Tmdb, Category::ComingSoon).unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["kept"]);
    }

    #[test]
    fn test_minimum_date_is_strict() {
        let payload = json!({
            "dates": {"minimum": "2024-01-01", "maximum": "2024-03-01"},
            "results": [
                item("before", "2023-12-31"),
                item("on", "2024-01-01"),
                item("after", "2024-01-02")
            ]
        });

        let movies = extract_json(&payload, Platform::Tmdb, Category::InTheaters).unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["after"]);
    }

    #[test]
    fn test_missing_dates_means_no_lower_bound() {
        let payload = json!({
            "results": [item("old", "1999-01-01"), item("new", "2030-01-01")]
        });

        let movies = extract_json(&payload, Platform::Netflix, Category::Streaming).unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["old", "new"]);
        assert!(movies.iter().all(|m| m.platform == Platform::Netflix));
    }

    #[test]
    fn test_dates_without_minimum_means_no_lower_bound() {
        let payload = json!({
            "dates": {"maximum": "2024-03-01"},
            "results": [item("old", "1999-01-01")]
        });

        let movies = extract_json(&payload, Platform::Tmdb, Category::ComingSoon).unwrap();
        assert_eq!(movies.len(), 1);
    }

    #[test]
    fn test_malformed_item_is_skipped() {
        let payload = json!({
            "results": [
                {"adult": false, "video": false, "original_language": "en", "poster_path": "/b.jpg"},
                item("bad-date", "soon"),
                item("good", "2024-02-01")
            ]
        });

        let movies = extract_json(&payload, Platform::Prime, Category::Streaming).unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["good"]);
    }

    #[test]
    fn test_missing_results_is_schema_error() {
        let err = extract_json(&json!({"page": 1}), Platform::Tmdb, Category::ComingSoon).unwrap_err();
        assert!(matches!(err, FeedError::Schema(_)));

        let err = extract_json(&json!({"results": "nope"}), Platform::Tmdb, Category::ComingSoon)
            .unwrap_err();
        assert!(matches!(err, FeedError::Schema(_)));
    }

    #[test]
    fn test_invalid_minimum_is_schema_error() {
        let payload = json!({"dates": {"minimum": "yesterday"}, "results": []});
        let err = extract_json(&payload, Platform::Tmdb, Category::InTheaters).unwrap_err();
        assert!(matches!(err, FeedError::Schema(_)));
    }

    #[test]
    fn test_list_urls() {
        let base = Url::parse("https://api.themoviedb.org/3").unwrap();
        assert_eq!(
            upcoming_url(&base, "KEY").unwrap(),
            "https://api.themoviedb.org/3/movie/upcoming?api_key=KEY&language=en-US&page=1"
        );
        assert_eq!(
            now_playing_url(&base, "KEY").unwrap(),
            "https://api.themoviedb.org/3/movie/now_playing?api_key=KEY&language=en-US&page=1"
        );
    }

    #[test]
    fn test_streaming_url() {
        let base = Url::parse("https://api.themoviedb.org/3/").unwrap();
        let since = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            streaming_url(&base, "KEY", 384, since).unwrap(),
            "https://api.themoviedb.org/3/discover/movie?api_key=KEY&language=en-US\
             &sort_by=popularity.asc&include_adult=false&include_video=false&page=1\
             &primary_release_date.gte=2024-02-29&with_original_language=en\
             &with_watch_providers=384&watch_region=US&with_watch_monetization_types=flatrate"
        );
    }
}
