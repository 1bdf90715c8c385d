//! Fandango RSS extraction

use tracing::{debug, warn};

use posterfy_core::{Category, MovieRecord, Platform};

use crate::error::FeedError;
use crate::image::normalize_image_url;

/// Movies opening soon
pub const COMING_SOON_FEED_URL: &str = "https://www.fandango.com/rss/comingsoonmovies.rss";

/// Movies newly in theaters
pub const NEW_RELEASES_FEED_URL: &str = "https://www.fandango.com/rss/newmovies.rss";

/// Extract movie records from a Fandango RSS document.
///
/// Each `<item>` contributes its title and the enclosure URL (normalized to
/// the canonical poster size). RSS carries no release date. A document that
/// does not parse is an error; items missing a title or enclosure are skipped.
pub fn extract_rss(
    raw_xml: &str,
    platform: Platform,
    category: Category,
) -> Result<Vec<MovieRecord>, FeedError> {
    let channel = rss::Channel::read_from(raw_xml.as_bytes())
        .map_err(|e| FeedError::Decode(format!("invalid RSS document: {}", e)))?;

    let movies: Vec<MovieRecord> = channel
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let Some(title) = item.title() else {
                warn!("Skipping {} item #{} without a title", platform, index);
                return None;
            };

            let poster = match item.enclosure().map(|e| e.url()) {
                Some(url) if !url.is_empty() => normalize_image_url(url),
                _ => {
                    warn!("Skipping {} item '{}' without a poster enclosure", platform, title);
                    return None;
                }
            };

            Some(MovieRecord::new(platform, category, title, None, poster))
        })
        .collect();

    debug!(
        "Extracted {} of {} {}/{} items",
        movies.len(),
        channel.items().len(),
        platform,
        category
    );
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Fandango Coming Soon</title>
    <link>https://www.fandango.com</link>
    <description>Movies coming soon</description>
    <item>
      <title>First Movie</title>
      <link>https://www.fandango.com/first-movie</link>
      <enclosure url="https://images.fandango.com/r1.0.1/ImageRenderer/200/250/images/first.jpg" length="0" type="image/jpeg"/>
    </item>
    <item>
      <title>Second Movie</title>
      <enclosure url="https://example.com/second.jpg" length="0" type="image/jpeg"/>
    </item>
    <item>
      <title>No Poster</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_extracts_items_in_order() {
        let movies = extract_rss(FEED, Platform::Fandango, Category::ComingSoon).unwrap();

        assert_eq!(
            movies,
            vec![
                MovieRecord::new(
                    Platform::Fandango,
                    Category::ComingSoon,
                    "First Movie",
                    None,
                    "https://images.fandango.com/r1.0.1/ImageRenderer/500/1000/images/first.jpg",
                ),
                MovieRecord::new(
                    Platform::Fandango,
                    Category::ComingSoon,
                    "Second Movie",
                    None,
                    "https://example.com/second.jpg",
                ),
            ]
        );
    }

    #[test]
    fn test_records_never_carry_release_date() {
        let movies = extract_rss(FEED, Platform::Fandango, Category::InTheaters).unwrap();
        assert!(movies.iter().all(|m| m.release_date.is_none()));
        assert!(movies.iter().all(|m| m.platform == Platform::Fandango));
    }

    #[test]
    fn test_empty_channel() {
        let xml = r#"<rss version="2.0"><channel><title>t</title><link>l</link><description>d</description></channel></rss>"#;
        let movies = extract_rss(xml, Platform::Fandango, Category::InTheaters).unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn test_malformed_document_is_decode_error() {
        let err = extract_rss("this is not rss", Platform::Fandango, Category::ComingSoon)
            .unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }
}
