//! Poster image URL normalization

use std::sync::LazyLock;

use regex::Regex;

/// Canonical poster width requested from the Fandango image renderer
pub const CANONICAL_WIDTH: u32 = 500;
/// Canonical poster height requested from the Fandango image renderer
pub const CANONICAL_HEIGHT: u32 = 1000;

/// `<prefix>/<version>/ImageRenderer/<width>/<height><suffix>`
static IMAGE_RENDERER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https://images\.fandango\.com)/([^/]+)/ImageRenderer/(\d+)/(\d+)(/.*)$")
        .expect("image renderer regex should compile")
});

/// Rewrite a templated image-renderer URL to the canonical poster size.
///
/// URLs that do not match the renderer template are returned unchanged.
pub fn normalize_image_url(url: &str) -> String {
    match IMAGE_RENDERER_PATTERN.captures(url) {
        Some(caps) => format!(
            "{}/{}/ImageRenderer/{}/{}{}",
            &caps[1], &caps[2], CANONICAL_WIDTH, CANONICAL_HEIGHT, &caps[5]
        ),
        None => url.to_string(),
    }
}
