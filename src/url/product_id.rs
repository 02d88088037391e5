use percent_encoding::percent_decode_str;
use sha2::{Digest, Sha256};
use url::Url;

/// Length of the hex digest used for URLs without path segments
const FALLBACK_ID_LEN: usize = 16;

/// Derives a stable product identifier from a product URL
///
/// The last non-empty path segment is used, with every character outside
/// `[A-Za-z0-9_-]` replaced by `_`. A URL with no path segments falls back
/// to a truncated SHA-256 of the full URL string. The fallback is not
/// human-readable and collisions between different URLs are possible.
///
/// # Example
///
/// ```
/// use shelf_scout::url::product_id;
///
/// assert_eq!(product_id("https://shop.example.com/p/titan-watch-123"), "titan-watch-123");
/// ```
pub fn product_id(url: &str) -> String {
    match last_path_segment(url) {
        Some(segment) => sanitize(&segment),
        None => hashed_id(url),
    }
}

fn last_path_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()?;

    // Percent-encoded characters (e.g. spaces) are judged by what they encode
    Some(percent_decode_str(segment).decode_utf8_lossy().into_owned())
}

fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn hashed_id(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..FALLBACK_ID_LEN].to_string()
}
