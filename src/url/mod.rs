//! URL handling module for Shelf-Scout
//!
//! This module provides link resolution, listing pagination, and product
//! identifier generation. Everything here is a pure function of its inputs.

mod pagination;
mod product_id;

pub use pagination::next_page_url;
pub use product_id::product_id;

use url::Url;

/// Resolves a listing-page link to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - empty and fragment-only hrefs
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// # Example
///
/// ```
/// use shelf_scout::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/watches?page=2").unwrap();
/// assert_eq!(
///     resolve_link(&base, "/p/titan-neo").as_deref(),
///     Some("https://shop.example.com/p/titan-neo")
/// );
/// assert_eq!(resolve_link(&base, "javascript:void(0)"), None);
/// ```
pub fn resolve_link(base_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(e) => {
            tracing::debug!("Skipping unresolvable link '{}': {}", href, e);
            None
        }
    }
}

/// Resolves an asset reference (such as an image `src`) against its page
///
/// Unlike [`resolve_link`] no scheme filtering is applied; only references
/// that cannot be joined at all are dropped.
pub fn resolve_asset(page_url: &Url, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    page_url.join(src).ok().map(|url| url.to_string())
}
