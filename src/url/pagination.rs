use crate::config::{PaginationConfig, PaginationType};
use url::Url;

/// Computes the listing URL for a given page number
///
/// Pages are always derived from the original start URL rather than the
/// previously fetched page, so query parameters never accumulate. The
/// start URL itself is page 1.
///
/// # Arguments
///
/// * `config` - The pagination rule
/// * `start_url` - The start URL the listing pages belong to
/// * `page_number` - The page to compute
///
/// # Returns
///
/// * `Some(String)` - The URL of the requested page
/// * `None` - Past `max_pages`, pagination disabled or of an unsupported
///   type, or an unparsable start URL
///
/// # Example
///
/// ```
/// use shelf_scout::config::PaginationConfig;
/// use shelf_scout::url::next_page_url;
///
/// let config = PaginationConfig::default();
/// assert_eq!(
///     next_page_url(&config, "https://shop.example.com/watches?sort=new", 2).as_deref(),
///     Some("https://shop.example.com/watches?sort=new&page=2")
/// );
/// ```
pub fn next_page_url(config: &PaginationConfig, start_url: &str, page_number: u32) -> Option<String> {
    if page_number > config.max_pages {
        return None;
    }

    match config.kind {
        PaginationType::UrlParam => with_page_param(start_url, &config.param_name, page_number),
        PaginationType::None | PaginationType::Unsupported => None,
    }
}

/// Sets `param_name` to `page_number` in the query, keeping every other
/// pair in place. An existing value is overwritten where it stands; repeats
/// of the parameter are dropped.
fn with_page_param(start_url: &str, param_name: &str, page_number: u32) -> Option<String> {
    let mut url = match Url::parse(start_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot paginate unparsable URL '{}': {}", start_url, e);
            return None;
        }
    };

    let page = page_number.to_string();
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (key, value) in url.query_pairs() {
        if key == param_name {
            if !replaced {
                pairs.push((key.into_owned(), page.clone()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }

    if !replaced {
        pairs.push((param_name.to_string(), page));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs.iter());

    Some(url.to_string())
}
