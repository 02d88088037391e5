use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Site description driving a single scrape run
///
/// Built from a [`RawSiteConfig`] once the required fields have been
/// checked, so a `SiteConfig` value always carries all of them.
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    /// Human-readable name of the site being scraped
    pub site_name: String,

    /// Category stamped onto every extracted product
    pub category: String,

    /// Listing pages to start discovery from, in order
    pub start_urls: Vec<String>,

    pub selectors: SelectorsConfig,

    pub pagination: PaginationConfig,

    pub rate_limit: RateLimitConfig,

    pub extraction: ExtractionConfig,

    pub error_handling: ErrorHandlingConfig,

    pub http: HttpConfig,
}

/// Configuration document as written on disk
#[derive(Debug, Clone, Deserialize)]
pub struct RawSiteConfig {
    pub site_name: Option<String>,
    pub category: Option<String>,
    pub start_urls: Option<Vec<String>>,
    pub selectors: Option<SelectorsConfig>,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub error_handling: ErrorHandlingConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl TryFrom<RawSiteConfig> for SiteConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSiteConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            site_name: raw.site_name.ok_or(ConfigError::MissingField("site_name"))?,
            category: raw.category.ok_or(ConfigError::MissingField("category"))?,
            start_urls: raw
                .start_urls
                .ok_or(ConfigError::MissingField("start_urls"))?,
            selectors: raw.selectors.ok_or(ConfigError::MissingField("selectors"))?,
            pagination: raw.pagination,
            rate_limit: raw.rate_limit,
            extraction: raw.extraction,
            error_handling: raw.error_handling,
            http: raw.http,
        })
    }
}

/// Selectors for both crawl phases
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectorsConfig {
    pub listing: ListingSelectors,

    #[serde(default)]
    pub detail: SelectorSchema,
}

/// Selectors applied to listing pages
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingSelectors {
    /// Matches the links to product detail pages
    ///
    /// A plain CSS selector reads each element's `href`; `css::attr(name)`
    /// reads the named attribute instead.
    pub product_links: String,
}

/// Named selectors applied to a product detail page
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SelectorSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Attribute name -> selector
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Multi-valued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Multi-valued, only used when `extraction.extract_all_images` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls_all: Option<String>,
}

impl SelectorSchema {
    /// Returns every selector in the schema paired with its field name
    pub fn entries(&self) -> Vec<(String, &str)> {
        let scalars = [
            ("name", &self.name),
            ("description", &self.description),
            ("brand", &self.brand),
            ("sub_category", &self.sub_category),
            ("price", &self.price),
            ("currency", &self.currency),
            ("features", &self.features),
            ("image_url", &self.image_url),
            ("image_urls_all", &self.image_urls_all),
        ];

        let mut entries: Vec<(String, &str)> = scalars
            .iter()
            .filter_map(|(field, sel)| sel.as_deref().map(|s| (field.to_string(), s)))
            .collect();

        for (attr, sel) in &self.attributes {
            entries.push((format!("attributes.{}", attr), sel.as_str()));
        }

        entries
    }
}

/// How listing pages follow on from a start URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationType {
    /// Page number carried in a query parameter
    UrlParam,
    /// Only the start URL itself is fetched
    None,
    /// Any other pagination style; treated like `None`
    #[serde(other)]
    Unsupported,
}

/// Pagination rule
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    #[serde(rename = "type", default = "default_pagination_type")]
    pub kind: PaginationType,

    #[serde(default = "default_param_name")]
    pub param_name: String,

    /// Highest page number that may be requested (the start URL is page 1)
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            kind: default_pagination_type(),
            param_name: default_param_name(),
            max_pages: default_max_pages(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Delay applied before each throttled network access, in seconds
    #[serde(default = "default_delay")]
    pub delay_between_pages: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            delay_between_pages: default_delay(),
        }
    }
}

/// Extraction policies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Collapse whitespace runs and trim scalar fields
    #[serde(default = "default_true")]
    pub clean_text: bool,

    /// Parse the price field into a number
    #[serde(default = "default_true")]
    pub parse_price: bool,

    /// Currency used when the page does not provide one
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Extract `image_urls_all` as well as `image_url`
    #[serde(default)]
    pub extract_all_images: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            clean_text: true,
            parse_price: true,
            default_currency: default_currency(),
            extract_all_images: false,
        }
    }
}

/// Per-page failure policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorHandlingConfig {
    /// Keep going after a detail page fails
    #[serde(default = "default_true")]
    pub skip_on_error: bool,

    /// Include the detailed error list in the result document
    #[serde(default = "default_true")]
    pub log_errors: bool,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            skip_on_error: true,
            log_errors: true,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total per-request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_pagination_type() -> PaginationType {
    PaginationType::UrlParam
}

fn default_param_name() -> String {
    String::from("page")
}

fn default_max_pages() -> u32 {
    10
}

fn default_delay() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    String::from("INR")
}

fn default_user_agent() -> String {
    String::from("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}
