//! Configuration module for Shelf-Scout
//!
//! This module handles loading, parsing, and validating site configuration
//! files. A configuration is read once per run and never changes afterwards.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("watches.yaml")).unwrap();
//! println!("Scraping {} start URLs", config.start_urls.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ErrorHandlingConfig, ExtractionConfig, HttpConfig, ListingSelectors, PaginationConfig,
    PaginationType, RateLimitConfig, RawSiteConfig, SelectorSchema, SelectorsConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config, ConfigFormat};
pub use validation::validate;

/// Small but complete configuration shared by unit tests
#[cfg(test)]
pub(crate) fn test_config() -> SiteConfig {
    use std::collections::BTreeMap;

    let mut attributes = BTreeMap::new();
    attributes.insert("strap".to_string(), "td.strap".to_string());

    SiteConfig {
        site_name: "Example Watches".to_string(),
        category: "watches".to_string(),
        start_urls: vec!["https://shop.example.com/watches".to_string()],
        selectors: SelectorsConfig {
            listing: ListingSelectors {
                product_links: "a.product".to_string(),
            },
            detail: SelectorSchema {
                name: Some("h1.title".to_string()),
                price: Some("span.price".to_string()),
                attributes,
                features: Some("ul.features li".to_string()),
                image_url: Some("img.main::attr(src)".to_string()),
                ..Default::default()
            },
        },
        pagination: PaginationConfig::default(),
        rate_limit: RateLimitConfig {
            delay_between_pages: 0.0,
        },
        extraction: ExtractionConfig::default(),
        error_handling: ErrorHandlingConfig::default(),
        http: HttpConfig::default(),
    }
}
