use crate::config::types::{
    HttpConfig, PaginationConfig, PaginationType, RateLimitConfig, SiteConfig,
};
use crate::extract::SelectorSpec;
use crate::{ConfigError, ConfigResult};
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &SiteConfig) -> ConfigResult<()> {
    validate_identity(config)?;
    validate_start_urls(&config.start_urls)?;
    validate_selectors(config)?;
    validate_pagination(&config.pagination)?;
    validate_rate_limit(&config.rate_limit)?;
    validate_http(&config.http)?;
    Ok(())
}

fn validate_identity(config: &SiteConfig) -> ConfigResult<()> {
    if config.site_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "site_name cannot be empty".to_string(),
        ));
    }

    if config.category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "category cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Start URLs must be absolute http(s) URLs
fn validate_start_urls(start_urls: &[String]) -> ConfigResult<()> {
    if start_urls.is_empty() {
        return Err(ConfigError::Validation(
            "start_urls must contain at least one URL".to_string(),
        ));
    }

    for start_url in start_urls {
        let url = Url::parse(start_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid start URL '{}': {}", start_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Start URL '{}' must use HTTP or HTTPS",
                start_url
            )));
        }
    }

    Ok(())
}

/// The listing selector is mandatory; a detail selector whose CSS does not
/// parse only disables its own field, so it is reported and tolerated.
fn validate_selectors(config: &SiteConfig) -> ConfigResult<()> {
    let product_links = config.selectors.listing.product_links.trim();
    if product_links.is_empty() {
        return Err(ConfigError::Validation(
            "selectors.listing.product_links cannot be empty".to_string(),
        ));
    }

    let listing = SelectorSpec::parse(product_links);
    if !listing.is_valid() {
        tracing::warn!(
            "Listing selector '{}' does not parse; no product links will be found",
            listing.raw()
        );
    }

    for (field, selector) in config.selectors.detail.entries() {
        let spec = SelectorSpec::parse(selector);
        if !spec.is_valid() {
            tracing::warn!(
                "Selector for '{}' does not parse and will never match: '{}'",
                field,
                spec.raw()
            );
        }
    }

    Ok(())
}

fn validate_pagination(config: &PaginationConfig) -> ConfigResult<()> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "pagination.max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.kind == PaginationType::Unsupported {
        tracing::warn!("Unsupported pagination type; only start URLs will be fetched");
    }

    if config.kind == PaginationType::UrlParam && config.param_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "pagination.param_name cannot be empty for url_param pagination".to_string(),
        ));
    }

    Ok(())
}

fn validate_rate_limit(config: &RateLimitConfig) -> ConfigResult<()> {
    let delay = config.delay_between_pages;
    if !delay.is_finite() || delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "rate_limit.delay_between_pages must be a non-negative number of seconds, got {}",
            delay
        )));
    }

    if Duration::try_from_secs_f64(delay).is_err() {
        return Err(ConfigError::Validation(format!(
            "rate_limit.delay_between_pages is too large: {}",
            delay
        )));
    }

    Ok(())
}

fn validate_http(config: &HttpConfig) -> ConfigResult<()> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "http.timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "http.user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
