//! Scrape coordinator - main crawl orchestration logic
//!
//! This module drives a scrape run through its phases:
//! - Listing discovery: walk each start URL's listing pages and collect
//!   product links into the frontier until it is full or pagination ends
//! - Detail extraction: fetch each frontier URL once and extract a product
//! - Assembling the result bundle with products and per-URL failures

use crate::config::{validate, SiteConfig};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::CrawlFrontier;
use crate::crawler::limiter::RateLimiter;
use crate::extract::{FieldExtractor, SelectorSpec};
use crate::output::{ErrorSink, ProductRecord, ScrapeResult};
use crate::state::{CrawlPhase, ErrorPhase};
use crate::url::{next_page_url, product_id, resolve_link};
use crate::ScoutError;
use scraper::Html;
use url::Url;

/// Attribute read from listing links when the selector names none
const DEFAULT_LINK_ATTR: &str = "href";

/// Main scrape coordinator
///
/// Owns the fetcher, rate limiter and compiled selectors for one site. The
/// frontier and error sink live only for the duration of [`Coordinator::run`].
pub struct Coordinator<F: PageFetcher = HttpFetcher> {
    config: SiteConfig,
    fetcher: F,
    limiter: RateLimiter,
    listing_selector: SelectorSpec,
    extractor: FieldExtractor,
    phase: CrawlPhase,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The site configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScoutError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: SiteConfig) -> Result<Self, ScoutError> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator around any page fetcher
    ///
    /// The configuration is validated again here so a coordinator can never
    /// exist for an invalid site description.
    pub fn with_fetcher(config: SiteConfig, fetcher: F) -> Result<Self, ScoutError> {
        validate(&config)?;

        let listing_selector = SelectorSpec::parse_with_default_attr(
            &config.selectors.listing.product_links,
            DEFAULT_LINK_ATTR,
        );
        let extractor = FieldExtractor::new(&config.selectors.detail, &config.extraction);
        let limiter = RateLimiter::from_config(&config.rate_limit);

        Ok(Self {
            config,
            fetcher,
            limiter,
            listing_selector,
            extractor,
            phase: CrawlPhase::ConfigLoaded,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Number of rate-limit delays applied so far
    pub fn throttle_count(&self) -> usize {
        self.limiter.throttle_count()
    }

    /// Runs the scrape
    ///
    /// Per-URL failures are recorded in the result rather than returned. The
    /// only errors returned are phase-machine violations, such as running
    /// the same coordinator twice.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of detail pages to visit
    pub async fn run(&mut self, limit: usize) -> Result<ScrapeResult, ScoutError> {
        tracing::info!(
            "Starting scrape of {} ({})",
            self.config.site_name,
            self.config.category
        );
        tracing::info!("Target: {} products", limit);

        let mut frontier = CrawlFrontier::new();
        let mut errors = ErrorSink::new();

        self.advance(CrawlPhase::ListingDiscovery)?;
        self.discover_listings(&mut frontier, &mut errors, limit).await;

        self.advance(CrawlPhase::DetailExtraction)?;
        let urls = frontier.drain(limit);
        tracing::info!("Scraping {} product pages", urls.len());
        let products = self.extract_details(&urls, &mut errors).await;

        self.advance(CrawlPhase::Done)?;
        tracing::info!("Scraping complete! Collected {} products", products.len());
        if !errors.is_empty() {
            tracing::warn!("Encountered {} errors during scraping", errors.len());
        }

        Ok(ScrapeResult {
            site_name: self.config.site_name.clone(),
            category: self.config.category.clone(),
            products,
            errors: errors.into_records(),
            log_errors: self.config.error_handling.log_errors,
        })
    }

    fn advance(&mut self, to: CrawlPhase) -> Result<(), ScoutError> {
        if !self.phase.can_transition_to(to) {
            return Err(ScoutError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!("Phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Walks every start URL's listing pages, filling the frontier
    ///
    /// Pages of one start URL are fetched strictly in order. A listing page
    /// that fails ends pagination for its start URL only.
    async fn discover_listings(
        &mut self,
        frontier: &mut CrawlFrontier,
        errors: &mut ErrorSink,
        limit: usize,
    ) {
        let start_urls = self.config.start_urls.clone();

        for start_url in &start_urls {
            let mut current_url = Some(start_url.clone());
            let mut page_number: u32 = 1;

            while let Some(url) = current_url {
                if frontier.size() >= limit {
                    tracing::debug!("Frontier full, not fetching {}", url);
                    break;
                }

                if page_number > 1 {
                    self.limiter.throttle().await;
                }

                tracing::info!("Scraping listing page: {}", url);
                match self.fetch_listing_links(&url).await {
                    Ok(links) => {
                        tracing::info!("Found {} product links", links.len());
                        frontier.add_all(links);
                        tracing::info!("Total unique products found: {}", frontier.size());
                    }
                    Err(e) => {
                        errors.record(&url, ErrorPhase::Listing, e.to_string());
                        break;
                    }
                }

                page_number += 1;
                current_url = next_page_url(&self.config.pagination, start_url, page_number);
            }
        }
    }

    async fn fetch_listing_links(&self, url: &str) -> Result<Vec<String>, ScoutError> {
        let page = self.fetcher.fetch(url).await?;
        let base_url = Url::parse(url)?;
        Ok(self.listing_links(&page.body, &base_url))
    }

    fn listing_links(&self, body: &str, base_url: &Url) -> Vec<String> {
        let document = Html::parse_document(body);
        self.listing_selector
            .select_all(&document)
            .iter()
            .filter_map(|href| resolve_link(base_url, href))
            .collect()
    }

    /// Visits each URL once, in discovery order
    ///
    /// With `skip_on_error` disabled the first failure ends the phase; the
    /// products collected before it are kept.
    async fn extract_details(
        &mut self,
        urls: &[String],
        errors: &mut ErrorSink,
    ) -> Vec<ProductRecord> {
        let mut products = Vec::with_capacity(urls.len());

        for url in urls {
            self.limiter.throttle().await;

            tracing::info!("Scraping product: {}", url);
            match self.scrape_product(url).await {
                Ok(product) => products.push(product),
                Err(e) => {
                    errors.record(url, ErrorPhase::Product, e.to_string());
                    if !self.config.error_handling.skip_on_error {
                        tracing::error!("Stopping due to error (skip_on_error=false)");
                        break;
                    }
                }
            }
        }

        products
    }

    async fn scrape_product(&self, url: &str) -> Result<ProductRecord, ScoutError> {
        let page = self.fetcher.fetch(url).await?;
        self.extract_product(url, &page.body)
    }

    fn extract_product(&self, url: &str, body: &str) -> Result<ProductRecord, ScoutError> {
        let page_url = Url::parse(url)?;
        let document = Html::parse_document(body);
        let fields = self.extractor.extract(&document, &page_url);

        Ok(ProductRecord {
            id: product_id(url),
            product_url: url.to_string(),
            category: self.config.category.clone(),
            fields,
        })
    }
}

/// Runs a complete scrape over HTTP
///
/// # Example
///
/// ```no_run
/// use shelf_scout::config::load_config;
/// use shelf_scout::crawler::scrape_site;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("watches.yaml"))?;
/// let result = scrape_site(config, 100).await?;
/// println!("{} products", result.total_products());
/// # Ok(())
/// # }
/// ```
pub async fn scrape_site(config: SiteConfig, limit: usize) -> Result<ScrapeResult, ScoutError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run(limit).await
}
