//! Crawler module for page fetching and scrape orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - The deduplicated frontier of discovered product URLs
//! - Fixed-delay rate limiting
//! - Overall scrape coordination

mod coordinator;
mod fetcher;
mod frontier;
mod limiter;

pub use coordinator::{scrape_site, Coordinator};
pub use fetcher::{build_http_client, FetchedPage, HttpFetcher, PageFetcher};
pub use frontier::CrawlFrontier;
pub use limiter::RateLimiter;
