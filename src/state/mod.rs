//! State module for tracking scrape progress
//!
//! # Components
//!
//! - `CrawlPhase`: the forward-only phase machine a scrape run moves through
//! - `ErrorPhase`: the phase a recorded failure is attributed to

mod crawl_phase;

pub use crawl_phase::{CrawlPhase, ErrorPhase};
