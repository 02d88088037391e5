//! Output module for scrape results
//!
//! This module handles:
//! - The product, error and result types a run produces
//! - The append-only error sink used while crawling
//! - Writing the JSON result document
//! - Printing a console summary

mod json;
pub mod stats;
mod types;

pub use json::{default_output_path, to_json_string, write_result};
pub use stats::{print_summary, RunStatistics};
pub use types::{ErrorRecord, ErrorSink, ProductRecord, ResultDocument, ScrapeResult};
