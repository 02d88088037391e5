//! Result types produced by a scrape run

use crate::extract::ExtractedFields;
use crate::state::ErrorPhase;
use serde::Serialize;

/// A product extracted from one detail page
///
/// Created once per successfully extracted page and never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    /// Stable identifier derived from the product URL
    pub id: String,

    pub product_url: String,

    pub category: String,

    #[serde(flatten)]
    pub fields: ExtractedFields,
}

/// A failure scoped to one URL and phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub url: String,
    pub phase: ErrorPhase,
    pub message: String,
}

/// Append-only collection of per-URL failures
///
/// Records are never deduplicated; the same URL may appear once per phase.
#[derive(Debug, Default)]
pub struct ErrorSink {
    records: Vec<ErrorRecord>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure without interrupting the run
    pub fn record(&mut self, url: &str, phase: ErrorPhase, message: impl Into<String>) {
        let record = ErrorRecord {
            url: url.to_string(),
            phase,
            message: message.into(),
        };
        tracing::warn!(
            "{} error for {}: {}",
            record.phase,
            record.url,
            record.message
        );
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }
}

/// Everything a scrape run produced
///
/// `errors` always holds every recorded failure; whether they appear in the
/// written document is decided by `log_errors` in [`ScrapeResult::document`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeResult {
    pub site_name: String,
    pub category: String,
    pub products: Vec<ProductRecord>,
    pub errors: Vec<ErrorRecord>,
    pub log_errors: bool,
}

impl ScrapeResult {
    pub fn total_products(&self) -> usize {
        self.products.len()
    }

    pub fn total_errors(&self) -> usize {
        self.errors.len()
    }

    /// The serializable result document
    ///
    /// The error list is empty when error logging is disabled, while
    /// `total_errors` still counts every failure.
    pub fn document(&self) -> ResultDocument<'_> {
        let errors: &[ErrorRecord] = if self.log_errors { &self.errors } else { &[] };

        ResultDocument {
            site_name: &self.site_name,
            category: &self.category,
            total_products: self.total_products(),
            total_errors: self.total_errors(),
            products: &self.products,
            errors,
        }
    }
}

/// Output document, in the field order it is written
#[derive(Debug, Serialize)]
pub struct ResultDocument<'a> {
    pub site_name: &'a str,
    pub category: &'a str,
    pub total_products: usize,
    pub total_errors: usize,
    pub products: &'a [ProductRecord],
    pub errors: &'a [ErrorRecord],
}
