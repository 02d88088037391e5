//! Console summary of a finished scrape run

use crate::output::types::ScrapeResult;
use crate::state::ErrorPhase;
use std::path::Path;

/// Counts derived from a scrape result
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub total_products: usize,
    pub total_errors: usize,
    pub listing_errors: usize,
    pub product_errors: usize,
    pub products_with_price: usize,
    /// Mean of the parsed prices; `None` when no price was parsed
    pub average_price: Option<f64>,
}

impl RunStatistics {
    pub fn from_result(result: &ScrapeResult) -> Self {
        let count_phase = |phase: ErrorPhase| result.errors.iter().filter(|e| e.phase == phase).count();

        Self {
            total_products: result.total_products(),
            total_errors: result.total_errors(),
            listing_errors: count_phase(ErrorPhase::Listing),
            product_errors: count_phase(ErrorPhase::Product),
            products_with_price: result
                .products
                .iter()
                .filter(|p| p.fields.price.is_some())
                .count(),
            average_price: average_price(result),
        }
    }

    /// Share of attempted detail pages that produced a product, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.total_products + self.product_errors;
        if attempted == 0 {
            return 0.0;
        }
        (self.total_products as f64 / attempted as f64) * 100.0
    }
}

fn average_price(result: &ScrapeResult) -> Option<f64> {
    let amounts: Vec<f64> = result
        .products
        .iter()
        .filter_map(|p| p.fields.price.as_ref().and_then(|price| price.amount()))
        .collect();

    if amounts.is_empty() {
        return None;
    }
    Some(amounts.iter().sum::<f64>() / amounts.len() as f64)
}

/// Prints the run summary to stdout
///
/// # Arguments
///
/// * `result` - The finished scrape result
/// * `output_path` - Where the result document was written
pub fn print_summary(result: &ScrapeResult, output_path: &Path) {
    let stats = RunStatistics::from_result(result);

    println!();
    println!("{}", "=".repeat(60));
    println!("SCRAPING COMPLETE");
    println!("{}", "=".repeat(60));
    println!("Site: {}", result.site_name);
    println!("Category: {}", result.category);
    println!("Products scraped: {}", stats.total_products);
    println!(
        "Errors encountered: {} (listing: {}, product: {})",
        stats.total_errors, stats.listing_errors, stats.product_errors
    );
    println!(
        "Products with price: {} / {}",
        stats.products_with_price, stats.total_products
    );
    if let Some(average) = stats.average_price {
        println!("Average price: {:.2}", average);
    }
    println!("Success rate: {:.1}%", stats.success_rate());
    println!("Output file: {}", output_path.display());
    println!("{}", "=".repeat(60));

    if let Some(sample) = result.products.first() {
        println!("\nSample product:");
        match serde_json::to_string_pretty(sample) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("Failed to render sample product: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{ExtractedFields, PriceValue};
    use crate::output::types::{ErrorRecord, ProductRecord};

    fn product(id: &str, price: Option<f64>) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            product_url: format!("https://a.com/p/{}", id),
            category: "watches".to_string(),
            fields: ExtractedFields {
                price: price.map(PriceValue::Amount),
                ..Default::default()
            },
        }
    }

    fn error(phase: ErrorPhase) -> ErrorRecord {
        ErrorRecord {
            url: "https://a.com/x".to_string(),
            phase,
            message: "HTTP 500".to_string(),
        }
    }

    #[test]
    fn test_statistics_from_result() {
        let result = ScrapeResult {
            site_name: "A".to_string(),
            category: "watches".to_string(),
            products: vec![product("1", Some(10.0)), product("2", None), product("3", Some(5.0))],
            errors: vec![error(ErrorPhase::Listing), error(ErrorPhase::Product)],
            log_errors: false,
        };

        let stats = RunStatistics::from_result(&result);
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_errors, 2);
        assert_eq!(stats.listing_errors, 1);
        assert_eq!(stats.product_errors, 1);
        assert_eq!(stats.products_with_price, 2);
        assert_eq!(stats.average_price, Some(7.5));
        assert!((stats.success_rate() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_nothing_attempted() {
        let result = ScrapeResult {
            site_name: "A".to_string(),
            category: "watches".to_string(),
            products: vec![],
            errors: vec![error(ErrorPhase::Listing)],
            log_errors: true,
        };
        let stats = RunStatistics::from_result(&result);
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.average_price, None);
    }
}
